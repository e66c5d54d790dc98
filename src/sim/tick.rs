//! Per-frame scene update
//!
//! Every animated entity carries an [`AnimationState`]; this module matches on
//! it and rewrites the entity's transform (and sometimes its opacity) for the
//! current frame. Time-only behaviors are pure functions of `now_ms` and their
//! stored base values. Motion that accumulates (crab steps, bird orbits, spin,
//! particle drift) is scaled by the frame length so speed does not depend on
//! the display refresh rate.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::clock::FrameTime;
use crate::consts::*;
use crate::normalize_angle;
use crate::scene::animation::{
    AnimationState, BirdState, CrabState, CrestState, DriftState, FishPhase, FishState, FoamState,
    ShimmerState, SwayState, WingState,
};
use crate::scene::entity::{Entity, Transform};
use crate::scene::Scene;

/// `sin(now·frequency + phase)`, evaluated in f64 so long sessions keep precision
#[inline]
fn wave(now_ms: f64, frequency: f32, phase: f32) -> f32 {
    (now_ms * frequency as f64 + phase as f64).sin() as f32
}

/// Sample the scene clock and advance one frame
pub fn step(scene: &mut Scene, wall_ms: f64) -> FrameTime {
    let frame = scene.clock.sample(wall_ms);
    tick(scene, frame);
    frame
}

/// Advance every animated entity, the sand particles and the water by one frame
pub fn tick(scene: &mut Scene, frame: FrameTime) {
    let Scene {
        terrain,
        props,
        vegetation,
        crabs,
        fish,
        shoreline,
        wet_sand,
        island,
        particles,
        water,
        rng,
        ..
    } = scene;

    let mut visit = |entity: &mut Entity| animate(entity, frame, rng);
    for root in terrain
        .iter_mut()
        .chain(props.iter_mut())
        .chain(vegetation.iter_mut())
        .chain(crabs.iter_mut())
        .chain(fish.iter_mut())
        .chain(std::iter::once(shoreline))
        .chain(std::iter::once(wet_sand))
        .chain(island.iter_mut())
    {
        root.walk_mut(&mut visit);
    }

    if let Some(particles) = particles {
        particles.update(frame.now_ms, frame.frame_scale());
    }
    water.time += frame.dt;
}

/// Apply one frame of behavior to a single node (children are not visited)
pub fn animate<R: Rng + ?Sized>(entity: &mut Entity, frame: FrameTime, rng: &mut R) {
    let Some(animation) = entity.animation.as_mut() else {
        return;
    };
    let now = frame.now_ms;

    match animation {
        AnimationState::Crab(state) => update_crab(&mut entity.transform, state, frame, rng),
        AnimationState::Fish(state) => update_fish(&mut entity.transform, state, now, rng),
        AnimationState::Sway(state) => sway(&mut entity.transform, state, now),
        AnimationState::Foam(state) => {
            let state = *state;
            entity.transform.position.z = state.base_z + 3.0 * wave(now, 0.001, state.phase);
            set_opacity(entity, foam_opacity(&state, now));
        }
        AnimationState::Crest(state) => crest(&mut entity.transform, state, now),
        AnimationState::Shimmer(state) => {
            let state = *state;
            entity.transform.rotation.y += state.spin * frame.frame_scale();
            set_opacity(entity, shimmer_opacity(&state, now));
        }
        AnimationState::Bird(state) => update_bird(&mut entity.transform, state, frame),
        AnimationState::Wing(state) => flap(&mut entity.transform, state, now),
        AnimationState::Drift(state) => drift(&mut entity.transform, state, now),
    }
}

fn set_opacity(entity: &mut Entity, opacity: f32) {
    if let Some(material) = entity.material_mut() {
        material.opacity = opacity;
    }
}

fn update_crab<R: Rng + ?Sized>(transform: &mut Transform, state: &mut CrabState, frame: FrameTime, rng: &mut R) {
    let now = frame.now_ms;
    if now > state.next_turn_ms {
        state.heading = normalize_angle(state.heading + rng.random_range(-FRAC_PI_2..=FRAC_PI_2));
        state.next_turn_ms = now + rng.random_range(CRAB_TURN_MIN_MS..=CRAB_TURN_MAX_MS);
        log::debug!("Crab turned to {:.2} rad, next turn at {:.0} ms", state.heading, state.next_turn_ms);
    }

    let step = state.speed * frame.frame_scale();
    transform.position.x += state.heading.cos() * step;
    transform.position.z += state.heading.sin() * step;

    // Soft bounds: turn around, but only while still walking outward
    let (dx, dz) = (state.heading.cos(), state.heading.sin());
    let p = transform.position;
    let outward = (p.x > CRAB_X_LIMIT && dx > 0.0)
        || (p.x < -CRAB_X_LIMIT && dx < 0.0)
        || (p.z > CRAB_Z_MAX && dz > 0.0)
        || (p.z < CRAB_Z_MIN && dz < 0.0);
    if outward {
        state.heading = normalize_angle(state.heading + PI);
    }

    transform.rotation.y = state.heading + FRAC_PI_2;
    transform.position.y = CRAB_BASE_Y + wave(now, 0.01, 0.0).abs() * 0.02;
    transform.rotation.z = wave(now, 0.01, 0.0) * 0.1;
}

fn update_fish<R: Rng + ?Sized>(transform: &mut Transform, state: &mut FishState, now: f64, rng: &mut R) {
    if state.phase == FishPhase::Submerged {
        if now < state.jump_time_ms {
            transform.position = state.rest;
            transform.position.y = state.rest.y + wave(now, 0.001, 0.0) * 0.2;
            transform.rotation = Vec3::new(0.0, 0.0, wave(now, 0.002, 0.0) * 0.1);
            return;
        }
        state.phase = FishPhase::Jumping;
        log::debug!("Fish leaping from ({:.1}, {:.1})", state.rest.x, state.rest.z);
    }

    let progress = state.progress(now);
    if progress >= 1.0 {
        state.phase = FishPhase::Submerged;
        state.jump_time_ms = now + rng.random_range(FISH_REST_MIN_MS..=FISH_REST_MAX_MS);
        transform.position = state.rest;
        transform.rotation = Vec3::ZERO;
        return;
    }

    let arc = (PI * progress).sin();
    transform.position = Vec3::new(
        state.rest.x,
        state.rest.y + arc * FISH_JUMP_HEIGHT,
        state.rest.z + FISH_JUMP_FORWARD * progress,
    );
    transform.rotation = Vec3::new(TAU * progress, 0.0, arc * 0.3);
}

fn sway(transform: &mut Transform, state: &SwayState, now: f64) {
    transform.rotation.z = state.base_rotation + state.amplitude * wave(now, state.frequency, state.phase);
}

fn foam_opacity(state: &FoamState, now: f64) -> f32 {
    state.base_opacity + 0.2 * wave(now, 0.002, 0.0)
}

fn crest(transform: &mut Transform, state: &CrestState, now: f64) {
    transform.position.y = state.base_y + 0.1 * wave(now, 0.003, state.phase);
}

fn shimmer_opacity(state: &ShimmerState, now: f64) -> f32 {
    state.base_opacity + state.amplitude * wave(now, state.frequency, 0.0)
}

fn update_bird(transform: &mut Transform, state: &mut BirdState, frame: FrameTime) {
    state.angle = (state.angle + state.angular_speed * frame.frame_scale()) % TAU;
    let xz = crate::polar_to_xz(state.radius, state.angle);
    transform.position = Vec3::new(xz.x, state.height + 2.0 * wave(frame.now_ms, 0.001, state.angle), xz.y);
    transform.rotation.y = state.angle + FRAC_PI_2;
}

fn flap(transform: &mut Transform, state: &WingState, now: f64) {
    transform.rotation.z = state.side * (0.5 * wave(now, 0.01, 0.0) + 0.3);
}

fn drift(transform: &mut Transform, state: &DriftState, now: f64) {
    transform.rotation.y = state.amplitude * wave(now, state.frequency, 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factories::{crab_with_state, fish_with_state};
    use crate::scene::assembly::assemble;
    use crate::scene::{EntityKind, ProfilePreset, SceneProfile};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn calm_crab(heading: f32, at: Vec3) -> Entity {
        crab_with_state(
            at,
            1.0,
            CrabState {
                speed: 0.02,
                heading,
                next_turn_ms: f64::INFINITY,
            },
        )
    }

    fn crab_state(entity: &Entity) -> CrabState {
        match entity.animation {
            Some(AnimationState::Crab(state)) => state,
            other => panic!("not a crab: {:?}", other),
        }
    }

    fn fish_state(entity: &Entity) -> FishState {
        match entity.animation {
            Some(AnimationState::Fish(state)) => state,
            other => panic!("not a fish: {:?}", other),
        }
    }

    #[test]
    fn test_crab_steps_along_heading() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut crab = calm_crab(0.0, Vec3::new(0.0, CRAB_BASE_Y, 30.0));
        animate(&mut crab, FrameTime::reference(100.0), &mut rng);
        assert!((crab.transform.position.x - 0.02).abs() < 1e-6);
        assert_eq!(crab.transform.position.z, 30.0);
        assert!((crab.transform.rotation.y - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_crab_heading_stable_without_turn() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut crab = calm_crab(1.1, Vec3::new(0.0, CRAB_BASE_Y, 30.0));
        for i in 0..200 {
            animate(&mut crab, FrameTime::reference(i as f64 * 16.7), &mut rng);
        }
        assert_eq!(crab_state(&crab).heading, 1.1);
    }

    #[test]
    fn test_crab_turn_is_bounded_and_rescheduled() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut crab = crab_with_state(
            Vec3::new(0.0, CRAB_BASE_Y, 30.0),
            1.0,
            CrabState {
                speed: 0.02,
                heading: 0.0,
                next_turn_ms: 50.0,
            },
        );
        animate(&mut crab, FrameTime::reference(100.0), &mut rng);
        let state = crab_state(&crab);
        assert!(state.heading.abs() <= FRAC_PI_2 + 1e-6);
        assert!((3100.0..=8100.0).contains(&state.next_turn_ms));
    }

    #[test]
    fn test_crab_reverses_once_at_bound() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut crab = calm_crab(0.0, Vec3::new(CRAB_X_LIMIT + 1.0, CRAB_BASE_Y, 30.0));
        animate(&mut crab, FrameTime::reference(0.0), &mut rng);
        let reversed = crab_state(&crab).heading;
        assert!(reversed.cos() < -0.99);

        // Still outside but heading inward: no second reversal
        animate(&mut crab, FrameTime::reference(16.0), &mut rng);
        assert_eq!(crab_state(&crab).heading, reversed);
        assert!(crab.transform.position.x < CRAB_X_LIMIT + 1.0 + 0.02);
    }

    #[test]
    fn test_crab_speed_independent_of_frame_rate() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut fast = calm_crab(0.0, Vec3::new(0.0, CRAB_BASE_Y, 30.0));
        let mut slow = fast.clone();
        for i in 0..4 {
            animate(&mut fast, FrameTime::new(i as f64 * 16.0, 1.0 / 60.0), &mut rng);
        }
        for i in 0..2 {
            animate(&mut slow, FrameTime::new(i as f64 * 33.0, 1.0 / 30.0), &mut rng);
        }
        assert!((fast.transform.position.x - slow.transform.position.x).abs() < 1e-5);
    }

    #[test]
    fn test_crab_bob_stays_near_base() {
        let mut rng = Pcg32::seed_from_u64(6);
        let mut crab = calm_crab(0.5, Vec3::new(0.0, CRAB_BASE_Y, 30.0));
        for i in 0..100 {
            animate(&mut crab, FrameTime::reference(i as f64 * 37.0), &mut rng);
            let y = crab.transform.position.y;
            assert!((CRAB_BASE_Y..=CRAB_BASE_Y + 0.02).contains(&y));
            assert!(crab.transform.rotation.z.abs() <= 0.1);
        }
    }

    fn jumping_fish(jump_time_ms: f64) -> Entity {
        fish_with_state(FishState {
            phase: FishPhase::Submerged,
            jump_time_ms,
            jump_duration_ms: 2000.0,
            rest: Vec3::new(4.0, FISH_REST_Y, -2.0),
        })
    }

    #[test]
    fn test_fish_peak_at_half_progress() {
        let mut rng = Pcg32::seed_from_u64(7);
        let now = 10_000.0;
        let mut fish = jumping_fish(now - 1.0);
        animate(&mut fish, FrameTime::reference(now), &mut rng);
        assert_eq!(fish_state(&fish).phase, FishPhase::Jumping);

        animate(&mut fish, FrameTime::reference(now - 1.0 + 1000.0), &mut rng);
        let p = fish.transform.position;
        assert!((p.y - (FISH_REST_Y + FISH_JUMP_HEIGHT)).abs() < 1e-4);
        assert!((p.z - (-2.0 + FISH_JUMP_FORWARD * 0.5)).abs() < 1e-4);
        assert!((fish.transform.rotation.x - PI).abs() < 1e-4);
    }

    #[test]
    fn test_fish_arc_starts_at_rest_height() {
        let mut rng = Pcg32::seed_from_u64(8);
        let mut fish = jumping_fish(500.0);
        animate(&mut fish, FrameTime::reference(500.0), &mut rng);
        assert!((fish.transform.position.y - FISH_REST_Y).abs() < 1e-5);
    }

    #[test]
    fn test_fish_lands_and_reschedules() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut fish = jumping_fish(0.0);
        animate(&mut fish, FrameTime::reference(0.0), &mut rng);
        animate(&mut fish, FrameTime::reference(2000.0), &mut rng);

        let state = fish_state(&fish);
        assert_eq!(state.phase, FishPhase::Submerged);
        assert!((7000.0..=17000.0).contains(&state.jump_time_ms));
        assert_eq!(fish.transform.position, state.rest);
        assert_eq!(fish.transform.rotation, Vec3::ZERO);
    }

    #[test]
    fn test_submerged_fish_bobs() {
        let mut rng = Pcg32::seed_from_u64(10);
        let mut fish = jumping_fish(1e9);
        for i in 0..50 {
            animate(&mut fish, FrameTime::reference(i as f64 * 100.0), &mut rng);
            assert!((fish.transform.position.y - FISH_REST_Y).abs() <= 0.2 + 1e-6);
            assert_eq!(fish_state(&fish).phase, FishPhase::Submerged);
        }
    }

    #[test]
    fn test_wings_mirror() {
        let mut left = Transform::default();
        let mut right = Transform::default();
        flap(&mut left, &WingState { side: -1.0 }, 420.0);
        flap(&mut right, &WingState { side: 1.0 }, 420.0);
        assert_eq!(left.rotation.z, -right.rotation.z);
    }

    #[test]
    fn test_bird_orbits_at_fixed_radius() {
        let mut transform = Transform::default();
        let mut state = BirdState {
            angle: 0.0,
            radius: 30.0,
            height: 15.0,
            angular_speed: 0.001,
        };
        update_bird(&mut transform, &mut state, FrameTime::reference(0.0));
        assert!((state.angle - 0.001).abs() < 1e-7);
        let horizontal = glam::Vec2::new(transform.position.x, transform.position.z).length();
        assert!((horizontal - 30.0).abs() < 1e-4);
        assert!((transform.position.y - 15.0).abs() <= 2.0);
    }

    #[test]
    fn test_shimmer_spin_scales_with_frame() {
        let mut scene = assemble(SceneProfile::default(), 11);
        let ring_yaw = |s: &Scene| s.island.as_ref().unwrap().find(EntityKind::FoamRing).unwrap().transform.rotation.y;
        let before = ring_yaw(&scene);
        tick(&mut scene, FrameTime::new(0.0, 2.0 / 60.0));
        assert!((ring_yaw(&scene) - before - 0.001).abs() < 1e-6);
    }

    #[test]
    fn test_scene_tick_advances_water_and_particles() {
        let mut scene = assemble(SceneProfile::from_preset(ProfilePreset::Lite), 12);
        scene.particles.as_mut().unwrap().take_dirty();
        let water_before = scene.water.time;
        step(&mut scene, 1000.0);
        step(&mut scene, 1016.0);
        assert!((scene.water.time - water_before - (1.0 / 60.0 + 0.016)).abs() < 1e-5);
        assert!(scene.particles.as_mut().unwrap().take_dirty());
    }

    #[test]
    fn test_wet_sand_opacity_follows_time() {
        let mut scene = assemble(SceneProfile::from_preset(ProfilePreset::Lite), 13);
        tick(&mut scene, FrameTime::reference(0.0));
        assert!((scene.wet_sand.material().unwrap().opacity - 0.8).abs() < 1e-6);
        let quarter = std::f64::consts::FRAC_PI_2 / 0.001;
        tick(&mut scene, FrameTime::reference(quarter));
        assert!((scene.wet_sand.material().unwrap().opacity - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_stateless_updates_are_idempotent() {
        let mut rng = Pcg32::seed_from_u64(14);
        let mut scene = assemble(SceneProfile::from_preset(ProfilePreset::Lite), 14);
        let frame = FrameTime::reference(1234.0);

        let mut first = Vec::new();
        let mut second = Vec::new();
        for pass in [&mut first, &mut second] {
            for root in scene.vegetation.iter_mut().chain(std::iter::once(&mut scene.shoreline)) {
                root.walk_mut(&mut |e| {
                    if e.animation.is_some_and(|a| a.is_stateless()) {
                        animate(e, frame, &mut rng);
                        pass.push((e.transform, e.material().map(|m| m.opacity)));
                    }
                });
            }
        }
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn prop_sway_is_pure(now in 0.0f64..1e7, base in -1.0f32..1.0, phase in -50.0f32..50.0) {
            let state = SwayState::grass(base, phase);
            let mut a = Transform::default();
            let mut b = Transform { position: Vec3::ONE, ..Default::default() };
            sway(&mut a, &state, now);
            sway(&mut b, &state, now);
            sway(&mut b, &state, now);
            prop_assert_eq!(a.rotation.z, b.rotation.z);
            prop_assert!((a.rotation.z - base).abs() <= 0.1 + 1e-6);
        }

        #[test]
        fn prop_crest_stays_near_base(now in 0.0f64..1e7, base in -1.0f32..1.0, phase in 0.0f32..6.0) {
            let mut t = Transform::default();
            crest(&mut t, &CrestState { base_y: base, phase }, now);
            prop_assert!((t.position.y - base).abs() <= 0.1 + 1e-6);
        }
    }
}
