//! Crabs, fish and birds

use glam::Vec3;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, TAU};

use super::{centered, offset, shared, upright_quad};
use crate::consts::{CRAB_BASE_Y, FISH_JUMP_DURATION_MS, FISH_REST_Y};
use crate::mesh::primitives;
use crate::scene::animation::{AnimationState, BirdState, CrabState, FishPhase, FishState, WingState};
use crate::scene::entity::{Entity, EntityKind, Transform};
use crate::scene::material::Material;

/// Crab with fully specified behavior state
pub fn crab_with_state(position: Vec3, scale: f32, state: CrabState) -> Entity {
    let shell = Material::from_hex(0xff6347, 0.7, 0.1);
    let leg_material = Material::from_hex(0xff4500, 0.8, 0.0);
    let eye_material = Material::from_hex(0x000000, 1.0, 0.0);

    let body = shared(primitives::sphere(0.3, 8, 6).scaled(Vec3::new(1.2, 0.6, 1.0)));
    let claw = shared(primitives::sphere(0.15, 6, 4).scaled(Vec3::new(1.5, 1.0, 0.8)));
    let leg = shared(primitives::cylinder(0.02, 0.02, 0.3, 4, 1));
    let eye = shared(primitives::sphere(0.05, 4, 4));

    let mut crab = Entity::group(
        EntityKind::Crab,
        Transform::at(position)
            .with_rotation(Vec3::new(0.0, state.heading + FRAC_PI_2, 0.0))
            .with_scale(scale),
    )
    .with_animation(AnimationState::Crab(state));

    crab.children
        .push(Entity::mesh(EntityKind::Part, body, shell, Transform::default()).casting_shadow());

    for side in [-1.0f32, 1.0] {
        crab.children.push(Entity::mesh(
            EntityKind::Part,
            claw.clone(),
            shell,
            Transform::at(Vec3::new(0.4 * side, 0.0, 0.2)).with_rotation(Vec3::new(0.0, 0.0, 0.3 * side)),
        ));
        for i in 0..3 {
            crab.children.push(Entity::mesh(
                EntityKind::Part,
                leg.clone(),
                leg_material,
                Transform::at(Vec3::new(0.3 * side, -0.1, -0.1 + i as f32 * 0.1))
                    .with_rotation(Vec3::new(0.0, 0.0, FRAC_PI_3 * side)),
            ));
        }
        crab.children.push(Entity::mesh(
            EntityKind::Part,
            eye.clone(),
            eye_material,
            Transform::at(Vec3::new(0.1 * side, 0.15, 0.2)),
        ));
    }
    crab
}

/// Crab at a random spot on the beach, scheduled to turn within 5 s of `now_ms`
pub fn crab<R: Rng + ?Sized>(rng: &mut R, now_ms: f64) -> Entity {
    let position = Vec3::new(centered(rng, 40.0), CRAB_BASE_Y, offset(rng, 20.0, 20.0));
    let scale = offset(rng, 0.5, 0.3);
    let state = CrabState {
        speed: offset(rng, 0.02, 0.03),
        heading: rng.random::<f32>() * TAU,
        next_turn_ms: now_ms + rng.random::<f64>() * 5000.0,
    };
    crab_with_state(position, scale, state)
}

/// Silver fish with fully specified jump state
pub fn fish_with_state(state: FishState) -> Entity {
    let material = Material::from_hex(0xc0c0c0, 0.2, 0.8).with_clearcoat(0.5);
    let body = shared(primitives::sphere(0.4, 8, 6).scaled(Vec3::new(1.5, 0.7, 0.5)));
    let tail = shared(primitives::cone(0.3, 0.6, 4, 1));
    let fin = shared(primitives::cone(0.2, 0.3, 3, 1));

    // A jumping fish is posed by its first update
    Entity::group(EntityKind::Fish, Transform::at(state.rest))
        .with_animation(AnimationState::Fish(state))
        .with_child(Entity::mesh(EntityKind::Part, body, material, Transform::default()))
        .with_child(Entity::mesh(
            EntityKind::Part,
            tail,
            material,
            Transform {
                position: Vec3::new(-0.8, 0.0, 0.0),
                rotation: Vec3::new(0.0, 0.0, -FRAC_PI_2),
                scale: Vec3::new(1.0, 1.5, 0.5),
            },
        ))
        .with_child(Entity::mesh(
            EntityKind::Part,
            fin,
            material,
            Transform {
                position: Vec3::new(0.0, 0.3, 0.0),
                rotation: Vec3::ZERO,
                scale: Vec3::new(0.5, 1.0, 0.3),
            },
        ))
}

/// Fish resting offshore, first jump within 10 s of `now_ms`
pub fn fish<R: Rng + ?Sized>(rng: &mut R, now_ms: f64) -> Entity {
    let rest = Vec3::new(centered(rng, 60.0), FISH_REST_Y, offset(rng, -10.0, 20.0));
    fish_with_state(FishState {
        phase: FishPhase::Submerged,
        jump_time_ms: now_ms + rng.random::<f64>() * 10_000.0,
        jump_duration_ms: FISH_JUMP_DURATION_MS,
        rest,
    })
}

/// Gull `index` of the island flock. Orbit radius and height grow with the
/// index; the starting angle spreads the flock evenly.
pub fn bird<R: Rng + ?Sized>(index: usize, flock_size: usize, rng: &mut R) -> Entity {
    let material = Material::from_hex(0xffffff, 0.8, 0.0);
    let body = shared(primitives::cone(0.2, 1.0, 4, 1));
    let wing = shared(upright_quad(0.8, 0.3));

    let state = BirdState {
        angle: index as f32 / flock_size.max(1) as f32 * TAU,
        radius: 30.0 + index as f32 * 5.0,
        height: 15.0 + index as f32 * 3.0,
        angular_speed: offset(rng, 0.0005, 0.0005),
    };

    let mut bird = Entity::mesh(
        EntityKind::Bird,
        body,
        material,
        Transform::default().with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0)),
    )
    .with_animation(AnimationState::Bird(state));

    for side in [-1.0f32, 1.0] {
        bird.children.push(
            Entity::mesh(
                EntityKind::Wing,
                wing.clone(),
                material,
                Transform::at(Vec3::new(0.4 * side, 0.0, 0.0)).with_rotation(Vec3::new(0.0, 0.0, 0.3 * side)),
            )
            .with_animation(AnimationState::Wing(WingState { side })),
        );
    }
    bird
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_random_crab_ranges() {
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..50 {
            let c = crab(&mut rng, 1000.0);
            let p = c.transform.position;
            assert!((-20.0..20.0).contains(&p.x));
            assert!((20.0..40.0).contains(&p.z));
            assert_eq!(p.y, CRAB_BASE_Y);
            assert!((0.5..0.8).contains(&c.transform.scale.x));
            match c.animation {
                Some(AnimationState::Crab(s)) => {
                    assert!((0.02..0.05).contains(&s.speed));
                    assert!((0.0..TAU).contains(&s.heading));
                    assert!(s.next_turn_ms >= 1000.0 && s.next_turn_ms < 6000.0);
                }
                other => panic!("unexpected animation {:?}", other),
            }
        }
    }

    #[test]
    fn test_crab_faces_its_heading() {
        let state = CrabState {
            speed: 0.02,
            heading: 0.5,
            next_turn_ms: 0.0,
        };
        let c = crab_with_state(Vec3::new(0.0, CRAB_BASE_Y, 30.0), 0.6, state);
        assert!((c.transform.rotation.y - (0.5 + FRAC_PI_2)).abs() < 1e-6);
        // body, 2 claws, 6 legs, 2 eyes
        assert_eq!(c.children.len(), 11);
    }

    #[test]
    fn test_random_fish_starts_at_rest() {
        let mut rng = Pcg32::seed_from_u64(8);
        let f = fish(&mut rng, 0.0);
        match f.animation {
            Some(AnimationState::Fish(s)) => {
                assert_eq!(s.phase, FishPhase::Submerged);
                assert_eq!(f.transform.position, s.rest);
                assert_eq!(s.rest.y, FISH_REST_Y);
                assert!(s.jump_time_ms < 10_000.0);
                assert_eq!(s.jump_duration_ms, FISH_JUMP_DURATION_MS);
            }
            other => panic!("unexpected animation {:?}", other),
        }
    }

    #[test]
    fn test_bird_flock_spacing() {
        let mut rng = Pcg32::seed_from_u64(1);
        let b = bird(2, 3, &mut rng);
        match b.animation {
            Some(AnimationState::Bird(s)) => {
                assert!((s.angle - TAU * 2.0 / 3.0).abs() < 1e-5);
                assert_eq!(s.radius, 40.0);
                assert_eq!(s.height, 21.0);
            }
            other => panic!("unexpected animation {:?}", other),
        }
        assert_eq!(b.children.iter().filter(|c| c.kind == EntityKind::Wing).count(), 2);
    }
}
