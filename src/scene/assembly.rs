//! One-shot population of a [`Scene`] from a [`SceneProfile`]

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::Transform;
use super::environment::{Camera, Lighting, OrbitLimits, RenderSettings, Sky, Water};
use super::{Scene, SceneProfile};
use crate::factories::{self, centered, offset};
use crate::mesh::ParticleField;
use crate::sim::clock::FrameClock;

/// Where the island sits in the bay
pub const ISLAND_POSITION: Vec3 = Vec3::new(-25.0, 0.0, -30.0);
pub const ISLAND_SCALE: f32 = 1.2;

/// Build the full scene. Scene time starts at 0 ms, so every scheduled
/// behavior (crab turns, fish jumps) is relative to the first frame.
pub fn assemble(profile: SceneProfile, seed: u64) -> Scene {
    let mut rng = Pcg32::seed_from_u64(seed);
    let now_ms = 0.0;

    let terrain = vec![factories::sand_terrain(&mut rng), factories::far_dunes(&mut rng)];

    let mut vegetation = Vec::new();
    for &[x, z] in &profile.palm_anchors {
        vegetation.push(factories::palm_tree(Vec3::new(x, 0.0, z), &mut rng));
    }
    for &[x, z] in &profile.grass_anchors {
        vegetation.push(factories::beach_grass(Vec3::new(x, -1.0, z), &mut rng));
    }
    for _ in 0..profile.seaweed_count {
        let at = Vec3::new(centered(&mut rng, 80.0), -1.4, offset(&mut rng, 12.0, 25.0));
        vegetation.push(factories::seaweed(at, &mut rng));
    }

    let mut props = Vec::new();
    for _ in 0..profile.shell_count {
        let (x, z) = (centered(&mut rng, 80.0), offset(&mut rng, 15.0, 40.0));
        props.push(factories::seashell(x, z, &mut rng));
    }
    for _ in 0..profile.driftwood_count {
        let (x, z) = (centered(&mut rng, 60.0), offset(&mut rng, 20.0, 30.0));
        props.push(factories::driftwood(x, z, &mut rng));
    }
    for _ in 0..profile.ripple_count {
        let (x, z) = (centered(&mut rng, 100.0), centered(&mut rng, 60.0) + 20.0);
        props.push(factories::sand_ripple(x, z, &mut rng));
    }
    if profile.footprints {
        props.extend(factories::footprint_trail(profile.footprint_count, &mut rng));
    }
    for _ in 0..profile.tidal_pool_count {
        let (x, z) = (centered(&mut rng, 60.0), offset(&mut rng, 18.0, 15.0));
        let size = offset(&mut rng, 2.0, 2.0);
        props.push(factories::tidal_pool(x, z, size, &mut rng));
    }
    for _ in 0..profile.effective_amenities() {
        let (x, z) = (centered(&mut rng, 40.0), offset(&mut rng, 30.0, 20.0));
        props.push(factories::umbrella(x, z, &mut rng));
        let (x, z) = (centered(&mut rng, 50.0), offset(&mut rng, 25.0, 25.0));
        props.push(factories::towel(x, z, &mut rng));
    }

    let shoreline = factories::shoreline(&mut rng);
    let wet_sand = factories::wet_sand();

    let crabs = (0..profile.crab_count)
        .map(|_| factories::crab(&mut rng, now_ms))
        .collect::<Vec<_>>();
    let fish = (0..profile.fish_count)
        .map(|_| factories::fish(&mut rng, now_ms))
        .collect::<Vec<_>>();

    let island = profile.island.then(|| {
        factories::tropical_island(
            Transform::at(ISLAND_POSITION).with_scale(ISLAND_SCALE),
            &mut rng,
        )
    });

    let particles = (profile.effective_particles() > 0).then(|| {
        ParticleField::scatter(
            profile.effective_particles(),
            Vec3::new(-100.0, -2.0, -10.0),
            Vec3::new(100.0, 8.0, 90.0),
            &mut rng,
        )
    });

    let mut lighting = Lighting::default();
    scale_lighting(&mut lighting, profile.light_scale);

    // Runtime behavior draws from its own stream so adding a prop does not
    // shift every crab turn
    let runtime_seed = rng.random::<u64>();

    let scene = Scene {
        profile,
        camera: Camera::default(),
        orbit: OrbitLimits::default(),
        lighting,
        sky: Sky::default(),
        water: Water::default(),
        render: RenderSettings::default(),
        terrain,
        props,
        vegetation,
        crabs,
        fish,
        shoreline,
        wet_sand,
        island,
        particles,
        rng: Pcg32::seed_from_u64(runtime_seed),
        clock: FrameClock::new(),
    };

    log::info!(
        "Assembled {} scene: {} roots, {} nodes, {} crabs, {} fish, {} particles",
        scene.profile.preset.as_str(),
        scene.roots().count(),
        scene.node_count(),
        scene.crabs.len(),
        scene.fish.len(),
        scene.particles.as_ref().map_or(0, ParticleField::len),
    );
    scene
}

/// Multiply every light intensity by the profile's light scale
pub fn scale_lighting(lighting: &mut Lighting, scale: f32) {
    lighting.ambient.intensity *= scale;
    lighting.sun.intensity *= scale;
    lighting.rim.intensity *= scale;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{AnimationState, EntityKind, ProfilePreset};

    #[test]
    fn test_default_counts() {
        let scene = assemble(SceneProfile::default(), 42);
        assert_eq!(scene.crabs.len(), 8);
        assert_eq!(scene.fish.len(), 5);
        assert_eq!(scene.particles.as_ref().unwrap().len(), 2000);
        let palms = scene.vegetation.iter().filter(|e| e.kind == EntityKind::PalmTree).count();
        assert_eq!(palms, 4);
        let grass = scene.vegetation.iter().filter(|e| e.kind == EntityKind::GrassCluster).count();
        assert_eq!(grass, 5);
        let pools = scene.props.iter().filter(|e| e.kind == EntityKind::TidalPool).count();
        assert_eq!(pools, 5);
        assert!(scene.island.is_some());
    }

    #[test]
    fn test_coordinate_ranges() {
        let scene = assemble(SceneProfile::default(), 7);
        for crab in &scene.crabs {
            let p = crab.transform.position;
            assert!((-20.0..20.0).contains(&p.x) && (20.0..40.0).contains(&p.z));
        }
        for fish in &scene.fish {
            let p = fish.transform.position;
            assert!((-30.0..30.0).contains(&p.x) && (-10.0..10.0).contains(&p.z));
            assert!(matches!(fish.animation, Some(AnimationState::Fish(s)) if s.jump_time_ms < 10_000.0));
        }
        for shell in scene.props.iter().filter(|e| e.kind == EntityKind::Seashell) {
            let p = shell.transform.position;
            assert!((-40.0..40.0).contains(&p.x) && (15.0..55.0).contains(&p.z));
        }
        let particles = scene.particles.as_ref().unwrap();
        for i in 0..particles.len() {
            let p = particles.position(i);
            assert!((-2.0..=8.0).contains(&p.y) && (-10.0..=90.0).contains(&p.z));
        }
    }

    #[test]
    fn test_same_seed_same_scene() {
        let a = assemble(SceneProfile::from_preset(ProfilePreset::Lite), 99);
        let b = assemble(SceneProfile::from_preset(ProfilePreset::Lite), 99);
        let pose = |s: &Scene| s.crabs.iter().map(|c| (c.transform, c.animation)).collect::<Vec<_>>();
        assert_eq!(pose(&a), pose(&b));
        assert_eq!(a.particles.unwrap().positions, b.particles.unwrap().positions);
    }

    #[test]
    fn test_profile_toggles() {
        let scene = assemble(SceneProfile::from_preset(ProfilePreset::Tranquil), 3);
        assert!(!scene.props.iter().any(|e| e.kind == EntityKind::Umbrella));
        assert!(!scene.props.iter().any(|e| e.kind == EntityKind::Footprint));
        assert!((scene.lighting.sun.intensity - 1.2 * 0.85).abs() < 1e-5);

        let lite = assemble(SceneProfile::from_preset(ProfilePreset::Lite), 3);
        assert!(lite.island.is_none());
    }

    #[test]
    fn test_island_placement() {
        let scene = assemble(SceneProfile::default(), 5);
        let island = scene.island.as_ref().unwrap();
        assert_eq!(island.transform.position, ISLAND_POSITION);
        assert_eq!(island.transform.scale, Vec3::splat(ISLAND_SCALE));
    }
}
