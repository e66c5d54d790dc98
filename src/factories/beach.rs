//! Sand terrain and beach props

use glam::Vec3;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::{centered, offset, shared};
use crate::mesh::{height_field_patch, primitives, GridSpec};
use crate::noise::{DuneField, RippleStrip, RollingDunes};
use crate::polar_to_xz;
use crate::scene::entity::{Entity, EntityKind, Transform};
use crate::scene::material::{hsl, Material};

const FOOTPRINT_Y: f32 = -1.42;
const TIDAL_POOL_ROCKS: usize = 8;

/// Main dune patch in front of the camera
pub fn sand_terrain<R: Rng + ?Sized>(rng: &mut R) -> Entity {
    let mesh = height_field_patch(GridSpec::new(300.0, 150.0, 256, 256), &DuneField::default(), 0.1, rng);
    Entity::mesh(
        EntityKind::Terrain,
        shared(mesh),
        Material::from_hex(0xf4e4c1, 0.95, 0.0),
        Transform::at(Vec3::new(0.0, -1.5, 40.0)),
    )
    .casting_shadow()
    .receiving_shadow()
}

/// Coarser rolling dunes behind the main patch
pub fn far_dunes<R: Rng + ?Sized>(rng: &mut R) -> Entity {
    let mesh = height_field_patch(GridSpec::new(400.0, 200.0, 64, 64), &RollingDunes::default(), 0.5, rng);
    Entity::mesh(
        EntityKind::Terrain,
        shared(mesh),
        Material::from_hex(0xe8d4b0, 0.95, 0.0),
        Transform::at(Vec3::new(0.0, -2.0, 80.0)),
    )
    .receiving_shadow()
}

pub fn seashell<R: Rng + ?Sized>(x: f32, z: f32, rng: &mut R) -> Entity {
    let mesh = primitives::sphere(0.2, 16, 8).scaled(Vec3::new(1.0, 0.6, 0.8));
    let transform = Transform {
        position: Vec3::new(x, offset(rng, -1.3, 0.1), z),
        rotation: Vec3::new(rng.random::<f32>() * PI, rng.random::<f32>() * PI, rng.random::<f32>() * PI),
        scale: Vec3::splat(offset(rng, 0.5, 0.5)),
    };
    Entity::mesh(
        EntityKind::Seashell,
        shared(mesh),
        Material::from_hex(0xffdab9, 0.3, 0.1).with_clearcoat(0.3),
        transform,
    )
    .casting_shadow()
}

pub fn driftwood<R: Rng + ?Sized>(x: f32, z: f32, rng: &mut R) -> Entity {
    let length = offset(rng, 3.0, 2.0);
    let rotation = Vec3::new(FRAC_PI_2 + rng.random::<f32>() * 0.3, rng.random::<f32>() * PI, 0.0);
    Entity::mesh(
        EntityKind::Driftwood,
        shared(primitives::cylinder(0.1, 0.15, length, 6, 1)),
        Material::from_hex(0x8b7355, 0.9, 0.0),
        Transform::at(Vec3::new(x, -1.2, z)).with_rotation(rotation),
    )
    .casting_shadow()
}

/// Narrow wind-ripple strip at a random spot and yaw
pub fn sand_ripple<R: Rng + ?Sized>(x: f32, z: f32, rng: &mut R) -> Entity {
    let width = offset(rng, 2.0, 3.0);
    let mesh = height_field_patch(GridSpec::new(width, 0.2, 32, 2), &RippleStrip, 0.0, rng);
    let transform = Transform::at(Vec3::new(x, offset(rng, -1.4, 0.1), z))
        .with_rotation(Vec3::new(0.0, rng.random::<f32>() * PI, 0.0));
    Entity::mesh(
        EntityKind::SandRipple,
        shared(mesh),
        Material::from_hex(0xe8d4b0, 0.9, 0.0),
        transform,
    )
    .casting_shadow()
    .receiving_shadow()
}

/// Shallow oval imprint pressed into the sand
pub fn footprint(x: f32, z: f32, yaw: f32) -> Entity {
    let mesh = primitives::cylinder(0.15, 0.18, 0.05, 8, 1).scaled(Vec3::new(1.5, 1.0, 1.0));
    Entity::mesh(
        EntityKind::Footprint,
        shared(mesh),
        Material::from_hex(0xd4a574, 0.9, 0.0),
        Transform::at(Vec3::new(x, FOOTPRINT_Y, z)).with_rotation(Vec3::new(0.0, yaw, 0.0)),
    )
}

/// Trail of alternating left/right prints along a gentle sine path
pub fn footprint_trail<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Entity> {
    (0..count)
        .map(|i| {
            let s = i as f32;
            let path_x = -20.0 + s * 2.0 + centered(rng, 0.5);
            let path_z = 25.0 + (s * 0.3).sin() * 3.0;
            let lateral = if i % 2 == 0 { -0.3 } else { 0.3 };
            // Face along the path tangent
            let yaw = 2.0f32.atan2((s * 0.3).cos() * 3.0 * 0.3);
            footprint(path_x + lateral, path_z, yaw)
        })
        .collect()
}

/// Rock-rimmed tidal pool of radius `size`
pub fn tidal_pool<R: Rng + ?Sized>(x: f32, z: f32, size: f32, rng: &mut R) -> Entity {
    let mut pool = Entity::group(EntityKind::TidalPool, Transform::at(Vec3::new(x, -1.3, z)));

    pool.children.push(Entity::mesh(
        EntityKind::Part,
        shared(primitives::cylinder(size, size * 0.8, 0.3, 16, 1)),
        Material::from_hex(0x8b6f47, 0.9, 0.0),
        Transform::at(Vec3::new(0.0, -0.15, 0.0)),
    ));
    pool.children.push(Entity::mesh(
        EntityKind::Part,
        shared(primitives::cylinder(size * 0.9, size * 0.7, 0.1, 16, 1)),
        Material::from_hex(0x006994, 0.0, 0.1).with_opacity(0.8).with_clearcoat(1.0),
        Transform::at(Vec3::new(0.0, -0.05, 0.0)),
    ));

    let rock_material = Material::new(Vec3::splat(0.3), 1.0, 0.0);
    for i in 0..TIDAL_POOL_ROCKS {
        let rim = polar_to_xz(size + 0.5, i as f32 / TIDAL_POOL_ROCKS as f32 * TAU);
        let radius = offset(rng, 0.1, 0.1);
        let at = Vec3::new(rim.x, rng.random::<f32>() * 0.1, rim.y);
        pool.children.push(
            Entity::mesh(EntityKind::Rock, shared(primitives::rock(radius)), rock_material, Transform::at(at))
                .casting_shadow(),
        );
    }
    pool
}

/// Beach umbrella with a randomly tinted canopy
pub fn umbrella<R: Rng + ?Sized>(x: f32, z: f32, rng: &mut R) -> Entity {
    let canopy_color = hsl(rng.random::<f32>(), 0.8, 0.6);
    Entity::group(EntityKind::Umbrella, Transform::at(Vec3::new(x, -1.5, z)))
        .with_child(
            Entity::mesh(
                EntityKind::Part,
                shared(primitives::cylinder(0.05, 0.05, 4.0, 8, 1)),
                Material::from_hex(0x8b4513, 0.8, 0.0),
                Transform::at(Vec3::new(0.0, 2.0, 0.0)),
            )
            .casting_shadow(),
        )
        .with_child(
            Entity::mesh(
                EntityKind::Part,
                shared(primitives::cone(3.0, 1.5, 12, 1)),
                Material::new(canopy_color, 0.4, 0.0).double_sided(),
                Transform::at(Vec3::new(0.0, 4.5, 0.0)),
            )
            .casting_shadow(),
        )
}

/// Towel laid on the sand with a slight tilt and random yaw
pub fn towel<R: Rng + ?Sized>(x: f32, z: f32, rng: &mut R) -> Entity {
    let color = hsl(rng.random::<f32>(), 0.7, 0.5);
    let tilt = centered(rng, 0.3);
    let yaw = rng.random::<f32>() * TAU;
    let mesh = primitives::grid(GridSpec::new(2.0, 3.0, 1, 1));
    Entity::mesh(
        EntityKind::Towel,
        shared(mesh),
        Material::new(color, 0.7, 0.0).double_sided(),
        Transform::at(Vec3::new(x, -1.4, z)).with_rotation(Vec3::new(tilt, yaw, 0.0)),
    )
    .receiving_shadow()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_footprint_trail_alternates() {
        let mut rng = Pcg32::seed_from_u64(4);
        let trail = footprint_trail(20, &mut rng);
        assert_eq!(trail.len(), 20);
        for (i, print) in trail.iter().enumerate() {
            let p = print.transform.position;
            assert_eq!(p.y, FOOTPRINT_Y);
            let center = -20.0 + i as f32 * 2.0;
            let lateral = p.x - center;
            if i % 2 == 0 {
                assert!(lateral < 0.0);
            } else {
                assert!(lateral > 0.0);
            }
        }
    }

    #[test]
    fn test_tidal_pool_rim() {
        let mut rng = Pcg32::seed_from_u64(6);
        let pool = tidal_pool(0.0, 20.0, 3.0, &mut rng);
        let rocks: Vec<_> = pool.children.iter().filter(|c| c.kind == EntityKind::Rock).collect();
        assert_eq!(rocks.len(), TIDAL_POOL_ROCKS);
        for rock in rocks {
            let p = rock.transform.position;
            assert!(((p.x * p.x + p.z * p.z).sqrt() - 3.5).abs() < 1e-4);
            assert!((0.0..0.1).contains(&p.y));
        }
    }

    #[test]
    fn test_sand_terrain_is_fully_subdivided() {
        let mut rng = Pcg32::seed_from_u64(1);
        let sand = sand_terrain(&mut rng);
        let mesh = &sand.shape.as_ref().unwrap().mesh;
        assert_eq!(mesh.vertex_count(), 257 * 257);
        assert!(sand.cast_shadow && sand.receive_shadow);
    }

    #[test]
    fn test_towel_lies_flat() {
        let mut rng = Pcg32::seed_from_u64(3);
        let t = towel(0.0, 30.0, &mut rng);
        assert!(t.transform.rotation.x.abs() <= 0.15);
        assert!(t.material().unwrap().double_sided);
    }
}
