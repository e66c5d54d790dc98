//! Tropical island with its vegetation, mermaid and bird flock
//!
//! Everything here is parented to the island node, so moving or scaling the
//! island carries the birds and the mermaid with it.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use super::{bird, flower, offset, palm_tree, shared};
use crate::mesh::{primitives, tube, CatmullRomCurve};
use crate::noise::{HeightField, IslandSilhouette, RingSwell};
use crate::polar_to_xz;
use crate::scene::animation::{AnimationState, DriftState, ShimmerState};
use crate::scene::entity::{Entity, EntityKind, Transform};
use crate::scene::material::{hex, Material};

const ISLAND_PALMS: usize = 5;
const ISLAND_FLOWERS: usize = 20;
const ISLAND_ROCKS: usize = 30;
const FLOCK_SIZE: usize = 3;

/// Island centered on `transform`
pub fn tropical_island<R: Rng + ?Sized>(transform: Transform, rng: &mut R) -> Entity {
    let mut island = Entity::group(EntityKind::Island, transform);

    let silhouette = IslandSilhouette::default();
    let cone = primitives::cone(25.0, 8.0, 32, 8).map_positions(|p| silhouette.perturb(p));
    island.children.push(
        Entity::mesh(
            EntityKind::Terrain,
            shared(cone),
            Material::from_hex(0xa0826d, 0.8, 0.0),
            Transform::at(Vec3::new(0.0, -6.0, 0.0)).with_rotation(Vec3::new(0.0, rng.random::<f32>() * PI, 0.0)),
        )
        .casting_shadow()
        .receiving_shadow(),
    );

    island.children.push(
        Entity::mesh(
            EntityKind::Terrain,
            shared(primitives::ring(20.0, 30.0, 32)),
            Material::from_hex(0xf4e4c1, 0.95, 0.0),
            Transform::at(Vec3::new(0.0, -1.8, 0.0)),
        )
        .receiving_shadow(),
    );

    let mut vegetation = Entity::group(EntityKind::Group, Transform::default());
    for i in 0..ISLAND_PALMS {
        let xz = polar_to_xz(offset(rng, 8.0, 5.0), i as f32 / ISLAND_PALMS as f32 * TAU);
        let mut palm = palm_tree(Vec3::new(xz.x, 0.0, xz.y), rng);
        palm.transform.scale = Vec3::splat(offset(rng, 0.8, 0.4));
        palm.transform.position.y = offset(rng, 2.0, 2.0);
        vegetation.children.push(palm);
    }
    for _ in 0..ISLAND_FLOWERS {
        let xz = polar_to_xz(rng.random::<f32>() * 12.0, rng.random::<f32>() * TAU);
        let y = offset(rng, 3.0, 2.0);
        vegetation.children.push(flower(Vec3::new(xz.x, y, xz.y), rng));
    }

    for _ in 0..ISLAND_ROCKS {
        let radius = offset(rng, 0.3, 0.5);
        let color = Vec3::new(offset(rng, 0.3, 0.2), offset(rng, 0.3, 0.2), 0.3);
        let xz = polar_to_xz(rng.random::<f32>() * 20.0, rng.random::<f32>() * TAU);
        let transform = Transform {
            position: Vec3::new(xz.x, offset(rng, -1.5, 4.0), xz.y),
            rotation: Vec3::new(rng.random::<f32>() * PI, rng.random::<f32>() * PI, rng.random::<f32>() * PI),
            scale: Vec3::ONE,
        };
        island.children.push(
            Entity::mesh(
                EntityKind::Rock,
                shared(primitives::rock(radius)),
                Material::new(color, 0.9, 0.0),
                transform,
            )
            .casting_shadow(),
        );
    }
    island.children.push(vegetation);

    let swell = RingSwell;
    let foam_ring = primitives::ring(28.0, 35.0, 64).map_positions(|p| Vec3::new(p.x, swell.height(p.x, p.z), p.z));
    let shimmer = ShimmerState {
        base_opacity: 0.6,
        amplitude: 0.2,
        frequency: 0.001,
        spin: 0.0005,
    };
    island.children.push(
        Entity::mesh(
            EntityKind::FoamRing,
            shared(foam_ring),
            Material::from_hex(0xffffff, 0.1, 0.0)
                .with_opacity(0.7)
                .with_emissive(hex(0xffffff), 0.1),
            Transform::at(Vec3::new(0.0, -1.8, 0.0)),
        )
        .with_animation(AnimationState::Shimmer(shimmer)),
    );

    island.children.push(mermaid());

    let mut flock = Entity::group(EntityKind::Group, Transform::default());
    for i in 0..FLOCK_SIZE {
        flock.children.push(bird(i, FLOCK_SIZE, rng));
    }
    island.children.push(flock);

    island
}

/// Mermaid sunbathing on a flat rock, hair and tail drifting slowly
pub fn mermaid() -> Entity {
    let skin = Material::from_hex(0xffdbd7, 0.6, 0.0);
    let scales = Material::from_hex(0x20b2aa, 0.2, 0.8).with_clearcoat(1.0);
    let shell = Material::from_hex(0xfff0f5, 0.3, 0.3).with_clearcoat(0.5);

    let mut group = Entity::group(
        EntityKind::Mermaid,
        Transform::at(Vec3::new(8.0, 0.0, -5.0))
            .with_rotation(Vec3::new(0.0, -FRAC_PI_4, 0.0))
            .with_scale(0.8),
    );

    group.children.push(
        Entity::mesh(
            EntityKind::Rock,
            shared(primitives::cuboid(6.0, 1.0, 3.0)),
            Material::from_hex(0x696969, 0.8, 0.1),
            Transform::at(Vec3::new(0.0, 1.0, 0.0)).with_rotation(Vec3::new(-0.1, 0.0, 0.0)),
        )
        .casting_shadow()
        .receiving_shadow(),
    );

    group.children.push(Entity::mesh(
        EntityKind::Part,
        shared(primitives::capsule(0.5, 1.8, 8, 16)),
        skin,
        Transform {
            position: Vec3::new(0.0, 2.5, 0.0),
            rotation: Vec3::new(-FRAC_PI_2 + 0.3, 0.0, 0.0),
            scale: Vec3::new(0.8, 1.0, 0.7),
        },
    ));

    let tail_curve = CatmullRomCurve::new(vec![
        Vec3::new(0.0, 1.5, 0.0),
        Vec3::new(0.0, 1.0, 0.8),
        Vec3::new(0.0, 0.5, 1.6),
        Vec3::new(0.0, 0.3, 2.5),
    ]);
    group.children.push(
        Entity::mesh(
            EntityKind::MermaidTail,
            shared(tube(&tail_curve, 20, 0.4, 8)),
            scales,
            Transform {
                scale: Vec3::new(1.0, 1.0, 1.2),
                ..Default::default()
            },
        )
        .with_animation(AnimationState::Drift(DriftState {
            amplitude: 0.05,
            frequency: 0.0008,
        })),
    );

    group.children.push(Entity::mesh(
        EntityKind::Part,
        shared(primitives::cone(1.2, 1.5, 8, 1).scaled(Vec3::new(1.5, 0.3, 1.0))),
        scales,
        Transform::at(Vec3::new(0.0, 0.3, 3.0)).with_rotation(Vec3::new(FRAC_PI_2, 0.0, 0.0)),
    ));

    group.children.push(Entity::mesh(
        EntityKind::Part,
        shared(primitives::sphere(0.5, 16, 16)),
        skin,
        Transform::at(Vec3::new(0.0, 3.5, -0.8)),
    ));

    group.children.push(
        Entity::mesh(
            EntityKind::MermaidHair,
            shared(primitives::sphere(0.6, 16, 16).scaled(Vec3::new(1.0, 1.2, 1.0))),
            Material::from_hex(0xffb6c1, 0.8, 0.1),
            Transform::at(Vec3::new(0.0, 3.5, -0.7)),
        )
        .with_animation(AnimationState::Drift(DriftState {
            amplitude: 0.1,
            frequency: 0.0005,
        })),
    );

    let arm = shared(primitives::capsule(0.2, 1.5, 4, 8));
    let bust = shared(primitives::sphere(0.3, 8, 4).scaled(Vec3::new(1.0, 0.7, 0.7)));
    for side in [-1.0f32, 1.0] {
        group.children.push(Entity::mesh(
            EntityKind::Part,
            arm.clone(),
            skin,
            Transform::at(Vec3::new(side, 2.8, -0.3)).with_rotation(Vec3::new(0.0, 0.0, -0.5 * side)),
        ));
        group.children.push(Entity::mesh(
            EntityKind::Part,
            bust.clone(),
            shell,
            Transform::at(Vec3::new(0.3 * side, 2.8, -0.5)).with_rotation(Vec3::new(0.0, 0.0, -0.3 * side)),
        ));
    }

    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn island() -> Entity {
        let mut rng = Pcg32::seed_from_u64(77);
        tropical_island(Transform::at(Vec3::new(-25.0, 0.0, -30.0)).with_scale(1.2), &mut rng)
    }

    #[test]
    fn test_island_contents() {
        let island = island();
        let count = |kind: EntityKind| {
            let mut n = 0;
            island.walk(Mat4::IDENTITY, &mut |e, _| {
                if e.kind == kind {
                    n += 1;
                }
            });
            n
        };
        assert_eq!(count(EntityKind::PalmTree), ISLAND_PALMS);
        assert_eq!(count(EntityKind::Flower), ISLAND_FLOWERS);
        assert_eq!(count(EntityKind::Bird), FLOCK_SIZE);
        assert_eq!(count(EntityKind::Wing), FLOCK_SIZE * 2);
        assert_eq!(count(EntityKind::FoamRing), 1);
        assert_eq!(count(EntityKind::Mermaid), 1);
        // 30 loose rocks plus the mermaid's sunbathing rock
        assert_eq!(count(EntityKind::Rock), ISLAND_ROCKS + 1);
    }

    #[test]
    fn test_mermaid_inherits_island_placement() {
        let island = island();
        let mut mermaid_origin = None;
        island.walk(Mat4::IDENTITY, &mut |e, m| {
            if e.kind == EntityKind::Mermaid {
                mermaid_origin = Some(m.transform_point3(Vec3::ZERO));
            }
        });
        let expected = Vec3::new(-25.0, 0.0, -30.0) + Vec3::new(8.0, 0.0, -5.0) * 1.2;
        assert!((mermaid_origin.unwrap() - expected).length() < 1e-4);
    }

    #[test]
    fn test_foam_ring_spins() {
        let island = island();
        let ring = island.child(EntityKind::FoamRing).unwrap();
        match ring.animation {
            Some(AnimationState::Shimmer(s)) => assert_eq!(s.spin, 0.0005),
            other => panic!("unexpected animation {:?}", other),
        }
    }

    #[test]
    fn test_mermaid_drifting_parts() {
        let m = mermaid();
        assert!(m.child(EntityKind::MermaidHair).unwrap().animation.is_some());
        assert!(m.child(EntityKind::MermaidTail).unwrap().animation.is_some());
    }
}
