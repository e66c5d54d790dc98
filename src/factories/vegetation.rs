//! Palms, beach grass, seaweed and island flowers

use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};

use super::{centered, offset, position_phase, shared, upright_quad};
use crate::mesh::{primitives, tube, CatmullRomCurve};
use crate::polar_to_xz;
use crate::scene::animation::{AnimationState, SwayState};
use crate::scene::entity::{Entity, EntityKind, Transform};
use crate::scene::material::{hex, hsl, Material};

const FROND_COUNT: usize = 12;
const LEAFLETS_PER_FROND: usize = 30;
const COCONUT_COUNT: usize = 4;
const TRUNK_HEIGHT: f32 = 8.0;

fn trunk_curve() -> CatmullRomCurve {
    CatmullRomCurve::new(vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.2, 2.0, 0.1),
        Vec3::new(0.3, 4.0, 0.2),
        Vec3::new(0.2, 6.0, 0.1),
        Vec3::new(0.0, TRUNK_HEIGHT, 0.0),
    ])
}

fn frond_stem_curve() -> CatmullRomCurve {
    CatmullRomCurve::new(vec![
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, -0.5, 0.0),
        Vec3::new(2.5, -1.5, 0.0),
        Vec3::new(4.0, -2.5, 0.0),
    ])
}

/// Palm tree rooted at `position`: curved trunk, a crown of drooping fronds
/// with leaflets spaced by arc length, and a few coconuts.
pub fn palm_tree<R: Rng + ?Sized>(position: Vec3, rng: &mut R) -> Entity {
    let mut tree = Entity::group(EntityKind::PalmTree, Transform::at(position));

    let trunk = Entity::mesh(
        EntityKind::Trunk,
        shared(tube(&trunk_curve(), 20, 0.4, 8)),
        Material::from_hex(0x8b6f47, 0.9, 0.1),
        Transform::default(),
    )
    .casting_shadow();
    tree.children.push(trunk);

    let stem_curve = frond_stem_curve();
    let stem_mesh = shared(tube(&stem_curve, 10, 0.05, 4));
    let stem_material = Material::from_hex(0x4f7942, 0.8, 0.0);
    let leaflet_mesh = shared(upright_quad(1.0, 1.0));
    let leaflet_material = Material::from_hex(0x3cb371, 0.7, 0.0).double_sided();

    for i in 0..FROND_COUNT {
        let angle = i as f32 / FROND_COUNT as f32 * TAU;
        let mut frond = Entity::group(
            EntityKind::Frond,
            Transform::at(Vec3::new(0.0, TRUNK_HEIGHT, 0.0)).with_rotation(Vec3::new(
                0.0,
                angle,
                PI / 6.0 + rng.random::<f32>() * 0.2,
            )),
        );
        frond.children.push(Entity::mesh(
            EntityKind::Part,
            stem_mesh.clone(),
            stem_material,
            Transform::default(),
        ));

        for j in 0..LEAFLETS_PER_FROND {
            let t = j as f32 / LEAFLETS_PER_FROND as f32;
            // Leaflets alternate sides and shrink toward the tip
            let side = if j % 2 == 0 { 1.0 } else { -1.0 };
            let transform = Transform {
                position: stem_curve.point_at_fraction(t),
                rotation: Vec3::new(
                    -PI / 4.0 + rng.random::<f32>() * 0.2,
                    0.0,
                    side * (PI / 4.0 + rng.random::<f32>() * 0.2),
                ),
                scale: Vec3::new(0.3, 0.8 * (1.0 - t * 0.5), 1.0),
            };
            frond.children.push(Entity::mesh(
                EntityKind::Leaflet,
                leaflet_mesh.clone(),
                leaflet_material,
                transform,
            ));
        }
        tree.children.push(frond);
    }

    let coconut_mesh = shared(primitives::sphere(0.15, 8, 6));
    let coconut_material = Material::from_hex(0x8b4513, 0.8, 0.0);
    for _ in 0..COCONUT_COUNT {
        let at = Vec3::new(centered(rng, 0.5), offset(rng, 7.5, 0.5), centered(rng, 0.5));
        tree.children.push(
            Entity::mesh(EntityKind::Coconut, coconut_mesh.clone(), coconut_material, Transform::at(at))
                .casting_shadow(),
        );
    }

    tree
}

/// Cluster of 15 swaying grass blades
pub fn beach_grass<R: Rng + ?Sized>(position: Vec3, rng: &mut R) -> Entity {
    let mut cluster = Entity::group(EntityKind::GrassCluster, Transform::at(position));
    let material = Material::from_hex(0x7cfc00, 0.8, 0.0).double_sided();

    for _ in 0..15 {
        let blade = shared(primitives::cone(0.05, 2.0 + rng.random::<f32>(), 4, 1));
        let local = Vec3::new(centered(rng, 2.0), 1.0, centered(rng, 2.0));
        let base_rotation = centered(rng, 0.3);
        let sway = SwayState::grass(base_rotation, position_phase(position + local));

        cluster.children.push(
            Entity::mesh(
                EntityKind::GrassBlade,
                blade,
                material,
                Transform::at(local).with_rotation(Vec3::new(0.0, 0.0, base_rotation)),
            )
            .with_animation(AnimationState::Sway(sway)),
        );
    }
    cluster
}

/// Three to five swaying kelp strands
pub fn seaweed<R: Rng + ?Sized>(position: Vec3, rng: &mut R) -> Entity {
    let rotation = Vec3::new(0.0, rng.random::<f32>() * TAU, 0.0);
    let scale = offset(rng, 0.5, 0.5);
    let mut group = Entity::group(
        EntityKind::Seaweed,
        Transform::at(position).with_rotation(rotation).with_scale(scale),
    );

    let strands = rng.random_range(3..=5);
    for _ in 0..strands {
        let curve = CatmullRomCurve::new(vec![
            Vec3::ZERO,
            Vec3::new(centered(rng, 0.5), 0.3, centered(rng, 0.3)),
            Vec3::new(centered(rng, 1.0), 0.8, centered(rng, 0.5)),
            Vec3::new(centered(rng, 1.5), 1.2, centered(rng, 0.8)),
        ]);
        let color = hsl(offset(rng, 0.25, 0.1), 0.6, 0.2);
        group.children.push(
            Entity::mesh(
                EntityKind::SeaweedStrand,
                shared(tube(&curve, 20, 0.02, 6)),
                Material::new(color, 0.8, 0.0),
                Transform::default(),
            )
            .with_animation(AnimationState::Sway(SwayState::seaweed(position_phase(position)))),
        );
    }
    group
}

/// Five-petal tropical flower
pub fn flower<R: Rng + ?Sized>(position: Vec3, rng: &mut R) -> Entity {
    let petal_mesh = shared(primitives::sphere(0.3, 8, 4));
    let petal_material = Material::new(hsl(offset(rng, 0.85, 0.1), 1.0, 0.6), 0.3, 0.0);
    let scale = offset(rng, 0.5, 0.5);
    let mut group = Entity::group(EntityKind::Flower, Transform::at(position).with_scale(scale));

    for j in 0..5 {
        let xz = polar_to_xz(0.3, j as f32 / 5.0 * TAU);
        let transform = Transform {
            position: Vec3::new(xz.x, 0.0, xz.y),
            rotation: Vec3::ZERO,
            scale: Vec3::new(1.0, 1.5, 1.0),
        };
        group
            .children
            .push(Entity::mesh(EntityKind::Part, petal_mesh.clone(), petal_material, transform));
    }

    group.children.push(Entity::mesh(
        EntityKind::Part,
        shared(primitives::sphere(0.2, 8, 8)),
        Material::new(hex(0xffd700), 0.6, 0.0),
        Transform::default(),
    ));
    group
}
