//! Shoreline foam, breaking crests and wet sand

use glam::Vec3;
use rand::Rng;
use std::f32::consts::PI;

use super::shared;
use crate::mesh::{height_field_patch, primitives, GridSpec};
use crate::noise::{CrestProfile, FoamBand, HeightField, WetSandRipple};
use crate::scene::animation::{AnimationState, CrestState, FoamState, ShimmerState};
use crate::scene::entity::{Entity, EntityKind, Transform};
use crate::scene::material::{hex, Material};

const CREST_COUNT: usize = 3;

/// Crests lean toward the beach
const CREST_TILT: f32 = PI / 2.0 - PI / 2.5;

fn foam_material(opacity: f32) -> Material {
    Material::from_hex(0xffffff, 0.1, 0.0)
        .with_opacity(opacity)
        .with_emissive(hex(0xffffff), 0.15)
}

/// Two foam lines, the damp strip behind them and three breaking crests.
///
/// Child order is fixed: foam, receding foam, wet strip, then crests. The
/// crest phase follows that order so neighboring crests bob out of step.
pub fn shoreline<R: Rng + ?Sized>(rng: &mut R) -> Entity {
    let mut group = Entity::group(EntityKind::Shoreline, Transform::default());

    let foam_mesh = shared(height_field_patch(GridSpec::new(180.0, 30.0, 128, 32), &FoamBand, 0.1, rng));
    let lines = [(10.0, 0.8, 1.0), (15.0, 0.4, 0.8)];
    for (index, (base_z, base_opacity, width_scale)) in lines.into_iter().enumerate() {
        let transform = Transform {
            position: Vec3::new(0.0, -1.3, base_z),
            rotation: Vec3::ZERO,
            scale: Vec3::new(width_scale, 1.0, 1.0),
        };
        let foam = FoamState {
            base_z,
            base_opacity,
            phase: index as f32,
        };
        group.children.push(
            Entity::mesh(EntityKind::Foam, foam_mesh.clone(), foam_material(base_opacity), transform)
                .with_animation(AnimationState::Foam(foam)),
        );
    }

    group.children.push(Entity::mesh(
        EntityKind::WetSand,
        shared(primitives::grid(GridSpec::new(200.0, 40.0, 64, 16))),
        Material::from_hex(0xd4a574, 0.3, 0.1).with_opacity(0.6),
        Transform::at(Vec3::new(0.0, -1.45, 20.0)),
    ));

    for i in 0..CREST_COUNT {
        let f = i as f32;
        let mesh = height_field_patch(GridSpec::new(60.0 - f * 10.0, 5.0, 32, 8), &CrestProfile, 0.05, rng);
        let material = Material::from_hex(0xffffff, 1.0, 0.0)
            .with_opacity(0.9 - f * 0.2)
            .with_emissive(hex(0xffffff), 0.1);
        let base_y = -0.5 + f * 0.2;
        let transform = Transform::at(Vec3::new(0.0, base_y, 5.0 - f * 3.0))
            .with_rotation(Vec3::new(CREST_TILT, 0.0, 0.0));
        let crest = CrestState {
            base_y,
            phase: group.children.len() as f32,
        };
        group.children.push(
            Entity::mesh(EntityKind::WaveCrest, shared(mesh), material, transform)
                .with_animation(AnimationState::Crest(crest)),
        );
    }
    group
}

/// Glossy wet sand whose reflection shimmers
pub fn wet_sand() -> Entity {
    let ripple = WetSandRipple;
    let mesh = primitives::grid(GridSpec::new(200.0, 40.0, 128, 32))
        .map_positions(|p| Vec3::new(p.x, ripple.height(p.x, p.z), p.z));
    let material = Material::from_hex(0xa67c4a, 0.1, 0.3)
        .with_clearcoat(1.0)
        .with_opacity(0.9);
    let shimmer = ShimmerState {
        base_opacity: 0.8,
        amplitude: 0.2,
        frequency: 0.001,
        spin: 0.0,
    };
    Entity::mesh(EntityKind::WetSand, shared(mesh), material, Transform::at(Vec3::new(0.0, -1.35, 10.0)))
        .receiving_shadow()
        .with_animation(AnimationState::Shimmer(shimmer))
}
