//! Entity factories
//!
//! Each factory composes mesh builders and materials into a named entity
//! tree. All randomness comes from the injected generator and is frozen into
//! the returned entity; nothing here keeps a handle on the RNG.

pub mod beach;
pub mod fauna;
pub mod island;
pub mod shoreline;
pub mod vegetation;

pub use beach::{
    driftwood, far_dunes, footprint, footprint_trail, sand_ripple, sand_terrain, seashell, tidal_pool,
    towel, umbrella,
};
pub use fauna::{bird, crab, crab_with_state, fish, fish_with_state};
pub use island::{mermaid, tropical_island};
pub use shoreline::{shoreline, wet_sand};
pub use vegetation::{beach_grass, flower, palm_tree, seaweed};

use glam::Vec3;
use rand::Rng;
use std::rc::Rc;

use crate::mesh::{primitives, GridSpec, SurfaceMesh};

/// Vertical quad in the XY plane facing +Z
pub(crate) fn upright_quad(width: f32, height: f32) -> SurfaceMesh {
    primitives::grid(GridSpec::new(width, height, 1, 1)).map_positions(|p| Vec3::new(p.x, -p.z, p.y))
}

/// Uniform sample in `[-span / 2, span / 2)`
#[inline]
pub(crate) fn centered<R: Rng + ?Sized>(rng: &mut R, span: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * span
}

/// Uniform sample in `[min, min + span)`
#[inline]
pub(crate) fn offset<R: Rng + ?Sized>(rng: &mut R, min: f32, span: f32) -> f32 {
    min + rng.random::<f32>() * span
}

/// Sway phase derived from where an entity stands, so neighbors desynchronize
#[inline]
pub(crate) fn position_phase(world: Vec3) -> f32 {
    world.x + world.z * 0.37
}

#[inline]
pub(crate) fn shared(mesh: SurfaceMesh) -> Rc<SurfaceMesh> {
    Rc::new(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_upright_quad_faces_forward() {
        let quad = upright_quad(0.3, 0.8);
        let (lo, hi) = quad.bounds();
        assert!((hi.y - 0.4).abs() < 1e-6 && (lo.y + 0.4).abs() < 1e-6);
        assert_eq!(lo.z, 0.0);
        assert_eq!(hi.z, 0.0);
        for i in 0..quad.vertex_count() {
            assert!((quad.normal(i) - Vec3::Z).length() < 1e-5);
        }
    }

    #[test]
    fn test_sampling_helpers_stay_in_range() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..1000 {
            let c = centered(&mut rng, 40.0);
            assert!((-20.0..20.0).contains(&c));
            let o = offset(&mut rng, 20.0, 20.0);
            assert!((20.0..40.0).contains(&o));
        }
    }

    #[test]
    fn test_position_phase_differs_between_neighbors() {
        assert_ne!(position_phase(Vec3::new(-10.0, 0.0, 30.0)), position_phase(Vec3::new(10.0, 0.0, 32.0)));
    }
}
