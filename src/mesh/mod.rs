//! Procedural mesh builders
//!
//! Every builder returns an independent [`SurfaceMesh`] whose normals were
//! recomputed by averaging face normals after all displacement was applied.

pub mod curve;
pub mod particles;
pub mod primitives;
pub mod tube;

pub use curve::CatmullRomCurve;
pub use particles::{ParticleBounds, ParticleField};
pub use primitives::GridSpec;
pub use tube::tube;

use glam::Vec3;
use rand::Rng;

use crate::noise::HeightField;

/// Indexed triangle mesh with flat vertex buffers (3 floats per vertex)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    /// Build from vertex positions and triangle indices, deriving normals
    pub fn from_parts(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let mut mesh = Self {
            positions: positions.iter().flat_map(|p| p.to_array()).collect(),
            normals: Vec::new(),
            indices,
        };
        mesh.compute_normals();
        mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[i * 3..i * 3 + 3])
    }

    #[inline]
    pub fn set_position(&mut self, i: usize, p: Vec3) {
        self.positions[i * 3..i * 3 + 3].copy_from_slice(&p.to_array());
    }

    #[inline]
    pub fn normal(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.normals[i * 3..i * 3 + 3])
    }

    /// Recompute per-vertex normals by area-weighted face averaging.
    ///
    /// Vertices without a non-degenerate face fall back to +Y so every
    /// normal is unit length.
    pub fn compute_normals(&mut self) {
        let count = self.vertex_count();
        let mut accum = vec![Vec3::ZERO; count];

        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let pa = self.position(a);
            let pb = self.position(b);
            let pc = self.position(c);
            // Cross product length is twice the triangle area
            let face = (pb - pa).cross(pc - pa);
            accum[a] += face;
            accum[b] += face;
            accum[c] += face;
        }

        self.normals = accum
            .into_iter()
            .flat_map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
            .collect();
    }

    /// Bake a per-axis scale into the vertices
    pub fn scaled(mut self, scale: Vec3) -> Self {
        for i in 0..self.vertex_count() {
            let p = self.position(i) * scale;
            self.set_position(i, p);
        }
        self.compute_normals();
        self
    }

    /// Apply `f` to every vertex position, then rebuild normals
    pub fn map_positions(mut self, f: impl Fn(Vec3) -> Vec3) -> Self {
        for i in 0..self.vertex_count() {
            let p = f(self.position(i));
            self.set_position(i, p);
        }
        self.compute_normals();
        self
    }

    /// Axis-aligned bounds (min, max)
    pub fn bounds(&self) -> (Vec3, Vec3) {
        (0..self.vertex_count()).fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(lo, hi), i| {
                let p = self.position(i);
                (lo.min(p), hi.max(p))
            },
        )
    }
}

/// Grid patch displaced by a height field, with uniform jitter in `[0, jitter)`.
///
/// Zero-subdivision grids skip displacement and stay flat.
pub fn height_field_patch<R: Rng + ?Sized>(
    grid: GridSpec,
    field: &dyn HeightField,
    jitter: f32,
    rng: &mut R,
) -> SurfaceMesh {
    let mut mesh = primitives::grid(grid);
    if grid.segments_x == 0 || grid.segments_z == 0 {
        return mesh;
    }

    for i in 0..mesh.vertex_count() {
        let p = mesh.position(i);
        let noise = if jitter > 0.0 {
            rng.random::<f32>() * jitter
        } else {
            0.0
        };
        mesh.set_position(i, Vec3::new(p.x, field.height(p.x, p.z) + noise, p.z));
    }
    mesh.compute_normals();
    mesh
}
