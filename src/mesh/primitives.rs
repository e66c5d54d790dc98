//! Parametric base primitives
//!
//! Conventions: Y is up, flat primitives (grid, ring) lie in the XZ plane
//! facing +Y, and solids are centered on the origin.

use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

use super::SurfaceMesh;

/// Subdivided rectangle in the XZ plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub width: f32,
    pub depth: f32,
    pub segments_x: u32,
    pub segments_z: u32,
}

impl GridSpec {
    pub const fn new(width: f32, depth: f32, segments_x: u32, segments_z: u32) -> Self {
        Self {
            width,
            depth,
            segments_x,
            segments_z,
        }
    }

    /// Number of vertices the grid produces
    pub fn vertex_count(&self) -> usize {
        ((self.segments_x.max(1) + 1) * (self.segments_z.max(1) + 1)) as usize
    }
}

/// Flat grid centered on the origin. Zero segment counts build a single quad.
pub fn grid(spec: GridSpec) -> SurfaceMesh {
    let sx = spec.segments_x.max(1);
    let sz = spec.segments_z.max(1);
    let half_w = spec.width / 2.0;
    let half_d = spec.depth / 2.0;

    let mut positions = Vec::with_capacity(spec.vertex_count());
    for iz in 0..=sz {
        let z = iz as f32 / sz as f32 * spec.depth - half_d;
        for ix in 0..=sx {
            let x = ix as f32 / sx as f32 * spec.width - half_w;
            positions.push(Vec3::new(x, 0.0, z));
        }
    }

    let mut indices = Vec::with_capacity((sx * sz * 6) as usize);
    let row = sx + 1;
    for iz in 0..sz {
        for ix in 0..sx {
            let a = iz * row + ix;
            let b = a + 1;
            let c = a + row;
            let d = c + 1;
            // Counter-clockwise seen from +Y
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    SurfaceMesh::from_parts(positions, indices)
}

/// Axis-aligned box
pub fn cuboid(width: f32, height: f32, depth: f32) -> SurfaceMesh {
    let h = Vec3::new(width, height, depth) / 2.0;
    // One quad per face so the corners keep hard normals
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::X, Vec3::Y),
    ];

    let mut positions = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let base = positions.len() as u32;
        let center = normal * h;
        let du = u * h;
        let dv = v * h;
        positions.push(center - du - dv);
        positions.push(center + du - dv);
        positions.push(center + du + dv);
        positions.push(center - du + dv);

        // Pick the winding that faces outward
        let face = (positions[base as usize + 1] - positions[base as usize])
            .cross(positions[base as usize + 2] - positions[base as usize]);
        if face.dot(normal) >= 0.0 {
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        } else {
            indices.extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
        }
    }

    SurfaceMesh::from_parts(positions, indices)
}

/// Capped frustum along Y. A zero top radius gives a cone.
pub fn cylinder(
    radius_top: f32,
    radius_bottom: f32,
    height: f32,
    radial_segments: u32,
    height_segments: u32,
) -> SurfaceMesh {
    let radial = radial_segments.max(3);
    let rows = height_segments.max(1);
    let half = height / 2.0;

    let mut positions = Vec::new();
    let mut indices = Vec::new();

    for iy in 0..=rows {
        let v = iy as f32 / rows as f32;
        let radius = radius_top + (radius_bottom - radius_top) * v;
        let y = half - v * height;
        for ix in 0..=radial {
            let theta = ix as f32 / radial as f32 * TAU;
            positions.push(Vec3::new(radius * theta.sin(), y, radius * theta.cos()));
        }
    }

    let row = radial + 1;
    for iy in 0..rows {
        for ix in 0..radial {
            let a = iy * row + ix;
            let b = a + row;
            let c = b + 1;
            let d = a + 1;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    for (top, radius) in [(true, radius_top), (false, radius_bottom)] {
        if radius <= 0.0 {
            continue;
        }
        let y = if top { half } else { -half };
        let center = positions.len() as u32;
        positions.push(Vec3::new(0.0, y, 0.0));
        let rim_start = positions.len() as u32;
        for ix in 0..=radial {
            let theta = ix as f32 / radial as f32 * TAU;
            positions.push(Vec3::new(radius * theta.sin(), y, radius * theta.cos()));
        }
        for ix in 0..radial {
            let a = rim_start + ix;
            let b = a + 1;
            if top {
                indices.extend_from_slice(&[center, a, b]);
            } else {
                indices.extend_from_slice(&[center, b, a]);
            }
        }
    }

    SurfaceMesh::from_parts(positions, indices)
}

/// Cone along Y with its apex up
pub fn cone(radius: f32, height: f32, radial_segments: u32, height_segments: u32) -> SurfaceMesh {
    cylinder(0.0, radius, height, radial_segments, height_segments)
}

/// UV sphere
pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> SurfaceMesh {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);

    let mut positions = Vec::with_capacity(((ws + 1) * (hs + 1)) as usize);
    for iy in 0..=hs {
        let theta = iy as f32 / hs as f32 * PI;
        for ix in 0..=ws {
            let phi = ix as f32 / ws as f32 * TAU;
            positions.push(Vec3::new(
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            ));
        }
    }

    let row = ws + 1;
    let mut indices = Vec::new();
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            // Skip the collapsed triangles at the poles
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    SurfaceMesh::from_parts(positions, indices)
}

/// Flat annulus in the XZ plane
pub fn ring(inner_radius: f32, outer_radius: f32, theta_segments: u32) -> SurfaceMesh {
    let segs = theta_segments.max(3);
    let mut positions = Vec::with_capacity(((segs + 1) * 2) as usize);
    for radius in [inner_radius, outer_radius] {
        for i in 0..=segs {
            let theta = i as f32 / segs as f32 * TAU;
            positions.push(Vec3::new(radius * theta.cos(), 0.0, -radius * theta.sin()));
        }
    }

    let row = segs + 1;
    let mut indices = Vec::with_capacity((segs * 6) as usize);
    for i in 0..segs {
        let a = i;
        let b = i + 1;
        let c = row + i;
        let d = row + i + 1;
        indices.extend_from_slice(&[a, c, b, b, c, d]);
    }

    SurfaceMesh::from_parts(positions, indices)
}

/// Faceted rock (icosahedron)
pub fn rock(radius: f32) -> SurfaceMesh {
    let t = (1.0 + 5.0f32.sqrt()) / 2.0;
    let raw = [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ];
    let faces: [[u32; 3]; 20] = [
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    // Unshared vertices per face keep the facets flat
    let mut positions = Vec::with_capacity(60);
    let mut indices = Vec::with_capacity(60);
    for face in faces {
        for i in face {
            indices.push(positions.len() as u32);
            positions.push(raw[i as usize].normalize() * radius);
        }
    }

    SurfaceMesh::from_parts(positions, indices)
}

/// Surface of revolution around Y from a (radius, height) profile
pub fn lathe(profile: &[Vec2], segments: u32) -> SurfaceMesh {
    let segs = segments.max(3);
    let mut positions = Vec::with_capacity(profile.len() * (segs as usize + 1));
    for i in 0..=segs {
        let phi = i as f32 / segs as f32 * TAU;
        let (sin, cos) = phi.sin_cos();
        for p in profile {
            positions.push(Vec3::new(p.x * sin, p.y, p.x * cos));
        }
    }

    let n = profile.len() as u32;
    let mut indices = Vec::new();
    for i in 0..segs {
        for j in 0..n.saturating_sub(1) {
            let a = i * n + j;
            let b = a + n;
            let c = a + n + 1;
            let d = a + 1;
            indices.extend_from_slice(&[a, b, d, c, d, b]);
        }
    }

    SurfaceMesh::from_parts(positions, indices)
}

/// Capsule along Y: a cylinder of `length` capped by hemispheres
pub fn capsule(radius: f32, length: f32, cap_segments: u32, radial_segments: u32) -> SurfaceMesh {
    let caps = cap_segments.max(1);
    let half = length / 2.0;
    let mut profile = Vec::with_capacity((caps as usize + 1) * 2);

    // Bottom pole up to the equator, then equator up to the top pole
    for i in 0..=caps {
        let a = -PI / 2.0 + i as f32 / caps as f32 * (PI / 2.0);
        profile.push(Vec2::new(radius * a.cos(), -half + radius * a.sin()));
    }
    for i in 0..=caps {
        let a = i as f32 / caps as f32 * (PI / 2.0);
        profile.push(Vec2::new(radius * a.cos(), half + radius * a.sin()));
    }

    lathe(&profile, radial_segments)
}
