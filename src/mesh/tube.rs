//! Tubes swept along a control curve

use glam::Vec3;
use std::f32::consts::TAU;

use super::{CatmullRomCurve, SurfaceMesh};

/// Per-ring orthonormal frame
#[derive(Debug, Clone, Copy)]
struct Frame {
    normal: Vec3,
    binormal: Vec3,
}

/// Parallel-transport frames sampled at `segments + 1` evenly spaced fractions
fn transport_frames(curve: &CatmullRomCurve, segments: u32) -> Vec<Frame> {
    let tangents: Vec<Vec3> = (0..=segments)
        .map(|i| curve.tangent_at_fraction(i as f32 / segments as f32))
        .collect();

    // Seed the first normal along the axis least aligned with the tangent
    let t0 = tangents[0];
    let axis = if t0.x.abs() <= t0.y.abs() && t0.x.abs() <= t0.z.abs() {
        Vec3::X
    } else if t0.y.abs() <= t0.z.abs() {
        Vec3::Y
    } else {
        Vec3::Z
    };
    let seed = t0.cross(axis).try_normalize().unwrap_or(Vec3::X);
    let mut normal = t0.cross(seed).try_normalize().unwrap_or(Vec3::Z);

    let mut frames = Vec::with_capacity(tangents.len());
    frames.push(Frame {
        normal,
        binormal: t0.cross(normal),
    });

    for pair in tangents.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        let axis = prev.cross(next);
        if axis.length() > f32::EPSILON {
            let angle = prev.dot(next).clamp(-1.0, 1.0).acos();
            normal = glam::Quat::from_axis_angle(axis.normalize(), angle) * normal;
        }
        frames.push(Frame {
            normal,
            binormal: next.cross(normal),
        });
    }
    frames
}

/// Sweep a circle of `radius` along `curve`.
///
/// Produces `(tubular_segments + 1) * (radial_segments + 1)` vertices; the
/// seam column is duplicated so each ring closes on itself.
pub fn tube(
    curve: &CatmullRomCurve,
    tubular_segments: u32,
    radius: f32,
    radial_segments: u32,
) -> SurfaceMesh {
    let tubular = tubular_segments.max(1);
    let radial = radial_segments.max(3);
    let frames = transport_frames(curve, tubular);

    let mut positions = Vec::with_capacity(((tubular + 1) * (radial + 1)) as usize);
    for (i, frame) in frames.iter().enumerate() {
        let center = curve.point_at_fraction(i as f32 / tubular as f32);
        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let offset = frame.normal * -v.cos() + frame.binormal * v.sin();
            positions.push(center + offset * radius);
        }
    }

    let mut indices = Vec::with_capacity((tubular * radial * 6) as usize);
    for i in 1..=tubular {
        for j in 1..=radial {
            let a = (radial + 1) * (i - 1) + (j - 1);
            let b = (radial + 1) * i + (j - 1);
            let c = (radial + 1) * i + j;
            let d = (radial + 1) * (i - 1) + j;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    let mut mesh = SurfaceMesh::from_parts(positions, indices);
    // Seam duplicates only see half their faces; share the averaged normal
    for i in 0..=tubular {
        let first = (i * (radial + 1)) as usize;
        let last = first + radial as usize;
        let shared = (mesh.normal(first) + mesh.normal(last))
            .try_normalize()
            .unwrap_or_else(|| mesh.normal(first));
        mesh.normals[first * 3..first * 3 + 3].copy_from_slice(&shared.to_array());
        mesh.normals[last * 3..last * 3 + 3].copy_from_slice(&shared.to_array());
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn trunk() -> CatmullRomCurve {
        CatmullRomCurve::new(vec![
            Vec3::ZERO,
            Vec3::new(0.3, 3.0, 0.0),
            Vec3::new(-0.2, 6.0, 0.1),
            Vec3::new(0.4, 9.0, 0.0),
        ])
    }

    #[test]
    fn test_tube_vertex_count() {
        let mesh = tube(&trunk(), 20, 0.4, 8);
        assert_eq!(mesh.vertex_count(), 21 * 9);
        assert_eq!(mesh.triangle_count(), 20 * 8 * 2);
    }

    #[test]
    fn test_tube_rings_keep_radius() {
        let curve = CatmullRomCurve::new(vec![Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 10.0, 0.0)]);
        let mesh = tube(&curve, 10, 0.5, 12);
        for i in 0..mesh.vertex_count() {
            let p = mesh.position(i);
            let radial = Vec3::new(p.x, 0.0, p.z).length();
            assert!((radial - 0.5).abs() < 1e-3);
        }
    }

    #[test]
    fn test_straight_tube_normals_are_radial() {
        let curve = CatmullRomCurve::new(vec![Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, 10.0, 0.0)]);
        let mesh = tube(&curve, 10, 1.0, 16);
        // Middle ring only; end rings have one-sided faces
        for j in 0..=16usize {
            let i = 5 * 17 + j;
            let p = mesh.position(i);
            let outward = Vec3::new(p.x, 0.0, p.z).normalize();
            assert!(mesh.normal(i).dot(outward) > 0.95);
        }
    }

    proptest! {
        #[test]
        fn prop_tube_counts_and_unit_normals(tubular in 1u32..40, radial in 3u32..16, radius in 0.01f32..2.0) {
            let mesh = tube(&trunk(), tubular, radius, radial);
            prop_assert_eq!(mesh.vertex_count(), ((tubular + 1) * (radial + 1)) as usize);
            for i in 0..mesh.vertex_count() {
                prop_assert!((mesh.normal(i).length() - 1.0).abs() < 1e-3);
            }
        }
    }
}
