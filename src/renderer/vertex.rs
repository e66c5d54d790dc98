//! GPU-side vertex and uniform layouts

use bytemuck::{Pod, Zeroable};

use crate::mesh::SurfaceMesh;
use crate::scene::material::Material;

/// Lit surface vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    /// Interleave a mesh's position and normal buffers
    pub fn from_mesh(mesh: &SurfaceMesh) -> Vec<MeshVertex> {
        mesh.positions
            .chunks_exact(3)
            .zip(mesh.normals.chunks_exact(3))
            .map(|(p, n)| MeshVertex {
                position: [p[0], p[1], p[2]],
                normal: [n[0], n[1], n[2]],
            })
            .collect()
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Sand particle point
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
}

impl PointVertex {
    /// View a flat xyz buffer as points without copying
    pub fn cast(positions: &[f32]) -> Option<&[PointVertex]> {
        match bytemuck::try_cast_slice(positions) {
            Ok(points) => Some(points),
            Err(err) => {
                log::warn!("Particle buffer of {} floats not uploadable: {}", positions.len(), err);
                None
            }
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            }],
        }
    }
}

/// Per-draw material block (must match shader)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MaterialUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],    // rgb + opacity
    pub emissive: [f32; 4], // rgb + intensity
    pub roughness: f32,
    pub metalness: f32,
    pub clearcoat: f32,
    pub flags: u32, // bit0 transparent, bit1 double sided, bit2 receives shadow
}

impl MaterialUniform {
    pub const TRANSPARENT: u32 = 1;
    pub const DOUBLE_SIDED: u32 = 1 << 1;
    pub const RECEIVE_SHADOW: u32 = 1 << 2;

    pub fn new(material: &Material, model: glam::Mat4, receive_shadow: bool) -> Self {
        let mut flags = 0;
        if material.transparent {
            flags |= Self::TRANSPARENT;
        }
        if material.double_sided {
            flags |= Self::DOUBLE_SIDED;
        }
        if receive_shadow {
            flags |= Self::RECEIVE_SHADOW;
        }
        let alpha = if material.transparent { material.opacity } else { 1.0 };
        Self {
            model: model.to_cols_array_2d(),
            color: material.color.extend(alpha).to_array(),
            emissive: material.emissive.extend(material.emissive_intensity).to_array(),
            roughness: material.roughness,
            metalness: material.metalness,
            clearcoat: material.clearcoat,
            flags,
        }
    }
}
