//! Render-engine boundary
//!
//! The crate never rasterizes. Each frame it flattens the scene into
//! [`draw::DrawItem`]s and hands them, with the frame uniforms and any fresh
//! particle positions, to a [`RenderBackend`].

pub mod draw;
pub mod vertex;

pub use draw::{DrawItem, FrameUniforms, MeshId, collect_draw_list};
pub use vertex::{MaterialUniform, MeshVertex, PointVertex};

use std::collections::HashSet;

use crate::scene::Scene;

/// Everything a backend needs to draw one frame
pub struct Frame<'a> {
    pub uniforms: FrameUniforms,
    pub items: &'a [DrawItem],
    /// Sand particle positions, present only when they moved since the last upload
    pub particles: Option<&'a [PointVertex]>,
}

/// External render engine
pub trait RenderBackend {
    /// Buffer layouts for lit meshes and sand points, in that order
    fn vertex_layouts(&self) -> [wgpu::VertexBufferLayout<'static>; 2] {
        [MeshVertex::desc(), PointVertex::desc()]
    }

    fn has_mesh(&self, id: MeshId) -> bool;
    fn upload_mesh(&mut self, id: MeshId, vertices: &[MeshVertex], indices: &[u32]);
    fn resize(&mut self, width: u32, height: u32);
    fn submit(&mut self, frame: &Frame<'_>);
}

/// Backend that draws nothing and keeps counts. Used natively and in tests.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HeadlessBackend {
    pub width: u32,
    pub height: u32,
    pub frames: u64,
    pub draw_calls: u64,
    pub triangles: u64,
    pub particle_uploads: u64,
    /// Bytes of vertex and index data sent so far
    pub uploaded_bytes: u64,
    meshes: HashSet<MeshId>,
    /// Draw calls in the most recent frame
    pub last_draw_calls: usize,
}

impl HeadlessBackend {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }
}

impl RenderBackend for HeadlessBackend {
    fn has_mesh(&self, id: MeshId) -> bool {
        self.meshes.contains(&id)
    }

    fn upload_mesh(&mut self, id: MeshId, vertices: &[MeshVertex], indices: &[u32]) {
        let [mesh_layout, _] = self.vertex_layouts();
        self.uploaded_bytes += vertices.len() as u64 * mesh_layout.array_stride;
        self.uploaded_bytes += std::mem::size_of_val(indices) as u64;
        self.meshes.insert(id);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn submit(&mut self, frame: &Frame<'_>) {
        self.frames += 1;
        self.last_draw_calls = frame.items.len();
        self.draw_calls += frame.items.len() as u64;
        self.triangles += frame.items.iter().map(|i| i.triangles() as u64).sum::<u64>();
        // Particles are one extra point-list draw
        if let Some(points) = frame.particles {
            let [_, point_layout] = self.vertex_layouts();
            self.particle_uploads += 1;
            self.uploaded_bytes += points.len() as u64 * point_layout.array_stride;
            self.draw_calls += 1;
            log::trace!("Uploaded {} sand particles", points.len());
        }
    }
}

/// Flatten the scene, upload meshes the backend has not seen and submit one frame
pub fn render(scene: &mut Scene, backend: &mut dyn RenderBackend) {
    let uniforms = FrameUniforms::from_scene(scene);
    let items = collect_draw_list(scene);
    for item in &items {
        let id = item.mesh_id();
        if !backend.has_mesh(id) {
            backend.upload_mesh(id, &MeshVertex::from_mesh(&item.mesh), &item.mesh.indices);
        }
    }
    let particles = match scene.particles.as_mut() {
        Some(field) => {
            if field.take_dirty() {
                PointVertex::cast(&field.positions)
            } else {
                None
            }
        }
        None => None,
    };
    backend.submit(&Frame {
        uniforms,
        items: &items,
        particles,
    });
}

/// Resize both the scene camera and the backend
pub fn resize(scene: &mut Scene, backend: &mut dyn RenderBackend, width: u32, height: u32) {
    scene.resize(width, height);
    backend.resize(width, height);
}
