//! Scene flattening
//!
//! Turns the entity tree into a flat list of world-space draws plus one
//! block of per-frame uniforms, which is all a render engine needs.

use std::rc::Rc;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::vertex::MaterialUniform;
use crate::mesh::SurfaceMesh;
use crate::scene::environment::Light;
use crate::scene::{EntityKind, Scene};

// ============================================================================
// GPU DATA STRUCTURES (must match shader)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4], // offset 0
    pub camera_pos: [f32; 4],     // offset 64, w = exposure
    pub ambient: [f32; 4],        // offset 80, rgb + intensity
    pub sun_color: [f32; 4],      // offset 96, rgb + intensity
    pub sun_pos: [f32; 4],        // offset 112, w = shadow half-extent
    pub rim_color: [f32; 4],      // offset 128, rgb + intensity
    pub rim_pos: [f32; 4],        // offset 144, w = water time
    pub water_color: [f32; 4],    // offset 160, a = water alpha
    pub sky_sun_dir: [f32; 4],    // offset 176, w = turbidity
}

fn light_color(light: &Light) -> [f32; 4] {
    light.color.extend(light.intensity).to_array()
}

impl FrameUniforms {
    pub fn from_scene(scene: &Scene) -> Self {
        let lighting = &scene.lighting;
        Self {
            view_proj: scene.camera.view_projection().to_cols_array_2d(),
            camera_pos: scene.camera.position.extend(scene.render.exposure).to_array(),
            ambient: light_color(&lighting.ambient),
            sun_color: light_color(&lighting.sun),
            sun_pos: lighting.sun.position.extend(lighting.shadow_extent).to_array(),
            rim_color: light_color(&lighting.rim),
            rim_pos: lighting.rim.position.extend(scene.water.time).to_array(),
            water_color: scene.water.color.extend(scene.water.alpha).to_array(),
            sky_sun_dir: scene.sky.sun_direction.extend(scene.sky.turbidity).to_array(),
        }
    }
}

/// Key under which a backend caches an uploaded mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(usize);

/// One mesh draw in world space
#[derive(Debug, Clone)]
pub struct DrawItem {
    pub kind: EntityKind,
    pub mesh: Rc<SurfaceMesh>,
    pub uniform: MaterialUniform,
    pub cast_shadow: bool,
}

impl DrawItem {
    /// Identity of the shared mesh. Scene meshes live as long as the scene,
    /// so an id is never reused while a backend holds its upload.
    pub fn mesh_id(&self) -> MeshId {
        MeshId(Rc::as_ptr(&self.mesh) as usize)
    }

    pub fn triangles(&self) -> usize {
        self.mesh.triangle_count()
    }

    pub fn is_transparent(&self) -> bool {
        self.uniform.flags & MaterialUniform::TRANSPARENT != 0
    }
}

/// Flatten every shaped node of the scene, opaque draws first.
///
/// Group nodes contribute only their transform. Within each pass the scene's
/// root order is kept.
pub fn collect_draw_list(scene: &Scene) -> Vec<DrawItem> {
    let mut items = Vec::with_capacity(scene.node_count());
    for root in scene.roots() {
        root.walk(Mat4::IDENTITY, &mut |entity, world| {
            if let Some(shape) = &entity.shape {
                items.push(DrawItem {
                    kind: entity.kind,
                    mesh: Rc::clone(&shape.mesh),
                    uniform: MaterialUniform::new(&shape.material, world, entity.receive_shadow),
                    cast_shadow: entity.cast_shadow && scene.render.shadows,
                });
            }
        });
    }
    // Stable, so relative order inside each pass survives
    items.sort_by_key(DrawItem::is_transparent);
    items
}
