//! Scene graph nodes

use glam::{EulerRot, Mat4, Quat, Vec3};
use std::rc::Rc;

use super::animation::AnimationState;
use super::material::Material;
use crate::mesh::SurfaceMesh;

/// Explicit entity tag. Update routines and lookups match on this, never on
/// material or geometry values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Group,
    Terrain,
    PalmTree,
    Trunk,
    Frond,
    Leaflet,
    Coconut,
    GrassCluster,
    GrassBlade,
    Seashell,
    Driftwood,
    Seaweed,
    SeaweedStrand,
    SandRipple,
    Footprint,
    TidalPool,
    Umbrella,
    Towel,
    Shoreline,
    Foam,
    WaveCrest,
    WetSand,
    Crab,
    Fish,
    Island,
    Flower,
    Rock,
    FoamRing,
    Mermaid,
    MermaidHair,
    MermaidTail,
    Bird,
    Wing,
    /// Static sub-part of a composite entity
    Part,
}

/// Position, Euler XYZ rotation and scale relative to the parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Local-to-parent matrix
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }
}

/// Renderable geometry. Meshes are shared between instances of one factory.
#[derive(Debug, Clone)]
pub struct Shape {
    pub mesh: Rc<SurfaceMesh>,
    pub material: Material,
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub kind: EntityKind,
    pub transform: Transform,
    pub shape: Option<Shape>,
    pub children: Vec<Entity>,
    pub animation: Option<AnimationState>,
    pub cast_shadow: bool,
    pub receive_shadow: bool,
}

impl Entity {
    /// Empty node that only groups children
    pub fn group(kind: EntityKind, transform: Transform) -> Self {
        Self {
            kind,
            transform,
            shape: None,
            children: Vec::new(),
            animation: None,
            cast_shadow: false,
            receive_shadow: false,
        }
    }

    pub fn mesh(kind: EntityKind, mesh: Rc<SurfaceMesh>, material: Material, transform: Transform) -> Self {
        Self {
            shape: Some(Shape { mesh, material }),
            ..Self::group(kind, transform)
        }
    }

    pub fn with_child(mut self, child: Entity) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_animation(mut self, animation: AnimationState) -> Self {
        self.animation = Some(animation);
        self
    }

    pub fn casting_shadow(mut self) -> Self {
        self.cast_shadow = true;
        self
    }

    pub fn receiving_shadow(mut self) -> Self {
        self.receive_shadow = true;
        self
    }

    pub fn material(&self) -> Option<&Material> {
        self.shape.as_ref().map(|s| &s.material)
    }

    pub fn material_mut(&mut self) -> Option<&mut Material> {
        self.shape.as_mut().map(|s| &mut s.material)
    }

    /// First direct child of `kind`
    pub fn child(&self, kind: EntityKind) -> Option<&Entity> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// First descendant (depth-first, self included) of `kind`
    pub fn find(&self, kind: EntityKind) -> Option<&Entity> {
        if self.kind == kind {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(kind))
    }

    /// Count of nodes in this subtree, self included
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Entity::node_count).sum::<usize>()
    }

    /// Visit every node depth-first with its world matrix
    pub fn walk<'a>(&'a self, parent: Mat4, visit: &mut impl FnMut(&'a Entity, Mat4)) {
        let world = parent * self.transform.matrix();
        visit(self, world);
        for child in &self.children {
            child.walk(world, visit);
        }
    }

    /// Visit every node depth-first, mutably
    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut Entity)) {
        visit(self);
        for child in &mut self.children {
            child.walk_mut(visit);
        }
    }
}
