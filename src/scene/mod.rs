//! Scene aggregate
//!
//! The scene owns every entity, grouped by role, along with the camera,
//! lights, sky, water, render settings, its seeded RNG and the frame clock.
//! Entities are created once by [`assembly::assemble`] and then mutated in
//! place by `sim::tick`; nothing is spawned or despawned afterwards.

pub mod animation;
pub mod assembly;
pub mod entity;
pub mod environment;
pub mod material;
pub mod profile;

pub use animation::AnimationState;
pub use entity::{Entity, EntityKind, Shape, Transform};
pub use environment::{Camera, Lighting, OrbitLimits, RenderSettings, Sky, Water};
pub use material::Material;
pub use profile::{ProfilePreset, SceneProfile};

use rand_pcg::Pcg32;

use crate::mesh::ParticleField;
use crate::sim::clock::FrameClock;

pub struct Scene {
    pub profile: SceneProfile,

    pub camera: Camera,
    pub orbit: OrbitLimits,
    pub lighting: Lighting,
    pub sky: Sky,
    pub water: Water,
    pub render: RenderSettings,

    /// Dune patches
    pub terrain: Vec<Entity>,
    /// Shells, driftwood, ripples, footprints, pools, umbrellas, towels
    pub props: Vec<Entity>,
    /// Palms, grass clusters, seaweed
    pub vegetation: Vec<Entity>,
    pub crabs: Vec<Entity>,
    pub fish: Vec<Entity>,
    pub shoreline: Entity,
    pub wet_sand: Entity,
    pub island: Option<Entity>,
    pub particles: Option<ParticleField>,

    /// Source for runtime randomness (crab turns, fish scheduling)
    pub rng: Pcg32,
    pub clock: FrameClock,
}

impl Scene {
    /// Every top-level entity, in render order
    pub fn roots(&self) -> impl Iterator<Item = &Entity> {
        self.terrain
            .iter()
            .chain(std::iter::once(&self.wet_sand))
            .chain(std::iter::once(&self.shoreline))
            .chain(self.props.iter())
            .chain(self.vegetation.iter())
            .chain(self.crabs.iter())
            .chain(self.fish.iter())
            .chain(self.island.iter())
    }

    /// Total node count across every entity tree
    pub fn node_count(&self) -> usize {
        self.roots().map(Entity::node_count).sum()
    }

    /// Apply a viewport change. Only the camera projection depends on it.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }
}
