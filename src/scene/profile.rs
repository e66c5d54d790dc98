//! Scene assembly profiles
//!
//! A profile is the set of constants that distinguish one beach variant from
//! another: entity counts, anchor points, feature toggles and light scale.

use serde::{Deserialize, Serialize};

/// Named profile presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProfilePreset {
    #[default]
    Luxe,
    Tropical,
    Tranquil,
    Lite,
}

impl ProfilePreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfilePreset::Luxe => "Luxe",
            ProfilePreset::Tropical => "Tropical",
            ProfilePreset::Tranquil => "Tranquil",
            ProfilePreset::Lite => "Lite",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "luxe" | "luxury" => Some(ProfilePreset::Luxe),
            "tropical" => Some(ProfilePreset::Tropical),
            "tranquil" | "calm" => Some(ProfilePreset::Tranquil),
            "lite" | "low" => Some(ProfilePreset::Lite),
            _ => None,
        }
    }
}

/// Scene assembly constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneProfile {
    pub preset: ProfilePreset,

    // === Fauna ===
    pub crab_count: usize,
    pub fish_count: usize,

    // === Beach debris ===
    pub shell_count: usize,
    pub driftwood_count: usize,
    pub seaweed_count: usize,
    pub tidal_pool_count: usize,
    pub ripple_count: usize,
    pub footprint_count: usize,
    /// Umbrella/towel pairs
    pub amenity_count: usize,
    pub particle_count: usize,

    // === Vegetation anchors (x, z) ===
    pub palm_anchors: Vec<[f32; 2]>,
    pub grass_anchors: Vec<[f32; 2]>,

    // === Feature toggles ===
    pub island: bool,
    pub amenities: bool,
    pub footprints: bool,
    pub particles: bool,

    /// Multiplier applied to every light intensity
    pub light_scale: f32,
}

impl Default for SceneProfile {
    fn default() -> Self {
        Self {
            preset: ProfilePreset::Luxe,

            crab_count: 8,
            fish_count: 5,

            shell_count: 25,
            driftwood_count: 8,
            seaweed_count: 15,
            tidal_pool_count: 5,
            ripple_count: 50,
            footprint_count: 20,
            amenity_count: 3,
            particle_count: 2000,

            palm_anchors: vec![[-15.0, 35.0], [15.0, 38.0], [-20.0, 45.0], [20.0, 42.0]],
            grass_anchors: vec![[-10.0, 30.0], [10.0, 32.0], [-25.0, 40.0], [25.0, 38.0], [0.0, 35.0]],

            island: true,
            amenities: true,
            footprints: true,
            particles: true,

            light_scale: 1.0,
        }
    }
}

impl SceneProfile {
    /// Build the profile for a preset
    pub fn from_preset(preset: ProfilePreset) -> Self {
        let base = Self::default();
        match preset {
            ProfilePreset::Luxe => base,
            ProfilePreset::Tropical => Self {
                preset,
                crab_count: 10,
                fish_count: 8,
                seaweed_count: 20,
                palm_anchors: vec![
                    [-15.0, 35.0],
                    [15.0, 38.0],
                    [-20.0, 45.0],
                    [20.0, 42.0],
                    [-30.0, 48.0],
                    [30.0, 46.0],
                ],
                light_scale: 1.1,
                ..base
            },
            ProfilePreset::Tranquil => Self {
                preset,
                crab_count: 4,
                fish_count: 3,
                amenities: false,
                footprints: false,
                light_scale: 0.85,
                ..base
            },
            ProfilePreset::Lite => Self {
                preset,
                shell_count: 10,
                seaweed_count: 6,
                tidal_pool_count: 2,
                ripple_count: 20,
                particle_count: 500,
                island: false,
                ..base
            },
        }
    }

    /// Parse a profile document; missing fields take the default values
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Particle count honoring the particle toggle
    pub fn effective_particles(&self) -> usize {
        if self.particles { self.particle_count } else { 0 }
    }

    /// Umbrella/towel pairs honoring the amenity toggle
    pub fn effective_amenities(&self) -> usize {
        if self.amenities { self.amenity_count } else { 0 }
    }
}
