//! Height functions for sculpting terrain-like surfaces
//!
//! Every field is a pure function of horizontal position. Random jitter is
//! never sampled here: mesh builders add it once at construction time from an
//! injected RNG, so a field evaluated twice at the same point always agrees.

use glam::Vec3;

/// A scalar displacement over the horizontal plane
pub trait HeightField {
    fn height(&self, x: f32, z: f32) -> f32;
}

impl<F: Fn(f32, f32) -> f32> HeightField for F {
    fn height(&self, x: f32, z: f32) -> f32 {
        self(x, z)
    }
}

/// Near-shore dunes: two crossed low-frequency swells plus fine ripples
#[derive(Debug, Clone, Copy)]
pub struct DuneField {
    pub primary_amplitude: f32,
    pub secondary_amplitude: f32,
    pub ripple_amplitude: f32,
}

impl Default for DuneField {
    fn default() -> Self {
        Self {
            primary_amplitude: 2.0,
            secondary_amplitude: 3.0,
            ripple_amplitude: 0.2,
        }
    }
}

impl HeightField for DuneField {
    fn height(&self, x: f32, z: f32) -> f32 {
        let dune1 = (x * 0.05).sin() * (z * 0.03).cos() * self.primary_amplitude;
        let dune2 = (x * 0.02 + 1.0).sin() * (z * 0.04).cos() * self.secondary_amplitude;
        let ripples = (x * 0.3).sin() * (z * 0.3).cos() * self.ripple_amplitude;
        dune1 + dune2 + ripples
    }
}

/// Distant rolling dunes behind the beach
#[derive(Debug, Clone, Copy)]
pub struct RollingDunes {
    pub frequency: f32,
    pub amplitude: f32,
}

impl Default for RollingDunes {
    fn default() -> Self {
        Self {
            frequency: 0.02,
            amplitude: 5.0,
        }
    }
}

impl HeightField for RollingDunes {
    fn height(&self, x: f32, z: f32) -> f32 {
        (x * self.frequency).sin() * (z * self.frequency).cos() * self.amplitude
    }
}

/// Foam band where waves meet the sand
#[derive(Debug, Clone, Copy, Default)]
pub struct FoamBand;

impl HeightField for FoamBand {
    fn height(&self, x: f32, z: f32) -> f32 {
        (x * 0.1).sin() * 0.5 + (x * 0.3 + 1.0).sin() * 0.2 + (z * 0.2).sin() * 0.15
    }
}

/// Breaking wave crest profile (varies along the crest only)
#[derive(Debug, Clone, Copy, Default)]
pub struct CrestProfile;

impl HeightField for CrestProfile {
    fn height(&self, x: f32, _z: f32) -> f32 {
        (x * 0.2).sin() * 0.3
    }
}

/// Shallow ripples on the reflective wet sand
#[derive(Debug, Clone, Copy, Default)]
pub struct WetSandRipple;

impl HeightField for WetSandRipple {
    fn height(&self, x: f32, z: f32) -> f32 {
        (x * 0.1).sin() * 0.05 + (z * 0.15).sin() * 0.03
    }
}

/// Wind ripple strip laid on the dry sand
#[derive(Debug, Clone, Copy, Default)]
pub struct RippleStrip;

impl HeightField for RippleStrip {
    fn height(&self, x: f32, _z: f32) -> f32 {
        (x * 2.0).sin() * 0.05
    }
}

/// Concentric swell used for the foam ring around the island
#[derive(Debug, Clone, Copy, Default)]
pub struct RingSwell;

impl HeightField for RingSwell {
    fn height(&self, x: f32, z: f32) -> f32 {
        let distance = (x * x + z * z).sqrt();
        (distance * 0.5).sin() * 0.3
    }
}

/// Organic perturbation of the island cone
///
/// Unlike the other fields this one pushes vertices sideways: `height` gives
/// the coarse noise term and [`IslandSilhouette::perturb`] applies the full
/// radial reshaping including the beach slope below the waterline.
#[derive(Debug, Clone, Copy)]
pub struct IslandSilhouette {
    /// Local height below which the flanks flare out into a beach
    pub slope_start: f32,
    /// Flare per unit of depth below `slope_start`
    pub slope_rate: f32,
}

impl Default for IslandSilhouette {
    fn default() -> Self {
        Self {
            slope_start: -2.0,
            slope_rate: 0.1,
        }
    }
}

impl IslandSilhouette {
    /// Fine detail term layered on top of the coarse noise
    pub fn detail(&self, x: f32, z: f32) -> f32 {
        (x * 2.0).sin() * (z * 2.0).cos() * 0.3
    }

    /// Reshape one vertex of the base cone
    pub fn perturb(&self, p: Vec3) -> Vec3 {
        let noise = self.height(p.x, p.z);
        let detail = self.detail(p.x, p.z);
        let mut out = Vec3::new(p.x + noise + detail, p.y, p.z + noise * 0.8 + detail);

        if p.y < self.slope_start {
            let flare = 1.0 + (p.y - self.slope_start) * self.slope_rate;
            out.x *= flare;
            out.z *= flare;
        }
        out
    }
}

impl HeightField for IslandSilhouette {
    fn height(&self, x: f32, z: f32) -> f32 {
        (x * 0.3).sin() * (z * 0.3).cos() * 1.5
    }
}
