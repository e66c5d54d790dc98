//! Luxe Shore - a procedural luxury beach scene with a gauge dashboard
//!
//! Core modules:
//! - `noise`: Height functions that sculpt dunes, foam and the island
//! - `mesh`: Procedural mesh builders (grids, tubes, primitives, particle fields)
//! - `factories`: Entity constructors (palms, crabs, fish, island, ...)
//! - `scene`: Scene aggregate, entity model and assembly profiles
//! - `sim`: Per-frame animation update loop
//! - `theme`, `persistence`: Time-of-day lighting, palettes and saved preferences
//! - `ui`: Tweens, gauges and the dashboard ticker
//! - `renderer`: Hand-off to the external render engine

pub mod audio;
pub mod factories;
pub mod mesh;
pub mod noise;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod sim;
pub mod theme;
pub mod ui;

pub use persistence::{MemoryStore, PreferenceStore};
pub use scene::{ProfilePreset, Scene, SceneProfile};
pub use theme::{ColorTheme, LeatherPattern, ThemePreference, TimeMode};

/// Scene configuration constants
pub mod consts {
    /// Frame rate the per-frame constants were tuned for
    pub const REFERENCE_FPS: f32 = 60.0;
    /// Duration of one reference frame in seconds
    pub const REFERENCE_DT: f32 = 1.0 / REFERENCE_FPS;
    /// Largest frame delta accepted by the clock (prevents jumps after a stall)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Crab wander bounds
    pub const CRAB_X_LIMIT: f32 = 30.0;
    pub const CRAB_Z_MIN: f32 = 15.0;
    pub const CRAB_Z_MAX: f32 = 45.0;
    /// Crab resting height above the water plane
    pub const CRAB_BASE_Y: f32 = -1.2;
    /// Delay range before a crab picks a new heading (ms)
    pub const CRAB_TURN_MIN_MS: f64 = 3000.0;
    pub const CRAB_TURN_MAX_MS: f64 = 8000.0;

    /// Fish jump arc
    pub const FISH_REST_Y: f32 = -3.0;
    pub const FISH_JUMP_HEIGHT: f32 = 5.0;
    pub const FISH_JUMP_FORWARD: f32 = 10.0;
    pub const FISH_JUMP_DURATION_MS: f64 = 2000.0;
    /// Delay range between jumps (ms)
    pub const FISH_REST_MIN_MS: f64 = 5000.0;
    pub const FISH_REST_MAX_MS: f64 = 15000.0;

    /// Sand particle wrap box
    pub const PARTICLE_X_MIN: f32 = -100.0;
    pub const PARTICLE_X_MAX: f32 = 100.0;
    pub const PARTICLE_Y_MIN: f32 = -2.0;
    pub const PARTICLE_Y_MAX: f32 = 10.0;

    /// Water plane height
    pub const WATER_LEVEL: f32 = -2.0;
}

/// Normalized angle to [-π, π). Non-finite input comes back as NaN.
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    (angle + PI).rem_euclid(TAU) - PI
}

/// Point on a horizontal circle of radius `r` at angle `theta` (XZ plane)
#[inline]
pub fn polar_to_xz(r: f32, theta: f32) -> glam::Vec2 {
    glam::Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle() {
        // 3π sits on the wrap boundary, either end is acceptable in f32
        assert!((normalize_angle(3.0 * PI).abs() - PI).abs() < 1e-5);
        assert!((normalize_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-5);
        assert!((normalize_angle(-PI / 2.0) + PI / 2.0).abs() < 1e-6);
        assert!((normalize_angle(-7.5) - (-7.5 + 2.0 * PI)).abs() < 1e-5);
        assert!(normalize_angle(7.5) < PI);
    }

    #[test]
    fn test_normalize_angle_non_finite() {
        assert!(normalize_angle(f32::INFINITY).is_nan());
        assert!(normalize_angle(f32::NEG_INFINITY).is_nan());
        assert!(normalize_angle(f32::NAN).is_nan());
    }

    #[test]
    fn test_polar_to_xz() {
        let p = polar_to_xz(2.0, PI / 2.0);
        assert!(p.x.abs() < 1e-6);
        assert!((p.y - 2.0).abs() < 1e-6);
    }
}
