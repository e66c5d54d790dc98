//! Camera, lights, sky, water and global render settings

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::material::{hex, Color};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 15.0, 50.0),
            target: Vec3::ZERO,
            fov_deg: 75.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 10_000.0,
        }
    }
}

impl Camera {
    /// Recompute the aspect ratio for a new viewport. Zero-sized viewports
    /// (minimized windows) keep the previous ratio.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::warn!("Ignoring degenerate viewport {}x{}", width, height);
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }
}

/// Orbit controller limits consumed by the external camera controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitLimits {
    pub damping: f32,
    pub max_polar_angle: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            damping: 0.05,
            max_polar_angle: std::f32::consts::PI * 0.495,
            min_distance: 10.0,
            max_distance: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
}

impl Light {
    pub fn new(rgb: u32, intensity: f32, position: Vec3) -> Self {
        Self {
            color: hex(rgb),
            intensity,
            position,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient: Light,
    /// Shadow-casting key light
    pub sun: Light,
    pub rim: Light,
    /// Half-extent of the sun's orthographic shadow frustum
    pub shadow_extent: f32,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: Light::new(0xffc0cb, 0.6, Vec3::ZERO),
            sun: Light::new(0xffd700, 1.2, Vec3::new(100.0, 100.0, 50.0)),
            rim: Light::new(0xff69b4, 0.5, Vec3::new(-50.0, 50.0, -50.0)),
            shadow_extent: 50.0,
        }
    }
}

/// Atmospheric scattering parameters for the external sky shader
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sky {
    pub turbidity: f32,
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    pub mie_directional_g: f32,
    pub sun_direction: Vec3,
}

impl Sky {
    /// Sun direction from polar/azimuth angles in degrees (unit sphere)
    pub fn sun_from_degrees(polar_deg: f32, azimuth_deg: f32) -> Vec3 {
        let phi = polar_deg.to_radians();
        let theta = azimuth_deg.to_radians();
        Vec3::new(phi.sin() * theta.sin(), phi.cos(), phi.sin() * theta.cos())
    }
}

impl Default for Sky {
    fn default() -> Self {
        Self {
            turbidity: 2.0,
            rayleigh: 1.0,
            mie_coefficient: 0.003,
            mie_directional_g: 0.97,
            sun_direction: Self::sun_from_degrees(88.0, 180.0),
        }
    }
}

/// Uniforms for the external water shader
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Water {
    pub color: Color,
    pub sun_color: Color,
    pub level: f32,
    pub distortion_scale: f32,
    pub alpha: f32,
    /// Shader clock in seconds
    pub time: f32,
}

impl Default for Water {
    fn default() -> Self {
        Self {
            color: hex(0x001e2f),
            sun_color: hex(0xffffff),
            level: crate::consts::WATER_LEVEL,
            distortion_scale: 2.0,
            alpha: 0.95,
            time: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneMapping {
    None,
    AcesFilmic,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub tone_mapping: ToneMapping,
    pub exposure: f32,
    pub shadows: bool,
    pub antialias: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            tone_mapping: ToneMapping::AcesFilmic,
            exposure: 0.8,
            shadows: true,
            antialias: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_updates_aspect() {
        let mut camera = Camera::default();
        camera.resize(1920, 1080);
        assert!((camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        camera.resize(0, 600);
        assert!((camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn test_default_sun_is_near_horizon() {
        let sun = Sky::default().sun_direction;
        assert!((sun.length() - 1.0).abs() < 1e-5);
        // 88 degrees from the zenith
        assert!(sun.y > 0.0 && sun.y < 0.05);
        assert!(sun.z < -0.99);
    }
}
