//! Surface material parameters handed to the render engine

use glam::Vec3;

/// RGB color with components in [0, 1]
pub type Color = Vec3;

/// Convert a `0xRRGGBB` literal to a color
pub fn hex(rgb: u32) -> Color {
    Vec3::new(
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
    )
}

/// Convert hue/saturation/lightness (all in [0, 1]) to a color
pub fn hsl(h: f32, s: f32, l: f32) -> Color {
    let h = h.rem_euclid(1.0);
    if s <= 0.0 {
        return Vec3::splat(l);
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |t: f32| {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * 6.0 * (2.0 / 3.0 - t)
        } else {
            p
        }
    };
    Vec3::new(channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
}

/// Physically based material description
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub roughness: f32,
    pub metalness: f32,
    /// Alpha in [0, 1]; only honored when `transparent` is set
    pub opacity: f32,
    pub transparent: bool,
    pub emissive: Color,
    pub emissive_intensity: f32,
    pub clearcoat: f32,
    pub double_sided: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            roughness: 1.0,
            metalness: 0.0,
            opacity: 1.0,
            transparent: false,
            emissive: Vec3::ZERO,
            emissive_intensity: 0.0,
            clearcoat: 0.0,
            double_sided: false,
        }
    }
}

impl Material {
    pub fn new(color: Color, roughness: f32, metalness: f32) -> Self {
        Self {
            color,
            roughness,
            metalness,
            ..Default::default()
        }
    }

    pub fn from_hex(rgb: u32, roughness: f32, metalness: f32) -> Self {
        Self::new(hex(rgb), roughness, metalness)
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.transparent = true;
        self.opacity = opacity;
        self
    }

    pub fn with_emissive(mut self, color: Color, intensity: f32) -> Self {
        self.emissive = color;
        self.emissive_intensity = intensity;
        self
    }

    pub fn with_clearcoat(mut self, clearcoat: f32) -> Self {
        self.clearcoat = clearcoat;
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }
}
