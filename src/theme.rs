//! Visual themes and saved preferences
//!
//! Three independent choices are remembered between visits: the leather
//! pattern behind the gauges, the time of day and the gauge color theme.

use serde::{Deserialize, Serialize};

use crate::persistence::PreferenceStore;
use crate::scene::material::hex;
use crate::scene::Scene;

/// Leather finish of the gauge pad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeatherPattern {
    #[default]
    Classic,
    Quilted,
    Croc,
    Saffiano,
}

impl LeatherPattern {
    pub const ALL: [LeatherPattern; 4] = [Self::Classic, Self::Quilted, Self::Croc, Self::Saffiano];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeatherPattern::Classic => "classic",
            LeatherPattern::Quilted => "quilted",
            LeatherPattern::Croc => "croc",
            LeatherPattern::Saffiano => "saffiano",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(LeatherPattern::Classic),
            "quilted" => Some(LeatherPattern::Quilted),
            "croc" | "crocodile" => Some(LeatherPattern::Croc),
            "saffiano" => Some(LeatherPattern::Saffiano),
            _ => None,
        }
    }
}

/// Lighting values applied for one time of day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeModePreset {
    pub ambient_color: u32,
    pub ambient_intensity: f32,
    pub sun_color: u32,
    pub sun_intensity: f32,
    pub turbidity: f32,
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    pub mie_directional_g: f32,
    pub water_color: u32,
    pub water_sun_color: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeMode {
    #[default]
    Day,
    Dusk,
    Night,
}

impl TimeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeMode::Day => "day",
            TimeMode::Dusk => "dusk",
            TimeMode::Night => "night",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "day" => Some(TimeMode::Day),
            "dusk" | "sunset" => Some(TimeMode::Dusk),
            "night" => Some(TimeMode::Night),
            _ => None,
        }
    }

    /// Indicator shown next to the time-of-day selector
    pub fn icon(&self) -> &'static str {
        match self {
            TimeMode::Day => "☀️",
            TimeMode::Dusk => "🌅",
            TimeMode::Night => "🌙",
        }
    }

    pub fn preset(&self) -> TimeModePreset {
        match self {
            TimeMode::Day => TimeModePreset {
                ambient_color: 0xffc0cb,
                ambient_intensity: 0.6,
                sun_color: 0xffd700,
                sun_intensity: 1.2,
                turbidity: 2.0,
                rayleigh: 1.0,
                mie_coefficient: 0.003,
                mie_directional_g: 0.97,
                water_color: 0x006994,
                water_sun_color: 0xffffff,
            },
            TimeMode::Dusk => TimeModePreset {
                ambient_color: 0xff8c69,
                ambient_intensity: 0.4,
                sun_color: 0xff6347,
                sun_intensity: 0.8,
                turbidity: 8.0,
                rayleigh: 3.0,
                mie_coefficient: 0.008,
                mie_directional_g: 0.85,
                water_color: 0x8b4513,
                water_sun_color: 0xff6347,
            },
            TimeMode::Night => TimeModePreset {
                ambient_color: 0x4169e1,
                ambient_intensity: 0.2,
                sun_color: 0x87ceeb,
                sun_intensity: 0.3,
                turbidity: 15.0,
                rayleigh: 0.5,
                mie_coefficient: 0.001,
                mie_directional_g: 0.95,
                water_color: 0x191970,
                water_sun_color: 0x87ceeb,
            },
        }
    }
}

/// Gauge palette colors (0xRRGGBB). The glow is drawn at 80% alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: u32,
    pub secondary: u32,
    pub accent: u32,
    pub glow: u32,
}

impl Palette {
    pub const GLOW_ALPHA: f32 = 0.8;

    /// `linear-gradient` value for the gauge readouts
    pub fn value_gradient(&self) -> String {
        format!(
            "linear-gradient(135deg, {} 0%, {} 100%)",
            css_hex(self.primary),
            css_hex(self.secondary)
        )
    }

    pub fn glow_rgba(&self) -> String {
        let [_, r, g, b] = self.glow.to_be_bytes();
        format!("rgba({}, {}, {}, {})", r, g, b, Self::GLOW_ALPHA)
    }
}

/// `#RRGGBB` for a packed color
pub fn css_hex(rgb: u32) -> String {
    format!("#{:06X}", rgb & 0xff_ffff)
}

/// Gauge color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Diamond,
    Emerald,
    Sapphire,
    Ruby,
    Obsidian,
}

impl ColorTheme {
    pub const ALL: [ColorTheme; 5] = [
        Self::Diamond,
        Self::Emerald,
        Self::Sapphire,
        Self::Ruby,
        Self::Obsidian,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTheme::Diamond => "diamond",
            ColorTheme::Emerald => "emerald",
            ColorTheme::Sapphire => "sapphire",
            ColorTheme::Ruby => "ruby",
            ColorTheme::Obsidian => "obsidian",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "diamond" => Some(ColorTheme::Diamond),
            "emerald" => Some(ColorTheme::Emerald),
            "sapphire" => Some(ColorTheme::Sapphire),
            "ruby" => Some(ColorTheme::Ruby),
            "obsidian" => Some(ColorTheme::Obsidian),
            _ => None,
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            ColorTheme::Diamond => Palette {
                primary: 0xffd700,
                secondary: 0xff1493,
                accent: 0xffb6c1,
                glow: 0xffd700,
            },
            ColorTheme::Emerald => Palette {
                primary: 0x50c878,
                secondary: 0x228b22,
                accent: 0x90ee90,
                glow: 0x50c878,
            },
            ColorTheme::Sapphire => Palette {
                primary: 0x0f52ba,
                secondary: 0x4169e1,
                accent: 0x87ceeb,
                glow: 0x4169e1,
            },
            ColorTheme::Ruby => Palette {
                primary: 0xe0115f,
                secondary: 0xdc143c,
                accent: 0xfa8072,
                glow: 0xe0115f,
            },
            ColorTheme::Obsidian => Palette {
                primary: 0xc0c0c0,
                secondary: 0x808080,
                accent: 0xd3d3d3,
                glow: 0xc0c0c0,
            },
        }
    }
}

/// The three remembered choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemePreference {
    pub leather_pattern: LeatherPattern,
    pub time_mode: TimeMode,
    pub color_theme: ColorTheme,
}

impl ThemePreference {
    pub const LEATHER_KEY: &'static str = "leatherPattern";
    pub const TIME_MODE_KEY: &'static str = "timeMode";
    pub const COLOR_THEME_KEY: &'static str = "diamondLineTheme";

    /// Read every preference, falling back to the default for anything
    /// missing or unrecognized
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let prefs = Self {
            leather_pattern: read(store, Self::LEATHER_KEY, LeatherPattern::from_str),
            time_mode: read(store, Self::TIME_MODE_KEY, TimeMode::from_str),
            color_theme: read(store, Self::COLOR_THEME_KEY, ColorTheme::from_str),
        };
        log::info!(
            "Preferences: leather={}, time={}, theme={}",
            prefs.leather_pattern.as_str(),
            prefs.time_mode.as_str(),
            prefs.color_theme.as_str()
        );
        prefs
    }

    pub fn save(&self, store: &mut dyn PreferenceStore) {
        store.set(Self::LEATHER_KEY, self.leather_pattern.as_str());
        store.set(Self::TIME_MODE_KEY, self.time_mode.as_str());
        store.set(Self::COLOR_THEME_KEY, self.color_theme.as_str());
    }

    pub fn set_leather_pattern(&mut self, pattern: LeatherPattern, store: &mut dyn PreferenceStore) {
        self.leather_pattern = pattern;
        store.set(Self::LEATHER_KEY, pattern.as_str());
    }

    pub fn set_color_theme(&mut self, theme: ColorTheme, store: &mut dyn PreferenceStore) {
        self.color_theme = theme;
        store.set(Self::COLOR_THEME_KEY, theme.as_str());
    }
}

fn read<T: Default>(store: &dyn PreferenceStore, key: &str, parse: fn(&str) -> Option<T>) -> T {
    match store.get(key) {
        Some(raw) => parse(&raw).unwrap_or_else(|| {
            log::warn!("Unknown {} value {:?}, using default", key, raw);
            T::default()
        }),
        None => T::default(),
    }
}

/// Write the time-of-day preset into the scene's lights, sky and water
pub fn apply_time_mode(scene: &mut Scene, mode: TimeMode) {
    let preset = mode.preset();
    let scale = scene.profile.light_scale;

    scene.lighting.ambient.color = hex(preset.ambient_color);
    scene.lighting.ambient.intensity = preset.ambient_intensity * scale;
    scene.lighting.sun.color = hex(preset.sun_color);
    scene.lighting.sun.intensity = preset.sun_intensity * scale;

    scene.sky.turbidity = preset.turbidity;
    scene.sky.rayleigh = preset.rayleigh;
    scene.sky.mie_coefficient = preset.mie_coefficient;
    scene.sky.mie_directional_g = preset.mie_directional_g;

    scene.water.color = hex(preset.water_color);
    scene.water.sun_color = hex(preset.water_sun_color);
}

/// Switch the time of day: relight the scene and remember the choice
pub fn switch_time_mode(
    scene: &mut Scene,
    prefs: &mut ThemePreference,
    store: &mut dyn PreferenceStore,
    mode: TimeMode,
) {
    apply_time_mode(scene, mode);
    prefs.time_mode = mode;
    store.set(ThemePreference::TIME_MODE_KEY, mode.as_str());
    log::info!("Time mode: {}", mode.as_str());
}
