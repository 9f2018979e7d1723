use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = include_str!("../../assets/default_config.toml");

/// Every sensitivity and threshold the controller consults. Device-capability
/// tuning lives here as data (pick a preset, or edit the config file) so the
/// controller logic itself stays platform-agnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionProfile {
    /// Visibility ratio at which the strip captures input.
    #[serde(default = "default_activation_threshold")]
    pub activation_threshold: f32,
    /// Wheel |delta_y| below this is trackpad noise, never vertical intent.
    #[serde(default = "default_wheel_noise_threshold")]
    pub wheel_noise_threshold: f32,
    /// Scale applied to consumed wheel deltas.
    #[serde(default = "default_wheel_damping")]
    pub wheel_damping: f32,
    /// Scale applied to touch drag deltas.
    #[serde(default = "default_drag_sensitivity")]
    pub drag_sensitivity: f32,
    /// Minimum release velocity (offset units/ms) that produces a fling.
    #[serde(default = "default_fling_threshold")]
    pub fling_threshold: f32,
    /// Offset units added per unit/ms of release velocity.
    #[serde(default = "default_fling_projection")]
    pub fling_projection: f32,
    /// How long `is_scrolling` stays up after the last horizontal input.
    #[serde(default = "default_scroll_idle_ms")]
    pub scroll_idle_ms: u64,
}

fn default_activation_threshold() -> f32 { 0.6 }
fn default_wheel_noise_threshold() -> f32 { 10.0 }
fn default_wheel_damping() -> f32 { 0.8 }
fn default_drag_sensitivity() -> f32 { 1.2 }
fn default_fling_threshold() -> f32 { 0.1 }
fn default_fling_projection() -> f32 { 200.0 }
fn default_scroll_idle_ms() -> u64 { 150 }

impl Default for InteractionProfile {
    fn default() -> Self {
        Self {
            activation_threshold: default_activation_threshold(),
            wheel_noise_threshold: default_wheel_noise_threshold(),
            wheel_damping: default_wheel_damping(),
            drag_sensitivity: default_drag_sensitivity(),
            fling_threshold: default_fling_threshold(),
            fling_projection: default_fling_projection(),
            scroll_idle_ms: default_scroll_idle_ms(),
        }
    }
}

impl InteractionProfile {
    pub fn desktop() -> Self {
        Self::default()
    }

    /// Touch-first devices: heavier drag response and a longer fling, since
    /// fingers travel less than wheels.
    pub fn touch() -> Self {
        Self {
            drag_sensitivity: 1.5,
            fling_projection: 260.0,
            ..Self::default()
        }
    }

    /// Low-end devices: damp the wheel harder and skip flings below a higher
    /// bar so fewer frames are spent animating.
    pub fn low_end() -> Self {
        Self {
            wheel_damping: 0.6,
            fling_threshold: 0.2,
            fling_projection: 120.0,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_target_fps")]
    pub target_fps: u32,
    /// Angular frequency of the offset-smoothing spring.
    #[serde(default = "default_scroll_spring_frequency")]
    pub scroll_spring_frequency: f32,
}

fn default_target_fps() -> u32 { 120 }
fn default_scroll_spring_frequency() -> f32 { 15.0 }

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            target_fps: default_target_fps(),
            scroll_spring_frequency: default_scroll_spring_frequency(),
        }
    }
}

impl AnimationConfig {
    pub fn low_end() -> Self {
        Self { target_fps: 60, scroll_spring_frequency: 8.0 }
    }
}

/// Geometry of the demo page and the slide strip embedded in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripConfig {
    #[serde(default = "default_total_slides")]
    pub total_slides: usize,
    #[serde(default = "default_slide_width")]
    pub slide_width: f32,
    /// Top of the strip band in page coordinates.
    #[serde(default = "default_strip_top")]
    pub strip_top: f32,
    #[serde(default = "default_strip_height")]
    pub strip_height: f32,
    #[serde(default = "default_page_height")]
    pub page_height: f32,
}

fn default_total_slides() -> usize { 6 }
fn default_slide_width() -> f32 { 800.0 }
fn default_strip_top() -> f32 { 1400.0 }
fn default_strip_height() -> f32 { 600.0 }
fn default_page_height() -> f32 { 4200.0 }

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            total_slides: default_total_slides(),
            slide_width: default_slide_width(),
            strip_top: default_strip_top(),
            strip_height: default_strip_height(),
            page_height: default_page_height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub profile: InteractionProfile,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub strip: StripConfig,
}

impl Config {
    pub fn config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("~/.config"));
        base.join("smooth_slides").join("config.toml")
    }

    fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config at {}", path.display()))?;
        let cfg = toml::from_str(&contents)
            .with_context(|| format!("parsing config at {}", path.display()))?;
        Ok(cfg)
    }

    pub fn load_or_default() -> Self {
        let path = Self::config_path();
        if path.exists() {
            match Self::load(&path) {
                Ok(cfg) => return cfg,
                Err(e) => log::warn!("{e:#}; using defaults"),
            }
        } else {
            // Seed the default config so users have something to edit
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = std::fs::write(&path, DEFAULT_CONFIG);
        }
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }
}
