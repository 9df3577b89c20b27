use std::path::{Path, PathBuf};

use heartglow_platform::{OverlayOptions, Rgb};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::Timeline;
use crate::shapes::HeartShape;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything the overlay needs, fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub particle_count: usize,
    pub scatter_margin: i32,
    pub heart_scale: f64,
    pub heart_y_offset: f64,

    pub delay_ms: u64,
    pub transition_ms: u64,
    pub pulse_period_ms: u64,

    /// Pixels; 0 disables drift.
    pub drift_amplitude: f64,
    pub dot_radius: u32,
    /// Pixels; 0 disables the border.
    pub border_thickness: u32,
    /// 0 runs unpaced.
    pub target_fps: u32,
    /// Blend each dot's own phase into the heart color instead of sharing one color.
    pub per_particle_color_pulse: bool,

    pub click_through: bool,
    pub always_on_top: bool,
    pub seed: Option<u64>,

    /// Also used as the transparency color key.
    pub background: Rgb,
    pub dot_color: Rgb,
    pub heart_dark: Rgb,
    pub heart_light: Rgb,
    pub border_color: Rgb,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            particle_count: 150,
            scatter_margin: 50,
            heart_scale: 20.0,
            heart_y_offset: 50.0,
            delay_ms: 2000,
            transition_ms: 3000,
            pulse_period_ms: 2000,
            drift_amplitude: 5.0,
            dot_radius: 3,
            border_thickness: 3,
            target_fps: 60,
            per_particle_color_pulse: true,
            click_through: true,
            always_on_top: true,
            seed: None,
            background: Rgb::BLACK,
            dot_color: Rgb::new(80, 30, 30),
            heart_dark: Rgb::new(120, 10, 10),
            heart_light: Rgb::new(255, 50, 50),
            border_color: Rgb::WHITE,
        }
    }
}

impl OverlayConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pulse_period_ms == 0 {
            return Err(ConfigError::Invalid("pulse_period_ms must be positive".into()));
        }
        if self.transition_ms == 0 {
            return Err(ConfigError::Invalid("transition_ms must be positive".into()));
        }
        if self.scatter_margin < 0 {
            return Err(ConfigError::Invalid("scatter_margin must not be negative".into()));
        }
        if self.dot_radius == 0 {
            return Err(ConfigError::Invalid("dot_radius must be positive".into()));
        }
        Ok(())
    }

    pub fn timeline(&self) -> Timeline {
        Timeline {
            delay_ms: self.delay_ms,
            transition_ms: self.transition_ms,
            pulse_period_ms: self.pulse_period_ms,
        }
    }

    pub fn heart_shape(&self) -> HeartShape {
        HeartShape {
            scale: self.heart_scale,
            y_offset: self.heart_y_offset,
        }
    }

    pub fn overlay_options(&self) -> OverlayOptions {
        OverlayOptions {
            title: "Heartglow".into(),
            color_key: self.background,
            click_through: self.click_through,
            always_on_top: self.always_on_top,
            target_fps: self.target_fps,
        }
    }
}
