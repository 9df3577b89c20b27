//! Per-dot position and color as a pure function of elapsed time.

use glam::{DVec2, IVec2};
use heartglow_platform::Rgb;

use crate::clock::{Elapsed, Timeline};
use crate::config::OverlayConfig;
use crate::phases::PhaseOffsets;

/// Values shared by every particle within one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    pub secs: f64,
    pub progress: f64,
    /// `None` until the delay has passed.
    pub global_pulse: Option<f64>,
}

impl FrameParams {
    pub fn at(timeline: &Timeline, elapsed: Elapsed) -> Self {
        Self {
            secs: elapsed.secs(),
            progress: timeline.progress(elapsed),
            global_pulse: timeline.global_pulse(elapsed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub drift_amplitude: f64,
    pub per_particle_color_pulse: bool,
    pub dot_color: Rgb,
    pub heart_dark: Rgb,
    pub heart_light: Rgb,
}

impl From<&OverlayConfig> for Style {
    fn from(config: &OverlayConfig) -> Self {
        Self {
            drift_amplitude: config.drift_amplitude,
            per_particle_color_pulse: config.per_particle_color_pulse,
            dot_color: config.dot_color,
            heart_dark: config.heart_dark,
            heart_light: config.heart_light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleState {
    pub position: IVec2,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub base: IVec2,
    pub target: IVec2,
    pub phases: PhaseOffsets,
}

impl Particle {
    pub fn new(base: IVec2, target: IVec2, phases: PhaseOffsets) -> Self {
        Self {
            base,
            target,
            phases,
        }
    }

    /// Base-to-target interpolation, truncated to whole pixels, without drift.
    pub fn anchor(&self, progress: f64) -> IVec2 {
        if progress <= 0.0 {
            return self.base;
        }
        let base = self.base.as_dvec2();
        let travelled = base + (self.target.as_dvec2() - base) * progress;
        travelled.as_ivec2()
    }

    pub fn drift(&self, secs: f64, amplitude: f64) -> IVec2 {
        if amplitude == 0.0 {
            return IVec2::ZERO;
        }
        DVec2::new(
            amplitude * (secs + self.phases.drift_x).sin(),
            amplitude * (secs + self.phases.drift_y).sin(),
        )
        .as_ivec2()
    }

    pub fn color(&self, frame: &FrameParams, style: &Style) -> Rgb {
        let Some(global) = frame.global_pulse else {
            return style.dot_color;
        };
        let combined = if style.per_particle_color_pulse {
            let local = ((frame.secs + self.phases.color).sin() + 1.0) / 2.0;
            (global + local) / 2.0
        } else {
            global
        };
        blend(style.heart_dark, style.heart_light, combined)
    }

    pub fn state(&self, frame: &FrameParams, style: &Style) -> ParticleState {
        ParticleState {
            position: self.anchor(frame.progress) + self.drift(frame.secs, style.drift_amplitude),
            color: self.color(frame, style),
        }
    }
}

/// `dark + t * (light - dark)`, truncated toward zero.
pub fn blend_channel(dark: u8, light: u8, t: f64) -> u8 {
    let value = dark as f64 + t * (light as f64 - dark as f64);
    value as u8
}

pub fn blend(dark: Rgb, light: Rgb, t: f64) -> Rgb {
    Rgb::new(
        blend_channel(dark.r, light.r, t),
        blend_channel(dark.g, light.g, t),
        blend_channel(dark.b, light.b, t),
    )
}
