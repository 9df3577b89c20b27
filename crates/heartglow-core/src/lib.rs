//! Heartglow core engine: dots that drift in from a random scatter and settle
//! into a pulsing heart. Platform-agnostic; drawing goes through
//! `heartglow_platform::RenderSurface`.

pub mod clock;
pub mod config;
pub mod driver;
pub mod error;
pub mod overlay;
pub mod particle;
pub mod phases;
pub mod scene;
pub mod shapes;

#[cfg(test)]
mod testing;

pub use clock::{AnimationClock, Elapsed, Regime, Timeline};
pub use config::{ConfigError, OverlayConfig};
pub use driver::{DriverState, FrameDriver, RunSummary, CANCEL_KEY};
pub use error::{Error, Result};
pub use overlay::run_overlay;
pub use particle::{blend, blend_channel, FrameParams, Particle, ParticleState, Style};
pub use phases::{PhaseOffsets, PhaseTable};
pub use scene::Scene;
pub use shapes::{generate_heart_shape, generate_scatter, HeartShape};
