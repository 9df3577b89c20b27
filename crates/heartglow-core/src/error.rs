use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("platform error: {0}")]
    Platform(#[from] Box<dyn std::error::Error + Send + Sync>),
    #[error("particle attributes disagree: {base} scatter, {target} heart, {phases} phase entries")]
    ShapeMismatch {
        base: usize,
        target: usize,
        phases: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
