use crate::config::ConfigError;
use thiserror::Error;

pub type EngineResult<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid aspect ratio {numerator}:{denominator}")]
    InvalidAspectRatio { numerator: f64, denominator: f64 },

    #[error("invalid fixed size {width}\u{d7}{height}")]
    InvalidFixedSize { width: f64, height: f64 },

    #[error("invalid fixed width {0}")]
    InvalidFixedWidth(f64),

    #[error("invalid fixed height {0}")]
    InvalidFixedHeight(f64),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
