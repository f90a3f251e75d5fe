//! Error types

use thiserror::Error;

/// Reasons a [`GameConfig`](crate::GameConfig) can be rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("ball radius {radius} does not fit a {width}x{height} court")]
    BallTooLarge { radius: i32, width: u32, height: u32 },

    #[error("paddle height {paddle_height} exceeds screen height {screen_height}")]
    PaddleTooTall { paddle_height: f32, screen_height: u32 },

    #[error("{field} must be non-zero and under {limit} in magnitude (got {value})")]
    BadSpeed {
        field: &'static str,
        value: i32,
        limit: u32,
    },

    #[error("winning score must be at least 1")]
    ZeroWinningScore,
}
