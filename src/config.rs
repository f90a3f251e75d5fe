//! Game configuration
//!
//! Geometry and tuning for a match. Defaults reproduce the classic arcade
//! layout; overrides come from a JSON document (a file natively, LocalStorage
//! on the web).

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Environment variable naming a JSON config file (native only)
pub const CONFIG_ENV_VAR: &str = "CLASSIC_PONG_CONFIG";

/// Game geometry and tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Window ===
    pub screen_width: u32,
    pub screen_height: u32,
    pub title: String,
    pub target_fps: u32,

    // === Ball ===
    pub ball_radius: i32,
    pub ball_speed_x: i32,
    pub ball_speed_y: i32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: i32,
    pub paddle_margin: f32,

    // === Rules ===
    pub winning_score: u32,

    /// RNG seed for reproducible serves (time-derived when absent)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            title: WINDOW_TITLE.to_string(),
            target_fps: TARGET_FPS,

            ball_radius: BALL_RADIUS,
            ball_speed_x: BALL_SPEED_X,
            ball_speed_y: BALL_SPEED_Y,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_margin: PADDLE_MARGIN,

            winning_score: WINNING_SCORE,

            seed: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject configurations that would break the clamp or scoring invariants.
    ///
    /// The ball must fit strictly inside both halves of the court so that a
    /// freshly centred ball touches no scoring edge. Speeds must be non-zero
    /// and smaller than the court, which also keeps sign flips in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("screen_width", self.screen_width as f64),
            ("screen_height", self.screen_height as f64),
            ("ball_radius", self.ball_radius as f64),
            ("paddle_width", self.paddle_width as f64),
            ("paddle_height", self.paddle_height as f64),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        let half_w = (self.screen_width / 2) as i32;
        let half_h = (self.screen_height / 2) as i32;
        if self.ball_radius >= half_w || self.ball_radius >= half_h {
            return Err(ConfigError::BallTooLarge {
                radius: self.ball_radius,
                width: self.screen_width,
                height: self.screen_height,
            });
        }

        // Ball speeds may be negative (serve direction); paddle speed may not
        for (field, value, limit) in [
            ("ball_speed_x", self.ball_speed_x, self.screen_width / 2),
            ("ball_speed_y", self.ball_speed_y, self.screen_height / 2),
        ] {
            if value == 0 || value.unsigned_abs() >= limit {
                return Err(ConfigError::BadSpeed { field, value, limit });
            }
        }
        if self.paddle_speed <= 0 || self.paddle_speed.unsigned_abs() >= self.screen_height {
            return Err(ConfigError::BadSpeed {
                field: "paddle_speed",
                value: self.paddle_speed,
                limit: self.screen_height,
            });
        }

        if self.paddle_height > self.screen_height as f32 {
            return Err(ConfigError::PaddleTooTall {
                paddle_height: self.paddle_height,
                screen_height: self.screen_height,
            });
        }

        if self.winning_score == 0 {
            return Err(ConfigError::ZeroWinningScore);
        }

        Ok(())
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "classic_pong_config";

    /// Load config from LocalStorage, falling back to defaults (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Load config from the file named by `CLASSIC_PONG_CONFIG`, or defaults
    /// when the variable is unset.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => {
                let json = std::fs::read_to_string(&path)?;
                let config = Self::from_json(&json)?;
                log::info!("Loaded config from {}", path.to_string_lossy());
                Ok(config)
            }
            None => {
                log::info!("Using default config");
                Ok(Self::default())
            }
        }
    }
}
