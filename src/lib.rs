//! Classic Pong - two paddles, one ball, first to five
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, collisions, mode dispatch)
//! - `scene`: Draw-command generation for each screen
//! - `platform`: Input/draw capability trait, frame loop, headless + web backends
//! - `renderer`: WebGPU rendering pipeline
//! - `config`: Data-driven game geometry and tuning

pub mod config;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod scene;
pub mod sim;

pub use config::GameConfig;
pub use error::ConfigError;

/// Game configuration constants
pub mod consts {
    /// Window dimensions in pixels
    pub const SCREEN_WIDTH: u32 = 1280;
    pub const SCREEN_HEIGHT: u32 = 800;
    pub const WINDOW_TITLE: &str = "PONG - Classic Arcade Game";

    /// Frame pacing hint for the backend
    pub const TARGET_FPS: u32 = 60;

    /// Ball defaults
    pub const BALL_RADIUS: i32 = 20;
    /// Per-frame displacement on each axis; only the sign ever changes
    pub const BALL_SPEED_X: i32 = 7;
    pub const BALL_SPEED_Y: i32 = 7;

    /// Paddle defaults (shared by player and CPU)
    pub const PADDLE_WIDTH: f32 = 25.0;
    pub const PADDLE_HEIGHT: f32 = 120.0;
    pub const PADDLE_SPEED: i32 = 6;
    /// Gap between a paddle and its screen edge
    pub const PADDLE_MARGIN: f32 = 10.0;

    /// First side to reach this many points wins
    pub const WINNING_SCORE: u32 = 5;
}
