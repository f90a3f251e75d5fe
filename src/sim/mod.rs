//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay headless:
//! - One call to `tick` per frame, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, circle_rect_overlap};
pub use state::{
    Ball, BallStep, Court, GameMode, GameState, MenuItem, Paddle, PaddleControl, PaddleInputs,
    Scores, Side,
};
pub use tick::{FrameInput, GameEvent, tick};
