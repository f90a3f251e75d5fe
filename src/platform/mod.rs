//! Platform abstraction layer
//!
//! The simulation never talks to a window directly. A [`Platform`] supplies
//! one input snapshot per frame, measures text, and draws the command list
//! produced by [`scene::build_frame`]. Backends:
//! - `headless`: scripted input, recorded frames (tests, native demo)
//! - `web`: keyboard events + WebGPU canvas (wasm32)

pub mod headless;
pub mod keys;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use headless::HeadlessPlatform;
pub use keys::{Key, KeyState};

use crate::scene::{self, DrawCommand, TextMetrics};
use crate::sim::{FrameInput, GameEvent, GameState, tick};

/// Capabilities the frame loop needs from a rendering/input backend
pub trait Platform: TextMetrics {
    /// Keyboard state for the frame about to run
    fn poll_input(&mut self) -> FrameInput;

    /// Draw one complete frame
    fn submit_frame(&mut self, commands: &[DrawCommand]);

    /// Window-close request from the user
    fn should_close(&self) -> bool {
        false
    }
}

/// Whether the outer loop should keep scheduling frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Poll input, dispatch one frame, submit its draw list
pub fn run_frame<P: Platform>(
    state: &mut GameState,
    platform: &mut P,
) -> (LoopControl, Vec<GameEvent>) {
    let input = platform.poll_input();
    let events = tick(state, &input);
    log_events(state, &events);

    if events.contains(&GameEvent::ExitRequested) {
        return (LoopControl::Exit, events);
    }

    let commands = scene::build_frame(state, &*platform);
    platform.submit_frame(&commands);

    (LoopControl::Continue, events)
}

/// Run frames until the platform closes, the menu requests exit, or
/// `max_frames` is reached. Returns the number of frames run.
pub fn run<P: Platform>(
    state: &mut GameState,
    platform: &mut P,
    max_frames: Option<u64>,
) -> u64 {
    let mut frames = 0;
    while !platform.should_close() && max_frames.is_none_or(|max| frames < max) {
        frames += 1;
        if run_frame(state, platform).0 == LoopControl::Exit {
            break;
        }
    }
    frames
}

fn log_events(state: &GameState, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::MatchStarted => {
                log::info!("Match started (first to {})", state.winning_score)
            }
            GameEvent::ExitRequested => log::info!("Exit selected from menu"),
            GameEvent::PointScored { side, scores } => log::debug!(
                "Point to {:?} (player {} - cpu {})",
                side,
                scores.player,
                scores.cpu
            ),
            GameEvent::Paused => log::info!("Paused"),
            GameEvent::Resumed => log::info!("Resumed"),
            GameEvent::GameOver { winner } => log::info!(
                "Game over: {:?} wins {}-{}",
                winner,
                state.scores.player,
                state.scores.cpu
            ),
            GameEvent::ReturnedToMenu => log::info!("Returned to menu"),
            GameEvent::MenuMoved(_) | GameEvent::PaddleHit(_) => {}
        }
    }
}
