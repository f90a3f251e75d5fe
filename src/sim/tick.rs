//! Per-frame dispatch
//!
//! One call to [`tick`] advances the game by exactly one frame, in order:
//! mode input, physics, collisions, threshold check, pause toggle.

use super::collision::circle_rect_overlap;
use super::state::{GameMode, GameState, MenuItem, PaddleInputs, Scores, Side};

/// Keyboard snapshot for a single frame
///
/// `*_held` is level-triggered (key is down), `*_pressed` is edge-triggered
/// (key went down since the previous frame).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub up_held: bool,
    pub down_held: bool,
    pub up_pressed: bool,
    pub down_pressed: bool,
    pub enter_pressed: bool,
    pub space_pressed: bool,
}

/// Something observable that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    MenuMoved(MenuItem),
    MatchStarted,
    ExitRequested,
    /// A point was awarded; carries the score after the point
    PointScored { side: Side, scores: Scores },
    /// Ball overlapped a paddle and had its horizontal speed flipped
    PaddleHit(Side),
    Paused,
    Resumed,
    GameOver { winner: Side },
    ReturnedToMenu,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &FrameInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.frame += 1;

    match state.mode {
        GameMode::Menu => tick_menu(state, input, &mut events),
        GameMode::Playing => tick_playing(state, input, &mut events),
        GameMode::Paused => {
            if input.space_pressed {
                state.mode = GameMode::Playing;
                events.push(GameEvent::Resumed);
            }
        }
        GameMode::GameOver => {
            if input.space_pressed {
                state.mode = GameMode::Menu;
                state.reset_ball();
                events.push(GameEvent::ReturnedToMenu);
            }
        }
    }

    events
}

fn tick_menu(state: &mut GameState, input: &FrameInput, events: &mut Vec<GameEvent>) {
    if input.up_pressed {
        state.menu_selection = state.menu_selection.prev();
        events.push(GameEvent::MenuMoved(state.menu_selection));
    }
    if input.down_pressed {
        state.menu_selection = state.menu_selection.next();
        events.push(GameEvent::MenuMoved(state.menu_selection));
    }
    if input.enter_pressed {
        match state.menu_selection {
            MenuItem::Start => {
                state.mode = GameMode::Playing;
                state.scores.reset();
                events.push(GameEvent::MatchStarted);
            }
            MenuItem::Exit => events.push(GameEvent::ExitRequested),
        }
    }
}

fn tick_playing(state: &mut GameState, input: &FrameInput, events: &mut Vec<GameEvent>) {
    // Physics
    let step = state.ball.update(&state.court, &mut state.rng);
    if let Some(side) = step.scored {
        state.scores.award(side);
        events.push(GameEvent::PointScored {
            side,
            scores: state.scores,
        });
    }

    state.player.update(
        PaddleInputs {
            up: input.up_held,
            down: input.down_held,
            target_y: state.ball.pos.y,
        },
        &state.court,
    );
    state.cpu.update(
        PaddleInputs {
            target_y: state.ball.pos.y,
            ..Default::default()
        },
        &state.court,
    );

    // Collisions: each paddle flips independently, so overlapping both nets zero
    let radius = state.ball.radius as f32;
    for (side, rect) in [(Side::Player, state.player.rect()), (Side::Cpu, state.cpu.rect())] {
        if circle_rect_overlap(state.ball.pos, radius, &rect) {
            state.ball.speed.x = -state.ball.speed.x;
            events.push(GameEvent::PaddleHit(side));
        }
    }

    if let Some(winner) = state.winner() {
        state.mode = GameMode::GameOver;
        events.push(GameEvent::GameOver { winner });
    }

    // Checked last; a pause on the deciding frame defers the game-over screen
    if input.space_pressed {
        state.mode = GameMode::Paused;
        events.push(GameEvent::Paused);
    }
}
