//! Windowless backend
//!
//! Feeds a queue of scripted input snapshots and keeps the last submitted
//! frame, so whole matches can be driven without a GPU.

use std::collections::VecDeque;

use crate::scene::{DrawCommand, MonospaceMetrics, TextMetrics};
use crate::sim::FrameInput;

use super::Platform;

#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    script: VecDeque<FrameInput>,
    /// Input used once the script runs out
    pub idle: FrameInput,
    /// Report a window close once the script runs out
    pub close_when_done: bool,
    pub metrics: MonospaceMetrics,
    /// Most recently submitted frame
    pub last_frame: Vec<DrawCommand>,
    pub frames_submitted: u64,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scripted(inputs: impl IntoIterator<Item = FrameInput>) -> Self {
        Self {
            script: inputs.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Queue one more frame of input
    pub fn push(&mut self, input: FrameInput) {
        self.script.push_back(input);
    }

    /// Queue `frames` copies of `input`
    pub fn hold(&mut self, input: FrameInput, frames: usize) {
        self.script.extend(std::iter::repeat_n(input, frames));
    }

    pub fn pending(&self) -> usize {
        self.script.len()
    }

    /// Text strings of the last submitted frame
    pub fn last_texts(&self) -> Vec<&str> {
        crate::scene::texts(&self.last_frame)
    }
}

impl TextMetrics for HeadlessPlatform {
    fn measure_text(&self, text: &str, font_size: f32) -> f32 {
        self.metrics.measure_text(text, font_size)
    }
}

impl Platform for HeadlessPlatform {
    fn poll_input(&mut self) -> FrameInput {
        self.script.pop_front().unwrap_or(self.idle)
    }

    fn submit_frame(&mut self, commands: &[DrawCommand]) {
        self.last_frame = commands.to_vec();
        self.frames_submitted += 1;
    }

    fn should_close(&self) -> bool {
        self.close_when_done && self.script.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::platform::{LoopControl, run, run_frame};
    use crate::sim::{GameMode, GameState, MenuItem};

    fn enter() -> FrameInput {
        FrameInput {
            enter_pressed: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_run_frame_submits_scene() {
        let mut state = GameState::new(&GameConfig::default(), 1);
        let mut platform = HeadlessPlatform::new();
        let (control, events) = run_frame(&mut state, &mut platform);
        assert_eq!(control, LoopControl::Continue);
        assert!(events.is_empty());
        assert_eq!(platform.frames_submitted, 1);
        assert!(platform.last_texts().contains(&"PONG GAME"));
    }

    #[test]
    fn test_exit_stops_loop_without_drawing() {
        let mut state = GameState::new(&GameConfig::default(), 1);
        state.menu_selection = MenuItem::Exit;
        let mut platform = HeadlessPlatform::scripted([FrameInput::default(), enter()]);
        let frames = run(&mut state, &mut platform, Some(100));
        assert_eq!(frames, 2);
        assert_eq!(platform.frames_submitted, 1);
    }

    #[test]
    fn test_close_when_script_done() {
        let mut state = GameState::new(&GameConfig::default(), 1);
        let mut platform = HeadlessPlatform::scripted([enter()]);
        platform.hold(FrameInput::default(), 9);
        platform.close_when_done = true;
        let frames = run(&mut state, &mut platform, None);
        assert_eq!(frames, 10);
        assert_eq!(platform.pending(), 0);
        assert_eq!(state.mode, GameMode::Playing);
    }

    #[test]
    fn test_frame_cap() {
        let mut state = GameState::new(&GameConfig::default(), 1);
        let mut platform = HeadlessPlatform::new();
        assert_eq!(run(&mut state, &mut platform, Some(25)), 25);
        assert_eq!(state.frame, 25);
    }
}
