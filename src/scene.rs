//! Draw-command generation
//!
//! Turns a [`GameState`] into the ordered list of primitives a backend must
//! draw for the current frame. Pure: no GPU, no DOM.

use glam::Vec2;

use crate::sim::{GameMode, GameState, MenuItem, Rect, Side};

/// RGBA color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with alpha scaled to `alpha` (0.0 - 1.0)
    pub fn fade(self, alpha: f32) -> Self {
        Self {
            a: (255.0 * alpha.clamp(0.0, 1.0)) as u8,
            ..self
        }
    }

    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// CSS `rgba()` string for canvas text
    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }
}

/// Palette
pub mod colors {
    use super::Color;

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREEN: Color = Color::rgb(0, 228, 48);
    pub const RED: Color = Color::rgb(230, 41, 55);
    pub const GRAY: Color = Color::rgb(130, 130, 130);
}

use colors::*;

/// A single primitive, in screen pixels with a top-left origin
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Rect {
        rect: Rect,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
    },
    /// `pos` is the top-left of the text box
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
    },
}

/// Text measurement, supplied by the backend that draws the text
pub trait TextMetrics {
    /// Rendered width in pixels of `text` at `font_size`
    fn measure_text(&self, text: &str, font_size: f32) -> f32;
}

/// Fixed-advance approximation for headless use
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMetrics {
    /// Glyph advance as a fraction of the font size
    pub advance: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn measure_text(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * self.advance
    }
}

pub const PLAYER_WINS: &str = "PLAYER WINS!";
pub const CPU_WINS: &str = "CPU WINS!";

/// Overlay text for the game-over screen
pub fn winner_text(state: &GameState) -> &'static str {
    match state.winner() {
        Some(Side::Player) => PLAYER_WINS,
        _ => CPU_WINS,
    }
}

/// Collects commands and knows the screen size for centring
struct Frame<'a> {
    commands: Vec<DrawCommand>,
    metrics: &'a dyn TextMetrics,
    width: f32,
    height: f32,
}

impl Frame<'_> {
    fn text(&mut self, text: impl Into<String>, x: f32, y: f32, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.into(),
            pos: Vec2::new(x, y),
            size,
            color,
        });
    }

    fn centered_text(&mut self, text: &str, y: f32, size: f32, color: Color) {
        let width = self.metrics.measure_text(text, size);
        let x = (self.width / 2.0 - width / 2.0).floor();
        self.text(text, x, y, size, color);
    }

    fn overlay(&mut self, alpha: f32) {
        self.commands.push(DrawCommand::Rect {
            rect: Rect::new(Vec2::ZERO, Vec2::new(self.width, self.height)),
            color: BLACK.fade(alpha),
        });
    }
}

/// Build the draw list for the current frame
pub fn build_frame(state: &GameState, metrics: &dyn TextMetrics) -> Vec<DrawCommand> {
    let mut frame = Frame {
        commands: Vec::with_capacity(16),
        metrics,
        width: state.court.width as f32,
        height: state.court.height as f32,
    };

    match state.mode {
        GameMode::Menu => draw_menu(&mut frame, state),
        GameMode::Playing => {
            draw_court(&mut frame, state);
            let h = frame.height;
            frame.text("Press SPACE to pause", 10.0, h - 30.0, 20.0, GRAY);
        }
        GameMode::Paused => {
            draw_court(&mut frame, state);
            draw_paused(&mut frame);
        }
        GameMode::GameOver => {
            draw_court(&mut frame, state);
            draw_game_over(&mut frame, state);
        }
    }

    frame.commands
}

fn draw_menu(frame: &mut Frame<'_>, state: &GameState) {
    let h = frame.height;
    frame.commands.push(DrawCommand::Clear(BLACK));

    frame.centered_text("PONG GAME", h / 2.0 - 150.0, 80.0, GREEN);
    frame.centered_text("Classic Arcade Game", h / 2.0 - 80.0, 30.0, GRAY);

    for (item, y) in MenuItem::ALL.into_iter().zip([h / 2.0 + 20.0, h / 2.0 + 80.0]) {
        let color = if item == state.menu_selection {
            GREEN
        } else {
            WHITE
        };
        frame.centered_text(item.label(), y, 40.0, color);
    }

    frame.centered_text(
        "Use UP/DOWN arrows to navigate, ENTER to select",
        h - 100.0,
        20.0,
        GRAY,
    );
    frame.centered_text(
        "Game Controls: UP/DOWN arrows to move paddle",
        h - 60.0,
        20.0,
        GRAY,
    );
}

/// Court, entities and scores; shared by every in-match screen
fn draw_court(frame: &mut Frame<'_>, state: &GameState) {
    let w = state.court.width;
    frame.commands.push(DrawCommand::Clear(BLACK));
    frame.commands.push(DrawCommand::Line {
        from: Vec2::new((w / 2) as f32, 0.0),
        to: Vec2::new((w / 2) as f32, frame.height),
        color: RED,
    });
    frame.commands.push(DrawCommand::Circle {
        center: state.ball.pos,
        radius: state.ball.radius as f32,
        color: GREEN,
    });
    for paddle in [&state.cpu, &state.player] {
        frame.commands.push(DrawCommand::Rect {
            rect: paddle.rect(),
            color: WHITE,
        });
    }
    frame.text(
        state.scores.cpu.to_string(),
        (w / 4) as f32 - 20.0,
        20.0,
        80.0,
        GREEN,
    );
    frame.text(
        state.scores.player.to_string(),
        (3 * w / 4) as f32 - 20.0,
        20.0,
        80.0,
        GREEN,
    );
}

fn draw_paused(frame: &mut Frame<'_>) {
    let h = frame.height;
    frame.overlay(0.7);
    frame.centered_text("PAUSED", h / 2.0 - 30.0, 60.0, WHITE);
    frame.centered_text("Press SPACE to resume", h / 2.0 + 50.0, 25.0, GRAY);
}

fn draw_game_over(frame: &mut Frame<'_>, state: &GameState) {
    let h = frame.height;
    frame.overlay(0.8);
    frame.centered_text("GAME OVER", h / 2.0 - 100.0, 60.0, RED);
    frame.centered_text(winner_text(state), h / 2.0 - 30.0, 40.0, GREEN);
    frame.centered_text(
        "Press SPACE to return to menu",
        h / 2.0 + 50.0,
        25.0,
        WHITE,
    );
}

/// All text strings in a draw list, in order
pub fn texts(commands: &[DrawCommand]) -> Vec<&str> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

/// Commands a separate text layer must replay: every text, plus every
/// rectangle drawn after some text. Those rectangles cover the earlier text
/// and have to be painted over it on the text layer too.
pub fn text_layer(commands: &[DrawCommand]) -> Vec<&DrawCommand> {
    let mut seen_text = false;
    commands
        .iter()
        .filter(|c| match c {
            DrawCommand::Text { .. } => {
                seen_text = true;
                true
            }
            DrawCommand::Rect { .. } => seen_text,
            _ => false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::Scores;

    fn state_in(mode: GameMode) -> GameState {
        let mut state = GameState::new(&GameConfig::default(), 7);
        state.mode = mode;
        state
    }

    #[test]
    fn test_menu_highlights_selection() {
        let mut state = state_in(GameMode::Menu);
        state.menu_selection = MenuItem::Exit;
        let commands = build_frame(&state, &MonospaceMetrics::default());

        let color_of = |label: &str| {
            commands.iter().find_map(|c| match c {
                DrawCommand::Text { text, color, .. } if text == label => Some(*color),
                _ => None,
            })
        };
        assert_eq!(color_of("EXIT"), Some(GREEN));
        assert_eq!(color_of("START GAME"), Some(WHITE));
        assert_eq!(commands[0], DrawCommand::Clear(BLACK));
    }

    #[test]
    fn test_menu_text_is_centred() {
        let state = state_in(GameMode::Menu);
        let metrics = MonospaceMetrics { advance: 0.5 };
        let commands = build_frame(&state, &metrics);
        // "PONG GAME" at 80px: 9 * 40 = 360 wide
        let title = commands.iter().find_map(|c| match c {
            DrawCommand::Text { text, pos, .. } if text == "PONG GAME" => Some(*pos),
            _ => None,
        });
        assert_eq!(title, Some(Vec2::new(460.0, 250.0)));
    }

    #[test]
    fn test_playing_draws_court_and_scores() {
        let mut state = state_in(GameMode::Playing);
        state.scores = Scores { player: 2, cpu: 4 };
        let commands = build_frame(&state, &MonospaceMetrics::default());

        assert!(commands.contains(&DrawCommand::Line {
            from: Vec2::new(640.0, 0.0),
            to: Vec2::new(640.0, 800.0),
            color: RED,
        }));
        assert!(commands.contains(&DrawCommand::Circle {
            center: Vec2::new(640.0, 400.0),
            radius: 20.0,
            color: GREEN,
        }));
        assert!(commands.contains(&DrawCommand::Text {
            text: "4".into(),
            pos: Vec2::new(300.0, 20.0),
            size: 80.0,
            color: GREEN,
        }));
        assert!(commands.contains(&DrawCommand::Text {
            text: "2".into(),
            pos: Vec2::new(940.0, 20.0),
            size: 80.0,
            color: GREEN,
        }));
        assert_eq!(
            texts(&commands),
            vec!["4", "2", "Press SPACE to pause"]
        );
    }

    #[test]
    fn test_paused_overlay() {
        let state = state_in(GameMode::Paused);
        let commands = build_frame(&state, &MonospaceMetrics::default());
        assert!(commands.contains(&DrawCommand::Rect {
            rect: Rect::new(Vec2::ZERO, Vec2::new(1280.0, 800.0)),
            color: BLACK.fade(0.7),
        }));
        assert!(texts(&commands).contains(&"PAUSED"));
        assert!(!texts(&commands).contains(&"Press SPACE to pause"));
    }

    #[test]
    fn test_text_layer_dims_scores_under_overlay() {
        let state = state_in(GameMode::Paused);
        let commands = build_frame(&state, &MonospaceMetrics::default());
        let layer = text_layer(&commands);

        // Scores, then the overlay, then the pause text on top of it
        assert_eq!(layer.len(), 5);
        assert!(matches!(layer[0], DrawCommand::Text { text, .. } if text == "0"));
        assert!(matches!(layer[1], DrawCommand::Text { text, .. } if text == "0"));
        assert_eq!(
            layer[2],
            &DrawCommand::Rect {
                rect: Rect::new(Vec2::ZERO, Vec2::new(1280.0, 800.0)),
                color: BLACK.fade(0.7),
            }
        );
        assert!(matches!(layer[3], DrawCommand::Text { text, .. } if text == "PAUSED"));
    }

    #[test]
    fn test_text_layer_skips_paddles_drawn_before_text() {
        let state = state_in(GameMode::Playing);
        let commands = build_frame(&state, &MonospaceMetrics::default());
        let layer = text_layer(&commands);
        assert_eq!(layer.len(), 3);
        assert!(layer.iter().all(|c| matches!(c, DrawCommand::Text { .. })));

        let state = state_in(GameMode::GameOver);
        let commands = build_frame(&state, &MonospaceMetrics::default());
        let rects: Vec<_> = text_layer(&commands)
            .into_iter()
            .filter(|c| matches!(c, DrawCommand::Rect { .. }))
            .collect();
        assert_eq!(rects.len(), 1);
    }

    #[test]
    fn test_game_over_winner_text() {
        let mut state = state_in(GameMode::GameOver);
        state.scores = Scores { player: 5, cpu: 3 };
        let commands = build_frame(&state, &MonospaceMetrics::default());
        assert!(texts(&commands).contains(&PLAYER_WINS));

        state.scores = Scores { player: 1, cpu: 5 };
        let commands = build_frame(&state, &MonospaceMetrics::default());
        assert!(texts(&commands).contains(&CPU_WINS));
    }

    #[test]
    fn test_fade() {
        assert_eq!(BLACK.fade(0.8).a, 204);
        assert_eq!(WHITE.fade(2.0).a, 255);
        assert_eq!(GREEN.fade(0.0).a, 0);
    }
}
