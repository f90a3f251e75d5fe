//! Game state and core simulation types
//!
//! Three fixed entities (ball, player paddle, CPU paddle) plus scores and the
//! current mode. Nothing is ever spawned or destroyed; entities are reset in
//! place.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Title screen with Start/Exit selection
    Menu,
    /// Active rally
    Playing,
    /// Frozen court with overlay
    Paused,
    /// Someone reached the winning score
    GameOver,
}

/// Main menu entries, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MenuItem {
    #[default]
    Start,
    Exit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 2] = [MenuItem::Start, MenuItem::Exit];

    pub fn index(self) -> usize {
        match self {
            MenuItem::Start => 0,
            MenuItem::Exit => 1,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Selection after pressing Down (wraps)
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Selection after pressing Up (wraps)
    pub fn prev(self) -> Self {
        Self::from_index(self.index() + Self::ALL.len() - 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Start => "START GAME",
            MenuItem::Exit => "EXIT",
        }
    }
}

/// A side of the court, named after who defends it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Human paddle, right edge
    Player,
    /// Ball-tracking paddle, left edge
    Cpu,
}

/// Match score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    pub player: u32,
    pub cpu: u32,
}

impl Scores {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Cpu => self.cpu += 1,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The side that has reached `threshold`, checking the player first
    pub fn winner(&self, threshold: u32) -> Option<Side> {
        if self.player >= threshold {
            Some(Side::Player)
        } else if self.cpu >= threshold {
            Some(Side::Cpu)
        } else {
            None
        }
    }
}

/// Screen bounds the entities live in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Court {
    pub width: u32,
    pub height: u32,
}

impl Court {
    /// Integer-halved centre, matching the screen's own pixel grid
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.width / 2) as f32, (self.height / 2) as f32)
    }
}

/// Outcome of one ball step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BallStep {
    /// Vertical speed was reflected off the top or bottom edge
    pub bounced: bool,
    /// The ball left the court and was re-served
    pub scored: Option<Side>,
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Per-frame displacement; magnitude is fixed at creation
    pub speed: IVec2,
    pub radius: i32,
}

impl Ball {
    pub fn new(court: &Court, radius: i32, speed: IVec2) -> Self {
        Self {
            pos: court.center(),
            speed,
            radius,
        }
    }

    /// Advance one frame, reflect off top/bottom, re-serve after a point.
    ///
    /// The three edge checks are independent and run in order: vertical
    /// bounce, right edge (CPU point), left edge (player point).
    pub fn update(&mut self, court: &Court, rng: &mut Pcg32) -> BallStep {
        let mut step = BallStep::default();
        let r = self.radius as f32;
        let (w, h) = (court.width as f32, court.height as f32);

        self.pos += self.speed.as_vec2();

        if self.pos.y + r >= h || self.pos.y - r <= 0.0 {
            self.speed.y = -self.speed.y;
            step.bounced = true;
        }

        if self.pos.x + r >= w {
            step.scored = Some(Side::Cpu);
            self.reset(court, rng);
        }

        if self.pos.x - r <= 0.0 {
            step.scored = Some(Side::Player);
            self.reset(court, rng);
        }

        step
    }

    /// Recentre and multiply each speed component by an independent random sign
    pub fn reset(&mut self, court: &Court, rng: &mut Pcg32) {
        self.pos = court.center();
        self.speed.x *= random_sign(rng);
        self.speed.y *= random_sign(rng);
    }
}

fn random_sign(rng: &mut Pcg32) -> i32 {
    const CHOICES: [i32; 2] = [-1, 1];
    CHOICES[rng.random_range(0..=1usize)]
}

/// How a paddle decides where to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleControl {
    /// Up/Down keys held this frame
    Human,
    /// Chase a target height (the ball)
    TrackTarget,
}

/// Everything a paddle may steer by in one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaddleInputs {
    pub up: bool,
    pub down: bool,
    pub target_y: f32,
}

/// A paddle (player or CPU)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
    pub speed: i32,
    pub control: PaddleControl,
}

impl Paddle {
    /// Paddle vertically centred at horizontal position `x`
    pub fn new(court: &Court, x: f32, size: Vec2, speed: i32, control: PaddleControl) -> Self {
        Self {
            pos: Vec2::new(x, court.height as f32 / 2.0 - size.y / 2.0),
            size,
            speed,
            control,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    /// (x, y, width, height) for overlap tests and drawing
    pub fn rect(&self) -> super::Rect {
        super::Rect::new(self.pos, self.size)
    }

    /// Move for one frame according to the control policy, then clamp
    pub fn update(&mut self, inputs: PaddleInputs, court: &Court) {
        let step = self.speed as f32;
        match self.control {
            PaddleControl::Human => {
                // Both held cancels out
                if inputs.up {
                    self.pos.y -= step;
                }
                if inputs.down {
                    self.pos.y += step;
                }
            }
            PaddleControl::TrackTarget => {
                // Second test sees the first move, so a centre within one
                // step above the target nets zero
                if self.center_y() > inputs.target_y {
                    self.pos.y -= step;
                }
                if self.center_y() <= inputs.target_y {
                    self.pos.y += step;
                }
            }
        }
        self.limit_movement(court);
    }

    fn limit_movement(&mut self, court: &Court) {
        if self.pos.y <= 0.0 {
            self.pos.y = 0.0;
        }
        let floor = court.height as f32 - self.size.y;
        if self.pos.y >= floor {
            self.pos.y = floor;
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub court: Court,
    pub winning_score: u32,
    pub mode: GameMode,
    pub menu_selection: MenuItem,
    pub scores: Scores,
    pub ball: Ball,
    /// Human paddle, right edge
    pub player: Paddle,
    /// Ball-tracking paddle, left edge
    pub cpu: Paddle,
    /// Frames dispatched so far
    pub frame: u64,
}

impl GameState {
    /// Fresh game on the main menu
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let court = Court {
            width: config.screen_width,
            height: config.screen_height,
        };
        let paddle_size = Vec2::new(config.paddle_width, config.paddle_height);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            court,
            winning_score: config.winning_score,
            mode: GameMode::Menu,
            menu_selection: MenuItem::Start,
            scores: Scores::default(),
            ball: Ball::new(
                &court,
                config.ball_radius,
                IVec2::new(config.ball_speed_x, config.ball_speed_y),
            ),
            player: Paddle::new(
                &court,
                court.width as f32 - config.paddle_width - config.paddle_margin,
                paddle_size,
                config.paddle_speed,
                PaddleControl::Human,
            ),
            cpu: Paddle::new(
                &court,
                config.paddle_margin,
                paddle_size,
                config.paddle_speed,
                PaddleControl::TrackTarget,
            ),
            frame: 0,
        }
    }

    /// Re-serve the ball from the centre with fresh random signs
    pub fn reset_ball(&mut self) {
        self.ball.reset(&self.court, &mut self.rng);
    }

    /// Winner once the threshold is reached (player checked first)
    pub fn winner(&self) -> Option<Side> {
        self.scores.winner(self.winning_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn court() -> Court {
        Court {
            width: 1280,
            height: 800,
        }
    }

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(12345)
    }

    #[test]
    fn menu_selection_wraps() {
        assert_eq!(MenuItem::Start.next(), MenuItem::Exit);
        assert_eq!(MenuItem::Exit.next(), MenuItem::Start);
        assert_eq!(MenuItem::Start.prev(), MenuItem::Exit);
        assert_eq!(MenuItem::Exit.prev(), MenuItem::Start);
    }

    #[test]
    fn winner_favours_player_on_tie() {
        let scores = Scores { player: 5, cpu: 5 };
        assert_eq!(scores.winner(5), Some(Side::Player));
        let scores = Scores { player: 4, cpu: 5 };
        assert_eq!(scores.winner(5), Some(Side::Cpu));
        assert_eq!(Scores::default().winner(5), None);
    }

    #[test]
    fn ball_bounces_off_bottom() {
        let mut ball = Ball::new(&court(), 20, IVec2::new(7, 7));
        ball.pos = Vec2::new(640.0, 775.0);
        let step = ball.update(&court(), &mut rng());
        assert!(step.bounced);
        assert_eq!(step.scored, None);
        assert_eq!(ball.speed, IVec2::new(7, -7));
        assert_eq!(ball.pos, Vec2::new(647.0, 782.0));
    }

    #[test]
    fn ball_bounces_off_top_on_exact_contact() {
        let mut ball = Ball::new(&court(), 20, IVec2::new(7, -7));
        ball.pos = Vec2::new(640.0, 27.0);
        let step = ball.update(&court(), &mut rng());
        assert!(step.bounced);
        assert_eq!(ball.speed.y, 7);
    }

    #[test]
    fn ball_crossing_right_edge_scores_for_cpu() {
        let mut ball = Ball::new(&court(), 20, IVec2::new(7, 7));
        ball.pos = Vec2::new(1255.0, 400.0);
        let step = ball.update(&court(), &mut rng());
        assert_eq!(step.scored, Some(Side::Cpu));
        assert_eq!(ball.pos, Vec2::new(640.0, 400.0));
    }

    #[test]
    fn ball_crossing_left_edge_scores_for_player() {
        let mut ball = Ball::new(&court(), 20, IVec2::new(-7, 7));
        ball.pos = Vec2::new(25.0, 400.0);
        let step = ball.update(&court(), &mut rng());
        assert_eq!(step.scored, Some(Side::Player));
        assert_eq!(ball.pos, Vec2::new(640.0, 400.0));
    }

    #[test]
    fn ball_in_open_court_does_not_score() {
        let mut ball = Ball::new(&court(), 20, IVec2::new(7, 7));
        let step = ball.update(&court(), &mut rng());
        assert_eq!(step, BallStep::default());
        assert_eq!(ball.pos, Vec2::new(647.0, 407.0));
    }

    #[test]
    fn corner_exit_bounces_and_scores_same_frame() {
        let mut ball = Ball::new(&court(), 20, IVec2::new(7, 7));
        ball.pos = Vec2::new(1260.0, 780.0);
        let step = ball.update(&court(), &mut rng());
        assert!(step.bounced);
        assert_eq!(step.scored, Some(Side::Cpu));
        assert_eq!(ball.pos, court().center());
        assert_eq!(ball.speed.y.abs(), 7);
    }

    #[test]
    fn reset_uses_integer_centre_on_odd_court() {
        let odd = Court {
            width: 801,
            height: 601,
        };
        let mut ball = Ball::new(&odd, 10, IVec2::new(5, 5));
        ball.pos = Vec2::new(3.0, 3.0);
        ball.reset(&odd, &mut rng());
        assert_eq!(ball.pos, Vec2::new(400.0, 300.0));
    }

    #[test]
    fn human_paddle_both_keys_cancel() {
        let mut paddle = Paddle::new(
            &court(),
            1245.0,
            Vec2::new(25.0, 120.0),
            6,
            PaddleControl::Human,
        );
        let start = paddle.pos.y;
        paddle.update(
            PaddleInputs {
                up: true,
                down: true,
                target_y: 0.0,
            },
            &court(),
        );
        assert_eq!(paddle.pos.y, start);
    }

    #[test]
    fn human_paddle_ignores_target() {
        let mut paddle = Paddle::new(
            &court(),
            1245.0,
            Vec2::new(25.0, 120.0),
            6,
            PaddleControl::Human,
        );
        let start = paddle.pos.y;
        paddle.update(
            PaddleInputs {
                target_y: 0.0,
                ..Default::default()
            },
            &court(),
        );
        assert_eq!(paddle.pos.y, start);
    }

    #[test]
    fn tracking_paddle_moves_toward_target() {
        let mut paddle = Paddle::new(
            &court(),
            10.0,
            Vec2::new(25.0, 120.0),
            6,
            PaddleControl::TrackTarget,
        );
        // centre 400
        paddle.update(
            PaddleInputs {
                target_y: 100.0,
                ..Default::default()
            },
            &court(),
        );
        assert_eq!(paddle.center_y(), 394.0);

        paddle.update(
            PaddleInputs {
                target_y: 700.0,
                ..Default::default()
            },
            &court(),
        );
        assert_eq!(paddle.center_y(), 400.0);
    }

    #[test]
    fn tracking_paddle_moves_down_on_exact_alignment() {
        let mut paddle = Paddle::new(
            &court(),
            10.0,
            Vec2::new(25.0, 120.0),
            6,
            PaddleControl::TrackTarget,
        );
        paddle.update(
            PaddleInputs {
                target_y: 400.0,
                ..Default::default()
            },
            &court(),
        );
        assert_eq!(paddle.center_y(), 406.0);
    }

    #[test]
    fn tracking_paddle_holds_within_one_step_above() {
        let mut paddle = Paddle::new(
            &court(),
            10.0,
            Vec2::new(25.0, 120.0),
            6,
            PaddleControl::TrackTarget,
        );
        // centre 400 is above-by-less-than-a-step of 397: up to 394, then back down
        paddle.update(
            PaddleInputs {
                target_y: 397.0,
                ..Default::default()
            },
            &court(),
        );
        assert_eq!(paddle.center_y(), 400.0);
    }

    #[test]
    fn paddle_clamps_at_edges() {
        let mut paddle = Paddle::new(
            &court(),
            1245.0,
            Vec2::new(25.0, 120.0),
            6,
            PaddleControl::Human,
        );
        paddle.pos.y = 3.0;
        paddle.update(
            PaddleInputs {
                up: true,
                ..Default::default()
            },
            &court(),
        );
        assert_eq!(paddle.pos.y, 0.0);

        paddle.pos.y = 678.0;
        paddle.update(
            PaddleInputs {
                down: true,
                ..Default::default()
            },
            &court(),
        );
        assert_eq!(paddle.pos.y, 680.0);
    }

    #[test]
    fn new_state_starts_on_menu() {
        let state = GameState::new(&GameConfig::default(), 1);
        assert_eq!(state.mode, GameMode::Menu);
        assert_eq!(state.menu_selection, MenuItem::Start);
        assert_eq!(state.scores, Scores::default());
        assert_eq!(state.ball.pos, Vec2::new(640.0, 400.0));
        assert_eq!(state.player.pos, Vec2::new(1245.0, 340.0));
        assert_eq!(state.cpu.pos, Vec2::new(10.0, 340.0));
    }

    proptest! {
        #[test]
        fn paddle_stays_in_court(
            start in -200.0f32..1000.0,
            target in -500.0f32..1500.0,
            moves in proptest::collection::vec((any::<bool>(), any::<bool>()), 1..200),
            tracking in any::<bool>(),
        ) {
            let court = court();
            let control = if tracking { PaddleControl::TrackTarget } else { PaddleControl::Human };
            let mut paddle = Paddle::new(&court, 10.0, Vec2::new(25.0, 120.0), 6, control);
            paddle.pos.y = start;
            for (up, down) in moves {
                paddle.update(PaddleInputs { up, down, target_y: target }, &court);
                prop_assert!(paddle.pos.y >= 0.0);
                prop_assert!(paddle.pos.y <= 800.0 - 120.0);
            }
        }

        #[test]
        fn reset_preserves_speed_magnitude(
            seed in any::<u64>(),
            sx in -20i32..20,
            sy in -20i32..20,
            resets in 1usize..64,
        ) {
            let court = court();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut ball = Ball::new(&court, 20, IVec2::new(sx, sy));
            for _ in 0..resets {
                ball.reset(&court, &mut rng);
                prop_assert_eq!(ball.speed.abs(), IVec2::new(sx, sy).abs());
                prop_assert_eq!(ball.pos, court.center());
            }
        }

        #[test]
        fn ball_update_preserves_speed_magnitude(
            seed in any::<u64>(),
            frames in 1usize..2000,
        ) {
            let court = court();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut ball = Ball::new(&court, 20, IVec2::new(7, 7));
            for _ in 0..frames {
                ball.update(&court, &mut rng);
                prop_assert_eq!(ball.speed.abs(), IVec2::new(7, 7));
            }
        }
    }
}
