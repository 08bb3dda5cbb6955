//! Game state and core session types
//!
//! One `GameState` owns everything a session needs: phase, score, lives, the
//! current problem and grid, both tokens, and the seeded RNG.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::{Enemy, random_cell_except};
use super::grid::Grid;
use super::problem::Problem;
use super::rules::{EnemyStart, Rules};
use crate::center_cell;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for any key
    Menu,
    /// Active gameplay
    Playing,
    /// Out of lives
    GameOver,
}

/// A cardinal move on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Unit offset (rows grow downward)
    pub fn delta(&self) -> IVec2 {
        match self {
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
        }
    }
}

/// Discrete things that happened during a tick.
///
/// The presentation layer drains these to play sounds; game logic never
/// depends on what it does with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStarted,
    /// Player moved one cell
    Step,
    Correct,
    Wrong,
    /// Enemy caught the player
    Hit,
    /// Score reached a multiple of `MILESTONE_POINTS`
    Milestone,
    GameOver,
    MusicToggled,
}

/// Feedback text color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackColor {
    Green,
    Red,
}

/// Transient message shown under the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub text: String,
    pub color: FeedbackColor,
    pub expires_at_ms: u64,
}

impl Feedback {
    pub fn is_visible(&self, now_ms: u64) -> bool {
        now_ms < self.expires_at_ms
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rules: Rules,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u32,
    pub player: IVec2,
    pub enemy: Enemy,
    pub problem: Problem,
    pub grid: Grid,
    pub feedback: Option<Feedback>,
    pub music_muted: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Timestamp of the last tick
    pub now_ms: u64,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a session. Without a menu the first round starts immediately.
    pub fn new(seed: u64, rules: Rules) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let player = center_cell();
        let problem = rules.problems.generate(&mut rng);
        let grid = rules.grid.generate(problem.answer, player, &[player], &mut rng);

        let mut state = Self {
            seed,
            rules,
            phase: GamePhase::Menu,
            score: 0,
            lives: START_LIVES,
            player,
            enemy: Enemy::new(IVec2::ZERO, 0),
            problem,
            grid,
            feedback: None,
            music_muted: false,
            time_ticks: 0,
            now_ms: 0,
            events: Vec::new(),
            rng,
        };

        if !rules.start_in_menu {
            state.start(0);
        }

        state
    }

    /// Reset everything and begin a fresh session in `Playing`
    pub fn start(&mut self, now_ms: u64) {
        self.score = 0;
        self.lives = START_LIVES;
        self.player = center_cell();
        let enemy_pos = match self.rules.enemy_start {
            EnemyStart::Corner => IVec2::ZERO,
            EnemyStart::Random => random_cell_except(self.player, &mut self.rng),
        };
        self.enemy = Enemy::new(enemy_pos, now_ms);
        self.feedback = None;
        self.phase = GamePhase::Playing;
        self.new_round();
        self.events.push(GameEvent::GameStarted);
        log::info!("Game started (seed {}, answer {})", self.seed, self.problem.answer);
    }

    /// New problem and a grid seeded around the player
    pub fn new_round(&mut self) {
        self.problem = self.rules.problems.generate(&mut self.rng);
        let exclusions = [self.player, self.enemy.pos];
        self.grid = self
            .rules
            .grid
            .generate(self.problem.answer, self.player, &exclusions, &mut self.rng);
        log::debug!("New round: {} (answer {})", self.problem.display(), self.problem.answer);
    }

    /// Index of the cell holding the correct answer
    pub fn answer_index(&self) -> Option<usize> {
        self.grid.answer_index(self.problem.answer)
    }

    /// Set the transient feedback message
    pub fn show_feedback(&mut self, text: impl Into<String>, color: FeedbackColor) {
        self.feedback = Some(Feedback {
            text: text.into(),
            color,
            expires_at_ms: self.now_ms + FEEDBACK_DURATION_MS,
        });
    }

    /// Feedback that has not yet expired
    pub fn live_feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref().filter(|f| f.is_visible(self.now_ms))
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Lose one life; ends the game when none remain. Returns true on game over.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.end_game();
            true
        } else {
            false
        }
    }

    pub fn end_game(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver);
        log::info!("Game over - final score {}", self.score);
    }
}
