//! Deterministic game-logic module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time comes in as a tick timestamp, never read from a clock
//! - No rendering, audio, or platform dependencies

pub mod enemy;
pub mod grid;
pub mod problem;
pub mod rules;
pub mod state;
pub mod tick;

pub use enemy::{Enemy, EnemyPolicy, collides, pursue_step, wander_step};
pub use grid::{Grid, GridPolicy, nearest_cells};
pub use problem::{Operation, Problem, ProblemPolicy};
pub use rules::{EnemyStart, HitResponse, RestartTrigger, Rules, WrongPickPolicy};
pub use state::{Direction, Feedback, FeedbackColor, GameEvent, GamePhase, GameState};
pub use tick::{TickInput, autopilot_step, tick, try_move_player};
