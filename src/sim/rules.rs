//! Session rules
//!
//! Each way the game can vary is a small enum, and a `Rules` value bundles one
//! choice of each. Rules are fixed when a session is created.

use serde::{Deserialize, Serialize};

use super::enemy::EnemyPolicy;
use super::grid::GridPolicy;
use super::problem::ProblemPolicy;
use crate::consts::WRONG_PENALTY;

/// What stepping on a wrong answer costs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrongPickPolicy {
    /// Lose points, never dropping below zero
    DeductScore { penalty: u32 },
    /// Lose a life
    LoseLife,
}

impl Default for WrongPickPolicy {
    fn default() -> Self {
        WrongPickPolicy::DeductScore {
            penalty: WRONG_PENALTY,
        }
    }
}

/// What happens after the enemy catches the player (and lives remain)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HitResponse {
    /// Player is sent back to the center cell
    #[default]
    RecenterPlayer,
    /// Enemy jumps to a random cell away from the player
    RespawnEnemy,
}

/// Where the enemy appears at the start of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyStart {
    /// Top-left cell
    #[default]
    Corner,
    /// Any cell except the player's
    Random,
}

/// Which input restarts the game from the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RestartTrigger {
    #[default]
    AnyKey,
    /// Only the dedicated restart key (R)
    RestartKey,
}

/// Complete rule set for a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    pub problems: ProblemPolicy,
    pub grid: GridPolicy,
    pub enemy: EnemyPolicy,
    pub wrong_pick: WrongPickPolicy,
    pub on_hit: HitResponse,
    pub enemy_start: EnemyStart,
    pub restart: RestartTrigger,
    /// Reshuffle the grid after a wrong pick too
    #[serde(default)]
    pub regenerate_on_wrong: bool,
    /// Show the title menu before the first round
    pub start_in_menu: bool,
}

impl Default for Rules {
    fn default() -> Self {
        Self::academy()
    }
}

impl Rules {
    /// Division drills, timed pursuit, score penalty for wrong picks
    pub fn academy() -> Self {
        Self {
            problems: ProblemPolicy::DivisionFacts,
            grid: GridPolicy::Uniform,
            enemy: EnemyPolicy::default(),
            wrong_pick: WrongPickPolicy::default(),
            on_hit: HitResponse::RecenterPlayer,
            enemy_start: EnemyStart::Corner,
            restart: RestartTrigger::AnyKey,
            regenerate_on_wrong: false,
            start_in_menu: true,
        }
    }

    /// Mixed arithmetic, wandering enemy, every wrong pick costs a life
    pub fn cruncher() -> Self {
        Self {
            problems: ProblemPolicy::MixedOperations,
            grid: GridPolicy::NearPlayer,
            enemy: EnemyPolicy::wander(),
            wrong_pick: WrongPickPolicy::LoseLife,
            on_hit: HitResponse::RespawnEnemy,
            enemy_start: EnemyStart::Random,
            restart: RestartTrigger::RestartKey,
            regenerate_on_wrong: false,
            start_in_menu: false,
        }
    }
}
