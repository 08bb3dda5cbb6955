//! The troggle: the enemy token that roams the grid
//!
//! Two movement policies: a timed pursuit that closes Manhattan distance to the
//! player, and a memoryless random walk.

use glam::IVec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::state::Direction;
use crate::consts::{ENEMY_MOVE_INTERVAL_MS, GRID_SIZE, WANDER_CHANCE};
use crate::in_bounds;

/// How the enemy moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyPolicy {
    /// Step toward the player once every `interval_ms`
    Pursue { interval_ms: u64 },
    /// Each tick, with probability `chance`, step in a random direction
    Wander { chance: f64 },
}

impl Default for EnemyPolicy {
    fn default() -> Self {
        EnemyPolicy::Pursue {
            interval_ms: ENEMY_MOVE_INTERVAL_MS,
        }
    }
}

impl EnemyPolicy {
    pub fn wander() -> Self {
        EnemyPolicy::Wander {
            chance: WANDER_CHANCE,
        }
    }
}

/// Enemy token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: IVec2,
    /// Time of the last pursuit activation
    pub last_move_ms: u64,
}

impl Enemy {
    pub fn new(pos: IVec2, now_ms: u64) -> Self {
        Self {
            pos,
            last_move_ms: now_ms,
        }
    }

    /// Advance the enemy for one tick.
    ///
    /// Returns true when the enemy activated this tick (whether or not it
    /// actually changed cell). Collisions are only checked on activation.
    pub fn update(
        &mut self,
        policy: EnemyPolicy,
        player: IVec2,
        now_ms: u64,
        rng: &mut impl Rng,
    ) -> bool {
        match policy {
            EnemyPolicy::Pursue { interval_ms } => {
                if now_ms.saturating_sub(self.last_move_ms) <= interval_ms {
                    return false;
                }
                self.pos = pursue_step(self.pos, player, rng);
                self.last_move_ms = now_ms;
                true
            }
            EnemyPolicy::Wander { chance } => {
                if rng.random_bool(chance.clamp(0.0, 1.0)) {
                    self.pos = wander_step(self.pos, rng);
                }
                true
            }
        }
    }
}

/// One pursuit step: a unit move along an axis that shrinks the distance to
/// `player`, chosen uniformly when both axes qualify. No move when aligned.
pub fn pursue_step(enemy: IVec2, player: IVec2, rng: &mut impl Rng) -> IVec2 {
    let delta = (player - enemy).signum();
    let mut moves = Vec::with_capacity(2);
    if delta.x != 0 {
        moves.push(IVec2::new(delta.x, 0));
    }
    if delta.y != 0 {
        moves.push(IVec2::new(0, delta.y));
    }

    match moves.choose(rng) {
        Some(&step) if in_bounds(enemy + step) => enemy + step,
        _ => enemy,
    }
}

/// One random-walk step; a direction that would leave the grid means no move
pub fn wander_step(enemy: IVec2, rng: &mut impl Rng) -> IVec2 {
    let dir = Direction::ALL[rng.random_range(0..Direction::ALL.len())];
    let next = enemy + dir.delta();
    if in_bounds(next) { next } else { enemy }
}

/// Enemy and player share a cell
#[inline]
pub fn collides(enemy: IVec2, player: IVec2) -> bool {
    enemy == player
}

/// A random cell that is not the player's
pub fn random_cell_except(player: IVec2, rng: &mut impl Rng) -> IVec2 {
    loop {
        let pos = IVec2::new(rng.random_range(0..GRID_SIZE), rng.random_range(0..GRID_SIZE));
        if pos != player {
            return pos;
        }
    }
}
