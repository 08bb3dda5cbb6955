//! Answer grid seeding
//!
//! Every generated grid holds the correct answer in exactly one cell. All other
//! cells hold `answer + offset` with a non-zero offset, so they can never match.

use glam::IVec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::consts::CELL_COUNT;
use crate::{cell_index, cell_position, manhattan};

/// Number of nearest cells the near-player policy picks from
pub const NEAREST_CANDIDATES: usize = 3;

/// Row-major grid of answer candidates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub cells: Vec<i32>,
}

impl Grid {
    /// Wrap a row-major cell list (must be `CELL_COUNT` long)
    pub fn from_cells(cells: Vec<i32>) -> Self {
        debug_assert_eq!(cells.len(), CELL_COUNT);
        Self { cells }
    }

    /// Value at a cell
    pub fn value_at(&self, pos: IVec2) -> i32 {
        self.cells[cell_index(pos)]
    }

    /// Index of the first cell holding `answer`
    pub fn answer_index(&self, answer: i32) -> Option<usize> {
        self.cells.iter().position(|&v| v == answer)
    }

    /// How many cells hold `answer` (always 1 for generated grids)
    pub fn count_of(&self, answer: i32) -> usize {
        self.cells.iter().filter(|&&v| v == answer).count()
    }
}

/// Where the correct answer is placed and how decoys are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GridPolicy {
    /// Correct answer in a random cell away from the excluded cells;
    /// decoys are `answer ± 1..=5` and always positive
    #[default]
    Uniform,
    /// Correct answer in one of the 3 cells nearest the player;
    /// decoys are `answer ± 1..=3` with no positivity floor
    NearPlayer,
}

impl GridPolicy {
    /// Generate a grid for `answer` around the player.
    ///
    /// `exclusions` are cells the uniform policy never uses for the answer
    /// (player and enemy). The near-player policy ignores them.
    pub fn generate(
        &self,
        answer: i32,
        player: IVec2,
        exclusions: &[IVec2],
        rng: &mut impl Rng,
    ) -> Grid {
        let (answer_cell, decoys) = match self {
            GridPolicy::Uniform => {
                let open: Vec<usize> = (0..CELL_COUNT)
                    .filter(|&i| !exclusions.contains(&cell_position(i)))
                    .collect();
                // Exclusions never cover the whole grid, but stay total anyway
                let cell = open
                    .choose(rng)
                    .copied()
                    .unwrap_or_else(|| rng.random_range(0..CELL_COUNT));
                let decoys: Vec<i32> = (-5..=5)
                    .filter(|&o| o != 0 && answer + o > 0)
                    .collect();
                (cell, decoys)
            }
            GridPolicy::NearPlayer => {
                let cell = nearest_cells(player)[rng.random_range(0..NEAREST_CANDIDATES)];
                let decoys: Vec<i32> = (-3..=3).filter(|&o| o != 0).collect();
                (cell, decoys)
            }
        };

        let cells = (0..CELL_COUNT)
            .map(|i| {
                if i == answer_cell {
                    answer
                } else {
                    // Offset list is never empty: +1..=5 is always positive for answer >= 0
                    answer + decoys.choose(rng).copied().unwrap_or(1)
                }
            })
            .collect();

        Grid { cells }
    }
}

/// The `NEAREST_CANDIDATES` cells closest to `player` by Manhattan distance,
/// ties broken in row-major order.
pub fn nearest_cells(player: IVec2) -> [usize; NEAREST_CANDIDATES] {
    let mut order: Vec<usize> = (0..CELL_COUNT).collect();
    // Stable sort keeps row-major order among equal distances
    order.sort_by_key(|&i| manhattan(cell_position(i), player));
    let mut nearest = [0; NEAREST_CANDIDATES];
    nearest.copy_from_slice(&order[..NEAREST_CANDIDATES]);
    nearest
}
