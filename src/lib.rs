//! NumCrunch Academy - A grid arithmetic arcade game
//!
//! Core modules:
//! - `sim`: Deterministic game logic (problems, grid seeding, enemy, session state)
//! - `settings`: Rule presets and audio preferences
//! - `assets`: Deterministic asset lookup with placeholder fallbacks
//! - `audio`: Sound cue mapping for game events
//! - `view`: Per-frame render snapshot

pub mod assets;
pub mod audio;
pub mod settings;
pub mod sim;
pub mod view;

pub use settings::{Preset, Settings};

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Cells per grid side
    pub const GRID_SIZE: i32 = 5;
    /// Total number of grid cells
    pub const CELL_COUNT: usize = (GRID_SIZE * GRID_SIZE) as usize;

    /// Lives at the start of a session
    pub const START_LIVES: u32 = 3;
    /// Points for stepping on the correct answer
    pub const CORRECT_POINTS: u32 = 10;
    /// Points lost for a wrong pick (score floors at 0)
    pub const WRONG_PENALTY: u32 = 5;
    /// A milestone cue plays every time the score crosses a multiple of this
    pub const MILESTONE_POINTS: u32 = 50;

    /// Pursuing enemy moves at most once per this many milliseconds
    pub const ENEMY_MOVE_INTERVAL_MS: u64 = 1500;
    /// Per-tick chance that a wandering enemy takes a step
    pub const WANDER_CHANCE: f64 = 0.02;

    /// How long a feedback message stays on screen
    pub const FEEDBACK_DURATION_MS: u64 = 1000;

    /// Fixed simulation rate (matches the 60 FPS frame cap)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in milliseconds
    pub const SIM_DT_MS: f64 = 1000.0 / TICK_RATE as f64;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}

use consts::GRID_SIZE;

/// Whether a cell lies inside the grid
#[inline]
pub fn in_bounds(pos: IVec2) -> bool {
    (0..GRID_SIZE).contains(&pos.x) && (0..GRID_SIZE).contains(&pos.y)
}

/// Manhattan distance between two cells
#[inline]
pub fn manhattan(a: IVec2, b: IVec2) -> i32 {
    (a - b).abs().element_sum()
}

/// Row-major index of a cell (x = column, y = row)
#[inline]
pub fn cell_index(pos: IVec2) -> usize {
    (pos.y * GRID_SIZE + pos.x) as usize
}

/// Cell for a row-major index
#[inline]
pub fn cell_position(index: usize) -> IVec2 {
    let index = index as i32;
    IVec2::new(index % GRID_SIZE, index / GRID_SIZE)
}

/// The middle cell, where the player starts each session
#[inline]
pub fn center_cell() -> IVec2 {
    IVec2::splat(GRID_SIZE / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use consts::CELL_COUNT;

    #[test]
    fn test_index_position_agree() {
        for i in 0..CELL_COUNT {
            assert_eq!(cell_index(cell_position(i)), i);
        }
        assert_eq!(cell_position(7), IVec2::new(2, 1));
    }

    #[test]
    fn test_bounds() {
        assert!(in_bounds(IVec2::ZERO));
        assert!(in_bounds(IVec2::new(4, 4)));
        assert!(!in_bounds(IVec2::new(-1, 0)));
        assert!(!in_bounds(IVec2::new(0, 5)));
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(manhattan(IVec2::new(0, 0), IVec2::new(2, 3)), 5);
        assert_eq!(manhattan(center_cell(), center_cell()), 0);
        assert_eq!(center_cell(), IVec2::new(2, 2));
    }
}
