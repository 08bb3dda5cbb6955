//! Per-frame render snapshot
//!
//! Everything a presentation layer needs to draw one frame, captured from the
//! session without exposing it. Also renders a plain-text version of the
//! screen for the headless runner.

use std::fmt::Write;

use glam::IVec2;
use serde::Serialize;

use crate::cell_index;
use crate::consts::GRID_SIZE;
use crate::sim::{Feedback, GamePhase, GameState, RestartTrigger};

pub const TITLE: &str = "NumCrunch Academy";

/// One frame's worth of render data
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub phase: GamePhase,
    pub cells: Vec<i32>,
    /// Cell holding the correct answer (for highlighting)
    pub answer_index: Option<usize>,
    pub player: IVec2,
    pub enemy: IVec2,
    pub score: u32,
    pub lives: u32,
    /// HUD prompt, e.g. `"48 ÷ 4 = ?"`
    pub problem: String,
    pub feedback: Option<Feedback>,
    pub music_muted: bool,
    pub restart_hint: &'static str,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        let restart_hint = match state.rules.restart {
            RestartTrigger::AnyKey => "Press any key to Play Again",
            RestartTrigger::RestartKey => "Press R to restart",
        };
        Self {
            phase: state.phase,
            cells: state.grid.cells.clone(),
            answer_index: state.answer_index(),
            player: state.player,
            enemy: state.enemy.pos,
            score: state.score,
            lives: state.lives,
            problem: state.problem.prompt(),
            feedback: state.live_feedback().cloned(),
            music_muted: state.music_muted,
            restart_hint,
        }
    }

    /// Plain-text screen
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        match self.phase {
            GamePhase::Menu => {
                let _ = writeln!(out, "{TITLE}");
                let _ = writeln!(out, "Solve math problems to score points");
                let _ = writeln!(out, "Press any key to Start");
            }
            GamePhase::GameOver => {
                let _ = writeln!(out, "Game Over!");
                let _ = writeln!(out, "Final Score: {}", self.score);
                let _ = writeln!(out, "{}", self.restart_hint);
            }
            GamePhase::Playing => self.write_board(&mut out),
        }
        out
    }

    fn write_board(&self, out: &mut String) {
        let _ = writeln!(out, "Score: {}  Lives: {}  Find: {}", self.score, self.lives, self.problem);
        for row in 0..GRID_SIZE {
            for col in 0..GRID_SIZE {
                let pos = IVec2::new(col, row);
                let marker = if pos == self.player {
                    '@'
                } else if pos == self.enemy {
                    'X'
                } else {
                    ' '
                };
                let value = self.cells.get(cell_index(pos)).copied().unwrap_or_default();
                let _ = write!(out, "[{marker}{value:>4}]");
            }
            out.push('\n');
        }
        if let Some(feedback) = &self.feedback {
            let _ = writeln!(out, "{}", feedback.text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Direction, Rules, try_move_player};

    #[test]
    fn test_menu_text() {
        let state = GameState::new(1, Rules::academy());
        let text = Frame::capture(&state).to_text();
        assert!(text.starts_with(TITLE));
        assert!(text.contains("Press any key to Start"));
    }

    #[test]
    fn test_board_text() {
        let mut state = GameState::new(1, Rules::cruncher());
        state.now_ms = 10;
        let frame = Frame::capture(&state);
        assert_eq!(frame.answer_index, state.answer_index());
        assert!(frame.problem.ends_with("= ?"));

        let text = frame.to_text();
        assert_eq!(text.lines().count(), 1 + GRID_SIZE as usize);
        assert!(text.contains('@'));
        assert!(text.contains('X'));
        assert!(text.contains(&state.problem.prompt()));
    }

    #[test]
    fn test_feedback_shown_until_expiry() {
        let mut state = GameState::new(5, Rules::academy());
        state.start(0);
        state.now_ms = 10;
        try_move_player(&mut state, Direction::Up);
        assert!(Frame::capture(&state).feedback.is_some());
        state.now_ms = 5_000;
        assert!(Frame::capture(&state).feedback.is_none());
    }

    #[test]
    fn test_game_over_hint_follows_restart_rule() {
        let mut state = GameState::new(1, Rules::cruncher());
        state.end_game();
        assert!(Frame::capture(&state).to_text().contains("Press R to restart"));

        let mut state = GameState::new(1, Rules::academy());
        state.end_game();
        assert!(Frame::capture(&state).to_text().contains("Press any key to Play Again"));
    }
}
