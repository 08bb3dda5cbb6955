//! Fixed timestep simulation tick
//!
//! Input handling and phase transitions. One call per 60 Hz tick.

use glam::IVec2;

use super::enemy::{collides, random_cell_except};
use super::rules::{HitResponse, RestartTrigger, WrongPickPolicy};
use super::state::{Direction, FeedbackColor, GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::{center_cell, cell_position, in_bounds, manhattan};

/// Autopilot presses a key every this many ticks
pub const AUTOPILOT_STRIDE: u64 = 20;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Arrow key pressed this tick
    pub step: Option<Direction>,
    /// Any key went down this tick (arrows and R included)
    pub any_key: bool,
    /// Dedicated restart key (R)
    pub restart: bool,
    /// Music mute toggle (M)
    pub toggle_music: bool,
    /// Idle/demo mode - the autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one tick at time `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) {
    state.now_ms = now_ms;
    state.time_ticks += 1;

    if input.toggle_music {
        state.music_muted = !state.music_muted;
        state.events.push(GameEvent::MusicToggled);
    }

    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input);
    }
    let input = &input;

    match state.phase {
        GamePhase::Menu => {
            if input.any_key {
                state.start(now_ms);
            }
            return;
        }
        GamePhase::GameOver => {
            let restart = match state.rules.restart {
                RestartTrigger::AnyKey => input.any_key,
                RestartTrigger::RestartKey => input.restart,
            };
            if restart {
                state.start(now_ms);
            }
            return;
        }
        GamePhase::Playing => {}
    }

    if let Some(dir) = input.step {
        try_move_player(state, dir);
    }

    if state.phase == GamePhase::Playing {
        let player = state.player;
        let activated = state
            .enemy
            .update(state.rules.enemy, player, now_ms, &mut state.rng);
        if activated {
            check_enemy_collision(state);
        }
    }

    if state.feedback.as_ref().is_some_and(|f| !f.is_visible(now_ms)) {
        state.feedback = None;
    }
}

/// Move the player one cell and resolve the pick.
///
/// Returns false (and changes nothing) when the move would leave the grid or
/// the game is not being played.
pub fn try_move_player(state: &mut GameState, dir: Direction) -> bool {
    if state.phase != GamePhase::Playing {
        return false;
    }
    let next = state.player + dir.delta();
    if !in_bounds(next) {
        return false;
    }

    state.player = next;
    state.events.push(GameEvent::Step);
    check_answer(state);
    if state.phase == GamePhase::Playing {
        check_enemy_collision(state);
    }
    true
}

/// Score the cell the player is standing on
fn check_answer(state: &mut GameState) {
    if state.grid.value_at(state.player) == state.problem.answer {
        state.score += CORRECT_POINTS;
        state.show_feedback(format!("Correct! +{CORRECT_POINTS}"), FeedbackColor::Green);
        state.events.push(GameEvent::Correct);
        if state.score.is_multiple_of(MILESTONE_POINTS) {
            state.events.push(GameEvent::Milestone);
            log::info!("Milestone reached: {}", state.score);
        }
        state.new_round();
        return;
    }

    state.events.push(GameEvent::Wrong);
    match state.rules.wrong_pick {
        WrongPickPolicy::DeductScore { penalty } => {
            state.score = state.score.saturating_sub(penalty);
            state.show_feedback(format!("Wrong! -{penalty}"), FeedbackColor::Red);
        }
        WrongPickPolicy::LoseLife => {
            state.show_feedback("Wrong! -1 Life", FeedbackColor::Red);
            if state.lose_life() {
                return;
            }
        }
    }
    if state.rules.regenerate_on_wrong {
        state.new_round();
    }
}

/// Resolve the enemy standing on the player
fn check_enemy_collision(state: &mut GameState) {
    if state.phase != GamePhase::Playing || !collides(state.enemy.pos, state.player) {
        return;
    }

    state.events.push(GameEvent::Hit);
    state.show_feedback("OUCH! -1 Life", FeedbackColor::Red);
    log::debug!("Enemy hit at {:?}, lives left {}", state.player, state.lives.saturating_sub(1));
    if state.lose_life() {
        return;
    }

    match state.rules.on_hit {
        HitResponse::RecenterPlayer => state.player = center_cell(),
        HitResponse::RespawnEnemy => {
            state.enemy.pos = random_cell_except(state.player, &mut state.rng);
        }
    }
}

/// Fill in input for demo play
fn autopilot(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::Menu => input.any_key = true,
        GamePhase::GameOver => {
            input.any_key = true;
            input.restart = true;
        }
        GamePhase::Playing => {
            if state.time_ticks.is_multiple_of(AUTOPILOT_STRIDE) {
                input.step = autopilot_step(state);
            }
        }
    }
}

/// Step toward the correct cell, avoiding the enemy when another route exists.
///
/// When the answer sits under the player, step off it (preferring a cell the
/// enemy is not on) so the next move can land on it.
pub fn autopilot_step(state: &GameState) -> Option<Direction> {
    let target = state.answer_index().map(cell_position)?;
    let player = state.player;
    let enemy = state.enemy.pos;

    let candidates: Vec<(Direction, IVec2)> = Direction::ALL
        .iter()
        .map(|&d| (d, player + d.delta()))
        .filter(|&(_, pos)| in_bounds(pos))
        .collect();

    let safe = |pos: IVec2| pos != enemy;
    if target == player {
        return candidates
            .iter()
            .find(|&&(_, pos)| safe(pos))
            .or(candidates.first())
            .map(|&(d, _)| d);
    }

    let closer: Vec<(Direction, IVec2)> = candidates
        .into_iter()
        .filter(|&(_, pos)| manhattan(pos, target) < manhattan(player, target))
        .collect();

    closer
        .iter()
        .find(|&&(_, pos)| pos == target || safe(pos))
        .or(closer.first())
        .map(|&(d, _)| d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell_index;
    use crate::sim::grid::Grid;
    use crate::sim::problem::{Operation, Problem};
    use crate::sim::rules::Rules;

    /// Session in play with a hand-placed answer of 8 right of center
    fn staged_state(rules: Rules) -> GameState {
        let mut state = GameState::new(12345, rules);
        if state.phase != GamePhase::Playing {
            state.start(0);
        }
        state.drain_events();
        state.player = center_cell();
        state.enemy.pos = IVec2::ZERO;
        state.enemy.last_move_ms = 0;
        state.problem = Problem::new(32, Operation::Divide, 4);
        let mut cells = vec![6; CELL_COUNT];
        cells[cell_index(IVec2::new(3, 2))] = 8;
        cells[cell_index(IVec2::new(1, 2))] = 7;
        cells[cell_index(IVec2::new(2, 1))] = 9;
        cells[cell_index(IVec2::new(2, 3))] = 10;
        state.grid = Grid::from_cells(cells);
        state
    }

    fn step(dir: Direction) -> TickInput {
        TickInput {
            step: Some(dir),
            any_key: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_menu_any_key_starts() {
        let mut state = GameState::new(7, Rules::academy());
        tick(&mut state, &TickInput::default(), 16);
        assert_eq!(state.phase, GamePhase::Menu);

        // The key that starts the game does not also move the player
        tick(&mut state, &step(Direction::Left), 33);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player, center_cell());
        assert_eq!(state.grid.count_of(state.problem.answer), 1);
    }

    #[test]
    fn test_correct_pick_scores_and_regenerates() {
        let mut state = staged_state(Rules::academy());
        tick(&mut state, &step(Direction::Right), 100);

        assert_eq!(state.score, CORRECT_POINTS);
        assert_eq!(state.player, IVec2::new(3, 2));
        let events = state.drain_events();
        assert_eq!(events, vec![GameEvent::Step, GameEvent::Correct]);
        assert_eq!(state.grid.count_of(state.problem.answer), 1);
        assert_eq!(state.live_feedback().unwrap().text, "Correct! +10");
    }

    #[test]
    fn test_wrong_pick_deducts_with_floor() {
        let mut state = staged_state(Rules::academy());
        tick(&mut state, &step(Direction::Left), 100);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.live_feedback().unwrap().text, "Wrong! -5");

        state.score = 12;
        tick(&mut state, &step(Direction::Left), 200);
        assert_eq!(state.score, 7);
        // Grid is left alone on a wrong pick
        assert_eq!(state.grid.value_at(IVec2::new(3, 2)), 8);
    }

    #[test]
    fn test_wrong_pick_costs_life() {
        let mut rules = Rules::cruncher();
        rules.enemy = crate::sim::enemy::EnemyPolicy::Pursue { interval_ms: 1_000_000 };
        let mut state = staged_state(rules);
        state.lives = 1;
        tick(&mut state, &step(Direction::Up), 100);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.drain_events().contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_out_of_bounds_move_is_noop() {
        let mut state = staged_state(Rules::academy());
        state.player = IVec2::new(0, 4);
        state.score = 20;
        assert!(!try_move_player(&mut state, Direction::Left));
        assert!(!try_move_player(&mut state, Direction::Down));
        assert_eq!(state.player, IVec2::new(0, 4));
        assert_eq!(state.score, 20);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_milestone_every_fifty() {
        let mut state = staged_state(Rules::academy());
        state.score = MILESTONE_POINTS - CORRECT_POINTS;
        tick(&mut state, &step(Direction::Right), 100);
        assert_eq!(state.score, MILESTONE_POINTS);
        assert!(state.drain_events().contains(&GameEvent::Milestone));
    }

    #[test]
    fn test_enemy_hit_last_life_ends_game_same_tick() {
        let mut state = staged_state(Rules::academy());
        state.lives = 1;
        state.enemy.pos = IVec2::new(1, 2);
        state.enemy.last_move_ms = 0;
        tick(&mut state, &TickInput::default(), ENEMY_MOVE_INTERVAL_MS + 1);
        assert_eq!(state.enemy.pos, state.player);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        let events = state.drain_events();
        assert_eq!(events, vec![GameEvent::Hit, GameEvent::GameOver]);
    }

    #[test]
    fn test_enemy_hit_recenters_player() {
        let mut state = staged_state(Rules::academy());
        state.player = IVec2::new(0, 1);
        state.enemy.pos = IVec2::new(0, 2);
        tick(&mut state, &TickInput::default(), ENEMY_MOVE_INTERVAL_MS + 1);
        assert_eq!(state.lives, START_LIVES - 1);
        assert_eq!(state.player, center_cell());
        assert_eq!(state.live_feedback().unwrap().text, "OUCH! -1 Life");
    }

    #[test]
    fn test_walking_into_enemy_respawns_it() {
        let mut rules = Rules::cruncher();
        rules.enemy = crate::sim::enemy::EnemyPolicy::Pursue { interval_ms: 1_000_000 };
        let mut state = staged_state(rules);
        state.enemy.pos = IVec2::new(3, 2);
        tick(&mut state, &step(Direction::Right), 100);
        assert_eq!(state.score, CORRECT_POINTS);
        assert_eq!(state.lives, START_LIVES - 1);
        assert_ne!(state.enemy.pos, state.player);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_restart_from_game_over() {
        let mut state = staged_state(Rules::cruncher());
        state.score = 40;
        state.lives = 0;
        state.end_game();

        // Cruncher only restarts on R
        tick(&mut state, &step(Direction::Up), 100);
        assert_eq!(state.phase, GamePhase::GameOver);

        let restart = TickInput {
            any_key: true,
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart, 200);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.grid.count_of(state.problem.answer), 1);
    }

    #[test]
    fn test_music_toggle() {
        let mut state = GameState::new(3, Rules::academy());
        let input = TickInput {
            toggle_music: true,
            ..Default::default()
        };
        tick(&mut state, &input, 16);
        assert!(state.music_muted);
        tick(&mut state, &input, 32);
        assert!(!state.music_muted);
    }

    #[test]
    fn test_autopilot_heads_for_answer() {
        let state = staged_state(Rules::academy());
        assert_eq!(autopilot_step(&state), Some(Direction::Right));
    }

    #[test]
    fn test_autopilot_steps_off_answer_underfoot() {
        let mut state = staged_state(Rules::academy());
        state.player = IVec2::new(3, 2);
        state.enemy.pos = IVec2::new(2, 2);
        let dir = autopilot_step(&state).unwrap();
        assert_ne!(state.player + dir.delta(), state.enemy.pos);
    }

    #[test]
    fn test_idle_mode_plays() {
        for rules in [Rules::academy(), Rules::cruncher()] {
            let mut state = GameState::new(2024, rules);
            let input = TickInput {
                idle_mode: true,
                ..Default::default()
            };
            let mut started = false;
            let mut ms = 0.0;
            for _ in 0..(TICK_RATE as usize * 60) {
                ms += SIM_DT_MS;
                tick(&mut state, &input, ms as u64);
                started |= state.phase == GamePhase::Playing;
                assert!(in_bounds(state.player));
                assert!(in_bounds(state.enemy.pos));
            }
            assert!(started);
            assert!(state.time_ticks > 0);
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = GameState::new(99999, Rules::cruncher());
        let mut b = GameState::new(99999, Rules::cruncher());
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for t in 0..2000u64 {
            tick(&mut a, &input, t * 16);
            tick(&mut b, &input, t * 16);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.player, b.player);
        assert_eq!(a.enemy.pos, b.enemy.pos);
        assert_eq!(a.grid, b.grid);
    }
}
