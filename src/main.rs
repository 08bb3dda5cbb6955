//! NumCrunch Academy entry point
//!
//! Native headless runner: drives the fixed-timestep loop with the autopilot
//! at the controls, routes events to the audio manager, and prints the board.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;

use numcrunch_academy::assets::{AssetPaths, Sprite};
use numcrunch_academy::audio::AudioManager;
use numcrunch_academy::consts::*;
use numcrunch_academy::sim::{GamePhase, GameState, TickInput, tick};
use numcrunch_academy::view::Frame;
use numcrunch_academy::{Preset, Settings};

#[derive(Parser, Debug)]
#[command(name = "numcrunch-academy", about = "Headless NumCrunch Academy demo run")]
struct Args {
    /// Rule preset (academy, cruncher); overrides the settings file
    #[arg(long)]
    preset: Option<String>,
    /// Session seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,
    /// Simulated seconds to run
    #[arg(long, default_value_t = 60)]
    seconds: u64,
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Directory containing `assets/`
    #[arg(long, default_value = ".")]
    assets: PathBuf,
    /// Sleep to hold the 60 Hz frame budget instead of running flat out
    #[arg(long)]
    realtime: bool,
    /// Print the board every N simulated seconds (0 = only at the end)
    #[arg(long, default_value_t = 10)]
    show_every: u64,
}

/// Game instance holding all state
struct Game {
    state: GameState,
    audio: AudioManager,
    input: TickInput,
    accumulator: f64,
    clock_ms: f64,
    last_phase: GamePhase,
    rounds_won: u32,
    games_played: u32,
}

impl Game {
    fn new(state: GameState, audio: AudioManager) -> Self {
        let last_phase = state.phase;
        Self {
            state,
            audio,
            input: TickInput {
                idle_mode: true,
                ..Default::default()
            },
            accumulator: 0.0,
            clock_ms: 0.0,
            last_phase,
            rounds_won: 0,
            games_played: 0,
        }
    }

    /// Run simulation ticks for `dt_ms` of elapsed time
    fn update(&mut self, dt_ms: f64) {
        self.accumulator += dt_ms.min(100.0);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            self.clock_ms += SIM_DT_MS;
            tick(&mut self.state, &self.input, self.clock_ms as u64);
            self.accumulator -= SIM_DT_MS;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.step = None;
            self.input.any_key = false;
            self.input.restart = false;
            self.input.toggle_music = false;

            self.dispatch_events();
        }

        let phase = self.state.phase;
        if phase != self.last_phase {
            log::info!("Phase {:?} -> {:?}", self.last_phase, phase);
            if phase == GamePhase::GameOver {
                log::info!("{}", Frame::capture(&self.state).to_text());
            }
            self.last_phase = phase;
        }
    }

    fn dispatch_events(&mut self) {
        use numcrunch_academy::sim::GameEvent;

        for event in self.state.drain_events() {
            match event {
                GameEvent::Correct => self.rounds_won += 1,
                GameEvent::GameStarted => self.games_played += 1,
                _ => {}
            }
            self.audio.handle(event);
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("NumCrunch Academy (native) starting...");

    let mut settings = match &args.settings {
        Some(path) => Settings::load_from(path),
        None => Settings::default(),
    };
    if let Some(name) = &args.preset {
        let Some(preset) = Preset::from_str(name) else {
            bail!("unknown preset '{name}' (expected academy or cruncher)");
        };
        settings.preset = preset;
        settings.rules = None;
    }

    let assets = AssetPaths::new(&args.assets);
    for sprite in Sprite::ALL {
        assets.sprite(sprite);
    }
    let audio = AudioManager::new(&assets, &settings);

    let seed = args.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("Preset {} with seed {}", settings.preset.as_str(), seed);

    let mut state = GameState::new(seed, settings.effective_rules());
    state.music_muted = settings.music_muted;
    let mut game = Game::new(state, audio);
    game.dispatch_events();

    let frame_budget = Duration::from_secs_f64(1.0 / TICK_RATE as f64);
    let total_frames = args.seconds * TICK_RATE as u64;
    let show_every = args.show_every * TICK_RATE as u64;
    for frame in 1..=total_frames {
        let started = Instant::now();
        game.update(SIM_DT_MS);

        if show_every > 0 && frame % show_every == 0 {
            println!("{}", Frame::capture(&game.state).to_text());
        }

        if args.realtime {
            if let Some(rest) = frame_budget.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    log::info!(
        "Finished: {} games, {} correct picks, {} sound cues",
        game.games_played,
        game.rounds_won,
        game.audio.played().len()
    );
    let snapshot = serde_json::to_string_pretty(&Frame::capture(&game.state))
        .context("serializing final frame")?;
    println!("{snapshot}");
    Ok(())
}
