//! Audio cues
//!
//! Maps game events to sound effects and tracks background music state.
//! Playback is fire-and-forget: a cue without a sound file is silently skipped,
//! and nothing here ever reports back into game logic. Native builds have no
//! output device, so cues are logged instead of played.

use std::path::PathBuf;

use crate::assets::{AssetPaths, MUSIC_CANDIDATES};
use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player moved a cell
    Click,
    /// Correct answer eaten
    Correct,
    /// Wrong answer eaten
    Wrong,
    /// Caught by the troggle
    Hurt,
    /// Score milestone or end of game
    Victory,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 5] = [
        SoundEffect::Click,
        SoundEffect::Correct,
        SoundEffect::Wrong,
        SoundEffect::Hurt,
        SoundEffect::Victory,
    ];

    /// Cue for a game event, if it has one
    pub fn for_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::Step => Some(SoundEffect::Click),
            GameEvent::Correct => Some(SoundEffect::Correct),
            GameEvent::Wrong => Some(SoundEffect::Wrong),
            GameEvent::Hit => Some(SoundEffect::Hurt),
            GameEvent::Milestone | GameEvent::GameOver => Some(SoundEffect::Victory),
            GameEvent::GameStarted | GameEvent::MusicToggled => None,
        }
    }

    /// Filenames to look for, in order
    pub fn candidates(&self) -> &'static [&'static str] {
        match self {
            SoundEffect::Click => &["click.wav"],
            SoundEffect::Correct => &["correct.wav", "crunch.wav", "bite.wav"],
            SoundEffect::Wrong => &["munch.wav"],
            SoundEffect::Hurt => &["hurt.wav", "386893__samueleunimancer__ouch-screem.wav"],
            SoundEffect::Victory => &["victory.flac", "success.wav", "win.flac", "celebration.wav"],
        }
    }

    /// Per-effect volume before master/sfx scaling
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::Hurt => 0.8,
            SoundEffect::Correct | SoundEffect::Victory => 1.0,
            SoundEffect::Click | SoundEffect::Wrong => 0.7,
        }
    }

    fn slot(&self) -> usize {
        match self {
            SoundEffect::Click => 0,
            SoundEffect::Correct => 1,
            SoundEffect::Wrong => 2,
            SoundEffect::Hurt => 3,
            SoundEffect::Victory => 4,
        }
    }
}

/// Audio manager for the game
#[derive(Debug)]
pub struct AudioManager {
    sounds: [Option<PathBuf>; 5],
    music: Option<PathBuf>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    music_paused: bool,
    music_playing: bool,
    /// Cues actually played, newest last
    played: Vec<SoundEffect>,
}

impl AudioManager {
    /// Look up every sound under the asset root
    pub fn new(assets: &AssetPaths, settings: &Settings) -> Self {
        let mut sounds: [Option<PathBuf>; 5] = Default::default();
        for effect in SoundEffect::ALL {
            sounds[effect.slot()] = assets.sound(effect.candidates());
        }
        let music = assets.sound(&MUSIC_CANDIDATES);
        if music.is_none() && sounds.iter().all(Option::is_none) {
            log::warn!("No sound files found - audio disabled");
        }

        Self {
            sounds,
            music,
            master_volume: settings.master_volume,
            sfx_volume: settings.sfx_volume,
            music_volume: settings.music_volume,
            music_paused: settings.music_muted,
            music_playing: false,
            played: Vec::new(),
        }
    }

    /// Manager with no sound files at all
    pub fn silent() -> Self {
        Self {
            sounds: Default::default(),
            music: None,
            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 0.4,
            music_paused: false,
            music_playing: false,
            played: Vec::new(),
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Effective volume of a cue
    pub fn effective_volume(&self, effect: SoundEffect) -> f32 {
        self.master_volume * self.sfx_volume * effect.base_volume()
    }

    /// Whether background music is audible right now
    pub fn music_audible(&self) -> bool {
        self.music.is_some() && self.music_playing && !self.music_paused
    }

    /// Cues played so far
    pub fn played(&self) -> &[SoundEffect] {
        &self.played
    }

    /// React to a game event
    pub fn handle(&mut self, event: GameEvent) {
        match event {
            GameEvent::GameStarted => self.start_music(),
            GameEvent::GameOver => self.stop_music(),
            GameEvent::MusicToggled => self.toggle_music(),
            _ => {}
        }
        if let Some(effect) = SoundEffect::for_event(event) {
            self.play(effect);
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume(effect);
        if vol <= 0.0 {
            return;
        }
        let Some(path) = &self.sounds[effect.slot()] else {
            return;
        };

        log::debug!("Playing {:?} ({}) at {:.2}", effect, path.display(), vol);
        self.played.push(effect);
    }

    /// Loop background music from the start
    pub fn start_music(&mut self) {
        self.music_playing = true;
        if let Some(path) = &self.music {
            log::debug!(
                "Music {} at {:.2}{}",
                path.display(),
                self.master_volume * self.music_volume,
                if self.music_paused { " (paused)" } else { "" }
            );
        }
    }

    pub fn stop_music(&mut self) {
        self.music_playing = false;
    }

    /// Pause or resume background music (M key)
    pub fn toggle_music(&mut self) {
        self.music_paused = !self.music_paused;
        log::debug!("Music {}", if self.music_paused { "paused" } else { "resumed" });
    }
}
