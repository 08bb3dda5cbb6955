//! Asset lookup
//!
//! Every asset has a fixed, ordered list of candidate filenames searched in a
//! fixed, ordered list of directories under `<root>/assets`. The first file that
//! exists wins. Nothing here can fail: a missing sprite becomes a flat
//! placeholder color and a missing sound is simply silent.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Sprite directories, searched in order
pub const SPRITE_DIRS: [&str; 2] = ["sprites", "images"];
/// Sound directory
pub const SOUND_DIR: &str = "sounds";

/// RGB color used when a sprite has no image file
pub type Rgb = (u8, u8, u8);

/// Images the presentation layer draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sprite {
    Player,
    Enemy,
    Background,
}

impl Sprite {
    pub const ALL: [Sprite; 3] = [Sprite::Player, Sprite::Enemy, Sprite::Background];

    pub fn candidates(&self) -> &'static [&'static str] {
        match self {
            Sprite::Player => &["player.png", "cruncher.png"],
            Sprite::Enemy => &["enemy.png", "troublemaker.png"],
            Sprite::Background => &["background.png", "classroom.png"],
        }
    }

    /// Flat fill used when no image is found
    pub fn placeholder(&self) -> Rgb {
        match self {
            Sprite::Player => (0, 0, 255),
            Sprite::Enemy => (255, 0, 0),
            Sprite::Background => (200, 200, 200),
        }
    }
}

/// Where a sprite comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SpriteSource {
    File(PathBuf),
    Placeholder(Rgb),
}

/// Background music candidates
pub const MUSIC_CANDIDATES: [&str; 3] = ["background.wav", "background_music.wav", "music.mp3"];

/// First existing `dir/name` over the given directories and names
pub fn find_first(dirs: &[PathBuf], names: &[&str]) -> Option<PathBuf> {
    dirs.iter()
        .flat_map(|dir| names.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

/// Resolved asset locations for one asset root
#[derive(Debug, Clone)]
pub struct AssetPaths {
    pub root: PathBuf,
}

impl AssetPaths {
    /// Assets live in `<base>/assets`
    pub fn new(base: impl AsRef<Path>) -> Self {
        Self {
            root: base.as_ref().join("assets"),
        }
    }

    pub fn sprite_dirs(&self) -> Vec<PathBuf> {
        SPRITE_DIRS.iter().map(|d| self.root.join(d)).collect()
    }

    pub fn sound_dir(&self) -> PathBuf {
        self.root.join(SOUND_DIR)
    }

    /// Image file for a sprite, or its placeholder
    pub fn sprite(&self, sprite: Sprite) -> SpriteSource {
        match find_first(&self.sprite_dirs(), sprite.candidates()) {
            Some(path) => {
                log::info!("{:?} sprite loaded from {}", sprite, path.display());
                SpriteSource::File(path)
            }
            None => {
                log::info!("No {:?} sprite found, using placeholder", sprite);
                SpriteSource::Placeholder(sprite.placeholder())
            }
        }
    }

    /// Sound file from a candidate list, if any exists
    pub fn sound(&self, names: &[&str]) -> Option<PathBuf> {
        let found = find_first(&[self.sound_dir()], names);
        match &found {
            Some(path) => log::info!("Loaded sound from {}", path.display()),
            None => log::debug!("No sound found among {:?}", names),
        }
        found
    }
}
