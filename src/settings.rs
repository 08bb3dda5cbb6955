//! Game settings and preferences
//!
//! Loaded from an optional JSON file; anything missing or unreadable falls
//! back to the built-in defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::Rules;

/// Named rule presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Preset {
    /// Division drills with a pursuing troggle
    #[default]
    Academy,
    /// Mixed arithmetic with a wandering troggle; mistakes cost lives
    Cruncher,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Academy => "Academy",
            Preset::Cruncher => "Cruncher",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "academy" | "classic" => Some(Preset::Academy),
            "cruncher" | "arcade" => Some(Preset::Cruncher),
            _ => None,
        }
    }

    pub fn rules(&self) -> Rules {
        match self {
            Preset::Academy => Rules::academy(),
            Preset::Cruncher => Rules::cruncher(),
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rule preset
    pub preset: Preset,
    /// Explicit rules; overrides the preset when present
    pub rules: Option<Rules>,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Start with background music paused
    pub music_muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preset: Preset::Academy,
            rules: None,

            master_volume: 1.0,
            sfx_volume: 1.0,
            music_volume: 0.4,
            music_muted: false,
        }
    }
}

impl Settings {
    /// Create settings from a preset
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            preset,
            ..Self::default()
        }
    }

    /// Rules in effect (explicit override, else the preset's)
    pub fn effective_rules(&self) -> Rules {
        self.rules.unwrap_or_else(|| self.preset.rules())
    }

    /// Parse settings from JSON, clamping volumes into range
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        settings.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
        settings.music_volume = settings.music_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Couldn't read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!(
                    "Loaded settings from {} (preset {})",
                    path.display(),
                    settings.preset.as_str()
                );
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{EnemyPolicy, GridPolicy, WrongPickPolicy};
    use std::io::Write;

    #[test]
    fn test_preset_from_str() {
        assert_eq!(Preset::from_str("ACADEMY"), Some(Preset::Academy));
        assert_eq!(Preset::from_str("cruncher"), Some(Preset::Cruncher));
        assert_eq!(Preset::from_str("hard"), None);
    }

    #[test]
    fn test_preset_rules() {
        let cruncher = Preset::Cruncher.rules();
        assert_eq!(cruncher.grid, GridPolicy::NearPlayer);
        assert_eq!(cruncher.wrong_pick, WrongPickPolicy::LoseLife);
        assert!(matches!(cruncher.enemy, EnemyPolicy::Wander { .. }));
        assert_eq!(Settings::default().effective_rules(), Rules::academy());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "preset": "Cruncher", "sfx_volume": 3.0 }"#).unwrap();
        assert_eq!(settings.preset, Preset::Cruncher);
        assert_eq!(settings.sfx_volume, 1.0);
        assert_eq!(settings.music_volume, 0.4);
        assert_eq!(settings.effective_rules(), Rules::cruncher());
    }

    #[test]
    fn test_rules_override_survives_json() {
        let mut rules = Rules::academy();
        rules.wrong_pick = WrongPickPolicy::LoseLife;
        let settings = Settings {
            rules: Some(rules),
            ..Settings::default()
        };
        let parsed = Settings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(parsed.effective_rules(), rules);
    }

    #[test]
    fn test_load_from_file_and_fallbacks() {
        let dir = tempfile::tempdir().unwrap();

        let good = dir.path().join("settings.json");
        let mut f = std::fs::File::create(&good).unwrap();
        write!(f, r#"{{ "preset": "Cruncher", "music_muted": true }}"#).unwrap();
        let settings = Settings::load_from(&good);
        assert_eq!(settings.preset, Preset::Cruncher);
        assert!(settings.music_muted);

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "not json").unwrap();
        assert_eq!(Settings::load_from(&bad).preset, Preset::Academy);

        let missing = dir.path().join("missing.json");
        assert_eq!(Settings::load_from(&missing).preset, Preset::Academy);
    }
}
