//! The user configuration record and its store.
//!
//! `.chirp.json` holds three settings. Loading shallow-merges the stored
//! object over the defaults, so fields added in later versions pick up
//! their default without a migration. Saving merges a [`ConfigPatch`] over
//! the defaults (not over the previously stored record) and rewrites the
//! whole file — faithful to the original tool's semantics.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

/// A rendering style for output text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Soft gradient across a pastel palette.
    #[default]
    Pastel,
    /// Full hue-sweep gradient.
    Rainbow,
    /// A single randomly chosen solid color.
    Plain,
}

impl Theme {
    /// The theme's name as written in the config file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Pastel => "pastel",
            Theme::Rainbow => "rainbow",
            Theme::Plain => "plain",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pastel" => Ok(Theme::Pastel),
            "rainbow" => Ok(Theme::Rainbow),
            "plain" => Ok(Theme::Plain),
            other => Err(format!(
                "unknown theme '{other}' (expected pastel, rainbow, or plain)"
            )),
        }
    }
}

/// The persisted settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// How messages and the banner are styled.
    pub theme: Theme,
    /// Whether the startup banner is rendered.
    pub show_banner: bool,
    /// Whether the once-per-day tip is shown.
    pub daily_tip: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::Pastel,
            show_banner: true,
            daily_tip: false,
        }
    }
}

/// A partial settings record, merged over defaults on save.
#[derive(Debug, Clone, Default)]
pub struct ConfigPatch {
    /// New theme, if changing.
    pub theme: Option<Theme>,
    /// New banner toggle, if changing.
    pub show_banner: Option<bool>,
    /// New daily-tip toggle, if changing.
    pub daily_tip: Option<bool>,
}

impl ConfigPatch {
    /// Merge this patch over the default record.
    ///
    /// Fields absent from the patch take their defaults, discarding any
    /// previously stored customization — the original tool's
    /// shallow-merge-over-defaults behavior, preserved deliberately.
    pub fn over_defaults(&self) -> Config {
        let defaults = Config::default();
        Config {
            theme: self.theme.unwrap_or(defaults.theme),
            show_banner: self.show_banner.unwrap_or(defaults.show_banner),
            daily_tip: self.daily_tip.unwrap_or(defaults.daily_tip),
        }
    }

    /// True if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.theme.is_none() && self.show_banner.is_none() && self.daily_tip.is_none()
    }
}

/// Loads and saves the settings record at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// File name of the settings record inside the chirp directory.
    pub const FILE_NAME: &'static str = ".chirp.json";

    /// A store rooted in the given directory.
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(Self::FILE_NAME),
        }
    }

    /// The full path of the settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the settings record.
    ///
    /// A missing file is created with defaults. A corrupt file is reset to
    /// defaults with a warning. Neither case is an error for the caller.
    pub fn load(&self) -> Config {
        if !self.path.exists() {
            self.save(&ConfigPatch::default(), true);
            return Config::default();
        }
        match self.read() {
            Ok(config) => config,
            Err(err) => {
                eprintln!(
                    "{} config is corrupted, resetting to defaults ({err})",
                    "warning:".yellow().bold()
                );
                self.save(&ConfigPatch::default(), true);
                Config::default()
            }
        }
    }

    fn read(&self) -> StoreResult<Config> {
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Merge `patch` over the defaults and rewrite the settings file.
    ///
    /// Write failures are reported on stderr and swallowed.
    pub fn save(&self, patch: &ConfigPatch, silent: bool) {
        let config = patch.over_defaults();
        let result = serde_json::to_string_pretty(&config)
            .map_err(crate::StoreError::from)
            .and_then(|data| Ok(fs::write(&self.path, data)?));
        match result {
            Ok(()) => {
                if !silent {
                    println!("{}", "Config updated!".green().bold());
                }
            }
            Err(err) => {
                eprintln!("{} failed to save config: {err}", "warning:".red().bold());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults_and_creates_file() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path());
        assert_eq!(store.load(), Config::default());
        assert!(store.path().exists());
    }

    #[test]
    fn save_then_load_round_trips_over_defaults() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path());
        let patch = ConfigPatch {
            theme: Some(Theme::Rainbow),
            daily_tip: Some(true),
            ..Default::default()
        };
        store.save(&patch, true);
        assert_eq!(store.load(), patch.over_defaults());
    }

    #[test]
    fn save_discards_previous_custom_fields() {
        // Shallow merge over defaults, not over the stored record: a later
        // partial save resets fields it does not mention.
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path());
        store.save(
            &ConfigPatch {
                theme: Some(Theme::Rainbow),
                ..Default::default()
            },
            true,
        );
        store.save(
            &ConfigPatch {
                daily_tip: Some(true),
                ..Default::default()
            },
            true,
        );
        let config = store.load();
        assert_eq!(config.theme, Theme::Pastel);
        assert!(config.daily_tip);
    }

    #[test]
    fn corrupt_file_resets_to_defaults() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path());
        std::fs::write(store.path(), "{not json at all").unwrap();
        assert_eq!(store.load(), Config::default());
        // The file was rewritten with valid defaults.
        let reread: Config =
            serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(reread, Config::default());
    }

    #[test]
    fn partial_file_merges_over_defaults_on_load() {
        let dir = TempDir::new().unwrap();
        let store = ConfigStore::new(dir.path());
        std::fs::write(store.path(), r#"{"theme": "plain"}"#).unwrap();
        let config = store.load();
        assert_eq!(config.theme, Theme::Plain);
        assert!(config.show_banner);
        assert!(!config.daily_tip);
    }

    #[test]
    fn theme_parses_case_insensitively() {
        assert_eq!("Rainbow".parse::<Theme>().unwrap(), Theme::Rainbow);
        assert!("disco".parse::<Theme>().is_err());
    }
}
