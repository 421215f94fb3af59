//! The daily-tip state record and its store.
//!
//! `.chirp-state.json` tracks the last local calendar date a tip was shown
//! so a tip appears at most once per day. Unlike the config file, the state
//! file is not auto-created on load.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

/// The persisted tip-tracking record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TipState {
    /// The local date the last daily tip was shown, if any.
    pub last_tip_date: Option<NaiveDate>,
}

/// Loads and saves the tip-tracking record at a fixed path.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// File name of the state record inside the chirp directory.
    pub const FILE_NAME: &'static str = ".chirp-state.json";

    /// A store rooted in the given directory.
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(Self::FILE_NAME),
        }
    }

    /// The full path of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state record; absent or unreadable files yield the empty
    /// record without creating the file.
    pub fn load(&self) -> TipState {
        if !self.path.exists() {
            return TipState::default();
        }
        self.read().unwrap_or_default()
    }

    fn read(&self) -> StoreResult<TipState> {
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Overwrite the state record. Write failures are reported and
    /// swallowed.
    pub fn save(&self, state: &TipState) {
        let result = serde_json::to_string_pretty(state)
            .map_err(crate::StoreError::from)
            .and_then(|data| Ok(fs::write(&self.path, data)?));
        if let Err(err) = result {
            eprintln!("{} failed to save state: {err}", "warning:".red().bold());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn absent_file_is_empty_record_and_not_created() {
        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path());
        assert_eq!(store.load(), TipState::default());
        assert!(!store.path().exists());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path());
        let state = TipState {
            last_tip_date: NaiveDate::from_ymd_opt(2026, 8, 28),
        };
        store.save(&state);
        assert_eq!(store.load(), state);
    }

    #[test]
    fn corrupt_file_degrades_to_empty_record() {
        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path());
        std::fs::write(store.path(), "###").unwrap();
        assert_eq!(store.load(), TipState::default());
    }

    #[test]
    fn stored_date_uses_iso_format() {
        let dir = TempDir::new().unwrap();
        let store = StateStore::new(dir.path());
        store.save(&TipState {
            last_tip_date: NaiveDate::from_ymd_opt(2026, 8, 28),
        });
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("2026-08-28"));
        assert!(raw.contains("lastTipDate"));
    }
}
