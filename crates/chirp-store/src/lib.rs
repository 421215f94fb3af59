//! Config and tip-state persistence for chirp.
//!
//! Two small JSON files live in the user's chirp directory: `.chirp.json`
//! (theme and feature toggles) and `.chirp-state.json` (the date the last
//! daily tip was shown). Both are single-writer per process invocation;
//! corruption or I/O failure is never fatal — stores warn and degrade to
//! defaults.

/// The user configuration record and its store.
pub mod config;
/// Error types used throughout the crate.
pub mod error;
/// The daily-tip state record and its store.
pub mod state;

/// Re-export config types.
pub use config::{Config, ConfigPatch, ConfigStore, Theme};
/// Re-export error types.
pub use error::{StoreError, StoreResult};
/// Re-export state types.
pub use state::{StateStore, TipState};

use std::path::PathBuf;

/// The directory holding chirp's config and state files.
///
/// Resolution order: `$CHIRP_HOME`, then `$HOME`, then the working
/// directory. `CHIRP_HOME` exists so tests and scripts can sandbox the
/// stores.
pub fn default_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("CHIRP_HOME") {
        return PathBuf::from(dir);
    }
    if let Some(home) = std::env::var_os("HOME") {
        return PathBuf::from(home);
    }
    PathBuf::from(".")
}
