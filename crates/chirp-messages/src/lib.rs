//! Categorized message pool and time-aware random selector for chirp.
//!
//! A [`MessagePool`] maps categories (morning, night, weekend, jokes, ...)
//! to candidate strings. [`select`] picks one based on the local time of
//! day, with weighted overrides for the inspiration and joke pools and a
//! dedicated pool for error hints. The pool is loaded once and read-only
//! for the life of the process.

/// Error types used throughout the crate.
pub mod error;
/// The categorized message pool and its JSON loader.
pub mod pool;
/// Time-of-day bucketing and weighted random selection.
pub mod select;

/// Re-export error types.
pub use error::{MessageError, MessageResult};
/// Re-export pool types.
pub use pool::{Category, FALLBACK_MESSAGE, MessagePool};
/// Re-export selection functions.
pub use select::{random_tip, select, time_category};
