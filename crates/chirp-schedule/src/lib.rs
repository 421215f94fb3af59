//! Periodic message scheduling for chirp.
//!
//! The scheduler loads the user's config, optionally shows a banner and a
//! once-per-day tip, then emits a styled random message either once or on
//! every second matching a 6-field cron expression. Time comes from a
//! [`Clock`] so tests can drive the loop without real sleeps; output goes
//! through a [`Presenter`] so rendering stays with the frontend; faults are
//! routed through an explicit [`FaultHub`] rather than process-global
//! hooks.

/// Clock abstraction over local time and sleeping.
pub mod clock;
/// 6-field cron expressions: parsing and matching.
pub mod cron;
/// Error types used throughout the crate.
pub mod error;
/// Fault observer registration and dispatch.
pub mod faults;
/// The scheduler itself.
pub mod scheduler;
/// Once-per-day tip gating.
pub mod tips;

/// Re-export clock types.
pub use clock::{Clock, SystemClock, TestClock};
/// Re-export cron types.
pub use cron::CronExpr;
/// Re-export error types.
pub use error::{ScheduleError, ScheduleResult};
/// Re-export fault observer types.
pub use faults::{FaultGuard, FaultHub, panic_cause};
/// Re-export scheduler types.
pub use scheduler::{DEFAULT_CRON, Presenter, ScheduleOptions, Scheduler, TEST_CRON};
/// Re-export the daily-tip check.
pub use tips::daily_tip;
