//! Error types for the scheduler.

/// Errors that can occur while configuring the scheduler.
///
/// These are configuration errors in the fail-fast class: they surface
/// before any output is produced. Persistence and runtime faults never
/// appear here — those are recovered where they happen.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// The cron expression does not have exactly six fields.
    #[error("cron expression must have 6 fields (sec min hour dom month dow), got {0}")]
    CronFieldCount(usize),

    /// A cron field could not be parsed.
    #[error("invalid cron field '{0}'")]
    CronField(String),

    /// A cron field value lies outside its allowed range.
    #[error("cron value {value} out of range {min}-{max}")]
    CronRange {
        /// The offending value.
        value: u32,
        /// Smallest allowed value for the field.
        min: u32,
        /// Largest allowed value for the field.
        max: u32,
    },
}

/// Convenience result type for scheduler operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
