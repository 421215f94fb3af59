//! Error types for the persistence stores.

/// Errors that can occur while reading or writing a store file.
///
/// These never escape the store API: loads degrade to defaults and saves
/// report and swallow. The enum exists so the degraded paths can still
/// say what actually went wrong.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The file could not be read or written.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The file content is not valid JSON for the expected record.
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
}

/// Convenience result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
