//! Error types for message pool loading.

/// Errors that can occur while loading a message pool.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// The message data file is not valid JSON of the expected shape.
    #[error("invalid message data: {0}")]
    Parse(#[from] serde_json::Error),

    /// The message data file could not be read.
    #[error("cannot read message data: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for message pool operations.
pub type MessageResult<T> = Result<T, MessageError>;
