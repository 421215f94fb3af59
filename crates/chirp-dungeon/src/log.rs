//! Severity-tagged log lines.
//!
//! The engine records what happened; the frontend decides how it looks.

/// How a log line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    /// Neutral narration.
    Info,
    /// Something good for the player (a hit landed, loot found).
    Good,
    /// Something bad for the player (damage taken, failed escape).
    Bad,
    /// Noteworthy events (encounters, skills, level-ups).
    Notice,
    /// Low-importance flavor (bumping into walls).
    Dim,
}

/// One line of game narration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Presentation hint.
    pub kind: LogKind,
    /// The text itself.
    pub text: String,
}

impl LogLine {
    /// A log line of the given kind.
    pub fn new(kind: LogKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}
