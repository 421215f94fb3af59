//! Turn-based dungeon mini-game engine.
//!
//! Everything here is a pure state machine: the frontend reads key events,
//! maps them to [`Command`]s, and feeds them to [`GameState::handle`]. No
//! terminal I/O happens in this crate, which is what makes the game logic
//! testable with synthetic command sequences.

/// Turn-based combat resolution.
pub mod combat;
/// Severity-tagged log lines for the frontend to colorize.
pub mod log;
/// Grid map generation and tile queries.
pub mod map;
/// Monster type table and spawning.
pub mod monster;
/// Player classes, stats, and leveling.
pub mod player;
/// The game session state machine tying the rest together.
pub mod session;

/// Re-export combat types.
pub use combat::{Combat, PlayerAction, Resolution};
/// Re-export log types.
pub use log::{LogKind, LogLine};
/// Re-export map types.
pub use map::{DungeonMap, HEIGHT, Pos, Tile, WIDTH};
/// Re-export monster types.
pub use monster::Monster;
/// Re-export player types.
pub use player::{ClassKind, Player};
/// Re-export session types.
pub use session::{Command, Direction, GameState, Outcome};
