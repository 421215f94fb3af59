pub mod config;
pub mod dungeon;
pub mod run;
pub mod start;
