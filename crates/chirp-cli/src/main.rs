//! CLI frontend for chirp, the periodic message companion.

mod commands;
mod style;

use std::process;

use chirp_store::Theme;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "chirp",
    about = "chirp — whimsical messages on a schedule, plus a tiny dungeon",
    version,
    propagate_version = true
)]
struct Cli {
    /// Emit a single message and exit
    #[arg(long)]
    once: bool,

    /// Use the five-second test schedule instead of the half-hour one
    #[arg(long)]
    test: bool,

    /// Force rainbow styling regardless of the configured theme
    #[arg(long)]
    rainbow: bool,

    /// Reserved for desktop notifications (accepted, currently inert)
    #[arg(long)]
    notify: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the banner and one message immediately
    Start,

    /// Play the dungeon mini-game
    Dungeon,

    /// Update persisted settings
    Config {
        /// Message theme: pastel, rainbow, or plain
        #[arg(long)]
        theme: Option<Theme>,

        /// Whether the startup banner is shown
        #[arg(long, value_name = "BOOL")]
        banner: Option<bool>,

        /// Whether a tip is shown once per day
        #[arg(long, value_name = "BOOL")]
        daily_tip: Option<bool>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Start) => commands::start::run(cli.rainbow),
        Some(Commands::Dungeon) => commands::dungeon::run(),
        Some(Commands::Config {
            theme,
            banner,
            daily_tip,
        }) => commands::config::run(theme, banner, daily_tip),
        None => commands::run::run(cli.test, cli.rainbow, cli.once),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
