//! The root command: run the message scheduler.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

use chrono::Local;
use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;

use chirp_messages::{MessagePool, select};
use chirp_schedule::{
    DEFAULT_CRON, FaultHub, Presenter, ScheduleOptions, Scheduler, SystemClock, TEST_CRON,
    panic_cause,
};
use chirp_store::{ConfigStore, StateStore, Theme, default_dir};

use crate::style;

/// An optional user-supplied pool in the chirp directory overrides the
/// bundled one.
const POOL_FILE: &str = "messages.json";

/// Run the scheduler with flags from the command line.
pub fn run(test: bool, rainbow: bool, once: bool) -> Result<(), String> {
    let cron = if test { TEST_CRON } else { DEFAULT_CRON };
    launch(ScheduleOptions {
        cron: cron.to_string(),
        force_rainbow: rainbow,
        once,
    })
}

/// Wire up the stores, fault observer, and terminal presenter, then start.
///
/// The scheduler call itself sits inside `catch_unwind`: a panic that
/// escapes it is routed through the fault hub and ends the run cleanly
/// instead of crashing.
pub fn launch(options: ScheduleOptions) -> Result<(), String> {
    let dir = default_dir();
    let hub = FaultHub::new();
    let _guard = hub.register(report_fault);

    let mut scheduler = Scheduler::new(
        load_pool(&dir),
        ConfigStore::new(&dir),
        StateStore::new(&dir),
        hub.clone(),
        StdRng::from_os_rng(),
    );

    let mut clock = SystemClock;
    let mut presenter = TerminalPresenter {
        rng: StdRng::from_os_rng(),
    };
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        scheduler.start(&options, &mut clock, &mut presenter)
    }));
    match outcome {
        Ok(result) => result.map_err(|e| e.to_string()),
        Err(payload) => {
            hub.report(&panic_cause(payload));
            Ok(())
        }
    }
}

/// The message pool for this run: `messages.json` in the chirp directory
/// if present and readable, otherwise the bundled data.
fn load_pool(dir: &Path) -> MessagePool {
    let path = dir.join(POOL_FILE);
    if !path.exists() {
        return MessagePool::bundled();
    }
    match MessagePool::from_file(&path) {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!(
                "{} ignoring {}: {err}",
                "warning:".yellow().bold(),
                path.display()
            );
            MessagePool::bundled()
        }
    }
}

/// Print the fault cause plus an error-mode message, never re-raise.
fn report_fault(cause: &str) {
    eprintln!("{} {cause}", "fault:".red().bold());
    let pool = MessagePool::bundled();
    let now = Local::now().naive_local();
    let mut rng = rand::rng();
    eprintln!("{}", select(&pool, &now, true, &mut rng).red());
}

/// Renders scheduler output to the terminal.
struct TerminalPresenter {
    rng: StdRng,
}

impl Presenter for TerminalPresenter {
    fn banner(&mut self, theme: Theme) {
        println!("{}", style::banner(theme, &mut self.rng));
        println!();
    }

    fn tip(&mut self, text: &str) {
        println!("{} {text}", "Tip:".cyan().bold());
    }

    fn message(&mut self, text: &str, theme: Theme, force_rainbow: bool) {
        let line = format!("[chirp] {text}");
        println!("{}", style::styled(&line, theme, force_rainbow, &mut self.rng));
    }
}
