//! Show the banner and one message immediately, then exit.

use chirp_schedule::{DEFAULT_CRON, ScheduleOptions};

pub fn run(rainbow: bool) -> Result<(), String> {
    super::run::launch(ScheduleOptions {
        cron: DEFAULT_CRON.to_string(),
        force_rainbow: rainbow,
        once: true,
    })
}
