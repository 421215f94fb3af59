//! The periodic message scheduler.
//!
//! `start` runs the whole startup sequence (config, banner, daily tip) and
//! then either emits a single message (`once`) or polls the clock forever,
//! firing on every second the cron expression matches. There is no stop
//! API: cancellation is process exit, matching the original tool.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use chrono::NaiveDateTime;
use chrono::Timelike;
use rand::Rng;

use chirp_messages::{MessagePool, select};
use chirp_store::{Config, ConfigStore, StateStore, Theme};

use crate::clock::Clock;
use crate::cron::CronExpr;
use crate::error::ScheduleResult;
use crate::faults::{FaultHub, panic_cause};
use crate::tips::daily_tip;

/// The default schedule: on the hour and half hour.
pub const DEFAULT_CRON: &str = "0 */30 * * * *";

/// The `--test` schedule: every five seconds.
pub const TEST_CRON: &str = "*/5 * * * * *";

/// How often the periodic loop samples the clock.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Options assembled by the CLI from its flags.
#[derive(Debug, Clone)]
pub struct ScheduleOptions {
    /// 6-field cron expression driving the periodic schedule.
    pub cron: String,
    /// Force rainbow rendering regardless of the configured theme.
    pub force_rainbow: bool,
    /// Emit a single message and return instead of looping.
    pub once: bool,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            cron: DEFAULT_CRON.to_string(),
            force_rainbow: false,
            once: false,
        }
    }
}

/// Where scheduler output goes. The CLI renders to the terminal; tests
/// record.
pub trait Presenter {
    /// Show the startup banner in the given theme.
    fn banner(&mut self, theme: Theme);

    /// Show the daily tip.
    fn tip(&mut self, text: &str);

    /// Show one scheduled message.
    fn message(&mut self, text: &str, theme: Theme, force_rainbow: bool);
}

/// Drives periodic or one-shot message emission.
pub struct Scheduler<R: Rng> {
    pool: MessagePool,
    config_store: ConfigStore,
    state_store: StateStore,
    hub: FaultHub,
    rng: R,
    last_fired: Option<NaiveDateTime>,
}

impl<R: Rng> Scheduler<R> {
    /// A scheduler over the given pool, stores, fault hub, and rng.
    pub fn new(
        pool: MessagePool,
        config_store: ConfigStore,
        state_store: StateStore,
        hub: FaultHub,
        rng: R,
    ) -> Self {
        Self {
            pool,
            config_store,
            state_store,
            hub,
            rng,
            last_fired: None,
        }
    }

    /// The fault hub this scheduler reports to.
    pub fn hub(&self) -> &FaultHub {
        &self.hub
    }

    /// Run the startup sequence, then emit once or loop forever.
    ///
    /// The cron expression is validated before any output — a bad
    /// expression fails fast. Everything after that degrades instead of
    /// failing.
    pub fn start<C, P>(
        &mut self,
        options: &ScheduleOptions,
        clock: &mut C,
        presenter: &mut P,
    ) -> ScheduleResult<()>
    where
        C: Clock,
        P: Presenter,
    {
        let cron = CronExpr::parse(&options.cron)?;
        let config = self.config_store.load();

        // The startup sequence gets the same fault interception as the
        // periodic loop: a panic in the banner, the tip, or a one-shot
        // emission is reported, not propagated.
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            if config.show_banner {
                presenter.banner(config.theme);
            }

            let today = clock.now().date();
            if let Some(tip) = daily_tip(
                &config,
                &self.state_store,
                &self.pool,
                today,
                &mut self.rng,
            ) {
                presenter.tip(&tip);
            }

            if options.once {
                self.emit(&config, options, clock, presenter);
            }
        }));
        if let Err(payload) = outcome {
            self.hub.report(&panic_cause(payload));
        }

        if options.once {
            return Ok(());
        }

        loop {
            self.tick(&cron, &config, options, clock, presenter);
        }
    }

    /// One iteration of the periodic loop: emit if the current second
    /// matches and has not fired yet, then sleep one poll interval.
    /// Returns whether a message was emitted.
    ///
    /// Public so tests can drive the loop a bounded number of times with a
    /// simulated clock.
    pub fn tick<C, P>(
        &mut self,
        cron: &CronExpr,
        config: &Config,
        options: &ScheduleOptions,
        clock: &mut C,
        presenter: &mut P,
    ) -> bool
    where
        C: Clock,
        P: Presenter,
    {
        let now = clock.now();
        let second = now.with_nanosecond(0).unwrap_or(now);
        let due = cron.matches(&now) && self.last_fired != Some(second);

        if due {
            self.last_fired = Some(second);
            // A fault inside an emission must not kill the schedule: it is
            // caught here and handed to the fault observers.
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                self.emit(config, options, clock, presenter);
            }));
            if let Err(payload) = outcome {
                self.hub.report(&panic_cause(payload));
            }
        }

        clock.sleep(POLL_INTERVAL);
        due
    }

    fn emit<C, P>(
        &mut self,
        config: &Config,
        options: &ScheduleOptions,
        clock: &mut C,
        presenter: &mut P,
    ) where
        C: Clock,
        P: Presenter,
    {
        let now = clock.now();
        let text = select(&self.pool, &now, false, &mut self.rng);
        presenter.message(&text, config.theme, options.force_rainbow);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TestClock;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::TempDir;

    #[derive(Default)]
    struct Recorder {
        banners: Vec<Theme>,
        tips: Vec<String>,
        messages: Vec<(String, Theme, bool)>,
    }

    impl Presenter for Recorder {
        fn banner(&mut self, theme: Theme) {
            self.banners.push(theme);
        }
        fn tip(&mut self, text: &str) {
            self.tips.push(text.to_string());
        }
        fn message(&mut self, text: &str, theme: Theme, force_rainbow: bool) {
            self.messages.push((text.to_string(), theme, force_rainbow));
        }
    }

    fn scheduler(dir: &TempDir) -> Scheduler<StdRng> {
        Scheduler::new(
            MessagePool::bundled(),
            ConfigStore::new(dir.path()),
            StateStore::new(dir.path()),
            FaultHub::new(),
            StdRng::seed_from_u64(42),
        )
    }

    fn clock_at(hour: u32, minute: u32, second: u32) -> TestClock {
        TestClock::new(
            NaiveDate::from_ymd_opt(2026, 3, 2)
                .unwrap()
                .and_hms_opt(hour, minute, second)
                .unwrap(),
        )
    }

    #[test]
    fn once_emits_exactly_one_message() {
        let dir = TempDir::new().unwrap();
        let mut sched = scheduler(&dir);
        let options = ScheduleOptions {
            once: true,
            ..Default::default()
        };
        let mut clock = clock_at(10, 0, 0);
        let mut out = Recorder::default();

        sched.start(&options, &mut clock, &mut out).unwrap();
        assert_eq!(out.messages.len(), 1);
        // Default config shows the banner with the default theme.
        assert_eq!(out.banners, [Theme::Pastel]);
    }

    #[test]
    fn bad_cron_fails_before_any_output() {
        let dir = TempDir::new().unwrap();
        let mut sched = scheduler(&dir);
        let options = ScheduleOptions {
            cron: "not a cron".to_string(),
            ..Default::default()
        };
        let mut clock = clock_at(10, 0, 0);
        let mut out = Recorder::default();

        assert!(sched.start(&options, &mut clock, &mut out).is_err());
        assert!(out.banners.is_empty());
        assert!(out.messages.is_empty());
    }

    #[test]
    fn periodic_ticks_fire_on_matching_seconds_only_once() {
        let dir = TempDir::new().unwrap();
        let mut sched = scheduler(&dir);
        let options = ScheduleOptions::default();
        let config = Config::default();
        let cron = CronExpr::parse(TEST_CRON).unwrap();
        let mut clock = clock_at(10, 0, 0);
        let mut out = Recorder::default();

        // 44 polls at 250ms cover seconds [0, 11): matches at 0, 5, 10.
        let mut fired = 0;
        for _ in 0..44 {
            if sched.tick(&cron, &config, &options, &mut clock, &mut out) {
                fired += 1;
            }
        }
        assert_eq!(fired, 3);
        assert_eq!(out.messages.len(), 3);
    }

    #[test]
    fn non_matching_seconds_never_fire() {
        let dir = TempDir::new().unwrap();
        let mut sched = scheduler(&dir);
        let options = ScheduleOptions::default();
        let config = Config::default();
        let cron = CronExpr::parse(DEFAULT_CRON).unwrap();
        let mut clock = clock_at(10, 7, 1);
        let mut out = Recorder::default();

        for _ in 0..40 {
            assert!(!sched.tick(&cron, &config, &options, &mut clock, &mut out));
        }
        assert!(out.messages.is_empty());
    }

    #[test]
    fn forced_rainbow_is_passed_through() {
        let dir = TempDir::new().unwrap();
        let mut sched = scheduler(&dir);
        let options = ScheduleOptions {
            once: true,
            force_rainbow: true,
            ..Default::default()
        };
        let mut clock = clock_at(10, 0, 0);
        let mut out = Recorder::default();

        sched.start(&options, &mut clock, &mut out).unwrap();
        assert!(out.messages[0].2);
    }

    #[test]
    fn daily_tip_shown_once_across_runs() {
        let dir = TempDir::new().unwrap();
        let config_store = ConfigStore::new(dir.path());
        config_store.save(
            &chirp_store::ConfigPatch {
                daily_tip: Some(true),
                ..Default::default()
            },
            true,
        );

        let options = ScheduleOptions {
            once: true,
            ..Default::default()
        };

        let mut first = scheduler(&dir);
        let mut out = Recorder::default();
        first
            .start(&options, &mut clock_at(9, 0, 0), &mut out)
            .unwrap();
        assert_eq!(out.tips.len(), 1);

        let mut second = scheduler(&dir);
        let mut out2 = Recorder::default();
        second
            .start(&options, &mut clock_at(11, 0, 0), &mut out2)
            .unwrap();
        assert!(out2.tips.is_empty());
    }

    #[test]
    fn a_panicking_emission_reaches_the_fault_hub() {
        struct Exploding;
        impl Presenter for Exploding {
            fn banner(&mut self, _: Theme) {}
            fn tip(&mut self, _: &str) {}
            fn message(&mut self, _: &str, _: Theme, _: bool) {
                panic!("render exploded");
            }
        }

        let dir = TempDir::new().unwrap();
        let mut sched = scheduler(&dir);
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let seen_obs = std::rc::Rc::clone(&seen);
        let _guard = sched
            .hub()
            .register(move |cause| seen_obs.borrow_mut().push(cause.to_string()));

        let options = ScheduleOptions::default();
        let config = Config::default();
        let cron = CronExpr::parse(TEST_CRON).unwrap();
        let mut clock = clock_at(10, 0, 0);

        sched.tick(&cron, &config, &options, &mut clock, &mut Exploding);
        assert_eq!(seen.borrow().as_slice(), ["render exploded"]);
    }

    #[test]
    fn a_panicking_one_shot_emission_is_reported_not_fatal() {
        struct Exploding;
        impl Presenter for Exploding {
            fn banner(&mut self, _: Theme) {}
            fn tip(&mut self, _: &str) {}
            fn message(&mut self, _: &str, _: Theme, _: bool) {
                panic!("one-shot render exploded");
            }
        }

        let dir = TempDir::new().unwrap();
        let mut sched = scheduler(&dir);
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let seen_obs = std::rc::Rc::clone(&seen);
        let _guard = sched
            .hub()
            .register(move |cause| seen_obs.borrow_mut().push(cause.to_string()));

        let options = ScheduleOptions {
            once: true,
            ..Default::default()
        };
        let mut clock = clock_at(10, 0, 0);

        // The run still ends cleanly; the observer sees the cause.
        sched.start(&options, &mut clock, &mut Exploding).unwrap();
        assert_eq!(seen.borrow().as_slice(), ["one-shot render exploded"]);
    }
}
