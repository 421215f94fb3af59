//! Once-per-day tip gating.

use chrono::NaiveDate;
use rand::Rng;

use chirp_messages::{MessagePool, random_tip};
use chirp_store::{Config, StateStore, TipState};

/// Return today's tip if one is due, updating the state file.
///
/// A tip is due when `config.daily_tip` is on and no tip has been shown on
/// `today` yet (local calendar date). An empty tips pool shows nothing and
/// leaves the state untouched.
pub fn daily_tip<R: Rng + ?Sized>(
    config: &Config,
    store: &StateStore,
    pool: &MessagePool,
    today: NaiveDate,
    rng: &mut R,
) -> Option<String> {
    if !config.daily_tip {
        return None;
    }
    if store.load().last_tip_date == Some(today) {
        return None;
    }
    let tip = random_tip(pool, rng)?;
    store.save(&TipState {
        last_tip_date: Some(today),
    });
    Some(tip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::TempDir;

    fn fixtures() -> (TempDir, Config, MessagePool) {
        let dir = TempDir::new().unwrap();
        let config = Config {
            daily_tip: true,
            ..Default::default()
        };
        let pool = MessagePool::from_json(r#"{"tips": ["only tip"]}"#).unwrap();
        (dir, config, pool)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    #[test]
    fn shown_at_most_once_per_day() {
        let (dir, config, pool) = fixtures();
        let store = StateStore::new(dir.path());
        let mut rng = StdRng::seed_from_u64(0);

        assert!(daily_tip(&config, &store, &pool, day(28), &mut rng).is_some());
        assert!(daily_tip(&config, &store, &pool, day(28), &mut rng).is_none());
        // Next day shows again.
        assert!(daily_tip(&config, &store, &pool, day(29), &mut rng).is_some());
    }

    #[test]
    fn disabled_by_config() {
        let (dir, _, pool) = fixtures();
        let store = StateStore::new(dir.path());
        let mut rng = StdRng::seed_from_u64(0);
        let config = Config::default(); // daily_tip off

        assert!(daily_tip(&config, &store, &pool, day(28), &mut rng).is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn empty_tip_pool_leaves_state_untouched() {
        let (dir, config, _) = fixtures();
        let store = StateStore::new(dir.path());
        let empty = MessagePool::from_json("{}").unwrap();
        let mut rng = StdRng::seed_from_u64(0);

        assert!(daily_tip(&config, &store, &empty, day(28), &mut rng).is_none());
        assert!(!store.path().exists());
    }
}
