//! Time-of-day bucketing and weighted random selection.
//!
//! Selection works on any `Datelike + Timelike` value so tests can drive it
//! with fixed naive datetimes; the scheduler feeds it the local clock.

use chrono::{Datelike, Timelike, Weekday};
use rand::Rng;

use crate::pool::{Category, FALLBACK_MESSAGE, MessagePool};

/// Probability that the inspiration (and, independently, the joke) pool
/// overrides the time-category pool.
const OVERRIDE_CHANCE: f64 = 0.2;

/// Map a timestamp to its message category.
///
/// Weekends win over everything; weekday hours split into morning
/// ([5, 12)), night (>= 18 or < 5), and general (the rest).
pub fn time_category<T: Datelike + Timelike>(t: &T) -> Category {
    let day = t.weekday();
    if day == Weekday::Sat || day == Weekday::Sun {
        return Category::Weekend;
    }
    match t.hour() {
        5..12 => Category::Morning,
        h if h >= 18 || h < 5 => Category::Night,
        _ => Category::General,
    }
}

/// Pick one message for the given timestamp.
///
/// In error mode the `errors` pool overrides the time category outright.
/// Otherwise two independent 20% draws may override the pool, first with
/// `inspiration`, then with `jokes` — the second draw is evaluated
/// regardless of the first, so a joke can displace an inspiration. The
/// order is deliberate: net weights are jokes 0.2, inspiration 0.16,
/// time category 0.64.
pub fn select<T, R>(pool: &MessagePool, t: &T, error_mode: bool, rng: &mut R) -> String
where
    T: Datelike + Timelike,
    R: Rng + ?Sized,
{
    let mut candidates = pool.get(time_category(t));
    if candidates.is_empty() {
        candidates = pool.get(Category::General);
    }

    if error_mode {
        let errors = pool.get(Category::Errors);
        if !errors.is_empty() {
            candidates = errors;
        }
    } else {
        if rng.random::<f64>() < OVERRIDE_CHANCE {
            let inspiration = pool.get(Category::Inspiration);
            if !inspiration.is_empty() {
                candidates = inspiration;
            }
        }
        if rng.random::<f64>() < OVERRIDE_CHANCE {
            let jokes = pool.get(Category::Jokes);
            if !jokes.is_empty() {
                candidates = jokes;
            }
        }
    }

    if candidates.is_empty() {
        return FALLBACK_MESSAGE.to_string();
    }
    candidates[rng.random_range(0..candidates.len())].clone()
}

/// Pick one tip from the `tips` pool, if any exist.
pub fn random_tip<R: Rng + ?Sized>(pool: &MessagePool, rng: &mut R) -> Option<String> {
    let tips = pool.get(Category::Tips);
    if tips.is_empty() {
        return None;
    }
    Some(tips[rng.random_range(0..tips.len())].clone())
}
