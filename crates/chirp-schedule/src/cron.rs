//! 6-field cron expressions.
//!
//! Fields are `sec min hour dom month dow`, in that order. Each field is
//! `*`, `*/step`, or a comma list of values and `a-b` ranges. This covers
//! the expressions the tool actually uses (`0 */30 * * * *` and the
//! 5-second test interval) plus the obvious neighbors; it is not a full
//! cron dialect.

use chrono::{Datelike, Timelike};

use crate::error::{ScheduleError, ScheduleResult};

/// One parsed cron field.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CronField {
    /// `*` — matches every value.
    Any,
    /// `*/n` — matches every `n`th value counted from the field minimum.
    Step(u32),
    /// Explicit values (lists and ranges expand to this).
    List(Vec<u32>),
}

impl CronField {
    fn matches(&self, value: u32, min: u32) -> bool {
        match self {
            CronField::Any => true,
            CronField::Step(n) => (value - min) % n == 0,
            CronField::List(values) => values.contains(&value),
        }
    }
}

/// Inclusive bounds for the six fields: sec, min, hour, dom, month, dow.
const FIELD_BOUNDS: [(u32, u32); 6] = [(0, 59), (0, 59), (0, 23), (1, 31), (1, 12), (0, 6)];

/// A parsed 6-field cron expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronExpr {
    fields: [CronField; 6],
}

impl CronExpr {
    /// Parse an expression. Failure is a fatal configuration error.
    pub fn parse(expr: &str) -> ScheduleResult<Self> {
        let parts: Vec<&str> = expr.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(ScheduleError::CronFieldCount(parts.len()));
        }
        let mut fields = Vec::with_capacity(6);
        for (part, (min, max)) in parts.iter().zip(FIELD_BOUNDS) {
            fields.push(parse_field(part, min, max)?);
        }
        // Length is checked above, so the conversion cannot fail.
        let fields: [CronField; 6] = fields
            .try_into()
            .map_err(|_| ScheduleError::CronFieldCount(parts.len()))?;
        Ok(Self { fields })
    }

    /// True if the expression fires at the given timestamp.
    ///
    /// Day-of-week is numbered from Sunday = 0, matching the original
    /// tool's scheduler.
    pub fn matches<T: Datelike + Timelike>(&self, t: &T) -> bool {
        let values = [
            t.second(),
            t.minute(),
            t.hour(),
            t.day(),
            t.month(),
            t.weekday().num_days_from_sunday(),
        ];
        self.fields
            .iter()
            .zip(values)
            .zip(FIELD_BOUNDS)
            .all(|((field, value), (min, _))| field.matches(value, min))
    }
}

fn parse_field(part: &str, min: u32, max: u32) -> ScheduleResult<CronField> {
    if part == "*" {
        return Ok(CronField::Any);
    }
    if let Some(step) = part.strip_prefix("*/") {
        let step: u32 = step
            .parse()
            .map_err(|_| ScheduleError::CronField(part.to_string()))?;
        if step == 0 {
            return Err(ScheduleError::CronField(part.to_string()));
        }
        return Ok(CronField::Step(step));
    }

    let mut values = Vec::new();
    for item in part.split(',') {
        if let Some((lo, hi)) = item.split_once('-') {
            let lo = parse_value(lo, item, min, max)?;
            let hi = parse_value(hi, item, min, max)?;
            if lo > hi {
                return Err(ScheduleError::CronField(item.to_string()));
            }
            values.extend(lo..=hi);
        } else {
            values.push(parse_value(item, item, min, max)?);
        }
    }
    Ok(CronField::List(values))
}

fn parse_value(s: &str, context: &str, min: u32, max: u32) -> ScheduleResult<u32> {
    let value: u32 = s
        .parse()
        .map_err(|_| ScheduleError::CronField(context.to_string()))?;
    if value < min || value > max {
        return Err(ScheduleError::CronRange { value, min, max });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        // 2026-03-02 is a Monday.
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn every_five_seconds() {
        let cron = CronExpr::parse("*/5 * * * * *").unwrap();
        assert!(cron.matches(&at(10, 0, 0)));
        assert!(cron.matches(&at(10, 0, 5)));
        assert!(cron.matches(&at(10, 0, 55)));
        assert!(!cron.matches(&at(10, 0, 3)));
    }

    #[test]
    fn every_thirty_minutes_on_the_second() {
        let cron = CronExpr::parse("0 */30 * * * *").unwrap();
        assert!(cron.matches(&at(10, 0, 0)));
        assert!(cron.matches(&at(10, 30, 0)));
        assert!(!cron.matches(&at(10, 30, 1)));
        assert!(!cron.matches(&at(10, 15, 0)));
    }

    #[test]
    fn lists_and_ranges() {
        let cron = CronExpr::parse("0 0 9-17 * * 1,3,5").unwrap();
        assert!(cron.matches(&at(9, 0, 0))); // Monday = dow 1
        assert!(cron.matches(&at(17, 0, 0)));
        assert!(!cron.matches(&at(18, 0, 0)));

        let sunday = NaiveDate::from_ymd_opt(2026, 3, 8)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert!(!cron.matches(&sunday));
    }

    #[test]
    fn steps_count_from_the_field_minimum() {
        // Day-of-month starts at 1, so */2 fires on odd days.
        let cron = CronExpr::parse("0 0 0 */2 * *").unwrap();
        let midnight = |day: u32| {
            NaiveDate::from_ymd_opt(2026, 3, day)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        };
        assert!(cron.matches(&midnight(1)));
        assert!(!cron.matches(&midnight(2)));
        assert!(cron.matches(&midnight(3)));

        // Zero-based fields keep their zero phase.
        let cron = CronExpr::parse("*/5 * * * * *").unwrap();
        assert!(cron.matches(&at(10, 0, 0)));
        assert!(cron.matches(&at(10, 0, 5)));
    }

    #[test]
    fn field_count_is_enforced() {
        assert!(matches!(
            CronExpr::parse("* * * * *"),
            Err(ScheduleError::CronFieldCount(5))
        ));
        assert!(matches!(
            CronExpr::parse(""),
            Err(ScheduleError::CronFieldCount(0))
        ));
    }

    #[test]
    fn garbage_fields_are_rejected() {
        assert!(CronExpr::parse("x * * * * *").is_err());
        assert!(CronExpr::parse("*/0 * * * * *").is_err());
        assert!(CronExpr::parse("5-3 * * * * *").is_err());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(matches!(
            CronExpr::parse("60 * * * * *"),
            Err(ScheduleError::CronRange { value: 60, .. })
        ));
        assert!(CronExpr::parse("* * 24 * * *").is_err());
        assert!(CronExpr::parse("* * * 0 * *").is_err());
        assert!(CronExpr::parse("* * * * 13 *").is_err());
        assert!(CronExpr::parse("* * * * * 7").is_err());
    }
}
