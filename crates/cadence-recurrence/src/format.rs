//! Human-readable schedule summaries for list views.
//!
//! | Rule                                 | Text                        |
//! |--------------------------------------|-----------------------------|
//! | daily, interval 1                    | `day`                       |
//! | daily, interval 3                    | `every 3 days`              |
//! | weekly, interval 1, days `[0,2,4]`   | `week on Mon, Wed, Fri`     |
//! | monthly, interval 2, day 15          | `every 2 months on day 15`  |
//! | custom                               | the cron expression, or `custom` |

use chrono::Weekday;

use crate::types::{RecurrenceRule, RecurrenceSpec, RecurrenceType};

/// Index 0 = Monday, matching `Weekday::num_days_from_monday`.
const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Map a stored day index to its weekday, `None` outside `0..=6`.
pub fn weekday(index: i64) -> Option<Weekday> {
    usize::try_from(index)
        .ok()
        .and_then(|i| WEEKDAYS.get(i))
        .copied()
}

/// Describe `spec` without requiring it to be valid.
///
/// Out-of-range weekdays are skipped and a monthly spec with no day drops the
/// "on day" suffix. Days are printed in stored order.
pub fn describe(spec: &RecurrenceSpec) -> String {
    let interval = u64::try_from(spec.interval).unwrap_or(1);
    match spec.recurrence_type {
        RecurrenceType::Daily => every(interval, "day"),
        RecurrenceType::Weekly => weekly(interval, spec.days_of_week.iter().copied()),
        RecurrenceType::Monthly => match spec.day_of_month {
            Some(day) => format!("{} on day {day}", every(interval, "month")),
            None => every(interval, "month"),
        },
        RecurrenceType::Custom => custom(spec.cron_expression.as_deref().unwrap_or_default()),
    }
}

impl std::fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            RecurrenceRule::Daily { interval } => every(*interval, "day"),
            RecurrenceRule::Weekly {
                interval,
                days_of_week,
            } => weekly(*interval, days_of_week.iter().map(|&d| d as i64)),
            RecurrenceRule::Monthly {
                interval,
                day_of_month,
            } => format!("{} on day {day_of_month}", every(*interval, "month")),
            RecurrenceRule::Custom {
                cron_expression, ..
            } => custom(cron_expression),
        };
        f.write_str(&text)
    }
}

/// `"day"` for 1, `"every 3 days"` for 3.
fn every(interval: u64, unit: &str) -> String {
    if interval > 1 {
        format!("every {interval} {unit}s")
    } else {
        unit.to_string()
    }
}

fn weekly(interval: u64, days: impl Iterator<Item = i64>) -> String {
    let names: Vec<String> = days.filter_map(weekday).map(|d| d.to_string()).collect();
    let base = every(interval, "week");
    if names.is_empty() {
        base
    } else {
        format!("{base} on {}", names.join(", "))
    }
}

fn custom(expression: &str) -> String {
    if expression.is_empty() {
        "custom".to_string()
    } else {
        expression.to_string()
    }
}
