use std::collections::HashSet;

use cadence_core::config::DEFAULT_TIMEZONE;

use crate::{
    error::{Result, ValidationError},
    types::{RecurrenceSpec, RecurrenceType},
};

/// Check `spec` for internal consistency given its `recurrence_type`.
///
/// Rules run in a fixed order and the first failure is returned:
///
/// 1. `interval >= 1`, for every type
/// 2. `weekly`: `days_of_week` non-empty, each in `0..=6`, no duplicates
/// 3. `monthly`: `day_of_month` in `1..=31`
/// 4. `custom`: non-empty `cron_expression`
///
/// Fields that are inactive for the type are not looked at.
pub fn validate(spec: &RecurrenceSpec) -> Result<()> {
    if spec.interval < 1 {
        return Err(ValidationError::InvalidInterval {
            interval: spec.interval,
        });
    }

    match spec.recurrence_type {
        RecurrenceType::Daily => Ok(()),
        RecurrenceType::Weekly => validate_days_of_week(&spec.days_of_week),
        RecurrenceType::Monthly => match spec.day_of_month {
            Some(day) if (1..=31).contains(&day) => Ok(()),
            day => Err(ValidationError::InvalidDayOfMonth { day }),
        },
        RecurrenceType::Custom => match spec.cron_expression.as_deref() {
            Some(expr) if !expr.is_empty() => Ok(()),
            _ => Err(ValidationError::MissingCronExpression),
        },
    }
}

fn validate_days_of_week(days: &[i64]) -> Result<()> {
    if days.is_empty() {
        return Err(ValidationError::InvalidDaysOfWeek {
            reason: "at least one day must be selected".to_string(),
        });
    }
    let mut seen = HashSet::with_capacity(days.len());
    for &day in days {
        if !(0..=6).contains(&day) {
            return Err(ValidationError::InvalidDaysOfWeek {
                reason: format!("{day} is not a weekday index (0 = Monday … 6 = Sunday)"),
            });
        }
        if !seen.insert(day) {
            return Err(ValidationError::InvalidDaysOfWeek {
                reason: format!("day {day} is listed more than once"),
            });
        }
    }
    Ok(())
}

/// Check the owning task's timezone name.
///
/// Only rejects names containing whitespace; the task API owns the IANA
/// database. Blank names are handled by [`resolve_timezone`].
pub fn validate_timezone(name: &str) -> Result<()> {
    if name.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidTimezone {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Timezone to send with a payload: unset or blank falls back to `UTC`,
/// anything else must pass [`validate_timezone`].
pub fn resolve_timezone(name: Option<&str>) -> Result<String> {
    match name {
        Some(name) if !name.trim().is_empty() => {
            validate_timezone(name)?;
            Ok(name.to_string())
        }
        _ => Ok(DEFAULT_TIMEZONE.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(recurrence_type: RecurrenceType) -> RecurrenceSpec {
        RecurrenceSpec {
            recurrence_type,
            ..RecurrenceSpec::default()
        }
    }

    // --- interval ---

    #[test]
    fn zero_interval_rejected() {
        let s = RecurrenceSpec {
            interval: 0,
            ..spec(RecurrenceType::Daily)
        };
        assert_eq!(
            validate(&s),
            Err(ValidationError::InvalidInterval { interval: 0 })
        );
    }

    #[test]
    fn negative_interval_rejected_before_type_rules() {
        // weekly with no days would also fail, but interval is checked first
        let s = RecurrenceSpec {
            interval: -3,
            ..spec(RecurrenceType::Weekly)
        };
        assert_eq!(validate(&s).unwrap_err().code(), "INVALID_INTERVAL");
    }

    // --- daily ---

    #[test]
    fn daily_ignores_inactive_fields() {
        for interval in [1, 2, 5] {
            let s = RecurrenceSpec {
                interval,
                days_of_week: vec![9, 9, -1],
                day_of_month: Some(99),
                ..spec(RecurrenceType::Daily)
            };
            assert!(validate(&s).is_ok(), "interval {interval}");
        }
    }

    // --- weekly ---

    #[test]
    fn weekly_with_days_passes() {
        let s = RecurrenceSpec {
            days_of_week: vec![0, 2, 4],
            ..spec(RecurrenceType::Weekly)
        };
        assert!(validate(&s).is_ok());
    }

    #[test]
    fn weekly_empty_days_rejected() {
        let err = validate(&spec(RecurrenceType::Weekly)).unwrap_err();
        assert_eq!(err.code(), "INVALID_DAYS_OF_WEEK");
    }

    #[test]
    fn weekly_out_of_range_day_rejected() {
        for bad in [-1, 7, 42] {
            let s = RecurrenceSpec {
                days_of_week: vec![0, bad],
                ..spec(RecurrenceType::Weekly)
            };
            assert_eq!(validate(&s).unwrap_err().code(), "INVALID_DAYS_OF_WEEK");
        }
    }

    #[test]
    fn weekly_duplicate_day_rejected() {
        let s = RecurrenceSpec {
            days_of_week: vec![3, 1, 3],
            ..spec(RecurrenceType::Weekly)
        };
        let err = validate(&s).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn weekly_unsorted_unique_days_pass() {
        let s = RecurrenceSpec {
            days_of_week: vec![6, 0, 3],
            ..spec(RecurrenceType::Weekly)
        };
        assert!(validate(&s).is_ok());
    }

    // --- monthly ---

    #[test]
    fn monthly_bounds() {
        for (day, ok) in [(0, false), (1, true), (15, true), (31, true), (32, false)] {
            let s = RecurrenceSpec {
                day_of_month: Some(day),
                ..spec(RecurrenceType::Monthly)
            };
            assert_eq!(validate(&s).is_ok(), ok, "day {day}");
        }
    }

    #[test]
    fn monthly_missing_day_rejected() {
        assert_eq!(
            validate(&spec(RecurrenceType::Monthly)),
            Err(ValidationError::InvalidDayOfMonth { day: None })
        );
    }

    // --- custom ---

    #[test]
    fn custom_requires_expression() {
        assert_eq!(
            validate(&spec(RecurrenceType::Custom)),
            Err(ValidationError::MissingCronExpression)
        );
        let empty = RecurrenceSpec {
            cron_expression: Some(String::new()),
            ..spec(RecurrenceType::Custom)
        };
        assert_eq!(validate(&empty), Err(ValidationError::MissingCronExpression));
    }

    #[test]
    fn custom_expression_is_not_parsed() {
        let s = RecurrenceSpec {
            cron_expression: Some("not really cron".to_string()),
            ..spec(RecurrenceType::Custom)
        };
        assert!(validate(&s).is_ok());
    }

    #[test]
    fn validate_is_repeatable() {
        let s = RecurrenceSpec {
            days_of_week: vec![1, 1],
            ..spec(RecurrenceType::Weekly)
        };
        assert_eq!(validate(&s), validate(&s));
    }

    // --- timezone ---

    #[test]
    fn timezone_shape() {
        assert!(validate_timezone("UTC").is_ok());
        assert!(validate_timezone("America/New_York").is_ok());
        assert_eq!(
            validate_timezone("Europe/ Berlin").unwrap_err().code(),
            "INVALID_TIMEZONE"
        );
    }

    #[test]
    fn blank_timezone_resolves_to_utc() {
        for blank in [None, Some(""), Some("   ")] {
            assert_eq!(resolve_timezone(blank).unwrap(), "UTC", "{blank:?}");
        }
        assert_eq!(resolve_timezone(Some("Asia/Tokyo")).unwrap(), "Asia/Tokyo");
        assert!(resolve_timezone(Some(" Asia/Tokyo")).is_err());
    }
}
