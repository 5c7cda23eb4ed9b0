use cadence_core::CadenceError;
use thiserror::Error;

/// Reasons a recurrence form is rejected at submission time.
///
/// All variants are user-correctable; the validator reports only the first
/// rule that fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("interval must be at least 1 (got {interval})")]
    InvalidInterval { interval: i64 },

    #[error("invalid days of week: {reason}")]
    InvalidDaysOfWeek { reason: String },

    /// `None` when a monthly rule has no day set at all.
    #[error("day of month must be between 1 and 31 (got {})", display_day(.day))]
    InvalidDayOfMonth { day: Option<i64> },

    #[error("custom recurrence requires a cron expression")]
    MissingCronExpression,

    #[error("invalid timezone name: {name:?}")]
    InvalidTimezone { name: String },
}

fn display_day(day: &Option<i64>) -> String {
    match day {
        Some(d) => d.to_string(),
        None => "nothing".to_string(),
    }
}

impl ValidationError {
    /// Stable code shown alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidInterval { .. } => "INVALID_INTERVAL",
            ValidationError::InvalidDaysOfWeek { .. } => "INVALID_DAYS_OF_WEEK",
            ValidationError::InvalidDayOfMonth { .. } => "INVALID_DAY_OF_MONTH",
            ValidationError::MissingCronExpression => "MISSING_CRON_EXPRESSION",
            ValidationError::InvalidTimezone { .. } => "INVALID_TIMEZONE",
        }
    }
}

impl From<ValidationError> for CadenceError {
    fn from(e: ValidationError) -> Self {
        CadenceError::Validation {
            code: e.code(),
            message: e.to_string(),
        }
    }
}

/// A recurrence type name other than `daily`, `weekly`, `monthly` or `custom`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown recurrence type: {0}")]
pub struct UnknownRecurrenceType(pub String);

pub type Result<T> = std::result::Result<T, ValidationError>;
