use cadence_core::config::DEFAULT_TIMEZONE;
use serde::{Deserialize, Deserializer, Serialize};

use crate::{types::RecurrenceRule, validate::resolve_timezone};

/// Recurrence block embedded in task-create and recurring-task-update
/// requests.
///
/// ```json
/// {"recurrence_type":"monthly","interval":2,"day_of_month":15,"timezone":"UTC"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrencePayload {
    #[serde(flatten)]
    pub rule: RecurrenceRule,
    /// IANA name; belongs to the owning task, not the rule. Missing, `null`
    /// or blank reads as `UTC`.
    #[serde(default = "default_timezone", deserialize_with = "timezone_or_default")]
    pub timezone: String,
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

fn timezone_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let name = Option::<String>::deserialize(deserializer)?;
    resolve_timezone(name.as_deref()).map_err(serde::de::Error::custom)
}

impl RecurrencePayload {
    /// A blank `timezone` is stored as `UTC`.
    pub fn new(rule: RecurrenceRule, timezone: impl Into<String>) -> Self {
        let timezone = timezone.into();
        Self {
            rule,
            timezone: if timezone.trim().is_empty() {
                default_timezone()
            } else {
                timezone
            },
        }
    }

    pub fn to_json(&self) -> cadence_core::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> cadence_core::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a payload, re-validating the rule and dropping fields that are
    /// inactive for its type.
    pub fn from_json(json: &str) -> cadence_core::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
