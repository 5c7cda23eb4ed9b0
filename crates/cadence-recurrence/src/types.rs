use serde::{Deserialize, Deserializer, Serialize};

use crate::{error::UnknownRecurrenceType, validate::validate};

/// Repetition unit; decides which of the other recurrence fields are active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceType {
    #[default]
    Daily,
    Weekly,
    Monthly,
    /// Opaque cron expression, checked only by the task API.
    Custom,
}

impl std::fmt::Display for RecurrenceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RecurrenceType::Daily => "daily",
            RecurrenceType::Weekly => "weekly",
            RecurrenceType::Monthly => "monthly",
            RecurrenceType::Custom => "custom",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for RecurrenceType {
    type Err = UnknownRecurrenceType;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "daily" => Ok(RecurrenceType::Daily),
            "weekly" => Ok(RecurrenceType::Weekly),
            "monthly" => Ok(RecurrenceType::Monthly),
            "custom" => Ok(RecurrenceType::Custom),
            other => Err(UnknownRecurrenceType(other.to_string())),
        }
    }
}

/// Editable recurrence form state.
///
/// Every field is held at once so switching `recurrence_type` back and forth
/// does not lose what the user typed. Integers are signed so that bad input
/// survives until [`validate`] rejects it. Only [`RecurrenceRule`] is ever
/// sent to the task API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecurrenceSpec {
    pub recurrence_type: RecurrenceType,
    /// "Every N units"; must be >= 1 for every type.
    pub interval: i64,
    /// 0 = Monday … 6 = Sunday. Active for `weekly` only; `null` reads as empty.
    #[serde(deserialize_with = "null_as_empty")]
    pub days_of_week: Vec<i64>,
    /// 1..=31, no calendar clamping. Active for `monthly` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<i64>,
    /// Active for `custom` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron_expression: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<i64>, D::Error> {
    Ok(Option::<Vec<i64>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for RecurrenceSpec {
    fn default() -> Self {
        Self {
            recurrence_type: RecurrenceType::Daily,
            interval: 1,
            days_of_week: Vec::new(),
            day_of_month: None,
            cron_expression: None,
        }
    }
}

/// A validated recurrence rule carrying only the fields its type uses.
///
/// Serialises as a flat object tagged by `recurrence_type`:
///
/// ```json
/// {"recurrence_type":"weekly","interval":1,"days_of_week":[0,2,4]}
/// ```
///
/// Deserialising goes through [`RecurrenceSpec`] and re-runs validation, so
/// stale fields for other types are dropped and bad values are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "recurrence_type", rename_all = "lowercase")]
pub enum RecurrenceRule {
    Daily {
        interval: u64,
    },
    Weekly {
        interval: u64,
        /// Kept in the order it was stored; the editor sorts on every toggle.
        days_of_week: Vec<u8>,
    },
    Monthly {
        interval: u64,
        day_of_month: u8,
    },
    Custom {
        interval: u64,
        cron_expression: String,
    },
}

impl RecurrenceRule {
    pub fn recurrence_type(&self) -> RecurrenceType {
        match self {
            RecurrenceRule::Daily { .. } => RecurrenceType::Daily,
            RecurrenceRule::Weekly { .. } => RecurrenceType::Weekly,
            RecurrenceRule::Monthly { .. } => RecurrenceType::Monthly,
            RecurrenceRule::Custom { .. } => RecurrenceType::Custom,
        }
    }

    pub fn interval(&self) -> u64 {
        match self {
            RecurrenceRule::Daily { interval }
            | RecurrenceRule::Weekly { interval, .. }
            | RecurrenceRule::Monthly { interval, .. }
            | RecurrenceRule::Custom { interval, .. } => *interval,
        }
    }

    /// Expand back into form state, e.g. when an existing task is opened for editing.
    pub fn to_spec(&self) -> RecurrenceSpec {
        let mut spec = RecurrenceSpec {
            recurrence_type: self.recurrence_type(),
            // any u64 is valid in a rule; saturate rather than wrap negative
            interval: i64::try_from(self.interval()).unwrap_or(i64::MAX),
            ..RecurrenceSpec::default()
        };
        match self {
            RecurrenceRule::Daily { .. } => {}
            RecurrenceRule::Weekly { days_of_week, .. } => {
                spec.days_of_week = days_of_week.iter().map(|&d| d as i64).collect();
            }
            RecurrenceRule::Monthly { day_of_month, .. } => {
                spec.day_of_month = Some(*day_of_month as i64);
            }
            RecurrenceRule::Custom {
                cron_expression, ..
            } => {
                spec.cron_expression = Some(cron_expression.clone());
            }
        }
        spec
    }
}

impl TryFrom<&RecurrenceSpec> for RecurrenceRule {
    type Error = crate::error::ValidationError;

    /// Validate `spec` and keep only the fields active for its type.
    fn try_from(spec: &RecurrenceSpec) -> crate::error::Result<Self> {
        validate(spec)?;
        // validate() has range-checked every field read below.
        let interval = spec.interval as u64;
        let rule = match spec.recurrence_type {
            RecurrenceType::Daily => RecurrenceRule::Daily { interval },
            RecurrenceType::Weekly => RecurrenceRule::Weekly {
                interval,
                days_of_week: spec.days_of_week.iter().map(|&d| d as u8).collect(),
            },
            RecurrenceType::Monthly => RecurrenceRule::Monthly {
                interval,
                day_of_month: spec.day_of_month.unwrap_or_default() as u8,
            },
            RecurrenceType::Custom => RecurrenceRule::Custom {
                interval,
                cron_expression: spec.cron_expression.clone().unwrap_or_default(),
            },
        };
        Ok(rule)
    }
}

impl<'de> Deserialize<'de> for RecurrenceRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let spec = RecurrenceSpec::deserialize(deserializer)?;
        RecurrenceRule::try_from(&spec).map_err(serde::de::Error::custom)
    }
}
