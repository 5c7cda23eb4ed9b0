//! Form-state binding for one recurrence edit session.
//!
//! The editor owns its own [`RecurrenceSpec`]. Edits never clear fields that
//! the current type does not use, so switching from `monthly` to `weekly` and
//! back keeps the chosen day. Inactive fields are dropped only in
//! [`RecurrenceEditor::submit`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    error::Result,
    format::describe,
    payload::RecurrencePayload,
    types::{RecurrenceRule, RecurrenceSpec, RecurrenceType},
    validate::{resolve_timezone, validate},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceEditor {
    #[serde(flatten)]
    spec: RecurrenceSpec,
    /// Owning task's timezone; `None` or blank submits `UTC`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timezone: Option<String>,
}

impl RecurrenceEditor {
    /// Start a new form: daily, every 1, stamped with `timezone`.
    pub fn new(timezone: impl Into<String>) -> Self {
        Self {
            spec: RecurrenceSpec::default(),
            timezone: Some(timezone.into()),
        }
    }

    /// Open an existing task's recurrence for editing.
    pub fn from_payload(payload: &RecurrencePayload) -> Self {
        Self {
            spec: payload.rule.to_spec(),
            timezone: Some(payload.timezone.clone()),
        }
    }

    pub fn spec(&self) -> &RecurrenceSpec {
        &self.spec
    }

    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }

    /// Fill the timezone only when the form does not carry one. A blank
    /// value counts as not carrying one.
    pub fn fill_timezone(&mut self, timezone: &str) {
        if self.timezone.as_deref().map_or(true, |tz| tz.trim().is_empty()) {
            self.timezone = Some(timezone.to_string());
        }
    }

    pub fn set_timezone(&mut self, timezone: impl Into<String>) {
        self.timezone = Some(timezone.into());
    }

    /// Switch the repetition unit. Fields for other units are kept.
    pub fn set_recurrence_type(&mut self, recurrence_type: RecurrenceType) {
        debug!(from = %self.spec.recurrence_type, to = %recurrence_type, "recurrence type changed");
        self.spec.recurrence_type = recurrence_type;
    }

    /// Raw text from the interval input. Anything that is not an integer >= 1
    /// becomes 1.
    pub fn set_interval_input(&mut self, input: &str) {
        let parsed = input.trim().parse::<i64>().unwrap_or(1);
        self.set_interval(parsed);
    }

    pub fn set_interval(&mut self, interval: i64) {
        self.spec.interval = interval.max(1);
    }

    /// Add `day` if absent, remove it if present. The list stays sorted.
    pub fn toggle_day(&mut self, day: u8) {
        let day = i64::from(day);
        if let Some(pos) = self.spec.days_of_week.iter().position(|&d| d == day) {
            self.spec.days_of_week.remove(pos);
        } else {
            self.spec.days_of_week.push(day);
            self.spec.days_of_week.sort_unstable();
        }
        debug!(days = ?self.spec.days_of_week, "days of week toggled");
    }

    pub fn set_day_of_month(&mut self, day: Option<i64>) {
        self.spec.day_of_month = day;
    }

    pub fn set_cron_expression(&mut self, expression: impl Into<String>) {
        self.spec.cron_expression = Some(expression.into());
    }

    /// The same checks as [`submit`](Self::submit), without building a payload.
    pub fn validate(&self) -> Result<()> {
        validate(&self.spec)?;
        resolve_timezone(self.timezone.as_deref())?;
        Ok(())
    }

    pub fn describe(&self) -> String {
        describe(&self.spec)
    }

    /// Validate the form and build the request payload with only the fields
    /// active for the chosen type.
    pub fn submit(&self) -> Result<RecurrencePayload> {
        let checked = RecurrenceRule::try_from(&self.spec).and_then(|rule| {
            resolve_timezone(self.timezone.as_deref()).map(|timezone| (rule, timezone))
        });
        let (rule, timezone) = checked.inspect_err(|e| {
            warn!(code = e.code(), recurrence_type = %self.spec.recurrence_type, "recurrence rejected: {e}");
        })?;

        info!(recurrence_type = %rule.recurrence_type(), interval = rule.interval(), %timezone, "recurrence submitted");
        Ok(RecurrencePayload::new(rule, timezone))
    }
}
