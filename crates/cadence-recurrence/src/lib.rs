//! `cadence-recurrence` — recurrence rules for recurring tasks: form state,
//! validation, list-view summaries and the request payload.
//!
//! # Overview
//!
//! An edit session holds a loose [`RecurrenceSpec`] inside a
//! [`RecurrenceEditor`]. On submit the spec is validated and narrowed into a
//! [`RecurrenceRule`], which carries only the fields its type uses, and wrapped
//! with the owning task's timezone in a [`RecurrencePayload`].
//!
//! # Recurrence types
//!
//! | Type      | Active field      | Rule                          |
//! |-----------|-------------------|-------------------------------|
//! | `daily`   | none              | every N days                  |
//! | `weekly`  | `days_of_week`    | every N weeks on listed days  |
//! | `monthly` | `day_of_month`    | every N months on day D (1-31, not clamped to month length) |
//! | `custom`  | `cron_expression` | opaque, checked by the task API |

pub mod editor;
pub mod error;
pub mod format;
pub mod payload;
pub mod types;
pub mod validate;

pub use editor::RecurrenceEditor;
pub use error::{Result, UnknownRecurrenceType, ValidationError};
pub use format::describe;
pub use payload::RecurrencePayload;
pub use types::{RecurrenceRule, RecurrenceSpec, RecurrenceType};
pub use validate::{resolve_timezone, validate, validate_timezone};
