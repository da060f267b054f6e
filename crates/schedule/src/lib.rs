//! Scheduled export configuration engine.
//!
//! This crate provides:
//! - `Recurrence`: the when-to-fire rule of a schedule (none, weekly,
//!   monthly, cron, interval) as a proper sum type
//! - `switch_recurrence` / `hydrate`: the normalizer keeping a draft
//!   canonical across recurrence changes and re-hydrating persisted records
//! - `build_request`: serialization of a definition into the wire payload
//!   the server-side scheduler consumes, behind a validation gate
//! - `lint`: advisory checks (cron syntax, timezone shape, schedules that
//!   never fire) that warn without blocking submission

pub mod definition;
pub mod lint;
pub mod normalize;
pub mod persisted;
pub mod recurrence;
pub mod request;

pub use definition::{IncrementalField, ScheduleDefinition};
pub use lint::{lint_definition, LintIssue, LintReport};
pub use normalize::{hydrate, parse_flag, switch_recurrence};
pub use persisted::PersistedTask;
pub use recurrence::{Recurrence, RecurrenceKind, WeeklyMode};
pub use request::{build_request, ValidationError, WirePayload};
