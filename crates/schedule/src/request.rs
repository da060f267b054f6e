//! Wire payload builder.
//!
//! Serializes a [`ScheduleDefinition`] into the request the scheduler's
//! create/update endpoint consumes. A small validation gate runs first and
//! reports the first unmet rule; weekly schedules deliberately have no
//! day/time gate (an empty selection is a schedule that never fires).

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::definition::ScheduleDefinition;
use crate::recurrence::Recurrence;

/// A rule the definition failed before serialization. Local only; never
/// sent over the wire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("schedule name is required")]
    MissingName,

    #[error("an export template must be selected")]
    MissingTemplate,

    #[error("cron schedules require an expression")]
    MissingCronExpression,

    #[error("monthly schedules require at least one day")]
    MissingMonthlyDays,

    #[error("monthly schedules require at least one time")]
    MissingMonthlyTimes,

    #[error("failed to encode actions payload: {0}")]
    ActionsEncoding(String),
}

/// The request body for the scheduler's create/update endpoint.
///
/// The action pipeline travels as one JSON-encoded string field, not as
/// individually typed fields. Exactly one of `task_cron_expression` and
/// `task_schedule_payload` is present, keyed by `task_schedule_type`;
/// `none` emits neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WirePayload {
    /// Present only on update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    pub task_name: String,
    pub task_template: String,
    pub task_enabled: u8,
    pub task_schedule_type: String,
    pub task_timezone: String,
    pub task_incremental: u8,
    pub task_incremental_field: String,
    /// JSON-encoded ordered action list.
    pub task_actions_payload: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_cron_expression: Option<String>,
    /// JSON-encoded recurrence payload (weekly/monthly/interval).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_schedule_payload: Option<String>,
}

/// Validate and serialize a definition for submission.
pub fn build_request(def: &ScheduleDefinition) -> Result<WirePayload, ValidationError> {
    if def.name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }
    if def.template_id.trim().is_empty() {
        return Err(ValidationError::MissingTemplate);
    }
    match &def.recurrence {
        Recurrence::Cron { expression } if expression.trim().is_empty() => {
            return Err(ValidationError::MissingCronExpression);
        }
        Recurrence::Monthly { days, times } => {
            if days.is_empty() {
                return Err(ValidationError::MissingMonthlyDays);
            }
            if times.is_empty() {
                return Err(ValidationError::MissingMonthlyTimes);
            }
        }
        _ => {}
    }

    let (task_cron_expression, task_schedule_payload) = match &def.recurrence {
        Recurrence::None => (None, None),
        Recurrence::Cron { expression } => (Some(expression.clone()), None),
        Recurrence::Interval { seconds } => {
            (None, Some(json!({ "interval_seconds": seconds }).to_string()))
        }
        Recurrence::Weekly { days, times, mode } => (
            None,
            Some(json!({ "days": days, "times": times, "mode": mode }).to_string()),
        ),
        Recurrence::Monthly { days, times } => {
            (None, Some(json!({ "days": days, "times": times }).to_string()))
        }
    };

    let task_actions_payload = serde_json::to_string(&def.actions)
        .map_err(|e| ValidationError::ActionsEncoding(e.to_string()))?;

    Ok(WirePayload {
        task_id: def.id.clone(),
        task_name: def.name.clone(),
        task_template: def.template_id.clone(),
        task_enabled: u8::from(def.enabled),
        task_schedule_type: def.recurrence.kind().as_str().to_string(),
        task_timezone: def.timezone.clone(),
        task_incremental: u8::from(def.incremental),
        task_incremental_field: def.incremental_field.wire_value().to_string(),
        task_actions_payload,
        task_cron_expression,
        task_schedule_payload,
    })
}
