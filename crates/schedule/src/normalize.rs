//! Schedule payload normalizer.
//!
//! Two pure operations keep a draft canonical:
//! - [`switch_recurrence`]: a total state machine over the recurrence
//!   variants; carries the day/time axes across compatible variants and
//!   re-applies defaults where a variant needs fields the source lacked
//! - [`hydrate`]: persisted record (loosely typed) → well-formed draft

use serde_json::Value;

use crate::definition::{IncrementalField, ScheduleDefinition};
use crate::persisted::PersistedTask;
use crate::recurrence::{
    Recurrence, RecurrenceKind, WeeklyMode, DEFAULT_DAY, DEFAULT_INTERVAL_SECS, DEFAULT_TIME,
};
use freight_actions::ActionPipeline;

/// Transition a recurrence to `target`, preserving what carries over.
///
/// Total over all (source, target) pairs and idempotent when
/// source == target. Day/time axes survive between weekly and monthly
/// (with monthly clamping); everything else falls back to defaults.
pub fn switch_recurrence(current: &Recurrence, target: RecurrenceKind) -> Recurrence {
    let (days, times) = match current {
        Recurrence::Weekly { days, times, .. } | Recurrence::Monthly { days, times } => {
            (days.clone(), times.clone())
        }
        _ => (Vec::new(), Vec::new()),
    };

    match target {
        RecurrenceKind::None => Recurrence::None,
        RecurrenceKind::Weekly => Recurrence::Weekly {
            days: if days.is_empty() { vec![DEFAULT_DAY] } else { days },
            times: non_empty_or_default_times(times),
            mode: WeeklyMode::Shared,
        },
        RecurrenceKind::Monthly => Recurrence::Monthly {
            days: if days.is_empty() {
                vec![DEFAULT_DAY]
            } else {
                days.into_iter().map(clamp_monthly_day).collect()
            },
            times: non_empty_or_default_times(times),
        },
        RecurrenceKind::Cron => Recurrence::Cron {
            expression: match current {
                Recurrence::Cron { expression } => expression.clone(),
                _ => String::new(),
            },
        },
        RecurrenceKind::Interval => Recurrence::Interval {
            seconds: match current {
                Recurrence::Interval { seconds } => *seconds,
                _ => DEFAULT_INTERVAL_SECS,
            },
        },
    }
}

/// Rebuild an editable draft from a persisted record.
///
/// `None` yields the default draft. Otherwise scalars are copied,
/// boolean-ish fields go through [`parse_flag`], and the day/time arrays
/// are defensively re-materialized (non-arrays become defaults, each day
/// is numerically coerced). Legacy payload keys (`times_by_day`, stored
/// `mode`) are dropped: the typed model cannot carry them.
pub fn hydrate(persisted: Option<&PersistedTask>, fallback_timezone: &str) -> ScheduleDefinition {
    let Some(task) = persisted else {
        return ScheduleDefinition::draft(fallback_timezone);
    };

    let kind = RecurrenceKind::parse(&task.schedule_type);
    if kind == RecurrenceKind::None && !matches!(task.schedule_type.trim(), "" | "none") {
        tracing::warn!(
            schedule_type = %task.schedule_type,
            "unrecognized schedule type, treating as manual-only"
        );
    }

    let recurrence = match kind {
        RecurrenceKind::Weekly => Recurrence::Weekly {
            days: hydrated_days(&task.schedule_payload, DayRange::Weekly),
            times: hydrated_times(&task.schedule_payload),
            mode: WeeklyMode::Shared,
        },
        RecurrenceKind::Monthly => Recurrence::Monthly {
            days: hydrated_days(&task.schedule_payload, DayRange::Monthly),
            times: hydrated_times(&task.schedule_payload),
        },
        RecurrenceKind::Cron => Recurrence::Cron {
            expression: task.schedule_cron.clone(),
        },
        RecurrenceKind::Interval => Recurrence::Interval {
            seconds: coerce_seconds(&task.schedule_interval),
        },
        RecurrenceKind::None => Recurrence::None,
    };

    let timezone = if task.schedule_timezone.trim().is_empty() {
        fallback_timezone.to_string()
    } else {
        task.schedule_timezone.clone()
    };

    // Two independent signals: the stored flag, and the legacy "auto" mode.
    let incremental = parse_flag(&task.incremental) || task.incremental_mode.trim() == "auto";

    ScheduleDefinition {
        id: task.id_string(),
        name: task.name.clone(),
        template_id: task.template_id.clone(),
        enabled: parse_flag(&task.enabled),
        recurrence,
        timezone,
        incremental,
        incremental_field: IncrementalField::from_wire(&task.incremental_field),
        actions: ActionPipeline::from_actions(task.actions.clone()),
    }
}

/// Permissive boolean coercion for persisted flag fields.
///
/// Booleans pass through; numbers are true only when equal to 1; strings
/// `1`/`true`/`yes` (case- and whitespace-insensitive) are true. Anything
/// unrecognized resolves to `false`, favoring "off".
pub fn parse_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes"
        ),
        _ => false,
    }
}

#[derive(Clone, Copy)]
enum DayRange {
    Weekly,
    Monthly,
}

/// Clamp a day-of-month into [1, 31].
fn clamp_monthly_day(day: u32) -> u32 {
    day.clamp(1, 31)
}

fn non_empty_or_default_times(times: Vec<String>) -> Vec<String> {
    if times.is_empty() {
        vec![DEFAULT_TIME.to_string()]
    } else {
        times
    }
}

fn hydrated_days(payload: &Value, range: DayRange) -> Vec<u32> {
    let Some(raw) = payload.get("days").and_then(Value::as_array) else {
        return vec![DEFAULT_DAY];
    };
    raw.iter().map(|v| coerce_day(v, range)).collect()
}

fn hydrated_times(payload: &Value) -> Vec<String> {
    let Some(raw) = payload.get("times").and_then(Value::as_array) else {
        return vec![DEFAULT_TIME.to_string()];
    };
    raw.iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}

/// Numeric coercion for a single persisted day value. Non-numeric input
/// becomes 1; monthly values are clamped into [1, 31].
fn coerce_day(value: &Value, range: DayRange) -> u32 {
    let day = match value {
        Value::Number(n) => n.as_i64().unwrap_or(1),
        Value::String(s) => s.trim().parse::<i64>().unwrap_or(1),
        _ => 1,
    };
    let day = day.clamp(0, u32::MAX as i64) as u32;
    match range {
        DayRange::Weekly => day,
        DayRange::Monthly => clamp_monthly_day(day),
    }
}

fn coerce_seconds(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or(DEFAULT_INTERVAL_SECS),
        Value::String(s) => s.trim().parse().unwrap_or(DEFAULT_INTERVAL_SECS),
        _ => DEFAULT_INTERVAL_SECS,
    }
}
