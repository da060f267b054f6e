//! Recurrence model.
//!
//! A schedule fires according to exactly one recurrence variant. The tag
//! and payload change atomically: transitions between variants go through
//! [`crate::normalize::switch_recurrence`], never by mutating payload
//! fields under a stale tag.

use serde::{Deserialize, Serialize};

/// Default day-of-week selection when switching into weekly (Monday).
pub const DEFAULT_DAY: u32 = 1;
/// Default fire time when a variant needs one.
pub const DEFAULT_TIME: &str = "09:00";
/// Placeholder interval for the reserved interval variant.
pub const DEFAULT_INTERVAL_SECS: u64 = 3600;

/// When a schedule fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recurrence {
    /// Manual trigger only.
    None,
    /// Fires on selected weekdays at selected times. `days` (0=Sunday..6)
    /// and `times` are independent axes: every selected day fires at every
    /// selected time.
    Weekly {
        days: Vec<u32>,
        times: Vec<String>,
        #[serde(default)]
        mode: WeeklyMode,
    },
    /// Fires on selected days of the month (1..=31) at selected times.
    /// Months without the selected day are the dispatching scheduler's
    /// problem, not modelled here.
    Monthly { days: Vec<u32>, times: Vec<String> },
    /// Standard 5-field cron expression. Syntax is not a blocking check on
    /// this side; the dispatching scheduler is the authority.
    Cron { expression: String },
    /// Fixed interval in seconds. Reserved: present in the wire contract
    /// but not reachable from the editor.
    Interval { seconds: u64 },
}

impl Recurrence {
    pub fn kind(&self) -> RecurrenceKind {
        match self {
            Recurrence::None => RecurrenceKind::None,
            Recurrence::Weekly { .. } => RecurrenceKind::Weekly,
            Recurrence::Monthly { .. } => RecurrenceKind::Monthly,
            Recurrence::Cron { .. } => RecurrenceKind::Cron,
            Recurrence::Interval { .. } => RecurrenceKind::Interval,
        }
    }

    /// The default weekly recurrence a fresh draft starts with.
    pub fn default_weekly() -> Self {
        Recurrence::Weekly {
            days: vec![DEFAULT_DAY],
            times: vec![DEFAULT_TIME.to_string()],
            mode: WeeklyMode::Shared,
        }
    }

    pub fn default_monthly() -> Self {
        Recurrence::Monthly {
            days: vec![DEFAULT_DAY],
            times: vec![DEFAULT_TIME.to_string()],
        }
    }
}

/// Tag-only view of a recurrence, used to request transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurrenceKind {
    None,
    Weekly,
    Monthly,
    Cron,
    Interval,
}

impl RecurrenceKind {
    pub const ALL: [RecurrenceKind; 5] = [
        RecurrenceKind::None,
        RecurrenceKind::Weekly,
        RecurrenceKind::Monthly,
        RecurrenceKind::Cron,
        RecurrenceKind::Interval,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecurrenceKind::None => "none",
            RecurrenceKind::Weekly => "weekly",
            RecurrenceKind::Monthly => "monthly",
            RecurrenceKind::Cron => "cron",
            RecurrenceKind::Interval => "interval",
        }
    }

    /// Parse a persisted `schedule_type` value. Unrecognized input resolves
    /// to `None` (manual only), the off-favoring default.
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "weekly" => RecurrenceKind::Weekly,
            "monthly" => RecurrenceKind::Monthly,
            "cron" => RecurrenceKind::Cron,
            "interval" => RecurrenceKind::Interval,
            _ => RecurrenceKind::None,
        }
    }
}

impl std::fmt::Display for RecurrenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weekly firing mode. `Shared` means every selected day fires at every
/// selected time. Legacy per-day time maps are not representable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeeklyMode {
    #[default]
    Shared,
}
