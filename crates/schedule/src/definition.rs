//! The canonical schedule definition edited as a draft.

use freight_actions::ActionPipeline;
use serde::{Deserialize, Serialize};

use crate::recurrence::Recurrence;

/// A scheduled export configuration.
///
/// Created in memory as a draft (from defaults or a persisted record),
/// mutated through the normalizer and field setters while editing, and
/// committed via [`crate::request::build_request`] on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDefinition {
    /// Absent ⇒ create, present ⇒ update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display name; required before submission.
    #[serde(default)]
    pub name: String,
    /// Export template reference; required before submission. Foreign key,
    /// not owned.
    #[serde(default)]
    pub template_id: String,
    /// Disabled schedules are retained but never fire.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub recurrence: Recurrence,
    /// IANA timezone. Empty means "apply the host fallback".
    #[serde(default)]
    pub timezone: String,
    /// Export only entities changed since the last run.
    #[serde(default)]
    pub incremental: bool,
    #[serde(default)]
    pub incremental_field: IncrementalField,
    /// Post-export actions, in execution order.
    #[serde(default)]
    pub actions: ActionPipeline,
}

fn default_enabled() -> bool {
    true
}

impl ScheduleDefinition {
    /// A fresh draft: enabled weekly schedule on Monday 09:00.
    pub fn draft(fallback_timezone: &str) -> Self {
        Self {
            id: None,
            name: String::new(),
            template_id: String::new(),
            enabled: true,
            recurrence: Recurrence::default_weekly(),
            timezone: fallback_timezone.to_string(),
            incremental: false,
            incremental_field: IncrementalField::default(),
            actions: ActionPipeline::new(),
        }
    }

    /// Apply the host fallback timezone if none is set.
    pub fn ensure_timezone(&mut self, fallback: &str) {
        if self.timezone.trim().is_empty() {
            self.timezone = fallback.to_string();
        }
    }
}

/// Which timestamp an incremental export filters on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncrementalField {
    CreatedAt,
    #[default]
    ModifiedAt,
}

impl IncrementalField {
    /// The field name used on the wire and in persisted records.
    pub fn wire_value(&self) -> &'static str {
        match self {
            IncrementalField::CreatedAt => "post_date",
            IncrementalField::ModifiedAt => "post_modified",
        }
    }

    /// Parse a persisted field name; unrecognized input falls back to the
    /// modification timestamp.
    pub fn from_wire(value: &str) -> Self {
        match value.trim() {
            "post_date" => IncrementalField::CreatedAt,
            _ => IncrementalField::ModifiedAt,
        }
    }
}
