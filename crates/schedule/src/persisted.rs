//! Raw persisted record shape as returned by the scheduler API.
//!
//! Fields arrive loosely typed: booleans as 0/1 or strings, numbers as
//! strings, payload objects with legacy keys. Nothing here is trusted;
//! [`crate::normalize::hydrate`] turns a record into a well-formed
//! [`crate::definition::ScheduleDefinition`].

use freight_actions::ExportAction;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored export task, exactly as the persistence collaborator sends it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedTask {
    /// String or numeric identifier.
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub template_id: String,
    /// Boolean-ish: true/1/"1"/"yes"…
    #[serde(default)]
    pub enabled: Value,
    /// `weekly | monthly | cron | interval | none`.
    #[serde(default)]
    pub schedule_type: String,
    #[serde(default)]
    pub schedule_cron: String,
    /// Interval seconds, possibly a numeric string.
    #[serde(default)]
    pub schedule_interval: Value,
    #[serde(default)]
    pub schedule_timezone: String,
    /// `{days, times, ...}` object; may carry legacy keys such as
    /// `times_by_day` which hydration drops.
    #[serde(default)]
    pub schedule_payload: Value,
    /// Boolean-ish.
    #[serde(default)]
    pub incremental: Value,
    /// `"auto"` forces incremental on regardless of the flag above.
    #[serde(default)]
    pub incremental_mode: String,
    /// `post_modified | post_date`.
    #[serde(default)]
    pub incremental_field: String,
    #[serde(default)]
    pub actions: Vec<ExportAction>,
}

impl PersistedTask {
    /// Identifier as a string, when one is present.
    pub fn id_string(&self) -> Option<String> {
        match &self.id {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_sparse_record() {
        let task: PersistedTask = serde_json::from_value(serde_json::json!({
            "id": 42,
            "name": "Weekly media",
            "schedule_type": "weekly",
        }))
        .unwrap();
        assert_eq!(task.id_string().as_deref(), Some("42"));
        assert_eq!(task.name, "Weekly media");
        assert!(task.schedule_payload.is_null());
        assert!(task.actions.is_empty());
    }

    #[test]
    fn id_string_handles_all_shapes() {
        let mut task = PersistedTask::default();
        assert_eq!(task.id_string(), None);

        task.id = serde_json::json!("task-7");
        assert_eq!(task.id_string().as_deref(), Some("task-7"));

        task.id = serde_json::json!("  ");
        assert_eq!(task.id_string(), None);

        task.id = serde_json::json!(7);
        assert_eq!(task.id_string().as_deref(), Some("7"));
    }
}
