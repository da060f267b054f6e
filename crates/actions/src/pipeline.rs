//! Ordered post-export action list.
//!
//! Actions run after an export completes, in insertion order. The pipeline
//! itself is draft state: all operations here are synchronous edits with no
//! side effects. Delivery is the server-side scheduler's job.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::registry::ActionRegistry;

/// A single post-export action: a kind key into the registry plus the
/// user-entered field configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportAction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub config: IndexMap<String, Value>,
}

impl ExportAction {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            config: IndexMap::new(),
        }
    }
}

/// The ordered action list of a schedule definition. Insertion order is
/// execution order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionPipeline(Vec<ExportAction>);

impl ActionPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_actions(actions: Vec<ExportAction>) -> Self {
        Self(actions)
    }

    pub fn actions(&self) -> &[ExportAction] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a new action of `kind` with an empty config.
    pub fn push(&mut self, kind: impl Into<String>) {
        self.0.push(ExportAction::new(kind));
    }

    /// Shallow-merge `patch` into the config at `index`. An out-of-bounds
    /// index is a no-op, not an error.
    pub fn update(&mut self, index: usize, patch: IndexMap<String, Value>) {
        if let Some(action) = self.0.get_mut(index) {
            for (key, value) in patch {
                action.config.insert(key, value);
            }
        }
    }

    /// Remove the action at `index`; later actions shift down. An
    /// out-of-bounds index is a no-op.
    pub fn remove(&mut self, index: usize) {
        if index < self.0.len() {
            self.0.remove(index);
        }
    }
}

/// Outcome of validating one action against the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionValidation {
    Ok,
    /// Required fields that are absent or empty, in schema order.
    MissingFields(Vec<String>),
    /// Strict mode only: the kind is not in the registry.
    UnknownKind {
        kind: String,
        suggestion: Option<String>,
    },
}

impl ActionValidation {
    pub fn is_ok(&self) -> bool {
        matches!(self, ActionValidation::Ok)
    }
}

/// Validate an action's config against its kind's field schema.
///
/// Every field flagged `required` must be present and non-empty (absent,
/// null, and blank strings all count as missing). A kind absent from the
/// registry passes trivially unless `strict` is set, in which case it is
/// rejected with a "did you mean" suggestion.
pub fn validate_action(
    action: &ExportAction,
    registry: &ActionRegistry,
    strict: bool,
) -> ActionValidation {
    let Some(def) = registry.get(&action.kind) else {
        if strict {
            return ActionValidation::UnknownKind {
                kind: action.kind.clone(),
                suggestion: registry.suggest(&action.kind).map(str::to_string),
            };
        }
        return ActionValidation::Ok;
    };

    let missing: Vec<String> = def
        .fields
        .iter()
        .filter(|field| field.required && is_missing(action.config.get(&field.name)))
        .map(|field| field.name.clone())
        .collect();

    if missing.is_empty() {
        ActionValidation::Ok
    } else {
        ActionValidation::MissingFields(missing)
    }
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> ActionRegistry {
        ActionRegistry::from_yaml(
            r#"
email:
  label: Send email
  fields:
    - name: recipients
      label: Recipients
      type: text
      required: true
    - name: subject
      label: Subject
      type: text
      required: true
    - name: template
      label: Template
      type: select
      required: true
    - name: body
      label: Body
      type: textarea
      required: false
webhook:
  label: Call webhook
  fields:
    - name: url
      label: URL
      type: text
      required: true
"#,
        )
        .unwrap()
    }

    fn patch(pairs: &[(&str, Value)]) -> IndexMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn push_appends_at_end() {
        let mut pipeline = ActionPipeline::new();
        pipeline.push("email");
        pipeline.push("webhook");
        assert_eq!(pipeline.len(), 2);
        assert_eq!(pipeline.actions()[0].kind, "email");
        assert_eq!(pipeline.actions()[1].kind, "webhook");
        assert!(pipeline.actions()[0].config.is_empty());
    }

    #[test]
    fn update_merges_shallowly() {
        let mut pipeline = ActionPipeline::new();
        pipeline.push("email");
        pipeline.update(0, patch(&[("recipients", json!("a@example.com"))]));
        pipeline.update(0, patch(&[("subject", json!("Export done"))]));

        let config = &pipeline.actions()[0].config;
        assert_eq!(config["recipients"], json!("a@example.com"));
        assert_eq!(config["subject"], json!("Export done"));
    }

    #[test]
    fn update_overwrites_existing_keys() {
        let mut pipeline = ActionPipeline::new();
        pipeline.push("email");
        pipeline.update(0, patch(&[("subject", json!("first"))]));
        pipeline.update(0, patch(&[("subject", json!("second"))]));
        assert_eq!(pipeline.actions()[0].config["subject"], json!("second"));
    }

    #[test]
    fn update_out_of_bounds_is_noop() {
        let mut pipeline = ActionPipeline::new();
        pipeline.push("email");
        pipeline.update(5, patch(&[("subject", json!("lost"))]));
        assert!(pipeline.actions()[0].config.is_empty());
        assert_eq!(pipeline.len(), 1);
    }

    #[test]
    fn remove_shifts_later_actions_down() {
        let mut pipeline = ActionPipeline::new();
        pipeline.push("email");
        pipeline.push("webhook");
        pipeline.push("ftp");
        pipeline.remove(1);
        let kinds: Vec<&str> = pipeline.actions().iter().map(|a| a.kind.as_str()).collect();
        assert_eq!(kinds, vec!["email", "ftp"]);
    }

    #[test]
    fn remove_out_of_bounds_is_noop() {
        let mut pipeline = ActionPipeline::new();
        pipeline.push("email");
        pipeline.remove(9);
        assert_eq!(pipeline.len(), 1);
    }

    #[test]
    fn validate_passes_with_all_required_fields() {
        let mut action = ExportAction::new("webhook");
        action.config.insert("url".into(), json!("https://example.com/hook"));
        assert!(validate_action(&action, &registry(), false).is_ok());
    }

    #[test]
    fn validate_names_exactly_the_missing_field() {
        let mut action = ExportAction::new("email");
        action.config.insert("recipients".into(), json!("a@example.com"));
        action.config.insert("template".into(), json!("default"));
        // subject absent: one missing field of three required
        let result = validate_action(&action, &registry(), false);
        assert_eq!(result, ActionValidation::MissingFields(vec!["subject".into()]));
    }

    #[test]
    fn blank_and_null_values_count_as_missing() {
        let mut action = ExportAction::new("email");
        action.config.insert("recipients".into(), json!("   "));
        action.config.insert("subject".into(), json!(null));
        action.config.insert("template".into(), json!("default"));
        let result = validate_action(&action, &registry(), false);
        assert_eq!(
            result,
            ActionValidation::MissingFields(vec!["recipients".into(), "subject".into()])
        );
    }

    #[test]
    fn numeric_zero_is_present() {
        let mut action = ExportAction::new("webhook");
        action.config.insert("url".into(), json!(0));
        assert!(validate_action(&action, &registry(), false).is_ok());
    }

    #[test]
    fn unknown_kind_passes_by_default() {
        let action = ExportAction::new("sftp");
        assert!(validate_action(&action, &registry(), false).is_ok());
    }

    #[test]
    fn unknown_kind_rejected_in_strict_mode() {
        let action = ExportAction::new("emial");
        let result = validate_action(&action, &registry(), true);
        assert_eq!(
            result,
            ActionValidation::UnknownKind {
                kind: "emial".into(),
                suggestion: Some("email".into()),
            }
        );
    }

    #[test]
    fn wire_shape_round_trips() {
        let mut pipeline = ActionPipeline::new();
        pipeline.push("email");
        pipeline.update(0, patch(&[("subject", json!("Export done"))]));

        let json = serde_json::to_string(&pipeline).unwrap();
        assert!(json.contains("\"type\":\"email\""));
        assert!(json.contains("\"subject\":\"Export done\""));

        let back: ActionPipeline = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pipeline);
    }
}
