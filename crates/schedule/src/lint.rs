//! Advisory validation with structured errors and warnings.
//!
//! The submission gate in [`crate::request`] reports only the first unmet
//! rule; this module checks a whole definition at once and adds the
//! advisory layer: cron syntax, timezone shape, schedules that can never
//! fire, unknown action kinds. Errors mirror the gate (they block saving),
//! warnings never do; the dispatching scheduler stays authoritative.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use freight_actions::{validate_action, ActionRegistry, ActionValidation};

use crate::definition::ScheduleDefinition;
use crate::recurrence::Recurrence;

/// Outcome of linting a definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintReport {
    pub errors: Vec<LintIssue>,
    pub warnings: Vec<LintIssue>,
}

/// A single finding, anchored to a JSON-path-like location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintIssue {
    /// e.g. `"recurrence.expression"` or `"actions[1].url"`.
    pub path: String,
    pub message: String,
    /// Optional "Did you mean …?" hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(LintIssue {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        });
    }

    fn error_with_suggestion(
        &mut self,
        path: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) {
        self.errors.push(LintIssue {
            path: path.into(),
            message: message.into(),
            suggestion: Some(suggestion.into()),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(LintIssue {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        });
    }

    fn warn_with_suggestion(
        &mut self,
        path: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) {
        self.warnings.push(LintIssue {
            path: path.into(),
            message: message.into(),
            suggestion: Some(suggestion.into()),
        });
    }
}

/// Lint a definition against every rule at once.
///
/// `registry` enables action validation when present; `strict_actions`
/// turns unknown action kinds from a warning into an error.
pub fn lint_definition(
    def: &ScheduleDefinition,
    registry: Option<&ActionRegistry>,
    strict_actions: bool,
) -> LintReport {
    let mut report = LintReport::default();
    check_identity(def, &mut report);
    check_recurrence(&def.recurrence, &mut report);
    check_timezone(&def.timezone, &mut report);
    if let Some(registry) = registry {
        check_actions(def, registry, strict_actions, &mut report);
    }
    report
}

fn check_identity(def: &ScheduleDefinition, report: &mut LintReport) {
    if def.name.trim().is_empty() {
        report.error("name", "schedule name is required");
    }
    if def.template_id.trim().is_empty() {
        report.error("template_id", "an export template must be selected");
    }
}

fn check_recurrence(recurrence: &Recurrence, report: &mut LintReport) {
    match recurrence {
        Recurrence::None => {}
        Recurrence::Weekly { days, times, .. } => {
            if days.is_empty() || times.is_empty() {
                report.warn(
                    "recurrence",
                    "weekly schedule with no days or times selected will never fire",
                );
            }
            for (i, day) in days.iter().enumerate() {
                if *day > 6 {
                    report.warn(
                        format!("recurrence.days[{i}]"),
                        format!("weekday {day} is outside 0-6 (0 = Sunday)"),
                    );
                }
            }
            check_times(times, report);
        }
        Recurrence::Monthly { days, times } => {
            if days.is_empty() {
                report.error("recurrence.days", "monthly schedules require at least one day");
            }
            if times.is_empty() {
                report.error("recurrence.times", "monthly schedules require at least one time");
            }
            for (i, day) in days.iter().enumerate() {
                if !(1..=31).contains(day) {
                    report.warn(
                        format!("recurrence.days[{i}]"),
                        format!("day {day} is outside 1-31"),
                    );
                } else if *day > 28 {
                    report.warn(
                        format!("recurrence.days[{i}]"),
                        format!("day {day} is skipped in months without it"),
                    );
                }
            }
            check_times(times, report);
        }
        Recurrence::Cron { expression } => {
            if expression.trim().is_empty() {
                report.error("recurrence.expression", "cron schedules require an expression");
            } else {
                check_cron(expression, report);
            }
        }
        Recurrence::Interval { seconds } => {
            if *seconds == 0 {
                report.warn("recurrence.seconds", "zero-second interval will never fire");
            }
        }
    }
}

fn check_times(times: &[String], report: &mut LintReport) {
    for (i, time) in times.iter().enumerate() {
        if NaiveTime::parse_from_str(time, "%H:%M").is_err() {
            report.warn(
                format!("recurrence.times[{i}]"),
                format!("'{time}' is not a HH:MM time"),
            );
        }
    }
}

/// Syntactic 5-field cron check. Advisory only: the dispatching scheduler
/// parses the expression authoritatively.
fn check_cron(expr: &str, report: &mut LintReport) {
    let fields: Vec<&str> = expr.split_whitespace().collect();
    if fields.len() != 5 {
        report.warn(
            "recurrence.expression",
            format!(
                "cron needs 5 fields (min hour dom month dow), got {}",
                fields.len()
            ),
        );
        return;
    }

    const RANGES: [(&str, u32, u32); 5] = [
        ("minute", 0, 59),
        ("hour", 0, 23),
        ("day-of-month", 1, 31),
        ("month", 1, 12),
        ("day-of-week", 0, 7),
    ];

    for (field, (name, min, max)) in fields.iter().zip(RANGES) {
        if !cron_field_ok(field, min, max) {
            report.warn(
                "recurrence.expression",
                format!("suspicious cron {name} field '{field}'"),
            );
        }
    }
}

/// Supports `*`, `N`, `N-M`, `*/S`, `N-M/S`, and comma-separated lists.
fn cron_field_ok(field: &str, min: u32, max: u32) -> bool {
    field.split(',').all(|part| {
        let part = part.trim();
        if part.is_empty() {
            return false;
        }
        let (range, step) = match part.split_once('/') {
            Some((r, s)) => match s.parse::<u32>() {
                Ok(v) if v > 0 => (r, Some(v)),
                _ => return false,
            },
            None => (part, None),
        };
        if range == "*" {
            return step.is_none_or(|s| s <= max);
        }
        match range.split_once('-') {
            Some((a, b)) => matches!(
                (a.parse::<u32>(), b.parse::<u32>()),
                (Ok(a), Ok(b)) if a >= min && b <= max && a <= b
            ),
            None => matches!(range.parse::<u32>(), Ok(v) if v >= min && v <= max),
        }
    })
}

fn check_timezone(tz: &str, report: &mut LintReport) {
    let tz = tz.trim();
    if tz.is_empty() {
        report.warn("timezone", "no timezone set; the host fallback will be applied");
        return;
    }
    if !is_iana_timezone(tz) {
        report.warn(
            "timezone",
            format!("'{tz}' does not look like an IANA timezone (e.g. 'Asia/Manila')"),
        );
    }
}

/// Shape check for `Area/Location` names; `UTC` and `GMT` pass as-is.
fn is_iana_timezone(tz: &str) -> bool {
    if tz == "UTC" || tz == "GMT" {
        return true;
    }
    let parts: Vec<&str> = tz.split('/').collect();
    parts.len() >= 2
        && parts.iter().all(|part| {
            part.chars().next().is_some_and(|c| c.is_ascii_uppercase())
                && part.chars().all(|c| c.is_ascii_alphabetic() || c == '_' || c == '-')
        })
}

fn check_actions(
    def: &ScheduleDefinition,
    registry: &ActionRegistry,
    strict: bool,
    report: &mut LintReport,
) {
    for (i, action) in def.actions.actions().iter().enumerate() {
        match validate_action(action, registry, true) {
            ActionValidation::Ok => {}
            ActionValidation::MissingFields(fields) => {
                for field in fields {
                    report.error(
                        format!("actions[{i}].{field}"),
                        format!("'{}' requires '{field}'", action.kind),
                    );
                }
            }
            ActionValidation::UnknownKind { kind, suggestion } => {
                let message = format!("unknown action type '{kind}'");
                match (strict, suggestion) {
                    (true, Some(s)) => report.error_with_suggestion(
                        format!("actions[{i}].type"),
                        message,
                        format!("Did you mean '{s}'?"),
                    ),
                    (true, None) => report.error(format!("actions[{i}].type"), message),
                    (false, Some(s)) => report.warn_with_suggestion(
                        format!("actions[{i}].type"),
                        message,
                        format!("Did you mean '{s}'?"),
                    ),
                    (false, None) => report.warn(format!("actions[{i}].type"), message),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recurrence::WeeklyMode;
    use serde_json::json;

    fn valid_def() -> ScheduleDefinition {
        let mut def = ScheduleDefinition::draft("UTC");
        def.name = "Nightly".into();
        def.template_id = "t1".into();
        def
    }

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

    #[test]
    fn valid_definition_is_clean() {
        let report = lint_definition(&valid_def(), None, false);
        assert!(report.is_clean(), "{report:?}");
    }

    #[test]
    fn missing_identity_fields_are_errors() {
        let mut def = valid_def();
        def.name.clear();
        def.template_id = " ".into();
        let report = lint_definition(&def, None, false);
        assert!(report.errors.iter().any(|e| e.path == "name"));
        assert!(report.errors.iter().any(|e| e.path == "template_id"));
    }

    #[test]
    fn weekly_never_firing_only_warns() {
        let mut def = valid_def();
        def.recurrence = Recurrence::Weekly {
            days: vec![],
            times: vec![],
            mode: WeeklyMode::Shared,
        };
        let report = lint_definition(&def, None, false);
        assert!(!report.has_errors());
        assert!(report.warnings.iter().any(|w| w.message.contains("never fire")));
    }

    #[test]
    fn weekday_out_of_range_warns() {
        let mut def = valid_def();
        def.recurrence = Recurrence::Weekly {
            days: vec![1, 9],
            times: vec!["09:00".into()],
            mode: WeeklyMode::Shared,
        };
        let report = lint_definition(&def, None, false);
        assert!(report.warnings.iter().any(|w| w.path == "recurrence.days[1]"));
    }

    #[test]
    fn bad_time_format_warns() {
        let mut def = valid_def();
        def.recurrence = Recurrence::Weekly {
            days: vec![1],
            times: vec!["25:99".into(), "9am".into()],
            mode: WeeklyMode::Shared,
        };
        let report = lint_definition(&def, None, false);
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn monthly_empty_axes_are_errors() {
        let mut def = valid_def();
        def.recurrence = Recurrence::Monthly { days: vec![], times: vec![] };
        let report = lint_definition(&def, None, false);
        assert!(report.errors.iter().any(|e| e.path == "recurrence.days"));
        assert!(report.errors.iter().any(|e| e.path == "recurrence.times"));
    }

    #[test]
    fn late_month_day_warns_about_short_months() {
        let mut def = valid_def();
        def.recurrence = Recurrence::Monthly {
            days: vec![31],
            times: vec!["03:00".into()],
        };
        let report = lint_definition(&def, None, false);
        assert!(!report.has_errors());
        assert!(report.warnings.iter().any(|w| w.message.contains("skipped")));
    }

    #[test]
    fn empty_cron_is_an_error_bad_syntax_is_not() {
        let mut def = valid_def();
        def.recurrence = Recurrence::Cron { expression: "".into() };
        let report = lint_definition(&def, None, false);
        assert!(report.has_errors());

        def.recurrence = Recurrence::Cron { expression: "60 * * *".into() };
        let report = lint_definition(&def, None, false);
        assert!(!report.has_errors());
        assert!(report.warnings.iter().any(|w| w.message.contains("5 fields")));
    }

    #[test]
    fn cron_field_ranges_are_checked() {
        let mut def = valid_def();
        def.recurrence = Recurrence::Cron { expression: "60 * * * *".into() };
        let report = lint_definition(&def, None, false);
        assert!(report.warnings.iter().any(|w| w.message.contains("minute")));

        def.recurrence = Recurrence::Cron { expression: "0,30 9-17 * * 1-5".into() };
        let report = lint_definition(&def, None, false);
        assert!(report.is_clean(), "{report:?}");
    }

    #[test]
    fn timezone_shape_warns() {
        let mut def = valid_def();
        def.timezone = "not_a_timezone".into();
        let report = lint_definition(&def, None, false);
        assert!(!report.has_errors());
        assert!(report.warnings.iter().any(|w| w.path == "timezone"));

        def.timezone = "America/New_York".into();
        assert!(lint_definition(&def, None, false).is_clean());
    }

    #[test]
    fn missing_action_field_is_an_error_with_path() {
        let mut def = valid_def();
        def.actions.push("email");
        let report = lint_definition(&def, Some(&registry()), false);
        let issue = report
            .errors
            .iter()
            .find(|e| e.path == "actions[0].recipients")
            .expect("missing field issue");
        assert!(issue.message.contains("email"));
    }

    #[test]
    fn unknown_action_kind_warns_by_default_errors_in_strict() {
        let mut def = valid_def();
        def.actions.push("emial");
        def.actions.update(
            0,
            [("recipients".to_string(), json!("a@example.com"))].into_iter().collect(),
        );

        let report = lint_definition(&def, Some(&registry()), false);
        assert!(!report.has_errors());
        let warning = &report.warnings[0];
        assert_eq!(warning.path, "actions[0].type");
        assert_eq!(warning.suggestion.as_deref(), Some("Did you mean 'email'?"));

        let strict = lint_definition(&def, Some(&registry()), true);
        assert!(strict.has_errors());
    }
}
