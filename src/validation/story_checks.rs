/*!
 * Story document validator.
 *
 * Operates on raw JSON values so structural problems can be reported with
 * JSON-pointer paths before deserialization papers over them with defaults.
 */

use std::collections::HashSet;

use serde_json::Value;

/// Severity of a validation issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSeverity {
    /// Suspicious but processable; generation would skip or degrade
    Warning,

    /// The document does not have the expected shape
    Error,
}

/// A single validation issue.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity of the issue
    pub severity: IssueSeverity,

    /// JSON-pointer-style path to the offending element
    pub path: String,

    /// Description of the issue
    pub message: String,
}

impl ValidationIssue {
    /// Create an error issue
    pub fn error(path: &str, message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Error,
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// Create a warning issue
    pub fn warning(path: &str, message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Warning,
            path: path.to_string(),
            message: message.into(),
        }
    }
}

/// Outcome of validating one story document.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// All issues found, in document order
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Whether the document passed (warnings do not fail a document).
    pub fn passed(&self) -> bool {
        !self
            .issues
            .iter()
            .any(|i| i.severity == IssueSeverity::Error)
    }

    /// Issues with error severity.
    pub fn errors(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Error)
            .collect()
    }

    /// Issues with warning severity.
    pub fn warnings(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == IssueSeverity::Warning)
            .collect()
    }
}

/// Validates story documents against the shape the engine expects.
#[derive(Debug, Default)]
pub struct StoryValidator;

impl StoryValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a parsed JSON document.
    pub fn validate(&self, document: &Value) -> ValidationReport {
        let mut report = ValidationReport::default();

        let Some(root) = document.as_object() else {
            report
                .issues
                .push(ValidationIssue::error("/", "document is not an object"));
            return report;
        };

        let Some(scenes) = root.get("scenes") else {
            report
                .issues
                .push(ValidationIssue::error("/", "missing required 'scenes' array"));
            return report;
        };

        let Some(scenes) = scenes.as_array() else {
            report
                .issues
                .push(ValidationIssue::error("/scenes", "'scenes' is not an array"));
            return report;
        };

        let mut seen_ids = HashSet::new();
        for (index, scene) in scenes.iter().enumerate() {
            self.check_scene(scene, index, &mut seen_ids, &mut report);
        }

        report
    }

    fn check_scene(
        &self,
        scene: &Value,
        index: usize,
        seen_ids: &mut HashSet<String>,
        report: &mut ValidationReport,
    ) {
        let path = format!("/scenes/{index}");

        let Some(scene) = scene.as_object() else {
            report
                .issues
                .push(ValidationIssue::error(&path, "scene is not an object"));
            return;
        };

        match scene.get("id").and_then(Value::as_str) {
            Some(id) if !id.trim().is_empty() => {
                if !seen_ids.insert(id.to_string()) {
                    report.issues.push(ValidationIssue::error(
                        &format!("{path}/id"),
                        format!("duplicate scene id '{id}'"),
                    ));
                }
            }
            Some(_) => report
                .issues
                .push(ValidationIssue::error(&format!("{path}/id"), "scene id is empty")),
            None => report.issues.push(ValidationIssue::error(
                &format!("{path}/id"),
                "missing or non-string scene id",
            )),
        }

        for field in ["summary", "visual_notes"] {
            if let Some(value) = scene.get(field) {
                if !value.is_string() {
                    report.issues.push(ValidationIssue::error(
                        &format!("{path}/{field}"),
                        format!("'{field}' is not a string"),
                    ));
                }
            }
        }

        let Some(dialogue) = scene.get("dialogue") else {
            return;
        };
        let Some(dialogue) = dialogue.as_array() else {
            report.issues.push(ValidationIssue::error(
                &format!("{path}/dialogue"),
                "'dialogue' is not an array",
            ));
            return;
        };

        for (item_index, item) in dialogue.iter().enumerate() {
            self.check_dialogue_item(item, &format!("{path}/dialogue/{item_index}"), report);
        }
    }

    fn check_dialogue_item(&self, item: &Value, path: &str, report: &mut ValidationReport) {
        let Some(item) = item.as_object() else {
            report
                .issues
                .push(ValidationIssue::error(path, "dialogue item is not an object"));
            return;
        };

        match item.get("speaker") {
            Some(speaker) if !speaker.is_string() => report.issues.push(ValidationIssue::error(
                &format!("{path}/speaker"),
                "'speaker' is not a string",
            )),
            None => report.issues.push(ValidationIssue::error(
                &format!("{path}/speaker"),
                "missing 'speaker'",
            )),
            _ => {}
        }

        match item.get("text") {
            Some(Value::String(text)) => {
                if text.trim().is_empty() {
                    // Generation skips these; worth flagging, not failing
                    report.issues.push(ValidationIssue::warning(
                        &format!("{path}/text"),
                        "'text' is empty and will be skipped",
                    ));
                }
            }
            Some(_) => report.issues.push(ValidationIssue::error(
                &format!("{path}/text"),
                "'text' is not a string",
            )),
            None => report.issues.push(ValidationIssue::error(
                &format!("{path}/text"),
                "missing 'text'",
            )),
        }
    }
}
