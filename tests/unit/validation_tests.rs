/*!
 * Tests for story document validation
 */

use anyhow::Result;
use kazkar::validation::StoryValidator;
use serde_json::json;

use crate::common;

/// Test that a well-formed story passes with no issues
#[test]
fn test_validate_withWellFormedStory_shouldPass() -> Result<()> {
    let document: serde_json::Value = serde_json::from_str(common::sample_story_json())?;

    let report = StoryValidator::new().validate(&document);

    assert!(report.passed());
    assert!(report.issues.is_empty());
    Ok(())
}

/// Test that a non-object root is an error
#[test]
fn test_validate_withArrayRoot_shouldFail() {
    let report = StoryValidator::new().validate(&json!([1, 2, 3]));

    assert!(!report.passed());
    assert_eq!(report.errors()[0].path, "/");
}

/// Test that a missing scenes array is an error
#[test]
fn test_validate_withMissingScenes_shouldFail() {
    let report = StoryValidator::new().validate(&json!({ "title": "no scenes" }));

    assert!(!report.passed());
}

/// Test that duplicate scene IDs are reported at the duplicate's path
#[test]
fn test_validate_withDuplicateSceneIds_shouldReportPath() {
    let document = json!({
        "scenes": [
            { "id": "s1", "dialogue": [] },
            { "id": "s1", "dialogue": [] }
        ]
    });

    let report = StoryValidator::new().validate(&document);

    assert!(!report.passed());
    assert!(report.errors().iter().any(|i| i.path == "/scenes/1/id"));
}

/// Test that a dialogue item missing its text is an error
#[test]
fn test_validate_withMissingDialogueText_shouldFail() {
    let document = json!({
        "scenes": [
            { "id": "s1", "dialogue": [ { "speaker": "lina" } ] }
        ]
    });

    let report = StoryValidator::new().validate(&document);

    assert!(!report.passed());
    assert!(report
        .errors()
        .iter()
        .any(|i| i.path.starts_with("/scenes/0/dialogue/0")));
}

/// Test that whitespace-only dialogue text is a warning, not an error
#[test]
fn test_validate_withBlankDialogueText_shouldWarnButPass() {
    let document = json!({
        "scenes": [
            { "id": "s1", "dialogue": [ { "speaker": "lina", "text": "   " } ] }
        ]
    });

    let report = StoryValidator::new().validate(&document);

    assert!(report.passed());
    assert_eq!(report.warnings().len(), 1);
}
