/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use kazkar::file_utils::FileManager;
use serde::{Deserialize, Serialize};

use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "probe.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that dir_exists returns false for non-existent directories
#[test]
fn test_dir_exists_withNonExistentDir_shouldReturnFalse() {
    assert!(!FileManager::dir_exists("./non_existent_directory_12345"));
}

/// Test that ensure_dir creates nested directories
#[test]
fn test_ensure_dir_withNestedPath_shouldCreateAll() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("a").join("b").join("c");

    FileManager::ensure_dir(&nested)?;

    assert!(FileManager::dir_exists(&nested));
    Ok(())
}

/// Test that write_to_file creates missing parent directories
#[test]
fn test_write_to_file_withMissingParent_shouldCreateParent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let target = temp_dir.path().join("out").join("lines.json");

    FileManager::write_to_file(&target, "[]")?;

    assert_eq!(FileManager::read_to_string(&target)?, "[]");
    Ok(())
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Probe {
    name: String,
    count: usize,
}

/// Test that JSON helpers round-trip a value through disk
#[test]
fn test_json_helpers_withRoundTrip_shouldPreserveValue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("probe.json");
    let value = Probe {
        name: "scene-1".to_string(),
        count: 3,
    };

    FileManager::write_json_pretty(&path, &value)?;
    let loaded: Probe = FileManager::read_json(&path)?;

    assert_eq!(loaded, value);
    let raw = FileManager::read_to_string(&path)?;
    assert!(raw.ends_with('\n'));
    Ok(())
}

/// Test that find_files filters by extension and sorts results
#[test]
fn test_find_files_withMixedExtensions_shouldReturnSortedJson() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "b.json", "{}")?;
    common::create_test_file(temp_dir.path(), "a.json", "{}")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "skip")?;

    let files = FileManager::find_files(temp_dir.path(), "json")?;

    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("a.json"));
    assert!(files[1].ends_with("b.json"));
    Ok(())
}
