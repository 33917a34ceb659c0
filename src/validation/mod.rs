/*!
 * Structural validation of story documents.
 *
 * Before generation, a story file can be checked for the shape the engine
 * expects. Issues carry a severity and a JSON-pointer-style path so a
 * malformed document is reported precisely instead of failing mid-run.
 *
 * # Architecture
 *
 * - `story_checks`: the story document validator and issue types
 */

pub mod story_checks;

// Re-export main types
pub use story_checks::{IssueSeverity, StoryValidator, ValidationIssue, ValidationReport};
