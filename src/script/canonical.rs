/*!
 * Speaker canonicalization.
 *
 * Resolves a raw speaker mention (a canonical ID or a free-text name) to a
 * canonical speaker ID:
 *
 * 1. exact, case-sensitive registry membership wins unchanged;
 * 2. otherwise the first name-map rule whose pattern matches the mention
 *    (case-insensitive search, list order) wins;
 * 3. otherwise the fallback ID is returned and the mention is reported
 *    back as unresolved.
 *
 * This never fails: an invalid pattern is equivalent to a rule that never
 * matches.
 */

use regex::RegexBuilder;

use crate::registry::{NameMap, SpeakerRegistry};

/// Result of resolving one raw speaker mention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Canonical speaker ID (the fallback when nothing matched)
    pub canonical: String,

    /// The raw mention, echoed back when it resolved only via fallback
    pub unresolved: Option<String>,
}

impl Resolution {
    fn resolved(canonical: &str) -> Self {
        Self {
            canonical: canonical.to_string(),
            unresolved: None,
        }
    }

    fn fallback(fallback: &str, raw: &str) -> Self {
        Self {
            canonical: fallback.to_string(),
            unresolved: Some(raw.to_string()),
        }
    }
}

/// Resolve a raw speaker mention against the registry and name map.
///
/// Pure function over its inputs; see the module docs for the precedence.
pub fn resolve(raw_speaker: &str, registry: &SpeakerRegistry, name_map: &NameMap) -> Resolution {
    if registry.contains(raw_speaker) {
        return Resolution::resolved(raw_speaker);
    }

    for entry in &name_map.patterns {
        let Ok(pattern) = RegexBuilder::new(&entry.pattern)
            .case_insensitive(true)
            .build()
        else {
            // Invalid pattern: skip, never propagate
            continue;
        };
        if pattern.is_match(raw_speaker) {
            return Resolution::resolved(&entry.speaker);
        }
    }

    Resolution::fallback(&name_map.fallback, raw_speaker)
}
