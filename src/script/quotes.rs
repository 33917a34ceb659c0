/*!
 * Quote extraction from narration text.
 *
 * Detects double-quoted speech attributed to a speaker through a
 * reporting-verb cue. Two sentence shapes are recognized:
 *
 * - quote-first: `"Ого!" сказала Ліна`
 * - name-first:  `Ліна тихо сказала: "Ого!"`
 *
 * Each shape is matched independently over the whole text and the results
 * are concatenated shape by shape. A document mixing both shapes can
 * therefore yield quotes out of true reading order; this mirrors the
 * behavior the rest of the pipeline is calibrated against and is a known
 * limitation, not something to reorder here.
 */

use anyhow::{Context, Result};
use regex::Regex;

use crate::script::cues::ReportingVerbs;

/// An extracted quote: content plus the raw speaker name it is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedQuote {
    /// Quote content without the surrounding double quotes, trimmed
    pub content: String,

    /// Raw speaker name as written in the text, trimmed
    pub speaker: String,
}

/// Heuristic quote extractor built from an injected verb vocabulary.
#[derive(Debug)]
pub struct QuoteExtractor {
    /// `"Quote" <verb> Name` — captures (quote, speaker)
    quote_first: Option<Regex>,

    /// `Name [words] <verb>[:] "Quote"` — captures (speaker, quote)
    name_first: Option<Regex>,
}

impl QuoteExtractor {
    /// Compile the two shape patterns from the given vocabulary.
    ///
    /// Case-insensitivity is scoped to the verb alternation; the speaker name
    /// must actually be capitalized (`\p{Lu}\p{Ll}+`).
    pub fn new(cues: &ReportingVerbs) -> Result<Self> {
        if cues.is_empty() {
            return Ok(Self {
                quote_first: None,
                name_first: None,
            });
        }

        let verbs = cues.verb_alternation();

        let quote_first = Regex::new(&format!(
            r#""([^"]+)"\s*,?\s*(?i:{verbs})\s+(\p{{Lu}}\p{{Ll}}+)"#
        ))
        .context("Failed to compile quote-first pattern")?;

        let name_first = Regex::new(&format!(
            r#"(\p{{Lu}}\p{{Ll}}+)(?:\s+\p{{Ll}}+)*?\s+(?i:{verbs})\s*:?\s*"([^"]+)""#
        ))
        .context("Failed to compile name-first pattern")?;

        Ok(Self {
            quote_first: Some(quote_first),
            name_first: Some(name_first),
        })
    }

    /// Extract all attributed quotes from `text`.
    ///
    /// Returns `(content, speaker)` pairs: all non-overlapping quote-first
    /// matches in scan order, followed by all name-first matches in scan
    /// order. Never fails; unmatched text is simply ignored.
    pub fn extract(&self, text: &str) -> Vec<ExtractedQuote> {
        let mut quotes = Vec::new();

        if let Some(pattern) = &self.quote_first {
            for caps in pattern.captures_iter(text) {
                if let (Some(content), Some(speaker)) = (caps.get(1), caps.get(2)) {
                    quotes.push(ExtractedQuote {
                        content: content.as_str().trim().to_string(),
                        speaker: speaker.as_str().trim().to_string(),
                    });
                }
            }
        }

        if let Some(pattern) = &self.name_first {
            for caps in pattern.captures_iter(text) {
                if let (Some(speaker), Some(content)) = (caps.get(1), caps.get(2)) {
                    quotes.push(ExtractedQuote {
                        content: content.as_str().trim().to_string(),
                        speaker: speaker.as_str().trim().to_string(),
                    });
                }
            }
        }

        quotes
    }
}
