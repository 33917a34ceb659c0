/*!
 * Text segmentation into narration and quote chunks.
 *
 * With no extracted quotes the text is emitted whole or greedily word-wrapped
 * under a character budget. With quotes, a cursor walks the unconsumed tail
 * of the text, re-locating each quote through its speaker-name + verb-cue
 * anchor and splitting narration around it. A quote that cannot be re-located
 * is skipped without advancing the cursor; its content stays folded into
 * whatever narration chunk eventually covers it.
 */

use log::debug;
use regex::Regex;

use crate::script::cues::ReportingVerbs;
use crate::script::quotes::ExtractedQuote;

/// One segmented chunk: text plus the quote speaker, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Chunk text, never empty after trimming
    pub text: String,

    /// Raw speaker name for quote chunks; `None` for narration
    pub speaker: Option<String>,
}

impl Chunk {
    fn narration(text: &str) -> Self {
        Self {
            text: text.to_string(),
            speaker: None,
        }
    }

    fn quote(text: &str, speaker: &str) -> Self {
        Self {
            text: text.to_string(),
            speaker: Some(speaker.to_string()),
        }
    }
}

/// Cursor over the unconsumed tail of a text.
///
/// Quote re-location is destructive: once a span is matched, the cursor
/// advances past it and earlier text can never be matched again. Modeling
/// this as position + remaining span keeps the skip-on-no-match behavior
/// observable on its own.
#[derive(Debug)]
pub struct TailCursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TailCursor<'a> {
    /// Start a cursor covering the whole text.
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// The remaining, unconsumed tail.
    pub fn tail(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Consume a matched span given in byte offsets relative to the tail.
    ///
    /// Returns the text between the current position and the match start,
    /// then advances the cursor to just past the match end.
    pub fn consume(&mut self, match_start: usize, match_end: usize) -> &'a str {
        let before = &self.text[self.pos..self.pos + match_start];
        self.pos += match_end;
        before
    }

    /// Whether anything remains after trimming.
    pub fn is_exhausted(&self) -> bool {
        self.tail().trim().is_empty()
    }
}

/// Splits dialogue text into ordered narration/quote chunks.
#[derive(Debug)]
pub struct Segmenter {
    /// Verb alternation for quote re-location; `None` when the vocabulary is empty
    verb_alternation: Option<String>,

    /// Trailing `,? <conjunction>` trim applied to pre-quote narration
    trailing_trim: Option<Regex>,
}

impl Segmenter {
    /// Build a segmenter around the given verb vocabulary.
    pub fn new(cues: &ReportingVerbs) -> Self {
        let verb_alternation = if cues.is_empty() {
            None
        } else {
            Some(cues.verb_alternation())
        };

        let trailing_trim = cues
            .trailing_conjunction_pattern()
            .and_then(|p| Regex::new(&p).ok());

        Self {
            verb_alternation,
            trailing_trim,
        }
    }

    /// Segment `text` using the quotes previously extracted from it.
    ///
    /// The `max_chars` budget (in characters, not bytes) only applies on the
    /// no-quote path; narration around re-located quotes is emitted unsplit.
    pub fn segment(&self, text: &str, quotes: &[ExtractedQuote], max_chars: usize) -> Vec<Chunk> {
        if quotes.is_empty() {
            return self.wrap_narration(text, max_chars);
        }

        let mut chunks = Vec::new();
        let mut cursor = TailCursor::new(text);

        for quote in quotes {
            let Some(found) = self.relocate(&mut cursor, quote) else {
                debug!(
                    "Quote by '{}' not re-located in remaining text, leaving as narration",
                    quote.speaker
                );
                continue;
            };

            let narration = self.trim_narration(found);
            if !narration.is_empty() {
                chunks.push(Chunk::narration(&narration));
            }
            chunks.push(Chunk::quote(&quote.content, &quote.speaker));
        }

        let tail = cursor.tail().trim();
        if !tail.is_empty() {
            chunks.push(Chunk::narration(tail));
        }

        chunks
    }

    /// Search the cursor tail for the full attribution span of a quote.
    ///
    /// On a match the cursor advances past it and the preceding text is
    /// returned; on a miss the cursor stays put.
    fn relocate<'a>(&self, cursor: &mut TailCursor<'a>, quote: &ExtractedQuote) -> Option<&'a str> {
        let verbs = self.verb_alternation.as_deref()?;

        let pattern = format!(
            r#"(?i){name}\s+{verbs}\s*:?\s*"[^"]*{content}[^"]*""#,
            name = regex::escape(&quote.speaker),
            content = regex::escape(&quote.content),
        );

        // The pattern is built from escaped literals and a fixed skeleton, so
        // compilation should not fail; treat a failure as a non-match anyway.
        let regex = Regex::new(&pattern).ok()?;
        let found = regex.find(cursor.tail())?;
        Some(cursor.consume(found.start(), found.end()))
    }

    /// Trim narration and strip a trailing comma+conjunction fragment.
    fn trim_narration(&self, text: &str) -> String {
        let trimmed = text.trim();
        match &self.trailing_trim {
            Some(pattern) => pattern.replace(trimmed, "").trim().to_string(),
            None => trimmed.to_string(),
        }
    }

    /// No-quote path: emit the whole text, or greedily pack whole words under
    /// the budget. Words are never split; a single word longer than the
    /// budget is emitted alone.
    fn wrap_narration(&self, text: &str, max_chars: usize) -> Vec<Chunk> {
        if text.chars().count() <= max_chars {
            return vec![Chunk::narration(text)];
        }

        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;

        for word in text.split_whitespace() {
            let word_len = word.chars().count();
            // One separating space per additional word
            let added = if current.is_empty() {
                word_len
            } else {
                word_len + 1
            };

            if current_len + added > max_chars && !current.is_empty() {
                chunks.push(Chunk::narration(&current));
                current = word.to_string();
                current_len = word_len;
            } else {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_len += added;
            }
        }

        if !current.is_empty() {
            chunks.push(Chunk::narration(&current));
        }

        chunks
    }
}
