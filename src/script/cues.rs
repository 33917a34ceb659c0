/*!
 * Reporting-verb cues used by the quote heuristics.
 *
 * The verb vocabulary is injected rather than hardcoded so the extractor and
 * segmenter can work on other languages or domains without code changes. The
 * default set covers common Ukrainian speech verbs.
 */

/// Injected vocabulary of reporting-verb cues.
///
/// Holds the verb forms that signal quote attribution ("сказала", "said", …)
/// and the conjunctions stripped from the tail of narration chunks that
/// precede a quote.
#[derive(Debug, Clone)]
pub struct ReportingVerbs {
    /// Verb forms, matched case-insensitively
    verbs: Vec<String>,

    /// Conjunctions stripped when trailing a pre-quote narration chunk
    trailing_conjunctions: Vec<String>,
}

impl ReportingVerbs {
    /// Create a vocabulary from explicit verb forms and trailing conjunctions.
    ///
    /// Empty strings are dropped; an entirely empty verb set is allowed and
    /// simply makes the extractor match nothing.
    pub fn new<S: Into<String>>(
        verbs: impl IntoIterator<Item = S>,
        trailing_conjunctions: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            verbs: verbs
                .into_iter()
                .map(Into::into)
                .filter(|v| !v.trim().is_empty())
                .collect(),
            trailing_conjunctions: trailing_conjunctions
                .into_iter()
                .map(Into::into)
                .filter(|c| !c.trim().is_empty())
                .collect(),
        }
    }

    /// Default Ukrainian vocabulary.
    pub fn ukrainian() -> Self {
        Self::new(
            [
                "сказав",
                "сказала",
                "каже",
                "мовив",
                "мовила",
                "промовив",
                "промовила",
                "відповів",
                "відповіла",
                "прошепотів",
                "прошепотіла",
                "вигукнув",
                "вигукнула",
            ],
            ["і"],
        )
    }

    /// Whether the vocabulary contains any verb forms.
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }

    /// Verb forms in declaration order.
    pub fn verbs(&self) -> &[String] {
        &self.verbs
    }

    /// Non-capturing regex alternation over all verb forms, e.g.
    /// `(?:сказав|сказала|…)`. Verb forms are regex-escaped.
    pub fn verb_alternation(&self) -> String {
        let escaped: Vec<String> = self.verbs.iter().map(|v| regex::escape(v)).collect();
        format!("(?:{})", escaped.join("|"))
    }

    /// Regex fragment matching a trailing `,? <conjunction>` at end of input,
    /// or `None` when no conjunctions are configured.
    pub fn trailing_conjunction_pattern(&self) -> Option<String> {
        if self.trailing_conjunctions.is_empty() {
            return None;
        }
        let escaped: Vec<String> = self
            .trailing_conjunctions
            .iter()
            .map(|c| regex::escape(c))
            .collect();
        Some(format!(r",?\s*(?:{})\s*$", escaped.join("|")))
    }
}

impl Default for ReportingVerbs {
    fn default() -> Self {
        Self::ukrainian()
    }
}
