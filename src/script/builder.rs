/*!
 * Script line generation.
 *
 * Walks a story scene by scene, segments every dialogue text into
 * narration/quote chunks, resolves all speakers to canonical IDs and emits
 * the flat, ordered list of TTS lines plus the set of unresolved speaker
 * diagnostics.
 */

use std::collections::HashSet;
use std::fmt;

use anyhow::Result;

use crate::registry::{NameMap, SpeakerRegistry};
use crate::script::canonical;
use crate::script::cues::ReportingVerbs;
use crate::script::quotes::QuoteExtractor;
use crate::script::segment::Segmenter;
use crate::story::{Scene, Story, TtsLine};

/// An unresolved speaker diagnostic, tagged by where the mention appeared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Unresolved {
    /// Dialogue-level raw speaker that resolved only via fallback
    DialogueSpeaker(String),

    /// Quote-level raw speaker that resolved only via fallback
    QuoteSpeaker(String),
}

impl fmt::Display for Unresolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DialogueSpeaker(name) => write!(f, "Speaker ID: {name}"),
            Self::QuoteSpeaker(name) => write!(f, "Speaker name: {name}"),
        }
    }
}

/// Output of one generation run.
#[derive(Debug)]
pub struct GeneratedScript {
    /// Ordered speech lines
    pub lines: Vec<TtsLine>,

    /// Deduplicated unresolved-speaker diagnostics, no guaranteed order
    pub unresolved: HashSet<Unresolved>,
}

impl GeneratedScript {
    /// Diagnostics rendered and sorted, for deterministic display.
    pub fn sorted_unresolved(&self) -> Vec<String> {
        let mut rendered: Vec<String> = self.unresolved.iter().map(|u| u.to_string()).collect();
        rendered.sort();
        rendered
    }
}

/// Builds TTS script lines from stories.
#[derive(Debug)]
pub struct LineBuilder {
    extractor: QuoteExtractor,
    segmenter: Segmenter,
    max_chars: usize,
}

impl LineBuilder {
    /// Create a builder with the given verb vocabulary and narration budget.
    pub fn new(cues: &ReportingVerbs, max_chars: usize) -> Result<Self> {
        Ok(Self {
            extractor: QuoteExtractor::new(cues)?,
            segmenter: Segmenter::new(cues),
            max_chars,
        })
    }

    /// Generate the ordered line list and diagnostics for one story.
    ///
    /// Line IDs are `<scene-id>_<counter>` with a single zero-padded counter
    /// covering the whole document; it is not reset at scene boundaries.
    pub fn build(
        &self,
        story: &Story,
        registry: &SpeakerRegistry,
        name_map: &NameMap,
    ) -> GeneratedScript {
        let mut lines = Vec::new();
        let mut unresolved = HashSet::new();
        let mut counter: usize = 1;

        for scene in &story.scenes {
            lines.extend(self.build_scene(scene, registry, name_map, &mut counter, &mut unresolved));
        }

        GeneratedScript { lines, unresolved }
    }

    /// Generate the lines of a single scene.
    ///
    /// The counter is shared across the whole document, which is why it is
    /// threaded through rather than owned here.
    pub fn build_scene(
        &self,
        scene: &Scene,
        registry: &SpeakerRegistry,
        name_map: &NameMap,
        counter: &mut usize,
        unresolved: &mut HashSet<Unresolved>,
    ) -> Vec<TtsLine> {
        let mut lines = Vec::new();

        for item in &scene.dialogue {
            if item.text.trim().is_empty() {
                continue;
            }

            let dialogue_speaker = canonical::resolve(&item.speaker, registry, name_map);
            if let Some(name) = &dialogue_speaker.unresolved {
                unresolved.insert(Unresolved::DialogueSpeaker(name.clone()));
            }

            let quotes = self.extractor.extract(&item.text);
            let chunks = self.segmenter.segment(&item.text, &quotes, self.max_chars);

            for chunk in chunks {
                let text = chunk.text.trim();
                if text.is_empty() {
                    continue;
                }

                let speaker = match &chunk.speaker {
                    Some(quote_speaker) => {
                        let resolution = canonical::resolve(quote_speaker, registry, name_map);
                        if let Some(name) = &resolution.unresolved {
                            unresolved.insert(Unresolved::QuoteSpeaker(name.clone()));
                        }
                        resolution.canonical
                    }
                    None => dialogue_speaker.canonical.clone(),
                };

                lines.push(TtsLine {
                    id: format!("{}_{:03}", scene.id, *counter),
                    text: text.to_string(),
                    speaker,
                });
                *counter += 1;
            }
        }

        lines
    }
}
