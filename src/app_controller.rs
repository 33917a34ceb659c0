use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::registry::{NameMap, SpeakerRegistry, current_timestamp};
use crate::script::{GeneratedScript, LineBuilder, ReportingVerbs};
use crate::story::Story;
use crate::validation::StoryValidator;

// @module: Application controller for script generation and validation

/// Summary written next to the generated script.
#[derive(Debug, Serialize)]
struct RunReport<'a> {
    generated_at: String,
    input: String,
    line_count: usize,
    unresolved: &'a [String],
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self { config })
    }

    /// Run script generation: story in, ordered TTS lines out.
    ///
    /// A story that cannot be read or parsed aborts the run before anything
    /// is written. Registry problems only degrade resolution. When
    /// enforcement is on and any speaker resolved via fallback, the run
    /// fails and no artifact is written.
    pub fn run_generate(&self, input: &Path, output: &Path) -> Result<()> {
        let story = Self::load_story(input)?;

        let registry = SpeakerRegistry::load_or_default(&self.config.assets_dir);
        let name_map = NameMap::load_or_default(&self.config.assets_dir);
        debug!(
            "Loaded {} speakers, {} name patterns (fallback '{}')",
            registry.items.len(),
            name_map.patterns.len(),
            name_map.fallback
        );

        let script = self.generate_with_progress(&story, &registry, &name_map)?;
        let unresolved = script.sorted_unresolved();

        if !unresolved.is_empty() {
            if self.config.generation.enforce_known {
                return Err(anyhow!(
                    "Unresolved speakers found:\n  {}",
                    unresolved.join("\n  ")
                ));
            }
            warn!("Unresolved speakers found:");
            for speaker in &unresolved {
                warn!("  {speaker}");
            }
        }

        FileManager::write_json_pretty(output, &script.lines)?;
        self.write_report(input, output, &script, &unresolved)?;

        info!("Generated {} TTS lines → {:?}", script.lines.len(), output);
        Ok(())
    }

    /// Generate lines with a per-scene progress bar.
    fn generate_with_progress(
        &self,
        story: &Story,
        registry: &SpeakerRegistry,
        name_map: &NameMap,
    ) -> Result<GeneratedScript> {
        let cues = self.config.reporting_verbs();
        let builder = LineBuilder::new(&cues, self.config.generation.max_chars)?;

        let progress = ProgressBar::new(story.scenes.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("{bar:30} {pos}/{len} scenes {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut lines = Vec::new();
        let mut unresolved = HashSet::new();
        let mut counter: usize = 1;

        for scene in &story.scenes {
            progress.set_message(scene.id.clone());
            lines.extend(builder.build_scene(scene, registry, name_map, &mut counter, &mut unresolved));
            progress.inc(1);
        }
        progress.finish_and_clear();

        Ok(GeneratedScript { lines, unresolved })
    }

    /// Validate one story document. Returns whether it passed.
    pub fn run_validate(&self, story_path: &Path) -> Result<bool> {
        let content = FileManager::read_to_string(story_path)?;
        let document: serde_json::Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse story JSON: {story_path:?}"))?;

        let report = StoryValidator::new().validate(&document);
        for issue in report.warnings() {
            warn!("{:?} {}: {}", story_path, issue.path, issue.message);
        }
        for issue in report.errors() {
            warn!("{:?} {}: {}", story_path, issue.path, issue.message);
        }

        if report.passed() {
            info!("✓ {story_path:?} is valid");
        } else {
            info!("✗ {story_path:?} is invalid ({} errors)", report.errors().len());
        }
        Ok(report.passed())
    }

    /// Validate every JSON document under a directory.
    /// Returns (passed, failed) counts.
    ///
    /// A document that cannot be read or parsed counts as failed; the batch
    /// always continues to the next file.
    pub fn run_validate_all(&self, dir: &Path) -> Result<(usize, usize)> {
        let files = FileManager::find_files(dir, "json")?;
        if files.is_empty() {
            warn!("No JSON documents found under {dir:?}");
            return Ok((0, 0));
        }

        let mut passed = 0;
        let mut failed = 0;
        for file in files {
            match self.run_validate(&file) {
                Ok(true) => passed += 1,
                Ok(false) => failed += 1,
                Err(e) => {
                    warn!("✗ {file:?} could not be validated: {e}");
                    failed += 1;
                }
            }
        }

        info!("Validated {} documents: {passed} passed, {failed} failed", passed + failed);
        Ok((passed, failed))
    }

    /// Suggest speaker IDs and name-map patterns missing for a story.
    ///
    /// Scans dialogue speaker fields plus verb-cue adjacent names in all
    /// text content, then reports what neither the registry nor the name
    /// map covers. Output goes to stdout so it can be piped into registry
    /// editing.
    pub fn run_suggest_missing(&self, story_path: &Path) -> Result<()> {
        let story = Self::load_story(story_path)?;
        let registry = SpeakerRegistry::load_or_default(&self.config.assets_dir);
        let name_map = NameMap::load_or_default(&self.config.assets_dir);

        let cues = self.config.reporting_verbs();
        let mentions = collect_speaker_mentions(&story, &cues);

        let mut missing_speakers = Vec::new();
        let mut missing_patterns = Vec::new();

        for mention in &mentions {
            if !registry.contains(mention) {
                missing_speakers.push(mention.clone());
            }

            let covered = name_map.patterns.iter().any(|entry| {
                regex::RegexBuilder::new(&entry.pattern)
                    .case_insensitive(true)
                    .build()
                    .map(|p| p.is_match(mention))
                    .unwrap_or(false)
            });
            let is_target = name_map.patterns.iter().any(|entry| &entry.speaker == mention);
            if !covered && !is_target {
                missing_patterns.push(mention.clone());
            }
        }

        if missing_speakers.is_empty() && missing_patterns.is_empty() {
            println!("# All speakers and names are covered");
            return Ok(());
        }

        if !missing_speakers.is_empty() {
            println!("# Missing speaker IDs (add to speakers registry):");
            for speaker in &missing_speakers {
                println!("{speaker}");
            }
        }
        if !missing_patterns.is_empty() {
            println!("# Missing name mappings (add patterns):");
            for name in &missing_patterns {
                println!("{name}");
            }
        }
        Ok(())
    }

    /// Load a story document; any failure here is fatal for the run.
    fn load_story(input: &Path) -> Result<Story> {
        let content = FileManager::read_to_string(input)?;
        Story::from_json(&content)
            .with_context(|| format!("Failed to parse story JSON: {input:?}"))
    }

    /// Write the run report next to the output artifact.
    fn write_report(
        &self,
        input: &Path,
        output: &Path,
        script: &GeneratedScript,
        unresolved: &[String],
    ) -> Result<()> {
        let report = RunReport {
            generated_at: current_timestamp(),
            input: input.display().to_string(),
            line_count: script.lines.len(),
            unresolved,
        };

        let mut report_path = output.as_os_str().to_owned();
        report_path.push(".report.json");
        FileManager::write_json_pretty(Path::new(&report_path), &report)
    }
}

/// Collect candidate speaker mentions from a story: every dialogue speaker
/// field plus capitalizable words adjacent to a reporting verb in text,
/// summary and visual notes. Sorted for deterministic output.
fn collect_speaker_mentions(story: &Story, cues: &ReportingVerbs) -> BTreeSet<String> {
    let mut mentions = BTreeSet::new();

    for scene in &story.scenes {
        for item in &scene.dialogue {
            if !item.speaker.trim().is_empty() {
                mentions.insert(item.speaker.clone());
            }
        }
    }

    if cues.is_empty() {
        return mentions;
    }

    let verbs = cues.verb_alternation();
    let adjacent = [
        format!(r"(?i)(\w+)\s+{verbs}"),
        format!(r"(?i){verbs}\s+(\w+)"),
    ];
    let patterns: Vec<Regex> = adjacent.iter().filter_map(|p| Regex::new(p).ok()).collect();

    let mut scan = |text: &str| {
        for pattern in &patterns {
            for caps in pattern.captures_iter(text) {
                if let Some(name) = caps.get(1) {
                    mentions.insert(name.as_str().to_string());
                }
            }
        }
    };

    for scene in &story.scenes {
        for item in &scene.dialogue {
            scan(&item.text);
        }
        if let Some(summary) = &scene.summary {
            scan(summary);
        }
        if let Some(notes) = &scene.visual_notes {
            scan(notes);
        }
    }

    mentions
}
