/*!
 * Tests for quote extraction, segmentation, and line building
 */

use anyhow::Result;
use kazkar::registry::{NameMap, SpeakerRegistry};
use kazkar::script::{LineBuilder, QuoteExtractor, ReportingVerbs, Segmenter};
use kazkar::story::Story;

use crate::common;

/// Test that a name-first quote yields speaker and content
#[test]
fn test_extract_withNameFirstQuote_shouldPairSpeakerAndContent() -> Result<()> {
    let extractor = QuoteExtractor::new(&ReportingVerbs::ukrainian())?;

    let quotes = extractor.extract("Ліна сказала: \"Дивись, який туман\"");

    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].speaker, "Ліна");
    assert_eq!(quotes[0].content, "Дивись, який туман");
    Ok(())
}

/// Test that a quote-first shape yields the quote content, not the tail
#[test]
fn test_extract_withQuoteFirstShape_shouldPairContentAndSpeaker() -> Result<()> {
    let extractor = QuoteExtractor::new(&ReportingVerbs::ukrainian())?;

    let quotes = extractor.extract("\"Ого!\" сказала Ліна і пішла далі.");

    assert_eq!(quotes.len(), 1);
    assert_eq!(quotes[0].content, "Ого!");
    assert_eq!(quotes[0].speaker, "Ліна");
    Ok(())
}

/// Test that text without cues produces no quotes
#[test]
fn test_extract_withPlainNarration_shouldReturnNoQuotes() -> Result<()> {
    let extractor = QuoteExtractor::new(&ReportingVerbs::ukrainian())?;
    assert!(extractor.extract("Ранок був тихий і туманний.").is_empty());
    Ok(())
}

/// Test that narration over the budget is wrapped greedily
#[test]
fn test_segment_withLongNarration_shouldWrapUnderBudget() -> Result<()> {
    let segmenter = Segmenter::new(&ReportingVerbs::ukrainian());

    let text = "один два три чотири п'ять шість сім вісім";
    let chunks = segmenter.segment(text, &[], 15);

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(chunk.text.chars().count() <= 15);
        assert!(chunk.speaker.is_none());
    }
    let rejoined: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(rejoined.join(" "), text);
    Ok(())
}

/// Test that a name-first quote is cut out of the narration
#[test]
fn test_segment_withNameFirstQuote_shouldSplitAroundQuote() -> Result<()> {
    let cues = ReportingVerbs::ukrainian();
    let extractor = QuoteExtractor::new(&cues)?;
    let segmenter = Segmenter::new(&cues);

    let text = "Стало тихо. Ліна сказала: \"Ого\" і пішла далі.";
    let quotes = extractor.extract(text);
    let chunks = segmenter.segment(text, &quotes, 220);

    assert!(chunks.iter().any(|c| c.speaker.as_deref() == Some("Ліна") && c.text == "Ого"));
    assert!(chunks.iter().any(|c| c.speaker.is_none() && c.text.contains("Стало тихо.")));
    Ok(())
}

/// Test that the quote branch never splits surrounding narration, even
/// when it exceeds the character budget
#[test]
fn test_segment_withQuoteAndTinyBudget_shouldLeaveNarrationUnsplit() -> Result<()> {
    let cues = ReportingVerbs::ukrainian();
    let extractor = QuoteExtractor::new(&cues)?;
    let segmenter = Segmenter::new(&cues);

    let text = "Довгий туманний вечір опускався на старе місто, \
                і Ліна сказала: \"Ого\". Потім вони ще довго йшли вузькими вуличками додому.";
    let quotes = extractor.extract(text);
    assert_eq!(quotes.len(), 1);

    let chunks = segmenter.segment(text, &quotes, 10);

    assert_eq!(chunks.len(), 3);
    assert!(chunks[0].speaker.is_none());
    assert!(chunks[0].text.chars().count() > 10);
    assert_eq!(chunks[1].speaker.as_deref(), Some("Ліна"));
    assert!(chunks[2].speaker.is_none());
    assert!(chunks[2].text.chars().count() > 10);
    Ok(())
}

/// Test that line IDs keep one global counter across scenes
#[test]
fn test_build_withTwoScenes_shouldNumberLinesGlobally() -> Result<()> {
    let story = Story::from_json(common::sample_story_json())?;
    let builder = LineBuilder::new(&ReportingVerbs::ukrainian(), 220)?;

    let registry = SpeakerRegistry::default();
    let map = NameMap::default();
    let script = builder.build(&story, &registry, &map);

    assert!(!script.lines.is_empty());
    let last = script.lines.last().unwrap();
    assert!(last.id.starts_with("scene-2_"));
    let counters: Vec<usize> = script
        .lines
        .iter()
        .map(|l| l.id.rsplit('_').next().unwrap().parse().unwrap())
        .collect();
    let expected: Vec<usize> = (1..=script.lines.len()).collect();
    assert_eq!(counters, expected);
    assert_eq!(script.lines[0].id, "scene-1_001");
    Ok(())
}

/// Test that unresolved speakers surface as tagged diagnostics
#[test]
fn test_build_withUnknownSpeakers_shouldCollectTaggedDiagnostics() -> Result<()> {
    let story = Story::from_json(common::sample_story_json())?;
    let builder = LineBuilder::new(&ReportingVerbs::ukrainian(), 220)?;

    let script = builder.build(&story, &SpeakerRegistry::default(), &NameMap::default());

    let unresolved = script.sorted_unresolved();
    assert!(unresolved.iter().any(|u| u == "Speaker ID: ghost"));
    assert!(unresolved.iter().any(|u| u.starts_with("Speaker name: ")));
    Ok(())
}

/// Test that seeded registries leave no unresolved speakers for known names
#[test]
fn test_build_withSeededRegistries_shouldResolveKnownSpeakers() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::seed_registries(temp_dir.path())?;

    let story = Story::from_json(common::sample_story_json())?;
    let builder = LineBuilder::new(&ReportingVerbs::ukrainian(), 220)?;

    let registry = SpeakerRegistry::load(temp_dir.path())?;
    let map = NameMap::load(temp_dir.path())?;
    let script = builder.build(&story, &registry, &map);

    let unresolved = script.sorted_unresolved();
    assert!(unresolved.iter().all(|u| !u.contains("lina")));
    assert!(unresolved.iter().all(|u| !u.contains("Ліна")));
    assert!(script.lines.iter().any(|l| l.speaker == "lina"));
    Ok(())
}
