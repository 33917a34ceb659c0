/*!
 * Script generation core: speaker canonicalization and text segmentation.
 *
 * The pipeline is heuristic and degrades instead of failing: unattributed or
 * ambiguous text stays narration, unknown speakers fall back to the default
 * speaker and are reported as diagnostics.
 *
 * Submodules:
 * - `cues`: injected reporting-verb vocabulary
 * - `quotes`: quote extraction from narration text
 * - `segment`: narration/quote chunking with a consuming tail cursor
 * - `canonical`: raw-mention → canonical speaker resolution
 * - `builder`: scene walk, line numbering, diagnostics
 */

pub use self::builder::{GeneratedScript, LineBuilder, Unresolved};
pub use self::canonical::{Resolution, resolve};
pub use self::cues::ReportingVerbs;
pub use self::quotes::{ExtractedQuote, QuoteExtractor};
pub use self::segment::{Chunk, Segmenter, TailCursor};

pub mod builder;
pub mod canonical;
pub mod cues;
pub mod quotes;
pub mod segment;
