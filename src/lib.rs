//! This crate extracts the most significant keywords from text using TF-IDF weighting.

pub mod config;
pub mod error;
pub mod extractor;
pub mod segmenter;
pub mod utils;

/// Tag Extractor
/// The top-level struct of this crate.
/// It cuts a sentence into tokens, filters them, and ranks the survivors by
/// TF-IDF weight.
///
/// Internally, it holds:
/// - A segmenter (`Arc<S>`)
/// - An IDF table (`Arc<Idf>`)
/// - A stop word set (`Arc<StopWord>`)
/// - An `ExtractorConfig`
///
/// Two extractors are provided:
/// - `extract_tags`: weight = idf * normalized term frequency, unknown tokens use the IDF median
/// - `cn_extract_tags`: numeric tokens suppressed, every distinct token counts once,
///   unknown tokens dropped; also returns the surviving tokens in order
///
/// Dictionaries are shared and read-only, so one set can back many extractors
/// and each extractor can be used from many threads.
pub use extractor::TagExtractor;

/// IDF Table
/// Maps a token to its inverse document frequency.
/// The median of all values is computed once at load and used as the fallback
/// weight for tokens the table does not know.
pub use extractor::idf::Idf;

/// Stop Word Set
/// Tokens in this set are never scored.
/// Starts from a small built-in English list; files and `stop-words` crate
/// lists can be added.
pub use extractor::stopword::StopWord;

/// Segment and Segments
/// - `Segment`: one ranked tag (text and weight)
/// - `Segments`: ordered result list, highest weight first, ties by ascending text
pub use extractor::segment::{Segment, Segments};

/// Segmentation
/// - `Segmenter`: the trait the extractor cuts text with
/// - `DictSegmenter`: prefix-dictionary segmenter loaded from a word frequency file
/// - `WhitespaceSegmenter`: splits on whitespace, needs no dictionary
pub use segmenter::{CutMode, DictSegmenter, Segmenter, WhitespaceSegmenter};

/// Extractor configuration
pub use config::{DigitPolicy, ExtractorConfig};

/// Error type for dictionary loading
pub use error::{Result, TaggerError};

/// Token classification helpers
pub use utils::classify::{is_digit, is_pure_digit_letters};
