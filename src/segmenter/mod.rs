//! Segmentation collaborators.
//!
//! The extractor only depends on the `Segmenter` trait; it never assumes
//! random access to, or repeated iteration over, a cut.

pub mod dict;
pub mod whitespace;

use serde::{Deserialize, Serialize};

pub use dict::DictSegmenter;
pub use whitespace::WhitespaceSegmenter;

/// How finely a segmenter cuts
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CutMode {
    /// Each character belongs to exactly one token
    #[default]
    Precise,
    /// Precise cut plus shorter dictionary words found inside long tokens
    Search,
}

/// Splits text into candidate tokens
///
/// Implementations must be finite and restartable per call; the returned
/// iterator is consumed once, sequentially.
pub trait Segmenter: Send + Sync {
    /// Lazily cut `text` into tokens borrowed from `text`
    fn cut<'a>(&'a self, text: &'a str, mode: CutMode) -> Box<dyn Iterator<Item = &'a str> + 'a>;
}

impl<S: Segmenter + ?Sized> Segmenter for Box<S> {
    fn cut<'a>(&'a self, text: &'a str, mode: CutMode) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        (**self).cut(text, mode)
    }
}
