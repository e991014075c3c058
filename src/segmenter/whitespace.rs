use super::{CutMode, Segmenter};

/// Splits on Unicode whitespace
/// Both cut modes give the same result.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceSegmenter;

impl WhitespaceSegmenter {
    pub fn new() -> Self {
        WhitespaceSegmenter
    }
}

impl Segmenter for WhitespaceSegmenter {
    fn cut<'a>(&'a self, text: &'a str, _mode: CutMode) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        Box::new(text.split_whitespace())
    }
}
