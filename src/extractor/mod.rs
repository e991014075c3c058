pub mod idf;
pub mod segment;
pub mod stopword;

use std::{fmt, path::Path, sync::Arc};

use ahash::RandomState;
use indexmap::{IndexMap, IndexSet};
use rayon::prelude::*;
use tracing::debug;

use crate::{
    config::{DigitPolicy, ExtractorConfig},
    error::Result,
    segmenter::{CutMode, DictSegmenter, Segmenter},
    utils::classify::is_digit,
};

pub use idf::Idf;
pub use segment::{Segment, Segments};
pub use stopword::StopWord;

/// TF-IDF tag extractor
///
/// Holds shared, read-only references to a segmenter, an IDF table and a
/// stop word set. The same `Arc`s can back any number of extractors, and a
/// single extractor can score sentences from many threads at once.
///
/// Dictionaries are replaced wholesale by the `load_*` methods and only on
/// success; a failed load leaves the previous dictionary in place.
pub struct TagExtractor<S = DictSegmenter>
where
    S: Segmenter,
{
    segmenter: Arc<S>,
    idf: Arc<Idf>,
    stop_word: Arc<StopWord>,
    config: ExtractorConfig,
}

impl<S: Segmenter> Clone for TagExtractor<S> {
    fn clone(&self) -> Self {
        Self {
            segmenter: Arc::clone(&self.segmenter),
            idf: Arc::clone(&self.idf),
            stop_word: Arc::clone(&self.stop_word),
            config: self.config.clone(),
        }
    }
}

impl<S: Segmenter> fmt::Debug for TagExtractor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagExtractor")
            .field("idf_entries", &self.idf.len())
            .field("idf_median", &self.idf.median())
            .field("stop_words", &self.stop_word.len())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for TagExtractor<DictSegmenter> {
    /// Empty segmentation dictionary, empty IDF table, built-in stop words
    fn default() -> Self {
        Self::new(
            Arc::new(DictSegmenter::new()),
            Arc::new(Idf::new()),
            Arc::new(StopWord::new()),
        )
    }
}

impl TagExtractor<DictSegmenter> {
    /// Create an extractor from a segmentation dictionary file
    /// IDF table starts empty and stop words start at the built-in defaults.
    pub fn from_dictionary<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut extractor = Self::default();
        extractor.load_dictionary(path)?;
        Ok(extractor)
    }

    /// Replace the segmentation dictionary
    pub fn load_dictionary<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.segmenter = Arc::new(DictSegmenter::load_dictionary(path)?);
        Ok(())
    }
}

impl<S> TagExtractor<S>
where
    S: Segmenter,
{
    /// Create a new extractor from shared dictionaries
    pub fn new(segmenter: Arc<S>, idf: Arc<Idf>, stop_word: Arc<StopWord>) -> Self {
        Self {
            segmenter,
            idf,
            stop_word,
            config: ExtractorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ExtractorConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the IDF table from a file
    pub fn load_idf<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.idf = Arc::new(Idf::load_dictionary(path)?);
        Ok(())
    }

    /// Replace the stop word set from a file
    /// The file's words are added on top of the built-in defaults.
    pub fn load_stop_words<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.stop_word = Arc::new(StopWord::load_dictionary(path)?);
        Ok(())
    }

    pub fn set_segmenter(&mut self, segmenter: Arc<S>) {
        self.segmenter = segmenter;
    }

    pub fn set_idf(&mut self, idf: Arc<Idf>) {
        self.idf = idf;
    }

    pub fn set_stop_word(&mut self, stop_word: Arc<StopWord>) {
        self.stop_word = stop_word;
    }

    pub fn segmenter(&self) -> &Arc<S> {
        &self.segmenter
    }

    pub fn idf(&self) -> &Arc<Idf> {
        &self.idf
    }

    pub fn stop_word(&self) -> &Arc<StopWord> {
        &self.stop_word
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Precise cut of `sentence`, trimmed, with short tokens and stop words removed
    fn candidates<'a>(&'a self, sentence: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        let min_chars = self.config.min_token_chars;
        self.segmenter
            .cut(sentence, CutMode::Precise)
            .map(str::trim)
            .filter(move |w| w.chars().count() >= min_chars)
            .filter(move |w| !self.stop_word.is_stop_word(w))
    }

    /// Occurrence counts divided by their sum, in first-seen order
    /// Empty when nothing survives filtering.
    fn normalized_freq<'a>(&'a self, sentence: &'a str) -> IndexMap<&'a str, f64, RandomState> {
        let mut freq: IndexMap<&str, f64, RandomState> = IndexMap::with_hasher(RandomState::new());
        for w in self.candidates(sentence) {
            *freq.entry(w).or_insert(0.0) += 1.0;
        }
        if freq.is_empty() {
            return freq;
        }
        let total: f64 = freq.values().sum();
        for v in freq.values_mut() {
            *v /= total;
        }
        freq
    }

    /// Normalized term frequencies of the surviving tokens of `sentence`
    /// These are the TF factors `extract_tags` multiplies by IDF.
    pub fn term_frequencies(&self, sentence: &str) -> Vec<(String, f64)> {
        self.normalized_freq(sentence)
            .into_iter()
            .map(|(w, f)| (w.to_string(), f))
            .collect()
    }

    /// Extract the `top_k` highest weighted tags from `sentence`
    ///
    /// weight = idf * tf, where tf is the token's share of all surviving
    /// tokens and idf falls back to the table median for unknown tokens.
    ///
    /// # Arguments
    /// * `sentence` - text to analyze
    /// * `top_k` - maximum number of tags; negative returns all
    pub fn extract_tags(&self, sentence: &str, top_k: isize) -> Segments {
        let freq = self.normalized_freq(sentence);
        let distinct = freq.len();
        let mut tags: Segments = freq
            .into_iter()
            .map(|(w, f)| Segment::new(w, self.idf.frequency_or_median(w) * f))
            .collect();
        tags.sort_by_weight().truncate_top_k(top_k);
        debug!(distinct, returned = tags.len(), top_k, "extract_tags");
        tags
    }

    /// Extract tags with numeric tokens suppressed and no length normalization
    ///
    /// Differences from `extract_tags`:
    /// - purely numeric tokens are skipped according to `DigitPolicy`
    /// - every distinct token counts once, so weight = idf
    /// - tokens missing from the IDF table are dropped instead of using the median
    ///
    /// Also returns every surviving token in the order it appeared, duplicates included.
    ///
    /// # Arguments
    /// * `sentence` - text to analyze
    /// * `top_k` - maximum number of tags; negative returns all
    pub fn cn_extract_tags(&self, sentence: &str, top_k: isize) -> (Segments, Vec<String>) {
        let mut present: IndexSet<&str, RandomState> = IndexSet::with_hasher(RandomState::new());
        let mut words = Vec::new();
        let mut num_count = 0usize;
        for w in self.candidates(sentence) {
            if is_digit(w) {
                num_count += 1;
                let skip = match self.config.digit_policy {
                    DigitPolicy::SuppressAll => true,
                    DigitPolicy::AllowFirst => num_count > 1,
                };
                if skip {
                    continue;
                }
            }
            words.push(w.to_string());
            present.insert(w);
        }
        let distinct = present.len();
        let mut tags: Segments = present
            .into_iter()
            .filter_map(|w| self.idf.frequency(w).map(|idf| Segment::new(w, idf)))
            .collect();
        tags.sort_by_weight().truncate_top_k(top_k);
        debug!(distinct, numeric = num_count, returned = tags.len(), top_k, "cn_extract_tags");
        (tags, words)
    }

    /// `extract_tags` over many sentences in parallel
    /// Output order follows `sentences`.
    pub fn extract_tags_batch<T>(&self, sentences: &[T], top_k: isize) -> Vec<Segments>
    where
        T: AsRef<str> + Sync,
    {
        sentences
            .par_iter()
            .map(|s| self.extract_tags(s.as_ref(), top_k))
            .collect()
    }

    /// `cn_extract_tags` over many sentences in parallel
    /// Output order follows `sentences`.
    pub fn cn_extract_tags_batch<T>(&self, sentences: &[T], top_k: isize) -> Vec<(Segments, Vec<String>)>
    where
        T: AsRef<str> + Sync,
    {
        sentences
            .par_iter()
            .map(|s| self.cn_extract_tags(s.as_ref(), top_k))
            .collect()
    }
}
