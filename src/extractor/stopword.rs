use std::{collections::HashSet, io::BufRead, path::Path};

use ahash::RandomState;
use serde::{Deserialize, Serialize};
use stop_words::LANGUAGE;
use tracing::info;

use crate::{error::Result, utils::dict};

/// Built-in stop words every fresh `StopWord` starts with
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "of", "is", "and", "to", "in", "that", "we", "for", "an", "are",
    "by", "be", "as", "on", "with", "can", "if", "from", "which", "you", "it",
    "this", "then", "at", "have", "all", "not", "one", "has", "or",
];

/// StopWord set
/// Tokens in this set are never scored.
/// Matching is exact (case-sensitive).
///
/// Treated as frozen once handed to a `TagExtractor`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct StopWord {
    words: HashSet<String, RandomState>,
}

impl Default for StopWord {
    fn default() -> Self {
        Self::new()
    }
}

impl StopWord {
    /// Create a StopWord set holding the built-in defaults
    pub fn new() -> Self {
        Self::from_words(DEFAULT_STOP_WORDS)
    }

    /// Create an empty set (filters nothing)
    pub fn empty() -> Self {
        Self {
            words: HashSet::with_hasher(RandomState::new()),
        }
    }

    /// Create a set from a custom list
    pub fn from_words<T>(words: &[T]) -> Self
    where
        T: AsRef<str>,
    {
        let mut stop_word = Self::empty();
        stop_word.add_words(words);
        stop_word
    }

    /// Create a set from the `stop-words` crate list for `language`
    pub fn for_language(language: LANGUAGE) -> Self {
        let words: Vec<String> = stop_words::get(language).iter().map(|s| s.to_string()).collect();
        Self::from_words(&words)
    }

    /// Load a stop word file, one word per line
    /// The loaded words are added to the built-in defaults.
    pub fn load_dictionary<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let stop_word = Self::parse(dict::open(path)?, path)?;
        info!(path = %path.display(), words = stop_word.len(), "Loaded stop words");
        Ok(stop_word)
    }

    /// Same as `load_dictionary` but reads from any buffered source
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        Self::parse(reader, Path::new(dict::READER_SOURCE))
    }

    fn parse<R: BufRead>(reader: R, path: &Path) -> Result<Self> {
        let mut stop_word = Self::new();
        dict::for_each_line(reader, path, |_, fields| {
            stop_word.add_word(fields[0]);
            Ok(())
        })?;
        Ok(stop_word)
    }

    /// Add a word
    #[inline]
    pub fn add_word(&mut self, word: &str) -> &mut Self {
        self.words.insert(word.to_string());
        self
    }

    /// Add multiple words
    pub fn add_words<T>(&mut self, words: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for word in words {
            self.add_word(word.as_ref());
        }
        self
    }

    /// Check whether `token` is a stop word
    #[inline]
    pub fn is_stop_word(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
