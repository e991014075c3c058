use std::{collections::{HashMap, VecDeque}, io::BufRead, path::Path};

use ahash::RandomState;
use tracing::info;

use crate::{error::{Result, TaggerError}, utils::dict};

use super::{CutMode, Segmenter};

/// Characters that may appear inside a dictionary-cut block besides alphanumerics
const BLOCK_PUNCT: &str = "+#&._%-";

/// Prefix-dictionary segmenter
/// Builds a DAG of every dictionary word starting at each character and
/// picks the path with the highest total log probability.
/// Characters with no dictionary match are cut singly, except that runs of
/// unmatched ASCII letters and digits are kept together.
///
/// Dictionary lines look like `word [freq [tag]]`; freq defaults to 1.
#[derive(Debug, Clone)]
pub struct DictSegmenter {
    /// word -> frequency; every proper prefix of a word is present with 0
    freq: HashMap<String, u64, RandomState>,
    /// sum of all word frequencies
    total: u64,
    /// number of words (prefix-only entries excluded)
    words: usize,
}

impl Default for DictSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl DictSegmenter {
    /// Create a segmenter with an empty dictionary
    pub fn new() -> Self {
        Self {
            freq: HashMap::with_hasher(RandomState::new()),
            total: 0,
            words: 0,
        }
    }

    /// Load a segmentation dictionary file
    /// A file with no entries is an error.
    pub fn load_dictionary<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let seg = Self::parse(dict::open(path)?, path)?;
        info!(path = %path.display(), words = seg.words, total = seg.total, "Loaded segmentation dictionary");
        Ok(seg)
    }

    /// Same as `load_dictionary` but reads from any buffered source
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        Self::parse(reader, Path::new(dict::READER_SOURCE))
    }

    fn parse<R: BufRead>(reader: R, path: &Path) -> Result<Self> {
        let mut seg = Self::new();
        dict::for_each_line(reader, path, |line, fields| {
            let freq = match fields.get(1) {
                Some(raw) => raw
                    .parse::<u64>()
                    .map_err(|_| dict::parse_error(path, line, format!("invalid frequency `{raw}`")))?,
                None => 1,
            };
            let old = seg.freq.get(fields[0]).copied().unwrap_or(0);
            if (seg.total - old).checked_add(freq).is_none() {
                return Err(dict::parse_error(path, line, "total word frequency overflows u64"));
            }
            seg.add_word(fields[0], freq);
            Ok(())
        })?;
        if seg.words == 0 {
            return Err(TaggerError::EmptyDictionary { path: path.to_path_buf() });
        }
        Ok(seg)
    }

    /// Add or replace a word
    /// The running total saturates at `u64::MAX`.
    pub fn add_word(&mut self, word: &str, freq: u64) -> &mut Self {
        if word.is_empty() {
            return self;
        }
        match self.freq.get_mut(word) {
            Some(old) => {
                if *old == 0 && freq > 0 {
                    self.words += 1;
                } else if *old > 0 && freq == 0 {
                    self.words -= 1;
                }
                self.total = (self.total - *old).saturating_add(freq);
                *old = freq;
            }
            None => {
                self.freq.insert(word.to_string(), freq);
                self.total = self.total.saturating_add(freq);
                if freq > 0 {
                    self.words += 1;
                }
            }
        }
        for (idx, _) in word.char_indices().skip(1) {
            self.freq.entry(word[..idx].to_string()).or_insert(0);
        }
        self
    }

    /// Frequency of a dictionary word
    #[inline]
    pub fn word_freq(&self, word: &str) -> Option<u64> {
        self.freq.get(word).copied().filter(|&f| f > 0)
    }

    #[inline]
    pub fn contains_word(&self, word: &str) -> bool {
        self.word_freq(word).is_some()
    }

    /// Number of dictionary words
    #[inline]
    pub fn len(&self) -> usize {
        self.words
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Sum of all word frequencies
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Cut one block of word characters and push the tokens to `out`
    fn cut_block<'t>(&self, block: &'t str, mode: CutMode, out: &mut VecDeque<&'t str>) {
        let offsets: Vec<usize> = block
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(block.len()))
            .collect();
        let n = offsets.len() - 1;
        let route = self.route(block, &offsets);

        let mut ascii_run: Option<usize> = None;
        let mut x = 0;
        while x < n {
            let y = route[x];
            let word = &block[offsets[x]..offsets[y]];
            if y - x == 1 && word.as_bytes()[0].is_ascii_alphanumeric() {
                ascii_run.get_or_insert(x);
            } else {
                if let Some(start) = ascii_run.take() {
                    self.emit(&block[offsets[start]..offsets[x]], mode, out);
                }
                self.emit(word, mode, out);
            }
            x = y;
        }
        if let Some(start) = ascii_run {
            self.emit(&block[offsets[start]..], mode, out);
        }
    }

    /// Best end position (exclusive, in chars) of the word starting at each char
    fn route(&self, block: &str, offsets: &[usize]) -> Vec<usize> {
        let n = offsets.len() - 1;
        let log_total = (self.total.max(1) as f64).ln();
        // (score, end)
        let mut best: Vec<(f64, usize)> = vec![(0.0, n); n + 1];
        for k in (0..n).rev() {
            let mut pick: Option<(f64, usize)> = None;
            let mut consider = |end: usize, freq: u64| {
                let score = (freq.max(1) as f64).ln() - log_total + best[end].0;
                let better = match pick {
                    None => true,
                    Some((s, e)) => match score.total_cmp(&s) {
                        std::cmp::Ordering::Greater => true,
                        std::cmp::Ordering::Equal => end > e,
                        std::cmp::Ordering::Less => false,
                    },
                };
                if better {
                    pick = Some((score, end));
                }
            };
            // DAG edges from k, walking the prefix entries
            let mut matched = false;
            for end in k + 1..=n {
                match self.freq.get(&block[offsets[k]..offsets[end]]) {
                    Some(&f) if f > 0 => {
                        matched = true;
                        consider(end, f);
                    }
                    Some(_) => {}
                    None => break,
                }
            }
            if !matched {
                consider(k + 1, 1);
            }
            // consider always sets pick at least once
            if let Some(p) = pick {
                best[k] = p;
            }
        }
        best.into_iter().map(|(_, end)| end).collect()
    }

    fn emit<'t>(&self, word: &'t str, mode: CutMode, out: &mut VecDeque<&'t str>) {
        if mode == CutMode::Search {
            let offsets: Vec<usize> = word
                .char_indices()
                .map(|(i, _)| i)
                .chain(std::iter::once(word.len()))
                .collect();
            let len = offsets.len() - 1;
            for gram in [2, 3] {
                if len > gram {
                    for i in 0..=len - gram {
                        let sub = &word[offsets[i]..offsets[i + gram]];
                        if self.contains_word(sub) {
                            out.push_back(sub);
                        }
                    }
                }
            }
        }
        out.push_back(word);
    }
}

#[inline]
fn is_block_char(c: char) -> bool {
    c.is_alphanumeric() || BLOCK_PUNCT.contains(c)
}

/// Byte length of the longest prefix of `text` whose chars all satisfy `pred`
fn prefix_len(text: &str, pred: fn(char) -> bool) -> usize {
    text.char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(text.len(), |(i, _)| i)
}

/// Lazy cut over a text, one block at a time
pub struct DictCut<'a> {
    seg: &'a DictSegmenter,
    rest: &'a str,
    mode: CutMode,
    pending: VecDeque<&'a str>,
}

impl<'a> DictCut<'a> {
    fn fill(&mut self) {
        let text = self.rest;
        let Some(first) = text.chars().next() else { return };
        let end = if is_block_char(first) {
            prefix_len(text, is_block_char)
        } else if first.is_whitespace() {
            prefix_len(text, char::is_whitespace)
        } else {
            first.len_utf8()
        };
        let (head, rest) = text.split_at(end);
        self.rest = rest;
        if is_block_char(first) {
            let seg = self.seg;
            seg.cut_block(head, self.mode, &mut self.pending);
        } else {
            self.pending.push_back(head);
        }
    }
}

impl<'a> Iterator for DictCut<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        loop {
            if let Some(tok) = self.pending.pop_front() {
                return Some(tok);
            }
            if self.rest.is_empty() {
                return None;
            }
            self.fill();
        }
    }
}

impl Segmenter for DictSegmenter {
    fn cut<'a>(&'a self, text: &'a str, mode: CutMode) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        Box::new(DictCut {
            seg: self,
            rest: text,
            mode,
            pending: VecDeque::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg() -> DictSegmenter {
        let mut s = DictSegmenter::new();
        s.add_word("自然", 200)
            .add_word("语言", 300)
            .add_word("自然语言", 100)
            .add_word("处理", 400)
            .add_word("自然语言处理", 50)
            .add_word("我们", 500)
            .add_word("研究", 300);
        s
    }

    fn cut(s: &DictSegmenter, text: &str, mode: CutMode) -> Vec<String> {
        s.cut(text, mode).map(str::to_string).collect()
    }

    #[test]
    fn picks_max_probability_route() {
        let s = seg();
        assert_eq!(cut(&s, "我们研究自然语言处理", CutMode::Precise), vec!["我们", "研究", "自然语言处理"]);
    }

    #[test]
    fn unknown_characters_are_cut_singly() {
        let s = seg();
        assert_eq!(cut(&s, "我们很好", CutMode::Precise), vec!["我们", "很", "好"]);
    }

    #[test]
    fn ascii_runs_stay_together() {
        let s = seg();
        assert_eq!(
            cut(&s, "rust2024 处理 42", CutMode::Precise),
            vec!["rust2024", " ", "处理", " ", "42"]
        );
        assert_eq!(cut(&s, "我们用rust", CutMode::Precise), vec!["我们", "用", "rust"]);
    }

    #[test]
    fn punctuation_and_whitespace_are_tokens() {
        let s = seg();
        assert_eq!(cut(&s, "处理，我们\n\n", CutMode::Precise), vec!["处理", "，", "我们", "\n\n"]);
    }

    #[test]
    fn precise_cut_covers_input() {
        let s = seg();
        let text = "我们 研究自然语言处理, rust2024!";
        assert_eq!(cut(&s, text, CutMode::Precise).concat(), text);
    }

    #[test]
    fn search_mode_adds_inner_words() {
        let s = seg();
        assert_eq!(
            cut(&s, "自然语言处理", CutMode::Search),
            vec!["自然", "语言", "处理", "自然语言处理"]
        );
    }

    #[test]
    fn empty_dictionary_still_cuts() {
        let s = DictSegmenter::new();
        assert_eq!(cut(&s, "the quick fox", CutMode::Precise), vec!["the", " ", "quick", " ", "fox"]);
        assert_eq!(cut(&s, "", CutMode::Precise), Vec::<String>::new());
    }

    #[test]
    fn add_word_replaces_frequency() {
        let mut s = DictSegmenter::new();
        s.add_word("研究", 10).add_word("研究", 30);
        assert_eq!(s.len(), 1);
        assert_eq!(s.total(), 30);
        assert_eq!(s.word_freq("研究"), Some(30));
        // prefixes are not words
        assert_eq!(s.word_freq("研"), None);
    }

    #[test]
    fn parses_dictionary_lines() {
        let s = DictSegmenter::from_reader("我们 500 r\n研究 300\n处理\n".as_bytes()).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.word_freq("处理"), Some(1));
        assert_eq!(s.total(), 801);

        let bad = DictSegmenter::from_reader("我们 many\n".as_bytes());
        assert!(matches!(bad, Err(TaggerError::Parse { line: 1, .. })));

        let empty = DictSegmenter::from_reader("\n\n".as_bytes());
        assert!(matches!(empty, Err(TaggerError::EmptyDictionary { .. })));
    }

    #[test]
    fn frequency_overflow_is_a_load_error() {
        let res = DictSegmenter::from_reader("甲乙 18446744073709551615\n丙丁 2\n".as_bytes());
        assert!(matches!(res, Err(TaggerError::Parse { line: 2, .. })));

        // replacing a word frees its old frequency first
        let s = DictSegmenter::from_reader("甲乙 18446744073709551615\n甲乙 5\n".as_bytes()).unwrap();
        assert_eq!(s.total(), 5);
    }

    #[test]
    fn add_word_saturates_total() {
        let mut s = DictSegmenter::new();
        s.add_word("甲乙", u64::MAX).add_word("丙丁", 2);
        assert_eq!(s.total(), u64::MAX);
        assert_eq!(s.len(), 2);
    }
}
