use std::{cmp::Ordering, fmt, ops::Deref};

use serde::{Deserialize, Serialize};

/// A ranked tag: token text and its TF-IDF weight
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Segment {
    text: String,
    weight: f64,
}

impl Segment {
    pub fn new(text: impl Into<String>, weight: f64) -> Self {
        Self { text: text.into(), weight }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Ranking order
    /// Higher weight first; equal weights fall back to ascending text.
    /// Total for any non-NaN weights.
    #[inline]
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        if self.weight == other.weight {
            self.text.cmp(&other.text)
        } else {
            other.weight.total_cmp(&self.weight)
        }
    }
}

impl From<(String, f64)> for Segment {
    fn from((text, weight): (String, f64)) -> Self {
        Self { text, weight }
    }
}

/// Ordered collection of `Segment`s returned by the extractors
#[derive(Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(transparent)]
pub struct Segments {
    pub list: Vec<Segment>,
}

impl Segments {
    pub fn new(list: Vec<Segment>) -> Self {
        Segments { list }
    }

    /// Sort into ranking order (see `Segment::rank_cmp`)
    pub fn sort_by_weight(&mut self) -> &mut Self {
        self.list.sort_by(Segment::rank_cmp);
        self
    }

    /// Keep the first `top_k` entries
    /// A negative `top_k` keeps everything.
    pub fn truncate_top_k(&mut self, top_k: isize) -> &mut Self {
        if let Ok(k) = usize::try_from(top_k) {
            self.list.truncate(k);
        }
        self
    }

    /// Iterate over the tag texts in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.list.iter().map(Segment::text)
    }

    pub fn into_vec(self) -> Vec<Segment> {
        self.list
    }
}

impl Deref for Segments {
    type Target = [Segment];

    fn deref(&self) -> &Self::Target {
        &self.list
    }
}

impl IntoIterator for Segments {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}

impl<'a> IntoIterator for &'a Segments {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.iter()
    }
}

impl FromIterator<Segment> for Segments {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Segments { list: iter.into_iter().collect() }
    }
}

impl fmt::Debug for Segments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            // one tag per line
            writeln!(f, "Segments [")?;
            for seg in &self.list {
                writeln!(f, "    {:?}: {:.6}", seg.text, seg.weight)?;
            }
            write!(f, "]")
        } else {
            f.debug_list()
                .entries(self.list.iter().map(|s| (&s.text, s.weight)))
                .finish()
        }
    }
}

impl fmt::Display for Segments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for seg in &self.list {
            writeln!(f, "{}\t{}", seg.weight, seg.text)?;
        }
        Ok(())
    }
}
