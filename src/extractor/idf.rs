use std::{collections::HashMap, io::BufRead, path::Path};

use ahash::RandomState;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{error::Result, utils::dict};

/// IDF table
/// Maps a token to its precomputed inverse document frequency and keeps the
/// median of all stored values as the fallback weight for unseen tokens.
///
/// The median is fixed when the table is built.
/// An empty table reports every token as missing and has a median of `0.0`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Idf {
    table: HashMap<String, f64, RandomState>,
    median: f64,
}

impl Idf {
    /// Create an empty table
    pub fn new() -> Self {
        Self {
            table: HashMap::with_hasher(RandomState::new()),
            median: 0.0,
        }
    }

    /// Build a table from `(token, idf)` pairs
    /// Later pairs overwrite earlier ones with the same token.
    /// Non-finite values (NaN, ±inf) are skipped.
    pub fn from_pairs<I, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, f64)>,
        T: Into<String>,
    {
        let mut idf = Self::new();
        for (token, value) in pairs.into_iter().filter(|(_, v)| v.is_finite()) {
            idf.table.insert(token.into(), value);
        }
        idf.median = Self::median_of(&idf.table);
        idf
    }

    /// Load an IDF file with one `token idf` pair per line
    pub fn load_dictionary<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let idf = Self::parse(dict::open(path)?, path)?;
        info!(path = %path.display(), entries = idf.len(), median = idf.median, "Loaded IDF table");
        Ok(idf)
    }

    /// Same as `load_dictionary` but reads from any buffered source
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        Self::parse(reader, Path::new(dict::READER_SOURCE))
    }

    fn parse<R: BufRead>(reader: R, path: &Path) -> Result<Self> {
        let mut pairs = Vec::new();
        dict::for_each_line(reader, path, |line, fields| {
            let raw = fields
                .get(1)
                .ok_or_else(|| dict::parse_error(path, line, format!("missing idf value for `{}`", fields[0])))?;
            let value: f64 = raw
                .parse()
                .map_err(|_| dict::parse_error(path, line, format!("invalid idf value `{raw}`")))?;
            if !value.is_finite() {
                return Err(dict::parse_error(path, line, format!("idf value `{raw}` is not finite")));
            }
            pairs.push((fields[0].to_string(), value));
            Ok(())
        })?;
        Ok(Self::from_pairs(pairs))
    }

    /// Element at `len / 2` of the ascending-sorted values
    fn median_of(table: &HashMap<String, f64, RandomState>) -> f64 {
        if table.is_empty() {
            return 0.0;
        }
        let mut values: Vec<f64> = table.values().copied().collect();
        values.sort_by(|a, b| a.total_cmp(b));
        values[values.len() / 2]
    }

    /// Look up the IDF of `token`
    /// `None` means the caller decides the fallback (see `median`).
    #[inline]
    pub fn frequency(&self, token: &str) -> Option<f64> {
        self.table.get(token).copied()
    }

    /// Fallback weight for tokens missing from the table
    #[inline]
    pub fn median(&self) -> f64 {
        self.median
    }

    /// IDF of `token`, or the median when it is missing
    #[inline]
    pub fn frequency_or_median(&self, token: &str) -> f64 {
        self.frequency(token).unwrap_or(self.median)
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.table.contains_key(token)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
