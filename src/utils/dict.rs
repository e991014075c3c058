use std::{fs::File, io::{BufRead, BufReader}, path::Path};

use crate::error::{Result, TaggerError};

/// Label used for dictionaries that do not come from a file
pub const READER_SOURCE: &str = "<reader>";

/// Open a dictionary file for buffered reading
pub fn open(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| TaggerError::Io { path: path.to_path_buf(), source })
}

/// Walk a line-oriented dictionary
/// Each non-blank line is trimmed and split on whitespace before being handed to `f`
/// together with its 1-based line number.
///
/// # Arguments
/// * `reader` - dictionary source
/// * `path` - source name used in error messages
/// * `f` - called once per non-blank line
pub fn for_each_line<R, F>(reader: R, path: &Path, mut f: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(usize, &[&str]) -> Result<()>,
{
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| TaggerError::Io { path: path.to_path_buf(), source })?;
        // utf-8 BOM
        let line = if idx == 0 { line.trim_start_matches('\u{feff}') } else { line.as_str() };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        f(idx + 1, &fields)?;
    }
    Ok(())
}

/// Build a parse error for `path:line`
pub fn parse_error(path: &Path, line: usize, message: impl Into<String>) -> TaggerError {
    TaggerError::Parse {
        path: path.to_path_buf(),
        line,
        message: message.into(),
    }
}
