//! Reading documents and query files into line lists.

use crate::interface::{LineFindError, LineFindResult};
use std::fs;
use std::io;
use std::path::Path;

/// Read a file into lines, keeping empty lines and their order.
/// Bytes that are not valid UTF-8 become U+FFFD instead of failing the whole
/// file. A leading byte-order mark is dropped, a trailing `\r` is stripped
/// from each line, and a final newline does not produce an extra empty line.
pub fn read_all_lines(path: &Path) -> io::Result<Vec<String>> {
    let bytes = fs::read(path)?;
    Ok(split_lines(&decode_lossy(&bytes)))
}

/// Decode bytes as UTF-8, replacing invalid sequences and dropping a BOM.
pub fn decode_lossy(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    match text.strip_prefix(BOM) {
        Some(rest) => rest.to_owned(),
        None => text.into_owned(),
    }
}

const BOM: char = '\u{feff}';

pub(crate) fn split_lines(contents: &str) -> Vec<String> {
    contents.lines().map(str::to_owned).collect()
}

/// Load the document to search. Unreadable files and files without a single
/// line are both rejected.
pub fn load_document(path: &Path) -> LineFindResult<Vec<String>> {
    let unreadable = |reason: String| LineFindError::DocumentUnreadable {
        path: path.to_path_buf(),
        reason,
    };
    let lines = read_all_lines(path).map_err(|e| unreadable(e.to_string()))?;
    if lines.is_empty() {
        return Err(unreadable("file has no lines".to_string()));
    }
    log::debug!("loaded {} document lines from {}", lines.len(), path.display());
    Ok(lines)
}

/// Load a file of queries, one per line.
pub fn load_queries(path: &Path) -> LineFindResult<Vec<String>> {
    let unreadable = |reason: String| LineFindError::QuerySourceUnreadable {
        path: path.to_path_buf(),
        reason,
    };
    let lines = read_all_lines(path).map_err(|e| unreadable(e.to_string()))?;
    if lines.is_empty() {
        return Err(unreadable("file has no lines".to_string()));
    }
    log::debug!("loaded {} queries from {}", lines.len(), path.display());
    Ok(lines)
}
