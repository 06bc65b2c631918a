//! linefind public interface
//!
//! Shared types used by the scoring engine, the loader and the CLI driver.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// ENUMS
// ═══════════════════════════════════════════════════════════════════════════════

/// How the sub-scores of a containment measurement are combined.
///
/// `Full` averages four terms: word containment, character containment,
/// longest shared run of the whole line, and the average best shared run per
/// query word. `WordWeighted` skips the shared-run terms and weights word
/// containment twice as heavily as character containment.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringPolicy {
    #[default]
    Full,
    WordWeighted,
}

impl ScoringPolicy {
    /// Combine the sub-scores into a single score.
    /// `shared` is only evaluated for `Full`, since the shared-run terms are
    /// the expensive part of a measurement.
    pub(crate) fn combine(
        self,
        words: f64,
        chars: f64,
        shared: impl FnOnce() -> (f64, f64),
    ) -> f64 {
        match self {
            ScoringPolicy::Full => {
                let (full_shared, word_shared) = shared();
                (words + chars + full_shared + word_shared) / 4.0
            }
            ScoringPolicy::WordWeighted => (2.0 * words + chars) / 3.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScoringPolicy::Full => "full",
            ScoringPolicy::WordWeighted => "word-weighted",
        }
    }
}

impl fmt::Display for ScoringPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringPolicy {
    type Err = LineFindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(ScoringPolicy::Full),
            "word-weighted" | "word_weighted" => Ok(ScoringPolicy::WordWeighted),
            other => Err(LineFindError::InvalidConfig(format!(
                "unknown scoring policy {other:?} (expected \"full\" or \"word-weighted\")"
            ))),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RECORDS (Structs)
// ═══════════════════════════════════════════════════════════════════════════════

/// The best line found for a query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineMatch {
    /// 0-based index into the original line list, empty lines included
    pub line_index: usize,
    /// Containment score, roughly in [-1, 1]; exactly 1.0 for an exact match
    pub score: f64,
}

impl LineMatch {
    pub fn is_exact(&self) -> bool {
        self.score == 1.0
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ERRORS
// ═══════════════════════════════════════════════════════════════════════════════

/// Error type for linefind operations
#[derive(Debug, Error)]
pub enum LineFindError {
    #[error("Could not open source file {}: {reason}", .path.display())]
    DocumentUnreadable { path: PathBuf, reason: String },
    #[error("Could not open input word set file {}: {reason}", .path.display())]
    QuerySourceUnreadable { path: PathBuf, reason: String },
    #[error("Document has no non-empty lines to search")]
    EmptyCorpus,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Operation cancelled")]
    Cancelled,
}

pub type LineFindResult<T> = Result<T, LineFindError>;
