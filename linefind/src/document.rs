//! Preprocessed document and the best-line scan.
//!
//! Every non-empty line is fingerprinted once at construction. A search is a
//! linear scan scoring each stored fingerprint against the query; the first
//! exact match ends the scan early, otherwise the highest score wins and ties
//! go to the earliest line.

use crate::interface::{LineFindError, LineFindResult, LineMatch, ScoringPolicy};
use crate::word_set::WordSet;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct Document {
    /// (original line index, fingerprint) for each non-empty line, in source order
    entries: Vec<(usize, WordSet)>,
    source_line_count: usize,
    policy: ScoringPolicy,
}

impl Document {
    /// Fingerprint the non-empty lines, scoring with the default policy.
    pub fn build<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_policy(lines, ScoringPolicy::default())
    }

    pub fn with_policy<I, S>(lines: I, policy: ScoringPolicy) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut source_line_count = 0;
        // Empty lines are skipped but still advance the index
        let entries: Vec<(usize, WordSet)> = lines
            .into_iter()
            .enumerate()
            .inspect(|_| source_line_count += 1)
            .filter(|(_, line)| !line.as_ref().is_empty())
            .map(|(index, line)| (index, WordSet::new(line.as_ref())))
            .collect();

        log::debug!(
            "built document: {} searchable of {} lines, policy={}",
            entries.len(),
            source_line_count,
            policy
        );

        Self {
            entries,
            source_line_count,
            policy,
        }
    }

    /// Number of searchable (non-empty) lines
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of lines the document was built from, empty ones included
    pub fn source_line_count(&self) -> usize {
        self.source_line_count
    }

    pub fn policy(&self) -> ScoringPolicy {
        self.policy
    }

    /// Index of the line that best matches the query text.
    pub fn fuzzy_find(&self, query: &str) -> LineFindResult<usize> {
        self.fuzzy_find_word_set(&WordSet::new(query))
    }

    /// Index of the line that best matches an already fingerprinted query.
    pub fn fuzzy_find_word_set(&self, query: &WordSet) -> LineFindResult<usize> {
        self.best_match(query).map(|m| m.line_index)
    }

    /// Best-matching line and its score.
    pub fn best_match(&self, query: &WordSet) -> LineFindResult<LineMatch> {
        self.scan(query, None)
    }

    /// Like `best_match`, but stops with `Cancelled` once the token fires.
    /// The token is checked before each line is scored.
    pub fn best_match_cancellable(
        &self,
        query: &WordSet,
        token: &CancellationToken,
    ) -> LineFindResult<LineMatch> {
        self.scan(query, Some(token))
    }

    fn scan(&self, query: &WordSet, token: Option<&CancellationToken>) -> LineFindResult<LineMatch> {
        if self.entries.is_empty() {
            return Err(LineFindError::EmptyCorpus);
        }

        let mut best: Option<LineMatch> = None;
        for (line_index, word_set) in &self.entries {
            if token.is_some_and(CancellationToken::is_cancelled) {
                return Err(LineFindError::Cancelled);
            }

            let score = word_set.measure_containment_with(query, self.policy);
            // A perfect match cannot be beaten, stop the search immediately
            if score == 1.0 {
                log::trace!("exact match on line {line_index}");
                return Ok(LineMatch {
                    line_index: *line_index,
                    score,
                });
            }
            if best.map_or(true, |b| score > b.score) {
                best = Some(LineMatch {
                    line_index: *line_index,
                    score,
                });
            }
        }

        // entries is non-empty, so the loop seeded `best`
        best.ok_or(LineFindError::EmptyCorpus)
    }
}
