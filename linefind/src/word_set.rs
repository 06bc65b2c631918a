//! Line fingerprints.
//!
//! A `WordSet` is built once per line and never mutated afterwards: the
//! lower-cased, break-collapsed form of the line plus frequency tables of its
//! words and characters. Scoring two fingerprints only reads those tables.

use crate::interface::ScoringPolicy;
use crate::similarity::{average_best_shared, containment, shared_ratio, to_signed_range};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Characters that separate words. They never appear inside a word but are
/// still counted as characters.
pub const BREAK_CHARS: &[char] = &[
    ' ', '(', ')', ',', '.', '!', ':', ';', '"', '\u{201C}', '\u{2018}', '\u{2019}', '\u{201D}',
    '\u{2014}',
];

/// Whether the character acts as a separator for words.
#[inline]
pub fn is_break_char(c: char) -> bool {
    BREAK_CHARS.contains(&c)
}

#[derive(Debug, Clone, PartialEq)]
pub struct WordSet {
    normalized: Vec<char>,
    word_counts: HashMap<String, usize>,
    char_counts: HashMap<char, usize>,
    /// Distinct words in first-appearance order, for the shared-run terms.
    /// A stable order keeps float sums identical between runs.
    words: Vec<Vec<char>>,
}

impl WordSet {
    pub fn new(line: &str) -> Self {
        let mut normalized = Vec::with_capacity(line.len());
        let mut word_counts: HashMap<String, usize> = HashMap::new();
        let mut char_counts: HashMap<char, usize> = HashMap::new();
        let mut words = Vec::new();
        let mut current = String::new();

        for c in line.chars().flat_map(char::to_lowercase) {
            *char_counts.entry(c).or_insert(0) += 1;
            if is_break_char(c) {
                Self::finish_word(&mut current, &mut word_counts, &mut words, &mut normalized);
            } else {
                current.push(c);
            }
        }
        Self::finish_word(&mut current, &mut word_counts, &mut words, &mut normalized);

        Self {
            normalized,
            word_counts,
            char_counts,
            words,
        }
    }

    /// Close the word being accumulated, if any, appending it to the
    /// normalized line behind a single separating space.
    fn finish_word(
        current: &mut String,
        word_counts: &mut HashMap<String, usize>,
        words: &mut Vec<Vec<char>>,
        normalized: &mut Vec<char>,
    ) {
        if current.is_empty() {
            return;
        }
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        let word = std::mem::take(current);
        let word_chars: Vec<char> = word.chars().collect();
        normalized.extend_from_slice(&word_chars);

        match word_counts.entry(word) {
            Entry::Occupied(mut e) => *e.get_mut() += 1,
            Entry::Vacant(e) => {
                e.insert(1);
                words.push(word_chars);
            }
        }
    }

    /// Lower-cased line with break runs collapsed to single spaces and no
    /// leading or trailing separator.
    pub fn normalized_line(&self) -> String {
        self.normalized.iter().collect()
    }

    pub fn word_counts(&self) -> &HashMap<String, usize> {
        &self.word_counts
    }

    pub fn char_counts(&self) -> &HashMap<char, usize> {
        &self.char_counts
    }

    /// Distinct words in the order they first appear.
    pub fn words(&self) -> impl Iterator<Item = String> + '_ {
        self.words.iter().map(|w| w.iter().collect())
    }

    pub fn is_wordless(&self) -> bool {
        self.word_counts.is_empty()
    }

    /// How well `other` is contained in this line, in [-1, 1], using the
    /// default scoring policy.
    pub fn measure_containment(&self, other: &WordSet) -> f64 {
        self.measure_containment_with(other, ScoringPolicy::default())
    }

    /// How well `other` is contained in this line, in [-1, 1].
    /// Identical normalized lines score exactly 1.0.
    pub fn measure_containment_with(&self, other: &WordSet, policy: ScoringPolicy) -> f64 {
        if self.normalized == other.normalized {
            return 1.0;
        }

        // Order-free word and character matching is forgiving of typos
        let words = containment(&self.word_counts, &other.word_counts);
        let chars = containment(&self.char_counts, &other.char_counts);

        policy.combine(words, chars, || {
            let full_shared = to_signed_range(shared_ratio(&self.normalized, &other.normalized));
            let word_shared = to_signed_range(average_best_shared(&self.words, &other.words));
            (full_shared, word_shared)
        })
    }
}
