//! Similarity measurements between frequency tables and character runs.
//!
//! Containment answers "how well are the items of one table found, with the
//! right counts, inside another": misses are penalized harder than count
//! mismatches, and undershooting a count is preferred over overshooting it.
//! Shared runs answer "how long a stretch of text do two strings have in
//! common", scaled by their average length so that one string being a
//! substring of a much longer one is not a perfect match.

use std::collections::HashMap;
use std::hash::Hash;

/// Containment of `t2`'s items inside `t1`, roughly in [-1, 1].
///
/// Starts from a smoothed 1/1 so empty tables never divide by zero. Tables
/// that are equal item-for-item score exactly 1.0.
pub fn containment<K: Eq + Hash>(t1: &HashMap<K, usize>, t2: &HashMap<K, usize>) -> f64 {
    let mut found = 1.0_f64;
    let mut possible = 1.0_f64;
    if t1 != t2 {
        for (key, &wanted) in t2 {
            match t1.get(key) {
                Some(&have) if wanted <= have => {
                    found += wanted as f64;
                    possible += have as f64;
                }
                // Reversed ratio so overshooting scores lower than undershooting
                Some(&have) => {
                    found += have as f64;
                    possible += wanted as f64;
                }
                None => {
                    found -= wanted as f64;
                    possible += wanted as f64;
                }
            }
        }
    }
    found / possible
}

/// Length of the longest contiguous run of characters present in both
/// `a` and `b`.
///
/// Rolling-row DP over the common-suffix lengths; gives the same result as
/// trying every pair of start offsets.
pub fn longest_common_run(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let n = b.len();
    let mut prev = vec![0usize; n + 1];
    let mut curr = vec![0usize; n + 1];
    let mut longest = 0;

    for &ac in a {
        for j in 1..=n {
            curr[j] = if ac == b[j - 1] { prev[j - 1] + 1 } else { 0 };
            longest = longest.max(curr[j]);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    longest
}

/// Longest common run divided by the average length of the two strings, in [0, 1].
/// Two empty strings are identical and measure 1.0.
pub fn shared_ratio(a: &[char], b: &[char]) -> f64 {
    let size_sum = a.len() + b.len();
    if size_sum == 0 {
        return 1.0;
    }
    (longest_common_run(a, b) * 2) as f64 / size_sum as f64
}

/// Best `shared_ratio` of `target` against any of `words`; 0.0 with no words.
pub fn best_shared_ratio(words: &[Vec<char>], target: &[char]) -> f64 {
    words
        .iter()
        .map(|word| shared_ratio(word, target))
        .fold(0.0, f64::max)
}

/// For each word of `b`, the best shared ratio against the words of `a`,
/// averaged over `b`.
///
/// With no words in `b` there is nothing to average: two word-less sides are
/// treated as identical (1.0), otherwise nothing is shared (0.0).
pub fn average_best_shared(a: &[Vec<char>], b: &[Vec<char>]) -> f64 {
    if b.is_empty() {
        return if a.is_empty() { 1.0 } else { 0.0 };
    }
    let sum: f64 = b.iter().map(|word| best_shared_ratio(a, word)).sum();
    sum / b.len() as f64
}

/// Map a [0, 1] measurement onto [-1, 1].
#[inline]
pub fn to_signed_range(x: f64) -> f64 {
    x * 2.0 - 1.0
}
