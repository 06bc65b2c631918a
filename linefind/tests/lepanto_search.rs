//! End-to-end searches against a real poem.

use linefind::loader::load_document;
use linefind::{Document, LineFindError, ScoringPolicy, WordSet};
use std::path::Path;

fn lepanto() -> Vec<String> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/lepanto.txt");
    load_document(&path).expect("fixture should load")
}

fn index_of(lines: &[String], prefix: &str) -> usize {
    lines
        .iter()
        .position(|l| l.starts_with(prefix))
        .unwrap_or_else(|| panic!("no line starts with {prefix:?}"))
}

#[test]
fn test_fixture_has_a_stanza_break() {
    let lines = lepanto();
    let document = Document::build(&lines);
    assert!(lines.iter().any(|l| l.is_empty()));
    assert_eq!(document.source_line_count(), lines.len());
    assert_eq!(document.len(), lines.len() - 1);
}

#[test]
fn test_partial_phrase() {
    let lines = lepanto();
    let document = Document::build(&lines);
    let found = document.fuzzy_find("his head a flag").unwrap();
    assert_eq!(found, index_of(&lines, "Holding his head up"));
}

#[test]
fn test_typos() {
    let lines = lepanto();
    let document = Document::build(&lines);
    let found = document.fuzzy_find("dim drums throbing in the hils").unwrap();
    assert_eq!(found, index_of(&lines, "Dim drums throbbing"));
}

#[test]
fn test_missing_word_prefers_line_with_all_words() {
    let lines = lepanto();
    let document = Document::build(&lines);
    // "Don John of Austria" alone lacks "war"
    let found = document.fuzzy_find("don john austria war").unwrap();
    assert_eq!(found, index_of(&lines, "Don John of Austria is going"));
}

#[test]
fn test_exact_line_after_near_misses() {
    let lines = lepanto();
    let document = Document::build(&lines);
    let m = document.best_match(&WordSet::new("don john of austria")).unwrap();
    assert!(m.is_exact());
    assert_eq!(lines[m.line_index], "Don John of Austria");
}

#[test]
fn test_indices_after_stanza_break_are_original() {
    let lines = lepanto();
    let document = Document::build(&lines);
    let expected = index_of(&lines, "Strong gongs groaning");
    assert_eq!(document.fuzzy_find("strong gongs groaning as the guns boom far").unwrap(), expected);
    assert_eq!(lines[expected], "Strong gongs groaning as the guns boom far,");
}

#[test]
fn test_both_policies_find_the_queen() {
    let lines = lepanto();
    let expected = index_of(&lines, "The cold queen of England");
    for policy in [ScoringPolicy::Full, ScoringPolicy::WordWeighted] {
        let document = Document::with_policy(&lines, policy);
        assert_eq!(document.fuzzy_find("the cold queen of england").unwrap(), expected, "{policy}");
    }
}

#[test]
fn test_scores_bounded_across_document() {
    let lines = lepanto();
    let query = WordSet::new("the guns of the golden horn");
    for line in lines.iter().filter(|l| !l.is_empty()) {
        let score = WordSet::new(line).measure_containment(&query);
        assert!((-1.0..=1.0).contains(&score), "{line:?} -> {score}");
    }
}

#[test]
fn test_blank_document_is_empty_corpus() {
    let document = Document::build(["", ""]);
    assert!(matches!(document.fuzzy_find("sea"), Err(LineFindError::EmptyCorpus)));
}

#[test]
fn test_document_shared_across_threads() {
    let lines = lepanto();
    let document = Document::build(&lines);
    let expected = index_of(&lines, "Holding his head up");
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| document.fuzzy_find("his head a flag").unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
