//! linefind - finds a line similar to input words
//!
//! Usage:
//!     linefind                                   read one query from stdin, search ./lepanto.txt
//!     linefind -d ./lepanto.txt -i ./queries.txt one query per line of the file
//!     linefind -d ./lepanto.txt -c "his head a flag" "set three"
//!
//! Logging goes to stderr and is controlled with RUST_LOG (default: warn).

use anyhow::{Context, Result};
use clap::Parser;
use linefind::config::{load_config, FinderConfig, MergeOpts};
use linefind::loader::{decode_lossy, load_document, load_queries};
use linefind::{Document, LineMatch, ScoringPolicy, WordSet};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "linefind",
    version,
    about = "Finds the most similar line of text from a document to a set of words",
    long_about = "Finds the most similar line of text from a document to a set of words. \
The set of words can be provided as a file with each set on its own line, or as quoted sets \
of words on the command line. With neither, one set is read from standard input."
)]
struct Args {
    /// Document to search (default ./lepanto.txt)
    #[arg(short = 'd', long = "document")]
    document: Option<PathBuf>,

    /// File of word sets, one per line
    #[arg(short = 'i', long = "input", conflicts_with = "queries")]
    input: Option<PathBuf>,

    /// Word sets given directly, one per argument
    #[arg(short = 'c', long = "queries", num_args = 1..)]
    queries: Vec<String>,

    /// How sub-scores are weighted
    #[arg(long, value_enum)]
    scoring: Option<ScoringPolicy>,

    /// JSON config file ({"document": ..., "scoring": ...})
    #[arg(long)]
    config: Option<PathBuf>,

    /// Emit one JSON object per word set (NDJSON)
    #[arg(long)]
    json: bool,

    /// Include the match score in text output
    #[arg(long)]
    show_score: bool,
}

fn main() -> Result<()> {
    let env = env_logger::Env::default().filter_or("RUST_LOG", "warn");
    env_logger::Builder::from_env(env).init();

    let args = Args::parse();
    let config = load_config(
        FinderConfig::default(),
        MergeOpts {
            config_path: args.config.clone(),
            cli_document: args.document.clone(),
            cli_scoring: args.scoring,
        },
    )?;

    if args.input.is_none() && args.queries.is_empty() {
        run_interactive(&config)
    } else {
        run_batch(&args, &config)
    }
}

/// Prompt, load the document while the user types, then print only the match.
fn run_interactive(config: &FinderConfig) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, ">")?;
    stdout.flush()?;

    let (lines, document) = load(config)?;

    let query =
        read_query(&mut io::stdin().lock()).context("failed to read word set from stdin")?;

    let found = document.fuzzy_find(&query)?;
    writeln!(stdout, "{}", lines[found])?;
    Ok(())
}

/// Read one line, tolerating bytes that are not valid UTF-8.
fn read_query(input: &mut impl BufRead) -> io::Result<String> {
    let mut buf = Vec::new();
    input.read_until(b'\n', &mut buf)?;
    let query = decode_lossy(&buf);
    Ok(query.trim_end_matches(['\n', '\r']).to_owned())
}

fn run_batch(args: &Args, config: &FinderConfig) -> Result<()> {
    let (lines, document) = load(config)?;
    let queries = match args.input.as_deref() {
        Some(path) => load_queries(path)?,
        None => args.queries.clone(),
    };
    log::info!("searching {} word sets", queries.len());

    let mut stdout = io::stdout().lock();
    for query in &queries {
        #[cfg(feature = "perf-log")]
        let t0 = std::time::Instant::now();

        let found = document.best_match(&WordSet::new(query))?;

        #[cfg(feature = "perf-log")]
        eprintln!(
            "[perf] query={:?} scan={:.2}ms lines={}",
            query,
            t0.elapsed().as_secs_f64() * 1000.0,
            document.len()
        );

        if args.json {
            print_json(&mut stdout, query, &found, &lines)?;
        } else {
            print_text(&mut stdout, query, &found, &lines, args.show_score)?;
        }
    }
    Ok(())
}

/// Read the document and preprocess it once for every query.
fn load(config: &FinderConfig) -> Result<(Vec<String>, Document)> {
    let lines = load_document(&config.document_path)?;
    let document = Document::with_policy(&lines, config.scoring);
    log::info!(
        "loaded {} ({} searchable lines)",
        config.document_path.display(),
        document.len()
    );
    Ok((lines, document))
}

fn print_text(
    out: &mut impl Write,
    query: &str,
    found: &LineMatch,
    lines: &[String],
    show_score: bool,
) -> Result<()> {
    writeln!(out, "Searching for word set: \"{query}\"")?;
    write!(out, "Found line {}: \"{}\"", found.line_index, lines[found.line_index])?;
    if show_score {
        write!(out, " (score {:.4})", found.score)?;
    }
    writeln!(out)?;
    Ok(())
}

fn print_json(out: &mut impl Write, query: &str, found: &LineMatch, lines: &[String]) -> Result<()> {
    let v = serde_json::json!({
        "query": query,
        "line_index": found.line_index,
        "line": lines[found.line_index],
        "score": found.score,
        "exact": found.is_exact(),
    });
    writeln!(out, "{}", serde_json::to_string(&v)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_inline_queries() {
        let args = Args::try_parse_from([
            "linefind", "-d", "doc.txt", "-c", "his head a flag", "set three",
        ])
        .unwrap();
        assert_eq!(args.document, Some(PathBuf::from("doc.txt")));
        assert_eq!(args.queries, vec!["his head a flag", "set three"]);
        assert!(args.input.is_none());
    }

    #[test]
    fn test_input_conflicts_with_queries() {
        let result = Args::try_parse_from(["linefind", "-i", "q.txt", "-c", "word"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_scoring() {
        let args = Args::try_parse_from(["linefind", "--scoring", "word-weighted", "-c", "x"]).unwrap();
        assert_eq!(args.scoring, Some(ScoringPolicy::WordWeighted));
    }

    #[test]
    fn test_read_query_invalid_utf8() {
        let mut input: &[u8] = b"lazy dog\xff\r\nsecond line\n";
        assert_eq!(read_query(&mut input).unwrap(), "lazy dog\u{FFFD}");
    }

    #[test]
    fn test_read_query_without_newline() {
        let mut input: &[u8] = b"\xef\xbb\xbfhis head a flag";
        assert_eq!(read_query(&mut input).unwrap(), "his head a flag");

        let mut empty: &[u8] = b"";
        assert_eq!(read_query(&mut empty).unwrap(), "");
    }

    #[test]
    fn test_print_text() {
        let lines = vec!["".to_string(), "Don John of Austria".to_string()];
        let found = LineMatch { line_index: 1, score: 0.5 };
        let mut out = Vec::new();
        print_text(&mut out, "don john", &found, &lines, false).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Searching for word set: \"don john\"\nFound line 1: \"Don John of Austria\"\n"
        );
    }

    #[test]
    fn test_print_json() {
        let lines = vec!["Don John of Austria".to_string()];
        let found = LineMatch { line_index: 0, score: 1.0 };
        let mut out = Vec::new();
        print_json(&mut out, "don john of austria", &found, &lines).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v["line_index"], 0);
        assert_eq!(v["line"], "Don John of Austria");
        assert_eq!(v["exact"], true);
    }
}
