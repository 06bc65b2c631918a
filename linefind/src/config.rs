//! Finder configuration.
//!
//! Settings merge in order: defaults <- JSON config file <- env vars <- CLI.

use crate::interface::{LineFindError, LineFindResult, ScoringPolicy};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Document searched when none is given.
pub const DEFAULT_DOCUMENT_PATH: &str = "./lepanto.txt";

pub const ENV_DOCUMENT: &str = "LINEFIND_DOCUMENT";
pub const ENV_SCORING: &str = "LINEFIND_SCORING";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinderConfig {
    pub document_path: PathBuf,
    pub scoring: ScoringPolicy,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            document_path: PathBuf::from(DEFAULT_DOCUMENT_PATH),
            scoring: ScoringPolicy::default(),
        }
    }
}

/// On-disk shape of the config file; every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    document: Option<PathBuf>,
    scoring: Option<ScoringPolicy>,
}

/// CLI-level options layered on top of the file and environment.
#[derive(Debug, Clone, Default)]
pub struct MergeOpts {
    pub config_path: Option<PathBuf>,
    pub cli_document: Option<PathBuf>,
    pub cli_scoring: Option<ScoringPolicy>,
}

/// Load and merge the configuration using the process environment.
pub fn load_config(base: FinderConfig, opts: MergeOpts) -> LineFindResult<FinderConfig> {
    load_config_with_env(base, opts, |key| std::env::var(key).ok())
}

/// Load and merge the configuration, reading variables through `env`.
pub fn load_config_with_env(
    mut base: FinderConfig,
    opts: MergeOpts,
    env: impl Fn(&str) -> Option<String>,
) -> LineFindResult<FinderConfig> {
    if let Some(path) = opts.config_path.as_deref() {
        let file = read_config_file(path)?;
        if let Some(document) = file.document {
            base.document_path = document;
        }
        if let Some(scoring) = file.scoring {
            base.scoring = scoring;
        }
    }

    // env vars override file
    if let Some(document) = env(ENV_DOCUMENT).filter(|v| !v.is_empty()) {
        base.document_path = PathBuf::from(document);
    }
    if let Some(scoring) = env(ENV_SCORING).filter(|v| !v.is_empty()) {
        base.scoring = scoring.parse()?;
    }

    // CLI overrides everything
    if let Some(document) = opts.cli_document {
        base.document_path = document;
    }
    if let Some(scoring) = opts.cli_scoring {
        base.scoring = scoring;
    }

    log::debug!(
        "config: document={} scoring={}",
        base.document_path.display(),
        base.scoring
    );
    Ok(base)
}

fn read_config_file(path: &Path) -> LineFindResult<FileConfig> {
    let s = fs::read_to_string(path).map_err(|e| {
        LineFindError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
    })?;
    serde_json::from_str(&s)
        .map_err(|e| LineFindError::InvalidConfig(format!("cannot parse {}: {e}", path.display())))
}
