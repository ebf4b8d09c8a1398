//! Error types
//!
//! `ConfigError` covers everything that can be wrong with a command
//! configuration. It is fatal to [`crate::registry::derive_groups`]; a table
//! is never built from a partially valid configuration. Malformed commands in
//! source text are not errors at all (see [`crate::matchers`]).

use thiserror::Error;

/// Configuration validation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown command '{0}' in configuration")]
    UnknownCommand(String),

    #[error("command '{0}' is configured more than once")]
    DuplicateCommand(String),

    #[error(
        "command '{command}' expects {expected} parameter classification(s), but the configuration lists {found}"
    )]
    ParameterCountMismatch {
        command: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid classification value {0}")]
    InvalidClassification(u32),

    #[error("unknown classification '{0}'")]
    UnknownClassificationName(String),

    #[error("unsupported configuration version {0}")]
    UnsupportedVersion(u32),
}

/// Crate-wide error
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build pattern for {kind} matcher: {source}")]
    Pattern {
        kind: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("pattern has {captures} capture group(s) but {classifications} classification(s)")]
    CaptureMismatch {
        captures: usize,
        classifications: usize,
    },

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("comment oracle failed: {0}")]
    Oracle(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Watch(#[from] notify::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
