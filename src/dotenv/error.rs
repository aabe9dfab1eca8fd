use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use super::options::Encoding;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EnvError {
    #[error("env files directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("failed to read env file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("env file '{path}' is not valid {encoding}")]
    InvalidEncoding { path: PathBuf, encoding: Encoding },

    #[error("failed to parse env file '{path}': {source}")]
    Parse { path: PathBuf, source: SyntaxError },

    #[error("failed to set environment variable '{key}': {reason}")]
    Apply { key: String, reason: String },

    #[error("failed to resolve the current directory: {0}")]
    CurrentDir(#[source] std::io::Error),
}

/// A syntax error in dotenv content, located by 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct SyntaxError {
    pub line: usize,
    pub kind: SyntaxErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SyntaxErrorKind {
    /// A non-comment line without `=`.
    MissingSeparator,
    InvalidKey(String),
    /// A quoted value whose closing quote never appears.
    UnterminatedQuote(char),
    /// Content after a closing quote that is not a comment.
    TrailingCharacters,
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSeparator => f.write_str("expected KEY=VALUE, missing '='"),
            Self::InvalidKey(key) => write!(f, "invalid variable name '{key}'"),
            Self::UnterminatedQuote(quote) => write!(f, "unterminated {quote} quoted value"),
            Self::TrailingCharacters => f.write_str("unexpected characters after closing quote"),
        }
    }
}
