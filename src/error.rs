//! Error types for parsing, glob compilation and config loading

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// The text of a config file could not be read as an INI-like document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Binary content (NUL byte) found in the text
    #[error("binary content at line {line}")]
    Binary { line: usize },
}

/// A section pattern could not be compiled into a matcher.
#[derive(Debug, Error)]
pub enum GlobCompileError {
    #[error("unclosed character class in pattern `{pattern}`")]
    UnclosedClass { pattern: String },

    #[error("pattern `{pattern}` expands to more than {limit} alternatives")]
    TooManyAlternatives { pattern: String, limit: usize },

    #[error("pattern `{pattern}` could not be compiled: {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Failure to load one `.editorconfig` file from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not valid UTF-8", path.display())]
    Encoding { path: PathBuf },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

/// Error type for loading `edconf.toml`
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the file
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    /// TOML parsing error
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}
