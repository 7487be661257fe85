//! Configuration merging logic
//!
//! Priority: CLI args > edconf.toml > defaults

use crate::resolver::ResolverOptions;

use super::toml_schema::EdconfToml;

/// The CLI resolves many files per run, so it caches parsed configs unless told otherwise.
const DEFAULT_CACHE: bool = true;

/// CLI options that can override config file settings.
///
/// Uses `Option<T>` to distinguish "not specified" from "explicitly set".
#[derive(Debug, Default)]
pub struct CliOptions {
    pub file_name: Option<String>,
    pub raw: Option<bool>,
}

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub resolver: ResolverOptions,
    pub raw: bool,
}

/// Merge configurations from CLI, TOML, and defaults.
pub fn merge_settings(cli: &CliOptions, toml: Option<&EdconfToml>) -> Settings {
    let defaults = ResolverOptions::default();
    let resolve = toml.map(|t| &t.resolve);

    Settings {
        resolver: ResolverOptions {
            file_name: cli
                .file_name
                .clone()
                .or_else(|| resolve.and_then(|r| r.file_name.clone()))
                .unwrap_or(defaults.file_name),
            max_alternatives: resolve
                .and_then(|r| r.max_alternatives)
                .unwrap_or(defaults.max_alternatives),
            cache: resolve.and_then(|r| r.cache).unwrap_or(DEFAULT_CACHE),
        },
        raw: cli
            .raw
            .or_else(|| toml.and_then(|t| t.output.raw))
            .unwrap_or(false),
    }
}
