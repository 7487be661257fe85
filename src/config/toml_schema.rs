//! TOML schema definitions for edconf.toml

use serde::{Deserialize, Serialize};

/// Root structure for edconf.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdconfToml {
    /// How config chains are discovered and matched
    #[serde(default)]
    pub resolve: ResolveSection,

    /// How resolved rules are reported
    #[serde(default)]
    pub output: OutputSection,
}

/// `[resolve]` section in edconf.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolveSection {
    /// Config file name looked up in each directory (default: .editorconfig)
    pub file_name: Option<String>,

    /// Cap on numeric brace range expansion per pattern (default: 1024)
    pub max_alternatives: Option<usize>,

    /// Parse each config file once per run (default: true)
    pub cache: Option<bool>,
}

/// `[output]` section in edconf.toml
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Print raw resolved properties instead of typed rules (default: false)
    pub raw: Option<bool>,
}
