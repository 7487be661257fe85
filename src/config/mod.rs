//! Configuration for the edconf tool itself.
//!
//! This module provides:
//! - Loading configuration from `edconf.toml`
//! - Config file discovery (search upward from current directory)
//! - Merging CLI args, config file, and defaults
//! - Template generation with `--init`

mod file;
mod init;
mod merge;
mod toml_schema;

pub use file::{find_config_file, find_file_upward, load_config};
pub use init::{generate_init_file, generate_init_file_in, EDCONF_TOML_TEMPLATE};
pub use merge::{merge_settings, CliOptions, Settings};
pub use toml_schema::{EdconfToml, OutputSection, ResolveSection};
