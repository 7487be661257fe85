//! Template generation for `--init` command

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Template edconf.toml with documentation
pub const EDCONF_TOML_TEMPLATE: &str = r#"# edconf.toml - Configuration for the edconf resolver
#
# edconf reports the .editorconfig rules that apply to each file:
# it walks from the file's directory up to the filesystem root (or the first
# file declaring `root = true`) and merges every matching section, closest
# file last. The settings below tune that walk - uncomment as needed.

[resolve]
# Config file name looked up in each directory.
# Default: ".editorconfig"
# file_name = ".editorconfig"

# Upper bound on the values a brace range such as {1..100} may expand to.
# Sections whose pattern exceeds it are ignored.
# Default: 1024
# max_alternatives = 1024

# Parse each config file only once per run.
# Default: true
# cache = true

[output]
# Print the raw resolved key=value pairs, including unknown properties,
# instead of the typed rule set.
# Default: false
# raw = false
"#;

/// Generate edconf.toml in the specified directory (or current directory if None).
///
/// Returns an error if edconf.toml already exists.
pub fn generate_init_file_in(dir: Option<&Path>) -> io::Result<PathBuf> {
    let path = dir.map_or_else(|| PathBuf::from("edconf.toml"), |d| d.join("edconf.toml"));

    if path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "edconf.toml already exists",
        ));
    }

    fs::write(&path, EDCONF_TOML_TEMPLATE)?;
    Ok(path)
}

/// Generate edconf.toml in the current directory.
pub fn generate_init_file() -> io::Result<PathBuf> {
    generate_init_file_in(None)
}
