//! Resolve `.editorconfig` files into per-file formatting rules.
//!
//! ```no_run
//! use std::path::Path;
//!
//! let rules = edconf::resolve_rules(Path::new("/work/project/src/main.rs"));
//! if let Some(eol) = rules.end_of_line {
//!     println!("line terminator: {:?}", eol.as_str());
//! }
//! ```

pub mod colors;
pub mod config;
pub mod error;
pub mod glob;
mod output;
pub mod parser;
pub mod properties;
pub mod resolver;
pub mod walker;

pub use colors::{should_use_colors, Colors};
pub use config::{
    find_config_file, generate_init_file, load_config, merge_settings, CliOptions, EdconfToml,
    Settings, EDCONF_TOML_TEMPLATE,
};
pub use error::{ConfigError, GlobCompileError, LoadError, ParseError};
pub use glob::{matches, Glob};
pub use output::{OutputContext, OutputMode, RunResult};
pub use parser::{parse, ConfigFile, ParsedConfig, Properties, Section, SkipReason, SkippedLine};
pub use properties::{map, Charset, EndOfLine, IndentSize, IndentStyle, MappedRuleSet};
pub use resolver::{resolve, resolve_rules, ResolvedConfig, Resolver, ResolverOptions};
pub use walker::walk_paths;

use std::io;
use std::path::PathBuf;

use output::FileReport;

/// Main entry point: report the rules for every file in the given paths
pub fn run(paths: &[PathBuf], settings: &Settings, ctx: &OutputContext) -> io::Result<RunResult> {
    let files = walk_paths(paths).collect::<io::Result<Vec<_>>>()?;
    let resolver = Resolver::new(settings.resolver.clone());
    let show_header = files.len() > 1;

    let mut result = RunResult {
        files_resolved: 0,
        files_with_rules: 0,
    };

    for path in &files {
        let resolved = resolver.resolve(path);

        let entries: Vec<(String, String)> = if settings.raw {
            resolved
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        } else {
            let rules = map(&resolved);
            tracing::debug!(path = %path.display(), "mapped rules\n{rules}");
            rules
                .entries()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect()
        };

        let sources = if ctx.verbose {
            resolver
                .config_chain(path)
                .iter()
                .map(|file| file.path.clone())
                .collect()
        } else {
            vec![]
        };

        result.files_resolved += 1;
        if !entries.is_empty() {
            result.files_with_rules += 1;
        }

        let report = FileReport {
            path,
            entries,
            sources,
        };
        output::print_report(&report, show_header, ctx);
    }

    tracing::debug!(
        resolved = result.files_resolved,
        with_rules = result.files_with_rules,
        "run complete"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn settings(raw: bool) -> Settings {
        merge_settings(
            &CliOptions {
                raw: Some(raw),
                ..Default::default()
            },
            None,
        )
    }

    #[test]
    fn test_run_counts_files_with_rules() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".editorconfig"),
            "root = true\n[*.rs]\nindent_size = 4\n",
        )
        .unwrap();
        fs::write(dir.path().join("main.rs"), "fn main() {}\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "notes\n").unwrap();

        let ctx = OutputContext::new(OutputMode::Quiet, false, false);
        let result = run(&[dir.path().to_path_buf()], &settings(false), &ctx).unwrap();

        assert_eq!(result.files_resolved, 2);
        assert_eq!(result.files_with_rules, 1);
    }

    #[test]
    fn test_run_raw_counts_unknown_properties() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".editorconfig"),
            "root = true\n[*]\nmy_linter_option = strict\n",
        )
        .unwrap();
        let file = dir.path().join("a.txt");
        fs::write(&file, "a\n").unwrap();

        let ctx = OutputContext::new(OutputMode::Quiet, false, false);
        let typed = run(&[file.clone()], &settings(false), &ctx).unwrap();
        let raw = run(&[file], &settings(true), &ctx).unwrap();

        assert_eq!(typed.files_with_rules, 0);
        assert_eq!(raw.files_with_rules, 1);
    }

    #[test]
    fn test_run_fails_on_missing_path() {
        let dir = TempDir::new().unwrap();
        let ctx = OutputContext::new(OutputMode::Quiet, false, false);
        assert!(run(&[dir.path().join("missing")], &settings(false), &ctx).is_err());
    }
}
