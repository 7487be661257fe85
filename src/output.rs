use crate::colors::Colors;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Normal,
    /// Only list files that have at least one rule
    Quiet,
}

pub struct OutputContext {
    pub mode: OutputMode,
    pub colors: Colors,
    /// Also list the config files each result was merged from
    pub verbose: bool,
}

impl OutputContext {
    pub fn new(mode: OutputMode, use_colors: bool, verbose: bool) -> Self {
        Self {
            mode,
            colors: Colors::new(use_colors),
            verbose,
        }
    }
}

pub struct RunResult {
    pub files_resolved: usize,
    pub files_with_rules: usize,
}

/// What was resolved for one file
pub struct FileReport<'a> {
    pub path: &'a Path,
    pub entries: Vec<(String, String)>,
    /// Config files in merge order
    pub sources: Vec<PathBuf>,
}

pub fn print_report(report: &FileReport<'_>, show_header: bool, ctx: &OutputContext) {
    let c = &ctx.colors;

    if ctx.mode == OutputMode::Quiet {
        if !report.entries.is_empty() {
            println!("{}", report.path.display());
        }
        return;
    }

    if show_header {
        println!("{}[{}]{}", c.header, report.path.display(), c.reset());
    }

    if ctx.verbose {
        for source in &report.sources {
            println!("{}# from {}{}", c.muted, source.display(), c.reset());
        }
    }

    for (key, value) in &report.entries {
        println!("{}{key}{}={value}", c.key, c.reset());
    }
}
