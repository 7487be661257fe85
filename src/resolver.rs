//! Resolution of the `.editorconfig` chain for a target file

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::glob::{Glob, DEFAULT_MAX_ALTERNATIVES};
use crate::parser::{ConfigFile, Properties};
use crate::properties::{map, MappedRuleSet};

/// Name of the per-directory config file
pub const DEFAULT_FILE_NAME: &str = ".editorconfig";

/// Merged raw properties for one target file.
///
/// Iteration order is the order in which each key was first set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedConfig {
    properties: Properties,
}

impl ResolvedConfig {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties.iter()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    fn apply(&mut self, properties: &Properties) {
        self.properties.merge(properties);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResolvedConfig {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            properties: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Config file name looked up in every ancestor directory
    pub file_name: String,
    /// Cap on numeric range expansion per section pattern
    pub max_alternatives: usize,
    /// Keep parsed config files for the resolver's lifetime
    pub cache: bool,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_FILE_NAME.to_string(),
            max_alternatives: DEFAULT_MAX_ALTERNATIVES,
            cache: false,
        }
    }
}

/// A parsed config file with its section patterns compiled once.
#[derive(Debug)]
struct CompiledConfig {
    file: Arc<ConfigFile>,
    /// One entry per section; `None` where the pattern failed to compile
    globs: Vec<Option<Glob>>,
}

impl CompiledConfig {
    fn new(file: ConfigFile, max_alternatives: usize) -> Self {
        let globs = file
            .sections
            .iter()
            .map(
                |section| match Glob::with_limit(&section.pattern, max_alternatives) {
                    Ok(glob) => Some(glob),
                    Err(e) => {
                        tracing::warn!(
                            config = %file.path.display(),
                            error = %e,
                            "ignoring section with invalid pattern"
                        );
                        None
                    }
                },
            )
            .collect();

        Self {
            file: Arc::new(file),
            globs,
        }
    }
}

/// Compiled config per directory; `None` records a directory without a usable file.
#[derive(Debug, Default)]
struct ConfigCache {
    files: RwLock<HashMap<PathBuf, Option<Arc<CompiledConfig>>>>,
}

impl ConfigCache {
    fn get(&self, dir: &Path) -> Option<Option<Arc<CompiledConfig>>> {
        let files = self.files.read().unwrap_or_else(PoisonError::into_inner);
        files.get(dir).cloned()
    }

    fn insert(&self, dir: &Path, file: Option<Arc<CompiledConfig>>) {
        let mut files = self.files.write().unwrap_or_else(PoisonError::into_inner);
        files.entry(dir.to_path_buf()).or_insert(file);
    }
}

/// Resolves `.editorconfig` properties for target files.
#[derive(Debug, Default)]
pub struct Resolver {
    options: ResolverOptions,
    cache: Option<ConfigCache>,
}

impl Resolver {
    pub fn new(options: ResolverOptions) -> Self {
        let cache = options.cache.then(ConfigCache::default);
        Self { options, cache }
    }

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Merge every section matching `target` across its config chain.
    ///
    /// Never fails: unreadable config files and invalid patterns are logged and
    /// skipped, and a file with no config in its ancestry yields an empty result.
    pub fn resolve(&self, target: &Path) -> ResolvedConfig {
        let mut resolved = ResolvedConfig::default();
        let Some(target) = absolute_target(target) else {
            return resolved;
        };

        for config in self.compiled_chain(&target) {
            let file = &config.file;
            let Some(relative) = relative_path(&target, file.directory()) else {
                continue;
            };

            for (section, glob) in file.sections.iter().zip(&config.globs) {
                if glob.as_ref().is_some_and(|glob| glob.is_match(&relative)) {
                    tracing::debug!(
                        config = %file.path.display(),
                        pattern = %section.pattern,
                        target = %relative,
                        "section matched"
                    );
                    resolved.apply(&section.properties);
                }
            }
        }

        resolved
    }

    /// Resolve and map `target` to typed rules.
    pub fn rules(&self, target: &Path) -> MappedRuleSet {
        map(&self.resolve(target))
    }

    /// Config files that apply to `target`, outermost first.
    ///
    /// The walk stops after the first file declaring `root = true`.
    pub fn config_chain(&self, target: &Path) -> Vec<Arc<ConfigFile>> {
        let Some(target) = absolute_target(target) else {
            return vec![];
        };

        self.compiled_chain(&target)
            .iter()
            .map(|config| Arc::clone(&config.file))
            .collect()
    }

    /// `target` must already be absolute and normalized.
    fn compiled_chain(&self, target: &Path) -> Vec<Arc<CompiledConfig>> {
        let mut chain = vec![];
        let mut dir = target.parent();

        while let Some(current) = dir {
            if let Some(config) = self.load_dir(current) {
                let is_root = config.file.is_root;
                chain.push(config);
                if is_root {
                    break;
                }
            }
            dir = current.parent();
        }

        chain.reverse();
        chain
    }

    fn load_dir(&self, dir: &Path) -> Option<Arc<CompiledConfig>> {
        if let Some(hit) = self.cache.as_ref().and_then(|cache| cache.get(dir)) {
            return hit;
        }

        let loaded = self.read_config(dir);
        if let Some(cache) = &self.cache {
            cache.insert(dir, loaded.clone());
        }
        loaded
    }

    fn read_config(&self, dir: &Path) -> Option<Arc<CompiledConfig>> {
        let path = dir.join(&self.options.file_name);
        if !path.is_file() {
            return None;
        }

        match ConfigFile::load(&path) {
            Ok(file) => {
                tracing::debug!(
                    path = %path.display(),
                    sections = file.sections.len(),
                    root = file.is_root,
                    "loaded config"
                );
                Some(Arc::new(CompiledConfig::new(
                    file,
                    self.options.max_alternatives,
                )))
            }
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable config");
                None
            }
        }
    }
}

/// Resolve `target` with default options.
pub fn resolve(target: &Path) -> ResolvedConfig {
    Resolver::default().resolve(target)
}

/// Resolve `target` with default options and map the result to typed rules.
pub fn resolve_rules(target: &Path) -> MappedRuleSet {
    map(&resolve(target))
}

fn absolute_target(target: &Path) -> Option<PathBuf> {
    match std::path::absolute(target) {
        Ok(path) => Some(normalize(&path)),
        Err(e) => {
            tracing::warn!(path = %target.display(), error = %e, "cannot make path absolute");
            None
        }
    }
}

/// Drop `.` and fold `..` into its parent without touching the filesystem.
///
/// `..` at the root stays at the root. Symlinks are not followed.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// `target` relative to `dir`, joined with `/`.
///
/// `None` when `target` is not below `dir` or the remainder is not plain names.
fn relative_path(target: &Path, dir: &Path) -> Option<String> {
    let relative = target.strip_prefix(dir).ok()?;
    let segments = relative
        .components()
        .map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    Some(segments.join("/"))
}
