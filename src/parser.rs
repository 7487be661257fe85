//! `.editorconfig` file parsing
//!
//! Parsing is tolerant: a malformed line is recorded as a [`SkippedLine`] and
//! the rest of the file is still read. Only binary content is rejected.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LoadError, ParseError};

/// Longest key the file format allows
pub const MAX_KEY_LEN: usize = 1024;
/// Longest value the file format allows
pub const MAX_VALUE_LEN: usize = 4096;
/// Longest section name the file format allows
pub const MAX_SECTION_LEN: usize = 4096;

/// Ordered string mapping; overwriting a key keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: Vec<(String, String)>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Copy every entry of `other` over this mapping.
    pub fn merge(&mut self, other: &Properties) {
        for (key, value) in other.iter() {
            self.insert(key, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Properties::new();
        for (key, value) in iter {
            properties.insert(key, value);
        }
        properties
    }
}

/// A glob pattern and the properties declared under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Glob exactly as written between the brackets
    pub pattern: String,
    pub properties: Properties,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Not a comment, header or `key = value`
    MissingEquals,
    EmptyKey,
    /// `[` without a closing `]`
    UnterminatedSection,
    SectionTooLong,
    KeyTooLong,
    ValueTooLong,
    /// Property following a rejected section header
    OrphanProperty,
}

/// Diagnostic for a line the parser ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    pub reason: SkipReason,
}

/// Result of parsing one file's text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedConfig {
    pub is_root: bool,
    pub sections: Vec<Section>,
    pub skipped: Vec<SkippedLine>,
}

enum Scope {
    Preamble,
    Section,
    Discarding,
}

/// Parse the text of one `.editorconfig` file.
pub fn parse(content: &str) -> Result<ParsedConfig, ParseError> {
    if let Some(pos) = content.find('\0') {
        return Err(ParseError::Binary {
            line: content[..pos].matches('\n').count() + 1,
        });
    }

    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut parsed = ParsedConfig::default();
    let mut scope = Scope::Preamble;

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        let line_no = idx + 1;
        let skipped = |reason| SkippedLine {
            line: line_no,
            reason,
        };

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if line.starts_with('[') {
            let Some(pattern) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) else {
                parsed.skipped.push(skipped(SkipReason::UnterminatedSection));
                scope = Scope::Discarding;
                continue;
            };
            if pattern.len() > MAX_SECTION_LEN {
                parsed.skipped.push(skipped(SkipReason::SectionTooLong));
                scope = Scope::Discarding;
                continue;
            }
            parsed.sections.push(Section {
                pattern: pattern.to_string(),
                properties: Properties::new(),
            });
            scope = Scope::Section;
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            parsed.skipped.push(skipped(SkipReason::MissingEquals));
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        if key.is_empty() {
            parsed.skipped.push(skipped(SkipReason::EmptyKey));
            continue;
        }
        if key.len() > MAX_KEY_LEN {
            parsed.skipped.push(skipped(SkipReason::KeyTooLong));
            continue;
        }
        if value.len() > MAX_VALUE_LEN {
            parsed.skipped.push(skipped(SkipReason::ValueTooLong));
            continue;
        }

        match scope {
            Scope::Preamble => {
                if key.eq_ignore_ascii_case("root") {
                    parsed.is_root = value.eq_ignore_ascii_case("true");
                }
            }
            Scope::Section => {
                if let Some(section) = parsed.sections.last_mut() {
                    section.properties.insert(key.to_lowercase(), value);
                }
            }
            Scope::Discarding => parsed.skipped.push(skipped(SkipReason::OrphanProperty)),
        }
    }

    Ok(parsed)
}

/// A parsed `.editorconfig` file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub is_root: bool,
    pub sections: Vec<Section>,
}

impl ConfigFile {
    /// Read and parse the file at `path`.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let bytes = fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8(bytes).map_err(|_| LoadError::Encoding {
            path: path.to_path_buf(),
        })?;
        let parsed = parse(&content).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        for skipped in &parsed.skipped {
            tracing::debug!(
                path = %path.display(),
                line = skipped.line,
                reason = ?skipped.reason,
                "skipped malformed line"
            );
        }

        Ok(Self::from_parsed(path.to_path_buf(), parsed))
    }

    pub fn from_parsed(path: PathBuf, parsed: ParsedConfig) -> Self {
        Self {
            path,
            is_root: parsed.is_root,
            sections: parsed.sections,
        }
    }

    /// Directory the section patterns are relative to
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new(""))
    }
}
