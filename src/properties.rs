//! Typed view over resolved `.editorconfig` properties
//!
//! Every field is `Option`: `None` means the property was not declared (or
//! its value was not understood) and the consumer must leave that aspect of
//! the file alone.

use std::fmt;

use crate::resolver::ResolvedConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Utf8,
    Utf8Bom,
    Utf16Le,
    Utf16Be,
    Latin1,
}

impl Charset {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "utf-8" => Some(Self::Utf8),
            "utf-8-bom" => Some(Self::Utf8Bom),
            "utf-16le" => Some(Self::Utf16Le),
            "utf-16be" => Some(Self::Utf16Be),
            "latin1" => Some(Self::Latin1),
            _ => None,
        }
    }

    /// Property value as written in `.editorconfig`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf8Bom => "utf-8-bom",
            Self::Utf16Le => "utf-16le",
            Self::Utf16Be => "utf-16be",
            Self::Latin1 => "latin1",
        }
    }

    /// Canonical encoding name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 | Self::Utf8Bom => "UTF-8",
            Self::Utf16Le => "UTF-16LE",
            Self::Utf16Be => "UTF-16BE",
            Self::Latin1 => "ISO-8859-1",
        }
    }

    /// Byte order mark a file in this charset starts with
    pub fn bom(&self) -> &'static [u8] {
        match self {
            Self::Utf8Bom => &[0xEF, 0xBB, 0xBF],
            Self::Utf16Le => &[0xFF, 0xFE],
            Self::Utf16Be => &[0xFE, 0xFF],
            Self::Utf8 | Self::Latin1 => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndOfLine {
    Lf,
    CrLf,
    Cr,
}

impl EndOfLine {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "lf" => Some(Self::Lf),
            "crlf" => Some(Self::CrLf),
            "cr" => Some(Self::Cr),
            _ => None,
        }
    }

    /// The line terminator itself
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Lf => "LF",
            Self::CrLf => "CRLF",
            Self::Cr => "CR",
        }
    }

    fn value(&self) -> &'static str {
        match self {
            Self::Lf => "lf",
            Self::CrLf => "crlf",
            Self::Cr => "cr",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    Tab,
    Space,
}

impl IndentStyle {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "tab" => Some(Self::Tab),
            "space" => Some(Self::Space),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tab => "tab",
            Self::Space => "space",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentSize {
    /// Indent by this many columns
    Columns(u32),
    /// `indent_size = tab`: indent by one tab, width given by `tab_width`
    Tab,
}

impl IndentSize {
    fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("tab") {
            return Some(Self::Tab);
        }
        positive_int(value).map(Self::Columns)
    }
}

impl fmt::Display for IndentSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Columns(n) => write!(f, "{n}"),
            Self::Tab => f.write_str("tab"),
        }
    }
}

/// Formatting rules for one file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MappedRuleSet {
    pub charset: Option<Charset>,
    pub end_of_line: Option<EndOfLine>,
    pub indent_style: Option<IndentStyle>,
    pub indent_size: Option<IndentSize>,
    pub tab_width: Option<u32>,
    pub insert_final_newline: Option<bool>,
    pub trim_trailing_whitespace: Option<bool>,
}

impl MappedRuleSet {
    /// True when no rule is declared at all
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }

    /// Columns per indentation level, following `indent_size = tab` through `tab_width`.
    pub fn indent_width(&self) -> Option<u32> {
        match self.indent_size? {
            IndentSize::Columns(n) => Some(n),
            IndentSize::Tab => self.tab_width,
        }
    }

    /// Declared rules as `(key, value)` pairs in `.editorconfig` spelling
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = vec![];
        if let Some(charset) = self.charset {
            entries.push(("charset", charset.as_str().to_string()));
        }
        if let Some(eol) = self.end_of_line {
            entries.push(("end_of_line", eol.value().to_string()));
        }
        if let Some(style) = self.indent_style {
            entries.push(("indent_style", style.as_str().to_string()));
        }
        if let Some(size) = self.indent_size {
            entries.push(("indent_size", size.to_string()));
        }
        if let Some(width) = self.tab_width {
            entries.push(("tab_width", width.to_string()));
        }
        if let Some(insert) = self.insert_final_newline {
            entries.push(("insert_final_newline", insert.to_string()));
        }
        if let Some(trim) = self.trim_trailing_whitespace {
            entries.push(("trim_trailing_whitespace", trim.to_string()));
        }
        entries
    }
}

impl From<&ResolvedConfig> for MappedRuleSet {
    fn from(raw: &ResolvedConfig) -> Self {
        map(raw)
    }
}

impl fmt::Display for MappedRuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn show<T: fmt::Display>(value: Option<T>) -> String {
            value.map_or_else(|| "unset".to_string(), |v| v.to_string())
        }

        writeln!(f, "charset: {}", show(self.charset.map(|c| c.name())))?;
        writeln!(f, "end_of_line: {}", show(self.end_of_line.map(|e| e.name())))?;
        writeln!(f, "indent_size: {}", show(self.indent_size))?;
        writeln!(f, "indent_style: {}", show(self.indent_style.map(|s| s.as_str())))?;
        writeln!(f, "insert_final_newline: {}", show(self.insert_final_newline))?;
        writeln!(f, "tab_width: {}", show(self.tab_width))?;
        write!(f, "trim_trailing_whitespace: {}", show(self.trim_trailing_whitespace))
    }
}

/// Translate raw resolved properties into typed rules. Never fails.
pub fn map(raw: &ResolvedConfig) -> MappedRuleSet {
    let indent_size = raw.get("indent_size").and_then(IndentSize::parse);
    let tab_width = raw
        .get("tab_width")
        .and_then(positive_int)
        .or(match indent_size {
            Some(IndentSize::Columns(n)) => Some(n),
            _ => None,
        });

    MappedRuleSet {
        charset: raw.get("charset").and_then(Charset::parse),
        end_of_line: raw.get("end_of_line").and_then(EndOfLine::parse),
        indent_style: raw.get("indent_style").and_then(IndentStyle::parse),
        indent_size,
        tab_width,
        insert_final_newline: raw.get("insert_final_newline").and_then(boolean),
        trim_trailing_whitespace: raw.get("trim_trailing_whitespace").and_then(boolean),
    }
}

fn positive_int(value: &str) -> Option<u32> {
    value.parse().ok().filter(|&n| n > 0)
}

fn boolean(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> ResolvedConfig {
        ResolvedConfig::from_iter(pairs.iter().copied())
    }

    #[test]
    fn test_empty_config_is_entirely_unset() {
        let rules = map(&ResolvedConfig::default());
        assert!(rules.is_unset());
        assert_eq!(rules.indent_width(), None);
        assert!(rules.entries().is_empty());
    }

    #[test]
    fn test_full_mapping() {
        let rules = map(&raw(&[
            ("charset", "utf-8"),
            ("end_of_line", "crlf"),
            ("indent_style", "space"),
            ("indent_size", "4"),
            ("tab_width", "8"),
            ("insert_final_newline", "true"),
            ("trim_trailing_whitespace", "false"),
        ]));

        assert_eq!(rules.charset, Some(Charset::Utf8));
        assert_eq!(rules.end_of_line, Some(EndOfLine::CrLf));
        assert_eq!(rules.indent_style, Some(IndentStyle::Space));
        assert_eq!(rules.indent_size, Some(IndentSize::Columns(4)));
        assert_eq!(rules.tab_width, Some(8));
        assert_eq!(rules.insert_final_newline, Some(true));
        assert_eq!(rules.trim_trailing_whitespace, Some(false));
    }

    #[test]
    fn test_values_are_case_insensitive() {
        let rules = map(&raw(&[
            ("charset", "UTF-16LE"),
            ("end_of_line", "Lf"),
            ("indent_style", "TAB"),
            ("insert_final_newline", "TRUE"),
            ("trim_trailing_whitespace", "False"),
        ]));

        assert_eq!(rules.charset, Some(Charset::Utf16Le));
        assert_eq!(rules.end_of_line, Some(EndOfLine::Lf));
        assert_eq!(rules.indent_style, Some(IndentStyle::Tab));
        assert_eq!(rules.insert_final_newline, Some(true));
        assert_eq!(rules.trim_trailing_whitespace, Some(false));
    }

    #[test]
    fn test_all_charsets() {
        for (value, expected) in [
            ("utf-8", Charset::Utf8),
            ("utf-8-bom", Charset::Utf8Bom),
            ("utf-16le", Charset::Utf16Le),
            ("utf-16be", Charset::Utf16Be),
            ("latin1", Charset::Latin1),
        ] {
            assert_eq!(map(&raw(&[("charset", value)])).charset, Some(expected));
        }
    }

    #[test]
    fn test_unrecognized_values_degrade_to_unset() {
        let rules = map(&raw(&[
            ("charset", "ebcdic"),
            ("end_of_line", "native"),
            ("indent_style", "both"),
            ("indent_size", "-2"),
            ("tab_width", "0"),
            ("insert_final_newline", "yes"),
            ("trim_trailing_whitespace", "1"),
        ]));
        assert!(rules.is_unset());
    }

    #[test]
    fn test_unset_value_means_unset() {
        let rules = map(&raw(&[("indent_size", "unset"), ("charset", "unset")]));
        assert!(rules.is_unset());
    }

    #[test]
    fn test_indent_size_tab_sentinel() {
        let rules = map(&raw(&[("indent_size", "tab")]));
        assert_eq!(rules.indent_size, Some(IndentSize::Tab));
        assert_eq!(rules.tab_width, None);
        assert_eq!(rules.indent_width(), None);

        let rules = map(&raw(&[("indent_size", "tab"), ("tab_width", "4")]));
        assert_eq!(rules.indent_width(), Some(4));
    }

    #[test]
    fn test_tab_width_falls_back_to_indent_size() {
        let rules = map(&raw(&[("indent_size", "2")]));
        assert_eq!(rules.tab_width, Some(2));

        let rules = map(&raw(&[("indent_size", "2"), ("tab_width", "8")]));
        assert_eq!(rules.tab_width, Some(8));
        assert_eq!(rules.indent_width(), Some(2));
    }

    #[test]
    fn test_false_is_not_unset() {
        let rules = map(&raw(&[("insert_final_newline", "false")]));
        assert_eq!(rules.insert_final_newline, Some(false));
        assert!(!rules.is_unset());
    }

    #[test]
    fn test_end_of_line_terminators() {
        assert_eq!(EndOfLine::Lf.as_str(), "\n");
        assert_eq!(EndOfLine::CrLf.as_str(), "\r\n");
        assert_eq!(EndOfLine::Cr.as_str(), "\r");
        assert_eq!(EndOfLine::CrLf.name(), "CRLF");
    }

    #[test]
    fn test_charset_bom() {
        assert_eq!(Charset::Utf8Bom.bom(), &[0xEF, 0xBB, 0xBF]);
        assert!(Charset::Utf8.bom().is_empty());
        assert_eq!(Charset::Latin1.name(), "ISO-8859-1");
    }

    #[test]
    fn test_entries_use_editorconfig_spelling() {
        let rules = map(&raw(&[
            ("end_of_line", "CRLF"),
            ("indent_size", "tab"),
            ("insert_final_newline", "TRUE"),
        ]));
        assert_eq!(
            rules.entries(),
            [
                ("end_of_line", "crlf".to_string()),
                ("indent_size", "tab".to_string()),
                ("insert_final_newline", "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_display_lists_all_rules() {
        let rules = map(&raw(&[("end_of_line", "cr"), ("indent_size", "3")]));
        let text = rules.to_string();
        assert!(text.contains("end_of_line: CR"));
        assert!(text.contains("indent_size: 3"));
        assert!(text.contains("tab_width: 3"));
        assert!(text.contains("charset: unset"));
        assert_eq!(text.lines().count(), 7);
    }
}
