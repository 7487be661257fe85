//! EditorConfig glob patterns
//!
//! Patterns are translated into a `regex` program and run by its
//! finite-automaton engine, so matching time is linear in the path length no
//! matter how many stars or braces a pattern holds. Numeric ranges are the only
//! construct that gets expanded, and their total size is capped.

use regex::{Regex, RegexBuilder};

use crate::error::GlobCompileError;

/// Default cap on the number of alternatives numeric ranges may expand to.
pub const DEFAULT_MAX_ALTERNATIVES: usize = 1024;

const REGEX_SIZE_LIMIT: usize = 1 << 20;

/// A compiled EditorConfig section pattern.
#[derive(Debug, Clone)]
pub struct Glob {
    pattern: String,
    /// `None` for the empty pattern, which matches nothing
    regex: Option<Regex>,
    /// Patterns without `/` only see the last path segment
    basename_only: bool,
}

impl Glob {
    pub fn new(pattern: &str) -> Result<Self, GlobCompileError> {
        Self::with_limit(pattern, DEFAULT_MAX_ALTERNATIVES)
    }

    /// Compile `pattern`, allowing at most `max_alternatives` expanded range values.
    pub fn with_limit(pattern: &str, max_alternatives: usize) -> Result<Self, GlobCompileError> {
        if pattern.is_empty() {
            return Ok(Self {
                pattern: String::new(),
                regex: None,
                basename_only: true,
            });
        }

        let basename_only = !pattern.contains('/');
        let body: Vec<char> = pattern.strip_prefix('/').unwrap_or(pattern).chars().collect();

        let mut translator = Translator {
            pattern,
            limit: max_alternatives,
            expanded: 0,
        };
        let source = translator.translate(&body)?;

        let regex = RegexBuilder::new(&format!("^(?s:{source})$"))
            .size_limit(REGEX_SIZE_LIMIT)
            .build()
            .map_err(|source| GlobCompileError::Regex {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex: Some(regex),
            basename_only,
        })
    }

    /// Test a `/`-separated path relative to the config file's directory.
    pub fn is_match(&self, path: &str) -> bool {
        let Some(regex) = &self.regex else {
            return false;
        };
        if path.is_empty() {
            return false;
        }

        let candidate = if self.basename_only {
            path.rsplit('/').next().unwrap_or(path)
        } else {
            path
        };
        !candidate.is_empty() && regex.is_match(candidate)
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

/// Match one pattern against one relative path.
///
/// A pattern that fails to compile matches nothing.
pub fn matches(pattern: &str, path: &str) -> bool {
    Glob::new(pattern).is_ok_and(|glob| glob.is_match(path))
}

struct Translator<'a> {
    pattern: &'a str,
    limit: usize,
    expanded: usize,
}

impl Translator<'_> {
    fn translate(&mut self, chars: &[char]) -> Result<String, GlobCompileError> {
        let mut out = String::new();
        let mut i = 0;

        while i < chars.len() {
            match chars[i] {
                '\\' => match chars.get(i + 1) {
                    Some(&escaped) => {
                        push_literal(&mut out, escaped);
                        i += 2;
                    }
                    None => {
                        push_literal(&mut out, '\\');
                        i += 1;
                    }
                },
                '*' => {
                    let start = i;
                    while chars.get(i) == Some(&'*') {
                        i += 1;
                    }
                    if i - start == 1 {
                        out.push_str("[^/]*");
                        continue;
                    }

                    let after_separator = start == 0 || chars[start - 1] == '/';
                    if after_separator && chars.get(i) == Some(&'/') {
                        // `**/` also matches zero directories
                        out.push_str("(?:.*/)?");
                        i += 1;
                    } else {
                        out.push_str(".*");
                    }
                }
                '?' => {
                    out.push_str("[^/]");
                    i += 1;
                }
                '[' => {
                    let (class, next) = self.class(chars, i)?;
                    out.push_str(&class);
                    i = next;
                }
                '{' => {
                    let alternation = match closing_brace(chars, i) {
                        Some(close) => self
                            .braces(&chars[i + 1..close])?
                            .map(|group| (group, close + 1)),
                        None => None,
                    };
                    match alternation {
                        Some((group, next)) => {
                            out.push_str(&group);
                            i = next;
                        }
                        None => {
                            out.push_str("\\{");
                            i += 1;
                        }
                    }
                }
                c => {
                    push_literal(&mut out, c);
                    i += 1;
                }
            }
        }

        Ok(out)
    }

    /// Translate a bracket expression starting at `open`.
    ///
    /// Returns the regex text and the index just past the expression.
    fn class(&self, chars: &[char], open: usize) -> Result<(String, usize), GlobCompileError> {
        let mut start = open + 1;
        let negated = matches!(chars.get(start), Some('!') | Some('^'));
        if negated {
            start += 1;
        }

        let mut close = None;
        let mut j = start;
        while j < chars.len() {
            match chars[j] {
                '\\' => j += 2,
                ']' if j > start => {
                    close = Some(j);
                    break;
                }
                _ => j += 1,
            }
        }
        let Some(close) = close else {
            return Err(GlobCompileError::UnclosedClass {
                pattern: self.pattern.to_string(),
            });
        };

        let body = &chars[start..close];
        if body.contains(&'/') {
            // a class can never match a separator, so the brackets are literal
            return Ok(("\\[".to_string(), open + 1));
        }

        let members = unescape(body);
        let mut out = String::from(if negated { "[^/" } else { "[" });
        let mut k = 0;
        while k < members.len() {
            let (c, _) = members[k];
            let is_range = matches!(members.get(k + 1), Some(('-', false))) && k + 2 < members.len();
            push_literal(&mut out, c);
            if is_range {
                out.push('-');
                push_literal(&mut out, members[k + 2].0);
                k += 3;
            } else {
                k += 1;
            }
        }
        out.push(']');

        Ok((out, close + 1))
    }

    /// Translate the inside of `{...}`; `None` means the braces are literal.
    fn braces(&mut self, inner: &[char]) -> Result<Option<String>, GlobCompileError> {
        if let Some(range) = NumericRange::parse(inner) {
            return self.range(&range).map(Some);
        }

        let alternatives = split_alternatives(inner);
        if alternatives.len() < 2 {
            return Ok(None);
        }

        let parts = alternatives
            .into_iter()
            .map(|alt| self.translate(alt))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(format!("(?:{})", parts.join("|"))))
    }

    fn range(&mut self, range: &NumericRange) -> Result<String, GlobCompileError> {
        let count = usize::try_from(range.low.abs_diff(range.high))
            .unwrap_or(usize::MAX)
            .saturating_add(1);
        self.expanded = self.expanded.saturating_add(count);
        if self.expanded > self.limit {
            return Err(GlobCompileError::TooManyAlternatives {
                pattern: self.pattern.to_string(),
                limit: self.limit,
            });
        }

        let (low, high) = (range.low.min(range.high), range.low.max(range.high));
        let values: Vec<String> = (low..=high).map(|n| range.render(n)).collect();
        Ok(format!("(?:{})", values.join("|")))
    }
}

/// `{n..m}` with optional padding width
#[derive(Debug, PartialEq)]
struct NumericRange {
    low: i64,
    high: i64,
    width: Option<usize>,
}

impl NumericRange {
    fn parse(inner: &[char]) -> Option<Self> {
        let text: String = inner.iter().collect();
        let (left, right) = text.split_once("..")?;
        let left_digits = integer_digits(left)?;
        let right_digits = integer_digits(right)?;

        Some(Self {
            low: left.parse().ok()?,
            high: right.parse().ok()?,
            width: (left_digits == right_digits).then_some(left_digits),
        })
    }

    fn render(&self, n: i64) -> String {
        match self.width {
            Some(width) => {
                let sign = if n < 0 { "-" } else { "" };
                format!("{sign}{:0width$}", n.unsigned_abs())
            }
            None => n.to_string(),
        }
    }
}

/// Digit count of a signed decimal integer, `None` if `s` is not one.
fn integer_digits(s: &str) -> Option<usize> {
    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some(digits.len())
}

fn closing_brace(chars: &[char], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Split on commas that are not nested in braces or escaped.
fn split_alternatives(inner: &[char]) -> Vec<&[char]> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;
    while i < inner.len() {
        match inner[i] {
            '\\' => i += 1,
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    parts.push(&inner[start.min(inner.len())..]);
    parts
}

/// Resolve backslash escapes inside a bracket body; the flag marks escaped chars.
fn unescape(body: &[char]) -> Vec<(char, bool)> {
    let mut out = Vec::with_capacity(body.len());
    let mut i = 0;
    while i < body.len() {
        if body[i] == '\\' && i + 1 < body.len() {
            out.push((body[i + 1], true));
            i += 2;
        } else {
            out.push((body[i], false));
            i += 1;
        }
    }
    out
}

fn push_literal(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}
