//! Parsing and rendering of single `#include` lines.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Marker every directive line starts with (after leading whitespace)
pub const INCLUDE_MARKER: &str = "#include";

/// Delimiter, target and trailer of an include line.
///
/// Whitespace around the delimiters is tolerated and dropped; everything
/// after the closing delimiter is kept verbatim.
static INCLUDE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*#\s*include\s*([<"])\s*([^>"\s]*)\s*[>"](.*)$"#).unwrap()
});

/// How the include target is delimited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `<target>`
    Angled,
    /// `"target"`
    Quoted,
}

/// One parsed `#include` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    /// Included path as written
    pub target: String,
    pub delimiter: Delimiter,
    /// Text following the closing delimiter (comments, whitespace)
    pub trailer: String,
}

impl IncludeDirective {
    /// Parse an include line, returning `None` when it cannot be decomposed.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let caps = INCLUDE_RE.captures(line)?;
        let delimiter = if &caps[1] == "<" {
            Delimiter::Angled
        } else {
            Delimiter::Quoted
        };
        Some(Self {
            target: caps[2].to_string(),
            delimiter,
            trailer: caps[3].to_string(),
        })
    }

    #[must_use]
    pub fn is_angled(&self) -> bool {
        self.delimiter == Delimiter::Angled
    }

    /// Case-insensitive key identifying the target within a batch
    #[must_use]
    pub fn key(&self) -> String {
        self.target.to_lowercase()
    }
}

impl fmt::Display for IncludeDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.delimiter {
            Delimiter::Angled => write!(f, "{INCLUDE_MARKER} <{}>{}", self.target, self.trailer),
            Delimiter::Quoted => write!(f, "{INCLUDE_MARKER} \"{}\"{}", self.target, self.trailer),
        }
    }
}

/// Check whether a line is an include directive line
#[must_use]
pub fn is_include_line(line: &str) -> bool {
    line.trim_start().starts_with(INCLUDE_MARKER)
}
