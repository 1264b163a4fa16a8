//! Error types and result aliases for cppstyle.
//!
//! - [`Result<T>`]: Type alias for `anyhow::Result<T>` used by the orchestration code
//! - [`SortError`]: Fatal, per-file failures raised by the include sorter

use anyhow::Result as AnyhowResult;
use thiserror::Error;

pub type Result<T> = AnyhowResult<T>;

/// A fatal failure while sorting the includes of one source file.
///
/// Either variant aborts processing of the current file only; the caller
/// leaves the file untouched and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    /// A line looks like an include directive but cannot be decomposed.
    #[error("not an include line in \"{file}:{line}\": \"{text}\"")]
    Parse {
        /// Source identifier.
        file: String,
        /// 1-based line number.
        line: usize,
        /// The offending line, verbatim.
        text: String,
    },

    /// The same target appears twice in one batch with different spelling.
    #[error("\"{target}\" included more than once (inconsistently) in \"{file}:{line}\": {rendered}")]
    InconsistentDuplicate {
        /// Target of the repeated include, as written.
        target: String,
        /// Source identifier.
        file: String,
        /// 1-based line number of the repeated occurrence.
        line: usize,
        /// Rendered form of the repeated occurrence.
        rendered: String,
    },
}

impl SortError {
    /// Source identifier the error refers to.
    #[must_use]
    pub fn file(&self) -> &str {
        match self {
            Self::Parse { file, .. } | Self::InconsistentDuplicate { file, .. } => file,
        }
    }

    /// 1-based line number the error refers to.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::Parse { line, .. } | Self::InconsistentDuplicate { line, .. } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inconsistent_duplicate_message() {
        let err = SortError::InconsistentDuplicate {
            target: "algorithm".to_string(),
            file: "foo/bar.cc".to_string(),
            line: 4,
            rendered: "#include <algorithm>".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "\"algorithm\" included more than once (inconsistently) in \"foo/bar.cc:4\": #include <algorithm>"
        );
        assert_eq!(err.file(), "foo/bar.cc");
        assert_eq!(err.line(), 4);
    }

    #[test]
    fn test_parse_error_message() {
        let err = SortError::Parse {
            file: "a.cc".to_string(),
            line: 7,
            text: "#include MACRO".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "not an include line in \"a.cc:7\": \"#include MACRO\""
        );
        assert_eq!(err.line(), 7);
    }
}
