//! `#include` block sorting.
//!
//! This module turns contiguous batches of include directives into canonical,
//! sectioned blocks:
//! - [`directive`]: Parsing and rendering of single `#include` lines
//! - [`batch`]: Case-insensitive, duplicate-aware collection of one batch
//! - [`classify`]: Header classification into output sections (cpplint rules)
//! - [`membership`]: Project-membership heuristic for `<>` vs `""` warnings
//! - [`paths`]: Lexical path helpers shared by the above
//! - [`sorter`]: The line-walking [`IncludeSorter`] tying everything together

pub mod batch;
pub mod classify;
pub mod directive;
pub mod membership;
pub mod paths;
pub mod sorter;

pub use batch::{Admission, IncludeBatch};
pub use classify::{
    is_own_header, CppHeaderClassifier, HeaderClassifier, HeaderHint, Section,
    DEFAULT_TEST_SUFFIX,
};
pub use directive::{is_include_line, Delimiter, IncludeDirective};
pub use membership::{FsProjectMembership, ProjectMembership};
pub use sorter::IncludeSorter;
