//! cppstyle - Include sorting and spacing normalization for C/C++ sources
//!
//! Two style modules are provided:
//! - [`includes`]: sorts every contiguous `#include` batch into sections
//!   (own header, C system, C++ system, external libraries, project)
//! - [`format`]: normalizes spacing around separators, operators, braces,
//!   keywords and comments, one line at a time
//!
//! [`process`] ties them together per file; header classification and
//! project membership are injected through [`HeaderClassifier`] and
//! [`ProjectMembership`].

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod diff;
pub mod error;
pub mod format;
pub mod includes;
pub mod process;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::{Config, StyleModule};
pub use context::RunContext;
pub use diagnostics::{CollectingDiagnostics, Diagnostics, Level, StderrDiagnostics};
pub use error::{Result, SortError};
pub use format::correct_spacing;
pub use includes::{
    CppHeaderClassifier, FsProjectMembership, HeaderClassifier, HeaderHint, IncludeSorter,
    ProjectMembership, Section,
};
pub use process::{stylify_lines, stylify_source, Stylified};
