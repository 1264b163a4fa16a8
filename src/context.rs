//! Per-run configuration shared by all files of one invocation.

use std::path::{Path, PathBuf};

use crate::diagnostics::Diagnostics;

/// Read-only state for one stylify run.
///
/// Carries the quiet flag, the optional project root override and the
/// diagnostics sink. Separate runs with different settings use separate
/// contexts.
#[derive(Clone, Copy)]
pub struct RunContext<'a> {
    quiet: bool,
    root: Option<&'a Path>,
    diagnostics: &'a dyn Diagnostics,
}

impl<'a> RunContext<'a> {
    #[must_use]
    pub fn new(diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            quiet: false,
            root: None,
            diagnostics,
        }
    }

    #[must_use]
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    #[must_use]
    pub fn with_root(mut self, root: Option<&'a PathBuf>) -> Self {
        self.root = root.map(PathBuf::as_path);
        self
    }

    /// Project root override, if any
    #[must_use]
    pub fn root(&self) -> Option<&'a Path> {
        self.root
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.diagnostics.info(message);
        }
    }

    pub fn warn(&self, message: &str) {
        self.diagnostics.warn(message);
    }

    pub fn error(&self, message: &str) {
        self.diagnostics.error(message);
    }
}
