//! Include block sorting
//!
//! Walks the lines of one source file, collects each contiguous batch of
//! `#include` lines (blank lines inside a batch are dropped), and replaces it
//! with the batch's directives grouped into [`Section`]s. Every non-empty
//! section is followed by one blank line.

use std::collections::BTreeMap;

use super::batch::{Admission, IncludeBatch};
use super::classify::{is_own_header, HeaderClassifier, Section, DEFAULT_TEST_SUFFIX};
use super::directive::{is_include_line, IncludeDirective};
use super::membership::ProjectMembership;
use crate::context::RunContext;
use crate::error::SortError;

/// Sorts include blocks using injected classification capabilities
pub struct IncludeSorter<'a> {
    classifier: &'a dyn HeaderClassifier,
    membership: &'a dyn ProjectMembership,
    ctx: RunContext<'a>,
    test_suffix: String,
}

impl<'a> IncludeSorter<'a> {
    #[must_use]
    pub fn new(
        classifier: &'a dyn HeaderClassifier,
        membership: &'a dyn ProjectMembership,
        ctx: RunContext<'a>,
    ) -> Self {
        Self {
            classifier,
            membership,
            ctx,
            test_suffix: DEFAULT_TEST_SUFFIX.to_string(),
        }
    }

    /// Suffix stripped from source stems before the own-header check
    #[must_use]
    pub fn with_test_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.test_suffix = suffix.into();
        self
    }

    /// Return `lines` with every include batch replaced by its sorted form.
    ///
    /// `filename` identifies the source in diagnostics and drives own-header
    /// detection.
    pub fn sort_includes<S: AsRef<str>>(
        &self,
        filename: &str,
        lines: &[S],
    ) -> Result<Vec<String>, SortError> {
        let mut batch_count = 0usize;
        let mut pending: Option<IncludeBatch> = None;
        let mut output = Vec::with_capacity(lines.len() + 8);

        for (idx, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            let line_number = idx + 1;

            if is_include_line(line) {
                let batch = pending.get_or_insert_with(|| {
                    batch_count += 1;
                    IncludeBatch::new()
                });
                let directive = IncludeDirective::parse(line).ok_or_else(|| {
                    self.fail(SortError::Parse {
                        file: filename.to_string(),
                        line: line_number,
                        text: line.to_string(),
                    })
                })?;
                self.admit(batch, directive, filename, line_number)?;
                continue;
            }

            if pending.is_some() {
                if line.trim().is_empty() {
                    continue;
                }
                if let Some(batch) = pending.take() {
                    output.extend(self.render_batch(filename, batch));
                }
            }
            output.push(line.to_string());
        }

        if let Some(batch) = pending.take() {
            output.extend(self.render_batch(filename, batch));
        }
        if batch_count > 1 {
            self.ctx
                .warn(&format!("More than 1 batch of #include's in \"{filename}\""));
        }
        Ok(output)
    }

    fn admit(
        &self,
        batch: &mut IncludeBatch,
        directive: IncludeDirective,
        filename: &str,
        line_number: usize,
    ) -> Result<(), SortError> {
        let rendered = directive.to_string();
        let target = directive.target.clone();
        let is_angled = directive.is_angled();

        match batch.admit(directive) {
            Admission::Inserted => {
                self.check_include_style(&target, is_angled, &rendered, filename, line_number);
                Ok(())
            }
            Admission::ConsistentDuplicate => {
                self.ctx.warn(&format!(
                    "\"{target}\" included more than once (consistently) in \"{filename}:{line_number}\": {rendered}"
                ));
                Ok(())
            }
            Admission::InconsistentDuplicate => Err(self.fail(SortError::InconsistentDuplicate {
                target,
                file: filename.to_string(),
                line: line_number,
                rendered,
            })),
        }
    }

    /// Warn when the delimiter style contradicts project membership
    fn check_include_style(
        &self,
        target: &str,
        is_angled: bool,
        rendered: &str,
        filename: &str,
        line_number: usize,
    ) {
        let is_project = self.membership.is_project_file(target);
        if is_project && is_angled {
            self.ctx.warn(&format!(
                "\"{target}\" looks like a project-file, but is included with <> in \"{filename}:{line_number}\": {rendered}"
            ));
        } else if !is_project && !is_angled {
            self.ctx.warn(&format!(
                "\"{target}\" looks like a system-file, but is included with \"\" in \"{filename}:{line_number}\": {rendered}"
            ));
        }
    }

    fn section_for(&self, filename: &str, directive: &IncludeDirective) -> Section {
        let hint = self
            .classifier
            .classify(filename, &directive.target, directive.is_angled());
        if hint.is_own_header()
            && !is_own_header(filename, &directive.target, self.ctx.root(), &self.test_suffix)
        {
            return Section::ProjectOther;
        }
        Section::from(hint)
    }

    fn render_batch(&self, filename: &str, batch: IncludeBatch) -> Vec<String> {
        let mut sections: BTreeMap<Section, Vec<String>> = BTreeMap::new();
        for directive in batch.into_sorted() {
            let section = self.section_for(filename, &directive);
            sections
                .entry(section)
                .or_default()
                .push(directive.to_string());
        }

        let mut rendered = Vec::new();
        for (_, includes) in sections {
            rendered.extend(includes);
            rendered.push(String::new());
        }
        rendered
    }

    /// Report a fatal error through the error channel and hand it back
    fn fail(&self, err: SortError) -> SortError {
        self.ctx.error(&err.to_string());
        err
    }
}
