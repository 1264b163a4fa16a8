//! Per-file stylify pipeline
//!
//! Applies the enabled style modules in a fixed order:
//! - `sort_includes`: every include batch is replaced by its sectioned form
//! - `correct_spacing`: every non-include line goes through the spacing rules

use std::io::{Read, Write};

use crate::config::{Config, StyleModule};
use crate::context::RunContext;
use crate::error::SortError;
use crate::format::correct_spacing;
use crate::includes::{is_include_line, CppHeaderClassifier, FsProjectMembership, IncludeSorter};
use crate::Result;

/// Lines of one source before and after stylifying
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylified {
    pub original: Vec<String>,
    pub lines: Vec<String>,
}

impl Stylified {
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.original != self.lines
    }

    /// Stylified content, lines joined with `\n`
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Apply `modules` to `lines`.
///
/// Include lines are never respaced; the spacing rules would break `<...>`
/// targets. The order in `modules` does not matter.
pub fn stylify_lines<S: AsRef<str>>(
    lines: &[S],
    filename: &str,
    modules: &[StyleModule],
    sorter: &IncludeSorter<'_>,
) -> std::result::Result<Vec<String>, SortError> {
    let mut current: Vec<String> = if modules.contains(&StyleModule::SortIncludes) {
        sorter.sort_includes(filename, lines)?
    } else {
        lines.iter().map(|l| l.as_ref().to_string()).collect()
    };

    if modules.contains(&StyleModule::CorrectSpacing) {
        for line in &mut current {
            if !is_include_line(line) {
                *line = correct_spacing(line);
            }
        }
    }

    Ok(current)
}

/// Stylify the full text of one source file.
///
/// The text is split on `\n`, so a missing final newline survives unchanged.
/// A file whose first line break is `\r\n` keeps CRLF endings on every line,
/// including lines the sorter regenerates.
pub fn stylify_source<'a>(
    source: &str,
    filename: &str,
    config: &'a Config,
    ctx: RunContext<'a>,
) -> std::result::Result<Stylified, SortError> {
    let ctx = match &config.root {
        Some(root) => ctx.with_root(Some(root)),
        None => ctx,
    };
    let classifier = CppHeaderClassifier::new()
        .with_root(ctx.root())
        .with_external_libs(
            config.external_lib_prefixes.clone(),
            config.system_wide_external_libs,
        );
    let membership = FsProjectMembership::new(ctx.root());
    let sorter =
        IncludeSorter::new(&classifier, &membership, ctx).with_test_suffix(&config.test_suffix);

    let original: Vec<String> = source.split('\n').map(str::to_string).collect();
    let crlf = original.len() > 1 && original[0].ends_with('\r');
    let stripped: Vec<&str> = original
        .iter()
        .map(|line| line.strip_suffix('\r').unwrap_or(line.as_str()))
        .collect();

    let mut lines = stylify_lines(&stripped, filename, &config.modules, &sorter)?;
    if crlf {
        let last = lines.len().saturating_sub(1);
        for line in &mut lines[..last] {
            line.push('\r');
        }
    }
    Ok(Stylified { original, lines })
}

/// Stylify everything readable from `input` and write the result to `output`
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn stylify_stream<R: Read, W: Write>(
    mut input: R,
    output: &mut W,
    filename: &str,
    config: &Config,
    ctx: RunContext<'_>,
) -> Result<Stylified> {
    let mut buffer = Vec::new();
    input.read_to_end(&mut buffer)?;
    let source = String::from_utf8_lossy(&buffer);

    let stylified = stylify_source(&source, filename, config, ctx)?;
    output.write_all(stylified.text().as_bytes())?;
    Ok(stylified)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::path::PathBuf;

    use super::*;
    use crate::diagnostics::CollectingDiagnostics;
    use crate::includes::HeaderHint;

    fn classify(_: &str, header: &str, is_angled: bool) -> HeaderHint {
        match header {
            "foo/bar.h" => HeaderHint::LikelyOwnHeader,
            _ if is_angled => HeaderHint::CppSystemHeader,
            _ => HeaderHint::OtherHeader,
        }
    }

    fn is_project_file(path: &str) -> bool {
        path.contains('/')
    }

    fn project_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for sub in ["foo", "common"] {
            std::fs::create_dir(dir.path().join(sub)).unwrap();
        }
        std::fs::write(dir.path().join("foo").join("bar.h"), "").unwrap();
        std::fs::write(dir.path().join("common").join("util.h"), "").unwrap();
        dir
    }

    #[test]
    fn test_sort_then_space() {
        let diagnostics = CollectingDiagnostics::new();
        let ctx = RunContext::new(&diagnostics);
        let sorter = IncludeSorter::new(&classify, &is_project_file, ctx);
        let lines = ["#include <map>", "#include <algorithm>", "", "int f(int a,int b){"];

        let result = stylify_lines(&lines, "foo/bar.cc", &StyleModule::ALL, &sorter).unwrap();
        assert_eq!(
            result,
            vec![
                "#include <algorithm>",
                "#include <map>",
                "",
                "int f(int a, int b) {"
            ]
        );
        assert!(diagnostics.warnings().is_empty());
    }

    #[test]
    fn test_include_lines_not_respaced() {
        let diagnostics = CollectingDiagnostics::new();
        let ctx = RunContext::new(&diagnostics);
        let sorter = IncludeSorter::new(&classify, &is_project_file, ctx);
        let lines = ["#include <vector>\t", "x=1;"];

        let result =
            stylify_lines(&lines, "foo/bar.cc", &[StyleModule::CorrectSpacing], &sorter).unwrap();
        assert_eq!(result, vec!["#include <vector>\t", "x = 1;"]);
    }

    #[test]
    fn test_sort_only_leaves_spacing() {
        let diagnostics = CollectingDiagnostics::new();
        let ctx = RunContext::new(&diagnostics);
        let sorter = IncludeSorter::new(&classify, &is_project_file, ctx);
        let lines = ["#include <map>", "#include <algorithm>", "x=1;"];

        let result =
            stylify_lines(&lines, "foo/bar.cc", &[StyleModule::SortIncludes], &sorter).unwrap();
        assert_eq!(
            result,
            vec!["#include <algorithm>", "#include <map>", "", "x=1;"]
        );
    }

    #[test]
    fn test_fatal_sort_error_propagates() {
        let diagnostics = CollectingDiagnostics::new();
        let ctx = RunContext::new(&diagnostics);
        let sorter = IncludeSorter::new(&classify, &is_project_file, ctx);
        let lines = ["#include <algorithm>", "#include <algorithm>  // for std::max"];

        let err = stylify_lines(&lines, "foo/bar.cc", &StyleModule::ALL, &sorter).unwrap_err();
        assert!(matches!(err, SortError::InconsistentDuplicate { line: 2, .. }));
        assert_eq!(diagnostics.errors().len(), 1);
    }

    #[test]
    fn test_stylify_source_with_default_capabilities() {
        let tree = project_tree();
        let config = Config {
            root: Some(tree.path().to_path_buf()),
            ..Default::default()
        };
        let source_file: PathBuf = tree.path().join("foo").join("bar.cc");
        let diagnostics = CollectingDiagnostics::new();
        let ctx = RunContext::new(&diagnostics).with_quiet(true);

        let source = "#include \"common/util.h\"\n#include <algorithm>\n#include \"foo/bar.h\"\n\nint x=1;\n";
        let result =
            stylify_source(source, &source_file.to_string_lossy(), &config, ctx).unwrap();

        assert!(result.is_changed());
        assert_eq!(
            result.text(),
            "#include \"foo/bar.h\"\n\n#include <algorithm>\n\n#include \"common/util.h\"\n\nint x = 1;\n"
        );
        assert!(diagnostics.warnings().is_empty());
    }

    #[test]
    fn test_stylify_source_unchanged() {
        let config = Config::default();
        let diagnostics = CollectingDiagnostics::new();
        let ctx = RunContext::new(&diagnostics);

        let result = stylify_source("int x = 1;\n", "main.cc", &config, ctx).unwrap();
        assert!(!result.is_changed());
        assert_eq!(result.original, vec!["int x = 1;", ""]);
    }

    #[test]
    fn test_crlf_endings_kept_on_every_line() {
        let config = Config::default();
        let diagnostics = CollectingDiagnostics::new();
        let ctx = RunContext::new(&diagnostics);

        let source = "int x=1;\r\n#include <map>\r\n\r\nint y;\r\n";
        let result = stylify_source(source, "a.cc", &config, ctx).unwrap();
        assert_eq!(
            result.text(),
            "int x = 1;\r\n#include <map>\r\n\r\nint y;\r\n"
        );
    }

    #[test]
    fn test_crlf_file_without_changes_is_unchanged() {
        let config = Config::default();
        let diagnostics = CollectingDiagnostics::new();
        let ctx = RunContext::new(&diagnostics);

        let result = stylify_source("int x = 1;\r\nint y;", "a.cc", &config, ctx).unwrap();
        assert!(!result.is_changed());
        assert_eq!(result.text(), "int x = 1;\r\nint y;");
    }

    #[test]
    fn test_stylify_stream_lossy_utf8() {
        let config = Config {
            modules: vec![StyleModule::CorrectSpacing],
            ..Default::default()
        };
        let diagnostics = CollectingDiagnostics::new();
        let ctx = RunContext::new(&diagnostics);
        let input = Cursor::new(b"x=1; // \xff\n".to_vec());
        let mut output = Vec::new();

        stylify_stream(input, &mut output, "<stdin>", &config, ctx).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text, "x = 1;  // \u{fffd}\n");
    }
}
