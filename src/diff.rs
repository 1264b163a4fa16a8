//! Unified diff rendering for `--show-diff`.

use similar::TextDiff;

/// Default number of context lines around each change
pub const DEFAULT_CONTEXT: usize = 3;

/// Render a unified diff between two line sequences.
///
/// Returns no lines when the inputs are identical.
#[must_use]
pub fn unified_diff<A, B>(before: &[A], after: &[B], from: &str, to: &str, context: usize) -> Vec<String>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let old: Vec<&str> = before.iter().map(AsRef::as_ref).collect();
    let new: Vec<&str> = after.iter().map(AsRef::as_ref).collect();
    if old == new {
        return Vec::new();
    }

    let diff = TextDiff::from_slices(&old, &new);
    let rendered = diff
        .unified_diff()
        .context_radius(context)
        .header(from, to)
        .to_string();
    rendered.lines().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_inputs_produce_no_diff() {
        let lines = ["a", "b", "c"];
        assert!(unified_diff(&lines, &lines, "x", "y", DEFAULT_CONTEXT).is_empty());
    }

    #[test]
    fn test_single_replacement() {
        let before = ["a", "b", "c"];
        let after = ["a", "B", "c"];
        assert_eq!(
            unified_diff(&before, &after, "f (before)", "f (after)", DEFAULT_CONTEXT),
            vec![
                "--- f (before)",
                "+++ f (after)",
                "@@ -1,3 +1,3 @@",
                " a",
                "-b",
                "+B",
                " c",
            ]
        );
    }

    #[test]
    fn test_reordered_includes() {
        let before = ["#include <map>", "#include <algorithm>", ""];
        let after = ["#include <algorithm>", "#include <map>", ""];
        let diff = unified_diff(&before, &after, "a", "b", 0);
        assert_eq!(diff[0], "--- a");
        assert_eq!(diff[1], "+++ b");
        assert_eq!(diff.iter().filter(|l| l.starts_with('-') && !l.starts_with("---")).count(), 1);
        assert_eq!(diff.iter().filter(|l| l.starts_with('+') && !l.starts_with("+++")).count(), 1);
        assert!(!diff.iter().any(|l| l.starts_with(' ')));
    }

    #[test]
    fn test_distant_changes_make_separate_hunks() {
        let before: Vec<String> = (0..20).map(|n| format!("line {n}")).collect();
        let mut after = before.clone();
        after[1] = "changed 1".to_string();
        after[18] = "changed 18".to_string();
        let diff = unified_diff(&before, &after, "a", "b", DEFAULT_CONTEXT);
        let headers: Vec<&String> = diff.iter().filter(|l| l.starts_with("@@")).collect();
        assert_eq!(headers, vec!["@@ -1,5 +1,5 @@", "@@ -16,5 +16,5 @@"]);
    }

    #[test]
    fn test_insertion_at_end() {
        let before = ["a"];
        let after = ["a", "b"];
        assert_eq!(
            unified_diff(&before, &after, "a", "b", DEFAULT_CONTEXT),
            vec!["--- a", "+++ b", "@@ -1 +1,2 @@", " a", "+b"]
        );
    }
}
