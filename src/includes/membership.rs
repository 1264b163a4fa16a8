//! Project membership heuristic used for the `<>` vs `""` sanity check.

use std::path::{Path, PathBuf};

use super::paths::normalize_path;

/// Decides whether an include target belongs to the current project.
///
/// Only used for advisory warnings; never changes the sorted output.
pub trait ProjectMembership: Sync {
    fn is_project_file(&self, path: &str) -> bool;
}

impl<F> ProjectMembership for F
where
    F: Fn(&str) -> bool + Sync,
{
    fn is_project_file(&self, path: &str) -> bool {
        self(path)
    }
}

/// Filesystem-backed membership check.
///
/// A path belongs to the project when it exists as a file, or when its first
/// component exists as a directory. Both are resolved against the root
/// override when one is set, otherwise against the current directory.
#[derive(Debug, Clone, Default)]
pub struct FsProjectMembership {
    root: Option<PathBuf>,
}

impl FsProjectMembership {
    #[must_use]
    pub fn new(root: Option<&Path>) -> Self {
        Self {
            root: root.map(Path::to_path_buf),
        }
    }

    fn resolve(&self, relative: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(relative),
            None => PathBuf::from(relative),
        }
    }
}

impl ProjectMembership for FsProjectMembership {
    fn is_project_file(&self, path: &str) -> bool {
        let normalized = normalize_path(path);
        let first_dir = normalized.split('/').next().unwrap_or_default();
        self.resolve(&normalized).is_file() || self.resolve(first_dir).is_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("foo")).unwrap();
        std::fs::write(dir.path().join("foo").join("bar.h"), "").unwrap();
        std::fs::write(dir.path().join("version.h"), "").unwrap();
        dir
    }

    #[test]
    fn test_membership_with_root() {
        let tree = project_tree();
        let membership = FsProjectMembership::new(Some(tree.path()));
        assert!(membership.is_project_file("foo/bar.h"));
        assert!(membership.is_project_file("./foo/bar.h"));
        assert!(membership.is_project_file("foo/missing.h"));
        assert!(membership.is_project_file("version.h"));
        assert!(!membership.is_project_file("proj/foo/bar.h"));
        assert!(!membership.is_project_file("algorithm"));
    }

    #[test]
    fn test_membership_nested_root() {
        let tree = project_tree();
        let membership = FsProjectMembership::new(Some(&tree.path().join("foo")));
        assert!(membership.is_project_file("bar.h"));
        assert!(!membership.is_project_file("foo/bar.h"));
    }

    #[test]
    fn test_closure_membership() {
        let membership = |path: &str| path.starts_with("common/");
        assert!(membership.is_project_file("common/util.h"));
        assert!(!membership.is_project_file("vector"));
    }
}
