//! Header classification into output sections.
//!
//! The sorter asks a [`HeaderClassifier`] for a [`HeaderHint`] and maps it to
//! a [`Section`]. Own-header hints are only trusted after [`is_own_header`]
//! confirms that the header and the source file share the same stem.
//!
//! [`CppHeaderClassifier`] is the default classifier and follows the cpplint
//! include-order rules.

use std::path::Path;

use super::paths::{normalize_path, relative_to, strip_extension};

/// Classifier verdict for one include
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderHint {
    LikelyOwnHeader,
    PossibleOwnHeader,
    CSystemHeader,
    CppSystemHeader,
    ExternalLibraryHeader,
    OtherHeader,
}

impl HeaderHint {
    #[must_use]
    pub fn is_own_header(self) -> bool {
        matches!(self, Self::LikelyOwnHeader | Self::PossibleOwnHeader)
    }
}

/// Output section of an include; declaration order is output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    OwnHeader,
    CSystem,
    CppSystem,
    ExternalLibrary,
    ProjectOther,
}

impl From<HeaderHint> for Section {
    fn from(hint: HeaderHint) -> Self {
        match hint {
            HeaderHint::LikelyOwnHeader | HeaderHint::PossibleOwnHeader => Section::OwnHeader,
            HeaderHint::CSystemHeader => Section::CSystem,
            HeaderHint::CppSystemHeader => Section::CppSystem,
            HeaderHint::ExternalLibraryHeader => Section::ExternalLibrary,
            HeaderHint::OtherHeader => Section::ProjectOther,
        }
    }
}

/// Decides which kind of header an include refers to.
///
/// Must be deterministic and free of side effects.
pub trait HeaderClassifier: Sync {
    fn classify(&self, source_file: &str, header: &str, is_angled: bool) -> HeaderHint;
}

impl<F> HeaderClassifier for F
where
    F: Fn(&str, &str, bool) -> HeaderHint + Sync,
{
    fn classify(&self, source_file: &str, header: &str, is_angled: bool) -> HeaderHint {
        self(source_file, header, is_angled)
    }
}

/// Default suffix marking test sources (`foo_test.cc` tests `foo.h`)
pub const DEFAULT_TEST_SUFFIX: &str = "_test";

/// Check that `header` is the interface header implemented by `source_file`.
///
/// The source is taken relative to `root` when one is given. Extensions are
/// stripped from both paths, and `test_suffix` from the source stem.
#[must_use]
pub fn is_own_header(source_file: &str, header: &str, root: Option<&Path>, test_suffix: &str) -> bool {
    let source = match root {
        Some(root) => relative_to(source_file, &root.to_string_lossy()),
        None => source_file.to_string(),
    };
    let header_stem = normalize_path(strip_extension(header));
    let source_stem = normalize_path(strip_extension(&source));
    let source_stem = if test_suffix.is_empty() {
        source_stem.as_str()
    } else {
        source_stem.strip_suffix(test_suffix).unwrap_or(&source_stem)
    };
    header_stem == source_stem
}

/// C++ standard library headers (everything else in `<>` is a C header)
const CPP_HEADERS: &[&str] = &[
    "algorithm", "any", "array", "atomic", "barrier", "bit", "bitset", "cassert", "ccomplex",
    "cctype", "cerrno", "cfenv", "cfloat", "charconv", "chrono", "cinttypes", "ciso646", "climits",
    "clocale", "cmath", "codecvt", "compare", "complex", "concepts", "condition_variable",
    "coroutine", "csetjmp", "csignal", "cstdalign", "cstdarg", "cstdbool", "cstddef", "cstdint",
    "cstdio", "cstdlib", "cstring", "ctgmath", "ctime", "cuchar", "cwchar", "cwctype", "deque",
    "exception", "execution", "expected", "filesystem", "format", "forward_list", "fstream",
    "functional", "future", "initializer_list", "iomanip", "ios", "iosfwd", "iostream", "istream",
    "iterator", "latch", "limits", "list", "locale", "map", "memory", "memory_resource", "mutex",
    "new", "numbers", "numeric", "optional", "ostream", "print", "queue", "random", "ranges",
    "ratio", "regex", "scoped_allocator", "semaphore", "set", "shared_mutex", "source_location",
    "span", "sstream", "stack", "stacktrace", "stdexcept", "stop_token", "streambuf", "string",
    "string_view", "strstream", "syncstream", "system_error", "thread", "tuple", "type_traits",
    "typeindex", "typeinfo", "unordered_map", "unordered_set", "utility", "valarray", "variant",
    "vector", "version",
];

/// Suffixes dropped from file names before comparing them
const COMMON_SUFFIXES: &[&str] = &[
    "test.cc",
    "regtest.cc",
    "unittest.cc",
    "inl.h",
    "impl.h",
    "internal.h",
];

/// Classifier following the cpplint include-order rules
#[derive(Debug, Clone)]
pub struct CppHeaderClassifier {
    root: Option<String>,
    external_lib_prefixes: Vec<String>,
    system_wide_external_libs: bool,
}

impl Default for CppHeaderClassifier {
    fn default() -> Self {
        Self {
            root: None,
            external_lib_prefixes: Vec::new(),
            system_wide_external_libs: true,
        }
    }
}

impl CppHeaderClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve source files relative to this project root
    #[must_use]
    pub fn with_root(mut self, root: Option<&Path>) -> Self {
        self.root = root.map(|r| r.to_string_lossy().into_owned());
        self
    }

    /// First path components that mark external library headers (`glog`, `gflags`, ...)
    #[must_use]
    pub fn with_external_libs(mut self, prefixes: Vec<String>, system_wide: bool) -> Self {
        self.external_lib_prefixes = prefixes;
        self.system_wide_external_libs = system_wide;
        self
    }

    fn is_external_lib(&self, header: &str, is_angled: bool) -> bool {
        if self.system_wide_external_libs && !is_angled {
            return false;
        }
        let normalized = normalize_path(header);
        let first = normalized.split('/').next().unwrap_or_default();
        self.external_lib_prefixes.iter().any(|prefix| prefix == first)
    }

    fn repository_name(&self, source_file: &str) -> String {
        match &self.root {
            Some(root) => relative_to(source_file, root),
            None => normalize_path(source_file),
        }
    }
}

impl HeaderClassifier for CppHeaderClassifier {
    fn classify(&self, source_file: &str, header: &str, is_angled: bool) -> HeaderHint {
        if self.is_external_lib(header, is_angled) {
            return HeaderHint::ExternalLibraryHeader;
        }
        if is_angled {
            return if CPP_HEADERS.contains(&header) {
                HeaderHint::CppSystemHeader
            } else {
                HeaderHint::CSystemHeader
            };
        }

        let source = self.repository_name(source_file);
        let (target_dir, target_base) = split_dir(drop_common_suffixes(&source));
        let (include_dir, include_base) = split_dir(drop_common_suffixes(header));

        if target_base == include_base
            && (include_dir == target_dir
                || include_dir == normalize_path(&format!("{target_dir}/../public")))
        {
            return HeaderHint::LikelyOwnHeader;
        }

        match (first_component(target_base), first_component(include_base)) {
            (Some(target), Some(include)) if target == include => HeaderHint::PossibleOwnHeader,
            _ => HeaderHint::OtherHeader,
        }
    }
}

/// Strip a well-known `-`/`_` separated suffix, or else the extension
fn drop_common_suffixes(file_name: &str) -> &str {
    for suffix in COMMON_SUFFIXES {
        if let Some(rest) = file_name.strip_suffix(suffix) {
            if let Some(stem) = rest.strip_suffix(['-', '_']) {
                return stem;
            }
        }
    }
    strip_extension(file_name)
}

fn split_dir(path: &str) -> (&str, &str) {
    match path.rfind(['/', '\\']) {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    }
}

/// Leading part of a file name up to the first `-`, `_` or `.`
fn first_component(name: &str) -> Option<&str> {
    let end = name.find(['-', '_', '.']).unwrap_or(name.len());
    if end == 0 {
        None
    } else {
        Some(&name[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_order() {
        assert!(Section::OwnHeader < Section::CSystem);
        assert!(Section::CSystem < Section::CppSystem);
        assert!(Section::CppSystem < Section::ExternalLibrary);
        assert!(Section::ExternalLibrary < Section::ProjectOther);
    }

    #[test]
    fn test_hint_to_section() {
        assert_eq!(Section::from(HeaderHint::PossibleOwnHeader), Section::OwnHeader);
        assert_eq!(Section::from(HeaderHint::OtherHeader), Section::ProjectOther);
        assert!(HeaderHint::LikelyOwnHeader.is_own_header());
        assert!(!HeaderHint::CSystemHeader.is_own_header());
    }

    #[test]
    fn test_is_own_header() {
        assert!(is_own_header("foo/bar.cc", "foo/bar.h", None, DEFAULT_TEST_SUFFIX));
        assert!(is_own_header("foo/bar_test.cc", "foo/bar.h", None, DEFAULT_TEST_SUFFIX));
        assert!(is_own_header("./foo/bar.cc", "foo/bar.h", None, DEFAULT_TEST_SUFFIX));
        assert!(!is_own_header("foo/bar.cc", "bar.h", None, DEFAULT_TEST_SUFFIX));
        assert!(!is_own_header("foo/bar.cc", "foo/bar_util.h", None, DEFAULT_TEST_SUFFIX));
    }

    #[test]
    fn test_is_own_header_with_root() {
        let root = Path::new("proj");
        assert!(is_own_header("proj/foo/bar.cc", "foo/bar.h", Some(root), DEFAULT_TEST_SUFFIX));
        assert!(!is_own_header("proj/foo/bar.cc", "foo/bar.h", None, DEFAULT_TEST_SUFFIX));
    }

    #[test]
    fn test_is_own_header_custom_test_suffix() {
        assert!(is_own_header("foo/bar_unittest.cc", "foo/bar.h", None, "_unittest"));
        assert!(!is_own_header("foo/bar_unittest.cc", "foo/bar.h", None, DEFAULT_TEST_SUFFIX));
    }

    #[test]
    fn test_classify_system_headers() {
        let classifier = CppHeaderClassifier::new();
        assert_eq!(
            classifier.classify("foo/bar.cc", "stdio.h", true),
            HeaderHint::CSystemHeader
        );
        assert_eq!(
            classifier.classify("foo/bar.cc", "algorithm", true),
            HeaderHint::CppSystemHeader
        );
        // Project-looking paths in <> still land in the C system section
        assert_eq!(
            classifier.classify("foo/bar.cc", "common/util.h", true),
            HeaderHint::CSystemHeader
        );
    }

    #[test]
    fn test_classify_own_and_other_headers() {
        let classifier = CppHeaderClassifier::new();
        assert_eq!(
            classifier.classify("foo/bar.cc", "foo/bar.h", false),
            HeaderHint::LikelyOwnHeader
        );
        assert_eq!(
            classifier.classify("foo/bar_test.cc", "foo/bar.h", false),
            HeaderHint::LikelyOwnHeader
        );
        assert_eq!(
            classifier.classify("foo/internal/bar.cc", "foo/public/bar.h", false),
            HeaderHint::LikelyOwnHeader
        );
        assert_eq!(
            classifier.classify("foo/bar.cc", "other/bar-inl.h", false),
            HeaderHint::PossibleOwnHeader
        );
        assert_eq!(
            classifier.classify("foo/bar.cc", "common/util.h", false),
            HeaderHint::OtherHeader
        );
        assert_eq!(
            classifier.classify("foo/bar.cc", "algorithm", false),
            HeaderHint::OtherHeader
        );
    }

    #[test]
    fn test_classify_with_root() {
        let classifier = CppHeaderClassifier::new().with_root(Some(Path::new("proj")));
        assert_eq!(
            classifier.classify("proj/foo/bar.cc", "foo/bar.h", false),
            HeaderHint::LikelyOwnHeader
        );
    }

    #[test]
    fn test_classify_external_libs() {
        let classifier = CppHeaderClassifier::new()
            .with_external_libs(vec!["glog".to_string(), "gflags".to_string()], true);
        assert_eq!(
            classifier.classify("foo/bar.cc", "glog/logging.h", true),
            HeaderHint::ExternalLibraryHeader
        );
        assert_eq!(
            classifier.classify("foo/bar.cc", "gflags/gflags.h", true),
            HeaderHint::ExternalLibraryHeader
        );
        // System-wide libraries are only recognized in <>
        assert_eq!(
            classifier.classify("foo/bar.cc", "glog/logging.h", false),
            HeaderHint::OtherHeader
        );

        let local = CppHeaderClassifier::new().with_external_libs(vec!["glog".to_string()], false);
        assert_eq!(
            local.classify("foo/bar.cc", "glog/logging.h", false),
            HeaderHint::ExternalLibraryHeader
        );
    }

    #[test]
    fn test_drop_common_suffixes() {
        assert_eq!(drop_common_suffixes("foo/bar_test.cc"), "foo/bar");
        assert_eq!(drop_common_suffixes("foo/bar-inl.h"), "foo/bar");
        assert_eq!(drop_common_suffixes("foo/bar_unittest.cc"), "foo/bar");
        assert_eq!(drop_common_suffixes("foo/bar.h"), "foo/bar");
        assert_eq!(drop_common_suffixes("foo/latest.cc"), "foo/latest");
    }

    #[test]
    fn test_closure_classifier() {
        let classifier = |_: &str, header: &str, _: bool| {
            if header == "mine.h" {
                HeaderHint::LikelyOwnHeader
            } else {
                HeaderHint::OtherHeader
            }
        };
        assert_eq!(classifier.classify("mine.cc", "mine.h", false), HeaderHint::LikelyOwnHeader);
    }
}
