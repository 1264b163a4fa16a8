//! Lexical path helpers used when comparing include targets with source names.
//!
//! All helpers work on strings, treat both `/` and `\` as separators and
//! always produce `/`-separated output. None of them touch the filesystem,
//! except [`relative_to`] which consults the current directory when exactly
//! one of its arguments is absolute.

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Collapse separators, drop `.` components and resolve `..` where possible.
///
/// An empty result is reported as `"."`.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let absolute = path.starts_with(is_separator);
    let mut parts: Vec<&str> = Vec::new();
    for component in path.split(is_separator) {
        match component {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }
    let joined = parts.join("/");
    if absolute {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Remove the extension of the last path component, if it has one.
///
/// Leading dots of the file name do not start an extension (`.clang-format`
/// is returned unchanged).
#[must_use]
pub fn strip_extension(path: &str) -> &str {
    let name_start = path.rfind(is_separator).map_or(0, |idx| idx + 1);
    let name = &path[name_start..];
    let stem_start = name.len() - name.trim_start_matches('.').len();
    match name[stem_start..].rfind('.') {
        Some(dot) => &path[..name_start + stem_start + dot],
        None => path,
    }
}

/// Express `path` relative to `base`, lexically.
#[must_use]
pub fn relative_to(path: &str, base: &str) -> String {
    let (path, base) = match (path.starts_with(is_separator), base.starts_with(is_separator)) {
        (true, false) => (normalize_path(path), absolutize(base)),
        (false, true) => (absolutize(path), normalize_path(base)),
        _ => (normalize_path(path), normalize_path(base)),
    };

    let path_parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty() && *p != ".").collect();
    let base_parts: Vec<&str> = base.split('/').filter(|p| !p.is_empty() && *p != ".").collect();
    let common = path_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut result: Vec<&str> = vec![".."; base_parts.len() - common];
    result.extend(&path_parts[common..]);
    if result.is_empty() {
        ".".to_string()
    } else {
        result.join("/")
    }
}

fn absolutize(path: &str) -> String {
    match std::env::current_dir() {
        Ok(cwd) => normalize_path(&format!("{}/{path}", cwd.to_string_lossy())),
        Err(_) => normalize_path(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("foo/bar.h"), "foo/bar.h");
        assert_eq!(normalize_path("./foo/bar.h"), "foo/bar.h");
        assert_eq!(normalize_path("foo//baz/../bar.h"), "foo/bar.h");
        assert_eq!(normalize_path("foo\\bar.h"), "foo/bar.h");
        assert_eq!(normalize_path("../foo"), "../foo");
        assert_eq!(normalize_path("/a/../../b"), "/b");
        assert_eq!(normalize_path("./"), ".");
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("foo/bar.cc"), "foo/bar");
        assert_eq!(strip_extension("foo/bar.test.cc"), "foo/bar.test");
        assert_eq!(strip_extension("foo.d/bar"), "foo.d/bar");
        assert_eq!(strip_extension(".clang-format"), ".clang-format");
        assert_eq!(strip_extension("algorithm"), "algorithm");
    }

    #[test]
    fn test_relative_to() {
        assert_eq!(relative_to("proj/foo/bar.cc", "proj"), "foo/bar.cc");
        assert_eq!(relative_to("proj/foo/bar.cc", "./proj"), "foo/bar.cc");
        assert_eq!(relative_to("other/bar.cc", "proj"), "../other/bar.cc");
        assert_eq!(relative_to("proj", "proj"), ".");
        assert_eq!(relative_to("/src/proj/a.cc", "/src/proj/"), "a.cc");
    }
}
