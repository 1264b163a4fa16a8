//! Line-level spacing normalization
//!
//! [`correct_spacing`] runs every rule of [`SPACING_RULES`] over a line, in
//! table order. Each rule sees the output of the previous one, so the order
//! is part of the behavior: the relational rule must run before the
//! two-character operator rule, and the comment rules run last.
//!
//! The rules work on plain text. String and character literals are not
//! treated specially.

use std::sync::LazyLock;

use regex::Regex;

// Whitespace directly before a comma or semicolon
static SPACE_BEFORE_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([;,])").unwrap());

// Control keyword glued to its opening parenthesis
static KEYWORD_PAREN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(if|for|while|switch)\(").unwrap());

/// Operators that get a space on both sides
const TWO_CHAR_OPERATORS: [&str; 8] = ["==", "!=", "<=", ">=", "&&", ">>", "<<", "||"];

/// Shift-assignments, kept whole so `<<=` is not split into `<< =`
const SHIFT_ASSIGN_OPERATORS: [&str; 2] = ["<<=", ">>="];

/// One named step of the spacing pipeline
#[derive(Debug, Clone, Copy)]
pub struct SpacingRule {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

/// The spacing pipeline, in application order
pub const SPACING_RULES: &[SpacingRule] = &[
    SpacingRule {
        name: "replace_tabs",
        apply: replace_tabs,
    },
    SpacingRule {
        name: "strip_trailing_whitespace",
        apply: strip_trailing_whitespace,
    },
    SpacingRule {
        name: "space_after_separators",
        apply: space_after_separators,
    },
    SpacingRule {
        name: "remove_space_before_separators",
        apply: remove_space_before_separators,
    },
    SpacingRule {
        name: "space_around_braces",
        apply: space_around_braces,
    },
    SpacingRule {
        name: "space_around_relational",
        apply: space_around_relational,
    },
    SpacingRule {
        name: "space_around_operators",
        apply: space_around_operators,
    },
    SpacingRule {
        name: "space_after_keywords",
        apply: space_after_keywords,
    },
    SpacingRule {
        name: "space_after_comment_marker",
        apply: space_after_comment_marker,
    },
    SpacingRule {
        name: "space_before_comment_marker",
        apply: space_before_comment_marker,
    },
    SpacingRule {
        name: "collapse_comment_spacing",
        apply: collapse_comment_spacing,
    },
];

/// Normalize the spacing of a single line
#[must_use]
pub fn correct_spacing(line: &str) -> String {
    SPACING_RULES
        .iter()
        .fold(line.to_string(), |current, rule| (rule.apply)(&current))
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_separator(c: char) -> bool {
    c == ',' || c == ';'
}

fn is_relational(c: char) -> bool {
    matches!(c, '=' | '<' | '>')
}

fn is_word_or_quote(c: char) -> bool {
    is_word(c) || c == '"' || c == '\''
}

/// Insert `gap` between every pair of adjacent characters accepted by `wants_gap`.
///
/// Pairs are judged on the input line, so insertions never feed back.
fn insert_between(line: &str, gap: &str, wants_gap: impl Fn(char, char) -> bool) -> String {
    let mut result = String::with_capacity(line.len() + 8);
    let mut prev: Option<char> = None;
    for ch in line.chars() {
        if prev.is_some_and(|p| wants_gap(p, ch)) {
            result.push_str(gap);
        }
        result.push(ch);
        prev = Some(ch);
    }
    result
}

/// Insert text before the given char indices (ascending, may equal `chars.len()`)
fn insert_at(chars: &[char], insertions: &[(usize, &str)]) -> String {
    let mut result = String::with_capacity(chars.len() + 4 * insertions.len());
    let mut pending = insertions.iter().peekable();
    for idx in 0..=chars.len() {
        while let Some((_, text)) = pending.next_if(|(at, _)| *at == idx) {
            result.push_str(text);
        }
        if let Some(ch) = chars.get(idx) {
            result.push(*ch);
        }
    }
    result
}

/// Spans (start, end) of `//` comment markers: runs of two or more slashes
fn comment_markers(chars: &[char]) -> Vec<(usize, usize)> {
    let mut markers = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '/' {
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i] == '/' {
            i += 1;
        }
        if i - start >= 2 {
            markers.push((start, i));
        }
    }
    markers
}

/// Length of the spaced operator starting `rest`, if any
fn operator_len(rest: &[char]) -> Option<usize> {
    let head: String = rest.iter().take(3).collect();
    if SHIFT_ASSIGN_OPERATORS.contains(&head.as_str()) {
        return Some(3);
    }
    TWO_CHAR_OPERATORS
        .iter()
        .any(|op| head.starts_with(op))
        .then_some(2)
}

// `\t` => two spaces
fn replace_tabs(line: &str) -> String {
    line.replace('\t', "  ")
}

fn strip_trailing_whitespace(line: &str) -> String {
    line.trim_end().to_string()
}

// a;b => a; b
fn space_after_separators(line: &str) -> String {
    insert_between(line, " ", |prev, next| {
        is_separator(prev) && !next.is_whitespace()
    })
}

// a ; => a;
fn remove_space_before_separators(line: &str) -> String {
    SPACE_BEFORE_SEPARATOR_RE.replace_all(line, "$1").into_owned()
}

// }else{ => } else {
fn space_around_braces(line: &str) -> String {
    insert_between(line, " ", |prev, next| {
        (prev == '}' && is_word(next)) || ((prev == ')' || is_word(prev)) && next == '{')
    })
}

// a=b => a = b
fn space_around_relational(line: &str) -> String {
    insert_between(line, " ", |prev, next| {
        (is_word_or_quote(prev) && is_relational(next))
            || (is_relational(prev) && is_word_or_quote(next))
    })
}

// a&&b => a && b
fn space_around_operators(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut result = String::with_capacity(line.len() + 8);
    let mut i = 0;
    while i < chars.len() {
        let Some(len) = operator_len(&chars[i..]) else {
            result.push(chars[i]);
            i += 1;
            continue;
        };
        if i > 0 && !chars[i - 1].is_whitespace() {
            result.push(' ');
        }
        result.extend(&chars[i..i + len]);
        i += len;
        if i < chars.len() && !chars[i].is_whitespace() {
            result.push(' ');
        }
    }
    result
}

// if() => if ()
fn space_after_keywords(line: &str) -> String {
    KEYWORD_PAREN_RE.replace_all(line, "${1} (").into_owned()
}

// //abc => // abc
fn space_after_comment_marker(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let insertions: Vec<(usize, &str)> = comment_markers(&chars)
        .into_iter()
        .filter(|&(_, end)| chars.get(end).is_some_and(|c| !c.is_whitespace()))
        .map(|(_, end)| (end, " "))
        .collect();
    insert_at(&chars, &insertions)
}

// abc// => abc  //
fn space_before_comment_marker(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut insertions = Vec::new();
    for (start, _) in comment_markers(&chars) {
        let before = &chars[..start];
        // Full-line comments keep their indentation so commented-out code stays aligned
        if before.iter().all(|c| c.is_whitespace()) {
            continue;
        }
        match before.iter().rev().take_while(|c| **c == ' ').count() {
            0 => insertions.push((start, "  ")),
            1 => insertions.push((start, " ")),
            _ => {}
        }
    }
    insert_at(&chars, &insertions)
}

// //    abc => // abc
fn collapse_comment_spacing(line: &str) -> String {
    let chars: Vec<char> = line.chars().collect();
    let markers = comment_markers(&chars);
    let mut result = String::with_capacity(line.len());
    let mut i = 0;
    for (start, end) in markers {
        if start < i {
            continue;
        }
        result.extend(&chars[i..end]);
        let mut next = end;
        while next < chars.len() && chars[next].is_whitespace() {
            next += 1;
        }
        if next > end && next < chars.len() {
            result.push(' ');
        }
        i = next;
    }
    result.extend(&chars[i..]);
    result
}
