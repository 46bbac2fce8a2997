//! Version string ordering.
//!
//! Registry tags and runtime releases are free-form ("v11.2.0", "8.3.10",
//! "1.0.0-RC2", "2.x-dev"), so ordering follows the PHP/Composer
//! convention rather than strict semver:
//!
//! 1. Canonicalize: `-`, `_`, `+` and other punctuation become `.`, and a
//!    `.` is inserted wherever the string switches between digits and
//!    letters. `1.0.0-RC2` becomes `1.0.0.RC.2`.
//! 2. Compare part by part. Numbers compare numerically. Words rank
//!    `dev < alpha = a < beta = b < RC = rc < (number) < pl = p`; unknown
//!    words rank below `dev`.
//! 3. If one side has extra parts, a leading number makes it greater and a
//!    leading word is ranked against a number.

use std::cmp::Ordering;

/// Rank of a special word, matched by prefix in this order.
const SPECIAL_FORMS: &[(&str, i32)] = &[
    ("dev", 0),
    ("alpha", 1),
    ("a", 1),
    ("beta", 2),
    ("b", 2),
    ("RC", 3),
    ("rc", 3),
    ("#", 4),
    ("pl", 5),
    ("p", 5),
];

/// Where a plain number sits among the special words.
const NUMBER_RANK: i32 = 4;

/// Rank for words that match no special form.
const UNKNOWN_RANK: i32 = -6;

/// Compare two version strings.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use stackpulse::versions::compare_versions;
///
/// assert_eq!(compare_versions("8.3.9", "8.3.10"), Ordering::Less);
/// assert_eq!(compare_versions("1.0.0-beta", "1.0.0"), Ordering::Less);
/// assert_eq!(compare_versions("2.0", "2.0"), Ordering::Equal);
/// ```
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let canonical_a = canonicalize(a);
    let canonical_b = canonicalize(b);
    let left = parts(&canonical_a);
    let right = parts(&canonical_b);

    for (l, r) in left.iter().zip(right.iter()) {
        let ord = compare_parts(l, r);
        if ord != Ordering::Equal {
            return ord;
        }
    }

    match left.len().cmp(&right.len()) {
        Ordering::Equal => Ordering::Equal,
        Ordering::Greater => compare_rest(left[right.len()]),
        Ordering::Less => compare_rest(right[left.len()]).reverse(),
    }
}

/// Whether `a` sorts strictly below `b`.
pub fn version_lt(a: &str, b: &str) -> bool {
    compare_versions(a, b) == Ordering::Less
}

/// Pick the greatest version from a set of candidates.
///
/// Among equal versions the last one wins.
pub fn max_version<I, S>(versions: I) -> Option<S>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    versions.into_iter().fold(None, |best, candidate| match best {
        Some(current) if compare_versions(candidate.as_ref(), current.as_ref()) == Ordering::Less => {
            Some(current)
        }
        _ => Some(candidate),
    })
}

/// Normalize separators and split digit/letter runs with dots.
pub fn canonicalize(version: &str) -> String {
    let mut chars = version.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(version.len() * 2);
    out.push(first);
    let mut prev = first;

    for c in chars {
        let crosses_digit_boundary = (is_non_digit(prev) && c.is_ascii_digit())
            || (prev.is_ascii_digit() && is_non_digit(c));

        if matches!(c, '-' | '_' | '+') {
            push_separator(&mut out);
        } else if crosses_digit_boundary {
            push_separator(&mut out);
            out.push(c);
        } else if !c.is_ascii_alphanumeric() {
            push_separator(&mut out);
        } else {
            out.push(c);
        }
        prev = c;
    }

    out
}

fn is_non_digit(c: char) -> bool {
    !c.is_ascii_digit() && c != '.'
}

fn push_separator(out: &mut String) {
    if !out.ends_with('.') {
        out.push('.');
    }
}

fn parts(canonical: &str) -> Vec<&str> {
    canonical.split('.').filter(|p| !p.is_empty()).collect()
}

fn is_number(part: &str) -> bool {
    part.starts_with(|c: char| c.is_ascii_digit())
}

fn special_rank(form: &str) -> i32 {
    SPECIAL_FORMS
        .iter()
        .find(|(name, _)| form.starts_with(*name))
        .map(|(_, rank)| *rank)
        .unwrap_or(UNKNOWN_RANK)
}

fn compare_parts(a: &str, b: &str) -> Ordering {
    match (is_number(a), is_number(b)) {
        (true, true) => compare_numeric(a, b),
        (false, false) => special_rank(a).cmp(&special_rank(b)),
        (true, false) => NUMBER_RANK.cmp(&special_rank(b)),
        (false, true) => special_rank(a).cmp(&NUMBER_RANK),
    }
}

/// Numeric comparison that doesn't overflow on long digit runs.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = digits(a);
    let b = digits(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn digits(part: &str) -> &str {
    let end = part
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(part.len());
    part[..end].trim_start_matches('0')
}

/// Ordering of the longer side given its first unmatched part.
fn compare_rest(extra: &str) -> Ordering {
    if is_number(extra) {
        Ordering::Greater
    } else {
        special_rank(extra).cmp(&NUMBER_RANK)
    }
}
