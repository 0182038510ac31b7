//! Vendor version strings.
//!
//! The catalog reports versions like `"11."` or `"6.0"`; descriptors carry the
//! cleaned form and rules compare on the leading integer only.

/// Strip a single trailing `.` from a vendor version string.
pub fn clean_version(raw: &str) -> &str {
    raw.strip_suffix('.').unwrap_or(raw)
}

/// Leading integer of a version string, if it has one.
///
/// Leading whitespace and a sign are accepted, parsing stops at the first
/// non-digit. `"6.0"` is 6, `"beta"` and `""` have no major version.
pub fn major(version: &str) -> Option<i64> {
    let trimmed = version.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let value = rest[..end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

/// True when the version has a major component satisfying `pred`.
///
/// Versions without a major component never satisfy a comparison.
pub fn major_matches(version: &str, pred: impl FnOnce(i64) -> bool) -> bool {
    major(version).is_some_and(pred)
}
