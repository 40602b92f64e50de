//! Line-level tokenizing helpers for DerivedAge-style records.

use crate::table::UcdVersion;

pub fn strip_cr(s: &str) -> &str {
    s.strip_suffix('\r').unwrap_or(s)
}

/// Blank lines and lines whose first non-whitespace char is `#` carry no data.
pub fn is_decoration(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Returns the part of `line` before the first unescaped `#`.
pub fn strip_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut escaped = false;
    for (i, b) in bytes.iter().enumerate() {
        match b {
            b'\\' if !escaped => escaped = true,
            b'#' if !escaped => return &line[..i],
            _ => escaped = false,
        }
    }
    line
}

fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Splits a codepoint field into `HEX` or `HEX..HEX`.
///
/// Returns `None` when the field does not have codepoint shape at all.
pub fn split_codepoints(field: &str) -> Option<(&str, Option<&str>)> {
    let field = field.trim();
    match field.split_once("..") {
        Some((lo, hi)) if is_hex(lo) && is_hex(hi) => Some((lo, Some(hi))),
        Some(_) => None,
        None if is_hex(field) => Some((field, None)),
        None => None,
    }
}

/// Parses already-validated hex digits, saturating on overflow.
pub fn parse_hex_saturating(digits: &str) -> u64 {
    // the only failure left for validated, non-empty hex digits is overflow.
    u64::from_str_radix(digits, 16).unwrap_or(u64::MAX)
}

fn parse_decimal(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parses `MAJOR.MINOR`: exactly two dot-separated decimal integers.
pub fn parse_span_version(field: &str) -> Option<(u32, u32)> {
    let mut parts = field.trim().split('.');
    let major = parse_decimal(parts.next()?)?;
    let minor = parse_decimal(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some((major, minor))
}

/// Splits a leading run of ASCII digits off `s`.
fn take_number(s: &str) -> Option<(u32, &str)> {
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }
    let value = s[..end].parse().ok()?;
    Some((value, &s[end..]))
}

/// Finds the first `<fragment>-<major>.<minor>.<patch>.<ext>` token in `line`.
pub fn find_version_token(line: &str, fragment: &str, ext: &str) -> Option<UcdVersion> {
    let prefix = format!("{fragment}-");
    line.match_indices(&prefix).find_map(|(at, _)| {
        let rest = &line[at + prefix.len()..];
        let (major, rest) = take_number(rest)?;
        let (minor, rest) = take_number(rest.strip_prefix('.')?)?;
        let (patch, rest) = take_number(rest.strip_prefix('.')?)?;
        rest.strip_prefix('.')?.strip_prefix(ext)?;
        Some(UcdVersion::new(major, minor, patch))
    })
}
