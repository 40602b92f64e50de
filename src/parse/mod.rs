//! DerivedAge source reader.
//!
//! Turns a line-oriented UCD file into a [`UcdVersion`] (from the header)
//! and a lazy, single-pass sequence of [`VersionedSpan`]s (from the body).
//!
//! The reader is deliberately asymmetric:
//! - Lines without record shape (blank, `#` comments, auxiliary annotations)
//!   are skipped silently.
//! - Lines *with* record shape (`HEX[..HEX] ; ...`) must carry a valid
//!   `MAJOR.MINOR` payload, otherwise the whole read fails.

mod util;

use crate::error::{AgeError, Result};
use crate::table::{MAX_CODEPOINT, UcdVersion, VersionedSpan};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use util::{
    find_version_token, is_decoration, parse_hex_saturating, parse_span_version,
    split_codepoints, strip_comment, strip_cr,
};

/// The literal filename fragment that identifies the release in the header.
///
/// The default matches `DerivedAge-15.1.0.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPattern {
    pub fragment: String,
    pub ext: String,
}

impl Default for HeaderPattern {
    fn default() -> Self {
        Self {
            fragment: "DerivedAge".to_string(),
            ext: "txt".to_string(),
        }
    }
}

/// Scan a single header line for the release token.
pub fn parse_header_line(line: &str, pattern: &HeaderPattern) -> Option<UcdVersion> {
    find_version_token(line, &pattern.fragment, &pattern.ext)
}

/// Read the UCD release version from the first line of `path`.
pub fn parse_ucd_version(path: &Path) -> Result<UcdVersion> {
    parse_ucd_version_with(path, &HeaderPattern::default())
}

/// Like [`parse_ucd_version`], with a custom header pattern.
pub fn parse_ucd_version_with(path: &Path, pattern: &HeaderPattern) -> Result<UcdVersion> {
    let file = File::open(path).map_err(|e| AgeError::io(path, e))?;
    read_ucd_version(BufReader::new(file), pattern, path)
}

/// Read the UCD release version from the first line of `reader`.
///
/// `path` is only used for error reporting.
pub fn read_ucd_version<R: BufRead>(
    mut reader: R,
    pattern: &HeaderPattern,
    path: &Path,
) -> Result<UcdVersion> {
    let mut first = String::new();
    reader
        .read_line(&mut first)
        .map_err(|e| AgeError::io(path, e))?;

    parse_header_line(&first, pattern).ok_or_else(|| AgeError::MissingVersion {
        path: path.to_path_buf(),
        fragment: pattern.fragment.clone(),
        ext: pattern.ext.clone(),
    })
}

/// Parse one source line.
///
/// - `Ok(None)`: the line carries no range data and is skipped.
/// - `Ok(Some(span))`: a well-formed record.
/// - `Err(MalformedRecord)`: record-shaped, but with an invalid payload.
///
/// `line_no` is 1-based and only used for error reporting.
pub fn parse_record_line(line: &str, line_no: usize) -> Result<Option<VersionedSpan>> {
    let line = strip_cr(line.strip_suffix('\n').unwrap_or(line));
    if is_decoration(line) {
        return Ok(None);
    }

    let data = strip_comment(line);
    let Some((cp_field, version_field)) = data.split_once(';') else {
        return Ok(None);
    };
    let Some((lo, hi)) = split_codepoints(cp_field) else {
        return Ok(None);
    };

    let start = parse_hex_saturating(lo);
    if start > MAX_CODEPOINT as u64 {
        return Err(AgeError::malformed(
            line_no,
            line,
            format!("start codepoint {lo} is beyond U+{MAX_CODEPOINT:X}"),
        ));
    }
    let start = start as u32;

    let stop = match hi {
        Some(hi) => parse_hex_saturating(hi).min(MAX_CODEPOINT as u64) as u32,
        None => start,
    };
    if stop < start {
        return Err(AgeError::malformed(
            line_no,
            line,
            "range stop precedes start",
        ));
    }

    let Some((major, minor)) = parse_span_version(version_field) else {
        return Err(AgeError::malformed(
            line_no,
            line,
            format!(
                "version {:?} is not MAJOR.MINOR",
                version_field.trim()
            ),
        ));
    };

    Ok(Some(VersionedSpan::new(start, stop, major, minor)))
}

/// Lazy, single-pass iterator over the spans of a source.
///
/// Yields spans in file order. After the first error the iterator is
/// exhausted; restart by opening the source again.
#[derive(Debug)]
pub struct SpanReader<R> {
    reader: R,
    path: PathBuf,
    buf: String,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> SpanReader<R> {
    /// `path` is only used for error reporting.
    pub fn new(reader: R, path: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            path: path.into(),
            buf: String::new(),
            line_no: 0,
            done: false,
        }
    }

    /// 1-based number of the last line read.
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for SpanReader<R> {
    type Item = Result<VersionedSpan>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line_no += 1;
                    match parse_record_line(&self.buf, self.line_no) {
                        Ok(Some(span)) => return Some(Ok(span)),
                        Ok(None) => {
                            trace!(line_no = self.line_no, "skipping non-record line");
                        }
                        Err(e) => {
                            self.done = true;
                            return Some(Err(e));
                        }
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(AgeError::io(&self.path, e)));
                }
            }
        }
        None
    }
}

impl<R: BufRead> std::iter::FusedIterator for SpanReader<R> {}

/// Open `path` and stream its spans lazily.
pub fn parse_spans(path: &Path) -> Result<SpanReader<BufReader<File>>> {
    let file = File::open(path).map_err(|e| AgeError::io(path, e))?;
    debug!(path = %path.display(), "opened span source");
    Ok(SpanReader::new(BufReader::new(file), path))
}

/// Stream the spans of an in-memory source.
pub fn parse_spans_str(src: &str) -> SpanReader<&[u8]> {
    SpanReader::new(src.as_bytes(), "<memory>")
}
