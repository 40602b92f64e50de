//! Fixed-width binary codec for versioned spans.
//!
//! Each span becomes one 10-byte little-endian record:
//!
//! | field | type | bytes |
//! |-------|------|-------|
//! | start | u32  | 0..4  |
//! | stop  | u32  | 4..8  |
//! | major | u8   | 8     |
//! | minor | u8   | 9     |
//!
//! Records are concatenated without delimiters or padding, in input order.
//! The codec never sorts or merges; a sorted, non-overlapping input yields a
//! binary-searchable table.

use crate::error::{AgeError, Result};
use crate::table::{
    FieldType, GENERATOR_NAME, GENERATOR_VERSION, GeneratorInfo, RecordLayout, SCHEMA_VERSION,
    SourceInfo, TableInfo, TableManifest, UcdVersion, VersionedSpan,
};
use byteorder::{ByteOrder as _, LittleEndian};
use std::iter::FusedIterator;
use std::slice::ChunksExact;

/// Size in bytes of one encoded record.
pub const RECORD_SIZE: usize = 10;

fn check_width(field: &'static str, value: u32, ty: FieldType) -> Result<()> {
    let max = ty.max_value();
    if u64::from(value) > max {
        return Err(AgeError::Range {
            field,
            value: u64::from(value),
            max,
        });
    }
    Ok(())
}

fn check_span(span: &VersionedSpan) -> Result<()> {
    check_width("start", span.start, FieldType::U32)?;
    check_width("stop", span.stop, FieldType::U32)?;
    check_width("major", span.major, FieldType::U8)?;
    check_width("minor", span.minor, FieldType::U8)?;
    Ok(())
}

/// Encode `spans` into a flat byte table of exactly `RECORD_SIZE * spans.len()` bytes.
///
/// All-or-nothing: every span is range-checked before any byte is written,
/// and the first field that overflows its width fails the whole call.
pub fn encode(spans: &[VersionedSpan]) -> Result<Vec<u8>> {
    spans.iter().try_for_each(check_span)?;

    let mut buf = vec![0u8; spans.len() * RECORD_SIZE];
    for (record, span) in buf.chunks_exact_mut(RECORD_SIZE).zip(spans) {
        LittleEndian::write_u32(&mut record[0..4], span.start);
        LittleEndian::write_u32(&mut record[4..8], span.stop);
        // widths were checked above.
        record[8] = span.major as u8;
        record[9] = span.minor as u8;
    }
    Ok(buf)
}

/// Decode a byte table back into spans, lazily.
///
/// Fails up front with [`AgeError::Format`] when `bytes` is not a whole
/// number of records; after that every record decodes.
pub fn decode(bytes: &[u8]) -> Result<Decoder<'_>> {
    if bytes.len() % RECORD_SIZE != 0 {
        return Err(AgeError::Format {
            len: bytes.len(),
            record_size: RECORD_SIZE,
        });
    }
    Ok(Decoder {
        records: bytes.chunks_exact(RECORD_SIZE),
    })
}

fn decode_record(record: &[u8]) -> VersionedSpan {
    VersionedSpan {
        start: LittleEndian::read_u32(&record[0..4]),
        stop: LittleEndian::read_u32(&record[4..8]),
        major: u32::from(record[8]),
        minor: u32::from(record[9]),
    }
}

/// Iterator returned by [`decode`].
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    records: ChunksExact<'a, u8>,
}

impl Iterator for Decoder<'_> {
    type Item = VersionedSpan;

    fn next(&mut self) -> Option<VersionedSpan> {
        self.records.next().map(decode_record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

impl DoubleEndedIterator for Decoder<'_> {
    fn next_back(&mut self) -> Option<VersionedSpan> {
        self.records.next_back().map(decode_record)
    }
}

impl ExactSizeIterator for Decoder<'_> {}

impl FusedIterator for Decoder<'_> {}

/// The encoded artifact: byte table plus the metadata needed to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanTable {
    ucd_version: UcdVersion,
    layout: RecordLayout,
    bytes: Vec<u8>,
}

impl SpanTable {
    /// Encode `spans` read from UCD `ucd_version`.
    pub fn build(ucd_version: UcdVersion, spans: &[VersionedSpan]) -> Result<Self> {
        Ok(Self {
            ucd_version,
            layout: RecordLayout::default(),
            bytes: encode(spans)?,
        })
    }

    /// Wrap an existing byte table, validating its length.
    pub fn from_bytes(ucd_version: UcdVersion, bytes: Vec<u8>) -> Result<Self> {
        decode(&bytes)?;
        Ok(Self {
            ucd_version,
            layout: RecordLayout::default(),
            bytes,
        })
    }

    pub fn ucd_version(&self) -> UcdVersion {
        self.ucd_version
    }

    pub fn layout(&self) -> &RecordLayout {
        &self.layout
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of spans (records) in the table.
    pub fn len(&self) -> usize {
        self.bytes.len() / RECORD_SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Hand the span sequence back, in table order.
    pub fn iter_spans(&self) -> Decoder<'_> {
        Decoder {
            records: self.bytes.chunks_exact(RECORD_SIZE),
        }
    }

    /// Lowercase hex md5 of the table bytes.
    pub fn md5_hex(&self) -> String {
        format!("{:x}", md5::compute(&self.bytes))
    }

    pub fn manifest(&self, source: SourceInfo) -> TableManifest {
        TableManifest {
            schema_version: SCHEMA_VERSION,
            generator: GeneratorInfo {
                name: GENERATOR_NAME.to_string(),
                version: GENERATOR_VERSION.to_string(),
            },
            ucd_version: self.ucd_version,
            layout: self.layout.clone(),
            source,
            table: TableInfo {
                span_count: self.len() as u64,
                byte_len: self.bytes.len() as u64,
                md5: self.md5_hex(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<VersionedSpan> {
        vec![
            VersionedSpan::new(0x0000, 0x001F, 1, 1),
            VersionedSpan::single(0x00AA, 1, 1),
            VersionedSpan::new(0x0220, 0x0220, 3, 2),
            VersionedSpan::new(0x1F600, 0x1F64F, 6, 1),
            VersionedSpan::new(0x100000, 0x10FFFF, 2, 0),
        ]
    }

    #[test]
    fn record_size_matches_layout() {
        assert_eq!(RecordLayout::default().record_size(), RECORD_SIZE);
    }

    #[test]
    fn exact_record_bytes_are_little_endian() {
        let bytes = encode(&[VersionedSpan::new(0x41, 0x1F64F, 15, 1)]).unwrap();
        assert_eq!(
            bytes,
            [0x41, 0x00, 0x00, 0x00, 0x4F, 0xF6, 0x01, 0x00, 0x0F, 0x01]
        );
    }

    #[test]
    fn round_trip_preserves_order() {
        let spans = sample();
        let bytes = encode(&spans).unwrap();
        assert_eq!(bytes.len(), RECORD_SIZE * spans.len());
        let back: Vec<_> = decode(&bytes).unwrap().collect();
        assert_eq!(back, spans);
    }

    #[test]
    fn encoding_is_deterministic() {
        assert_eq!(encode(&sample()).unwrap(), encode(&sample()).unwrap());
    }

    #[test]
    fn empty_input_encodes_to_empty_table() {
        let bytes = encode(&[]).unwrap();
        assert!(bytes.is_empty());
        assert_eq!(decode(&bytes).unwrap().count(), 0);
    }

    #[test]
    fn oversized_version_is_a_range_error() {
        let spans = [
            VersionedSpan::new(0x41, 0x5A, 1, 1),
            VersionedSpan::new(0x60, 0x61, 256, 0),
        ];
        match encode(&spans).unwrap_err() {
            AgeError::Range { field, value, max } => {
                assert_eq!(field, "major");
                assert_eq!(value, 256);
                assert_eq!(max, 255);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(encode(&[VersionedSpan::new(0, 0, 1, 300)]).is_err());
    }

    #[test]
    fn codepoint_beyond_i32_is_a_range_error() {
        let span = VersionedSpan::new(0, u32::MAX, 1, 1);
        assert!(matches!(
            encode(&[span]),
            Err(AgeError::Range { field: "stop", .. })
        ));
    }

    #[test]
    fn truncated_table_is_a_format_error() {
        let mut bytes = encode(&sample()).unwrap();
        bytes.pop();
        match decode(&bytes).unwrap_err() {
            AgeError::Format { len, record_size } => {
                assert_eq!(len, RECORD_SIZE * 5 - 1);
                assert_eq!(record_size, RECORD_SIZE);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(decode(&[0u8; 3]).is_err());
    }

    #[test]
    fn decoded_spans_outside_encoder_limits_are_still_usable() {
        // stop = u32::MAX, then an inverted span; neither can come from `encode`.
        let mut bytes = vec![0u8; 2 * RECORD_SIZE];
        LittleEndian::write_u32(&mut bytes[4..8], u32::MAX);
        LittleEndian::write_u32(&mut bytes[10..14], 7);
        let spans: Vec<_> = decode(&bytes).unwrap().collect();

        assert_eq!(spans[0].stop, u32::MAX);
        assert_eq!(spans[0].len(), u64::from(u32::MAX) + 1);
        assert!(spans[0].contains(u32::MAX));
        assert_eq!(spans[1].len(), 0);
        assert!(spans[1].is_empty());
    }

    #[test]
    fn decoder_is_exact_size_and_reversible() {
        let spans = sample();
        let bytes = encode(&spans).unwrap();
        let dec = decode(&bytes).unwrap();
        assert_eq!(dec.len(), spans.len());
        let rev: Vec<_> = dec.rev().collect();
        let mut expected = spans.clone();
        expected.reverse();
        assert_eq!(rev, expected);
    }

    #[test]
    fn span_table_carries_version_and_layout() {
        let table = SpanTable::build(UcdVersion::new(15, 1, 0), &sample()).unwrap();
        assert_eq!(table.len(), 5);
        assert!(!table.is_empty());
        assert_eq!(table.ucd_version().as_tuple(), (15, 1, 0));
        assert_eq!(table.layout().record_size(), RECORD_SIZE);
        assert_eq!(table.iter_spans().collect::<Vec<_>>(), sample());

        let manifest = table.manifest(SourceInfo {
            path: None,
            byte_len: 0,
        });
        assert_eq!(manifest.table.span_count, 5);
        assert_eq!(manifest.table.byte_len, 50);
        assert_eq!(manifest.table.md5.len(), 32);
        assert_eq!(manifest.ucd_version, UcdVersion::new(15, 1, 0));
    }

    #[test]
    fn from_bytes_rejects_partial_records() {
        assert!(SpanTable::from_bytes(UcdVersion::new(1, 0, 0), vec![0; 11]).is_err());
        let t = SpanTable::from_bytes(UcdVersion::new(1, 0, 0), vec![0; 20]).unwrap();
        assert_eq!(t.len(), 2);
    }
}
