//! Versioned span data model and the artifact envelope.
//!
//! This module defines the **contract** between:
//! 1) reading a DerivedAge-style source file -> `VersionedSpan`s, and
//! 2) encoding those spans into the fixed-width byte table.
//!
//! Design goals:
//! - One plain value type per entity, constructed once and never mutated.
//! - A self-describing record layout so readers never guess field widths.
//! - Stable JSON representation of the manifest for on-disk inspection.

mod envelope;
mod layout;
mod span;
mod version;

pub use envelope::*;
pub use layout::*;
pub use span::*;
pub use version::*;

/// JSON schema version for the manifest envelope.
///
/// Bump this when making non-backwards-compatible changes to the JSON structure.
pub const SCHEMA_VERSION: u32 = 1;

/// The generator name stored in manifests and generated sources.
pub const GENERATOR_NAME: &str = "ucdage";

/// The generator version stored in manifests and generated sources.
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Highest valid Unicode scalar value; span stops are clamped to it.
pub const MAX_CODEPOINT: u32 = char::MAX as u32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_json_round_trip() {
        let manifest = TableManifest {
            schema_version: SCHEMA_VERSION,
            generator: GeneratorInfo {
                name: GENERATOR_NAME.to_string(),
                version: GENERATOR_VERSION.to_string(),
            },
            ucd_version: UcdVersion::new(15, 1, 0),
            layout: RecordLayout::default(),
            source: SourceInfo {
                path: Some("data/DerivedAge.txt".to_string()),
                byte_len: 4242,
            },
            table: TableInfo {
                span_count: 2,
                byte_len: 20,
                md5: "00112233445566778899aabbccddeeff".to_string(),
            },
        };

        let json = serde_json::to_string_pretty(&manifest).expect("serialize");
        let back: TableManifest = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(manifest, back);
    }

    #[test]
    fn max_codepoint_matches_char_max() {
        assert_eq!(MAX_CODEPOINT, 0x10FFFF);
    }
}
