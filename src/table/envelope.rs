use crate::table::{RecordLayout, UcdVersion};
use serde::{Deserialize, Serialize};

/// Top-level JSON manifest optionally written next to a generated table.
///
/// Wraps the table's metadata (schema versioning, record layout, source info,
/// digest) so the artifact can be inspected and verified without decoding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableManifest {
    /// Schema version for this JSON payload.
    pub schema_version: u32,

    pub generator: GeneratorInfo,

    /// The UCD edition the spans were read from.
    pub ucd_version: UcdVersion,

    /// How to interpret each record in the table.
    pub layout: RecordLayout,

    pub source: SourceInfo,

    pub table: TableInfo,
}

/// Identifies the program that produced the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorInfo {
    pub name: String,
    pub version: String,
}

/// Information about the input file used to produce the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// If available, a path to the source file used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Length of the input in bytes.
    pub byte_len: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    pub span_count: u64,
    pub byte_len: u64,

    /// Lowercase hex md5 of the raw table bytes.
    pub md5: String,
}
