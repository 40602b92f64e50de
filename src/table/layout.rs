use serde::{Deserialize, Serialize};

/// Describes how one binary record is laid out, field by field.
///
/// The codec writes exactly this layout; the descriptor travels with the
/// table (in the manifest and the generated source) so a downstream reader
/// never has to reconstruct it independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLayout {
    pub byte_order: ByteOrder,
    pub fields: Vec<FieldSpec>,
}

impl RecordLayout {
    /// Total bytes per record; records are packed with no padding.
    pub fn record_size(&self) -> usize {
        self.fields.iter().map(|f| f.width).sum()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl Default for RecordLayout {
    /// `start:u32 stop:u32 major:u8 minor:u8`, little-endian.
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::LittleEndian,
            fields: vec![
                FieldSpec::new("start", FieldType::U32, 0),
                FieldSpec::new("stop", FieldType::U32, 4),
                FieldSpec::new("major", FieldType::U8, 8),
                FieldSpec::new("minor", FieldType::U8, 9),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ByteOrder {
    LittleEndian,
}

/// Primitive type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Unsigned 32-bit, restricted to the non-negative `i32` range so that
    /// readers decoding it as signed see the same value.
    U32,
    /// Unsigned 8-bit.
    U8,
}

impl FieldType {
    pub const fn width(self) -> usize {
        match self {
            FieldType::U32 => 4,
            FieldType::U8 => 1,
        }
    }

    /// Largest value the encoder accepts for this type.
    pub const fn max_value(self) -> u64 {
        match self {
            FieldType::U32 => i32::MAX as u64,
            FieldType::U8 => u8::MAX as u64,
        }
    }

    /// The Rust type name used in generated source.
    pub const fn rust_name(self) -> &'static str {
        match self {
            FieldType::U32 => "u32",
            FieldType::U8 => "u8",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub ty: FieldType,
    /// Byte offset from the start of the record.
    pub offset: usize,
    pub width: usize,
}

impl FieldSpec {
    pub fn new(name: &str, ty: FieldType, offset: usize) -> Self {
        Self {
            name: name.to_string(),
            ty,
            offset,
            width: ty.width(),
        }
    }
}
