//! Span table -> embeddable Rust source.
//!
//! The generated module is self-contained: it carries the UCD version, the
//! record layout, the raw byte table, and an `iter_spans()` decoder, so the
//! consuming crate needs nothing from this one.
//!
//! Output is deterministic: the same table always renders to the same text.

use crate::codec::SpanTable;
use crate::table::{FieldSpec, FieldType, GENERATOR_NAME, GENERATOR_VERSION, RecordLayout};

/// Options controlling generated source.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Name of the source file, mentioned in the `@generated` header.
    pub source_label: Option<String>,

    /// Emit the `iter_spans()` decoder alongside the table.
    pub emit_decoder: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            source_label: None,
            emit_decoder: true,
        }
    }
}

/// Render with default options.
pub fn render_table(table: &SpanTable) -> String {
    render_table_with_options(table, &RenderOptions::default())
}

pub fn render_table_with_options(table: &SpanTable, opts: &RenderOptions) -> String {
    let layout = table.layout();
    let v = table.ucd_version();
    let mut out = String::new();

    match &opts.source_label {
        Some(label) => out.push_str(&format!(
            "// @generated by {GENERATOR_NAME} {GENERATOR_VERSION} from {label}. Do not edit.\n"
        )),
        None => out.push_str(&format!(
            "// @generated by {GENERATOR_NAME} {GENERATOR_VERSION}. Do not edit.\n"
        )),
    }
    out.push_str("//\n");
    out.push_str(&format!(
        "// {} spans, {}-byte {} records: {}.\n",
        table.len(),
        layout.record_size(),
        byte_order_label(layout),
        layout_signature(layout),
    ));
    out.push('\n');

    out.push_str("/// The UCD edition this table was generated from.\n");
    out.push_str(&format!(
        "pub const UCD_VERSION: (u32, u32, u32) = ({}, {}, {});\n\n",
        v.major, v.minor, v.patch
    ));

    out.push_str("/// Bytes per record.\n");
    out.push_str(&format!(
        "pub const RECORD_SIZE: usize = {};\n\n",
        layout.record_size()
    ));

    out.push_str("/// `(field, width)` pairs in record order.\n");
    let pairs: Vec<String> = layout
        .fields
        .iter()
        .map(|f| format!("(\"{}\", {})", f.name, f.width))
        .collect();
    out.push_str(&format!(
        "pub const RECORD_LAYOUT: &[(&str, usize)] = &[{}];\n\n",
        pairs.join(", ")
    ));

    if opts.emit_decoder {
        render_decoder(&mut out, layout);
        out.push('\n');
    }

    out.push_str("/// Concatenated records, in source order.\n");
    out.push_str("pub static VERSION_SPANS: &[u8] = &[\n");
    for record in table.as_bytes().chunks(layout.record_size()) {
        let bytes: Vec<String> = record.iter().map(|b| format!("0x{b:02x}")).collect();
        out.push_str(&format!("    {},\n", bytes.join(", ")));
    }
    out.push_str("];\n");

    out
}

fn byte_order_label(layout: &RecordLayout) -> &'static str {
    match layout.byte_order {
        crate::table::ByteOrder::LittleEndian => "little-endian",
    }
}

fn layout_signature(layout: &RecordLayout) -> String {
    layout
        .fields
        .iter()
        .map(|f| format!("{}:{}", f.name, f.ty.rust_name()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Expression reading `field` out of a record slice bound to `r`.
fn field_expr(field: &FieldSpec) -> String {
    let o = field.offset;
    match field.ty {
        FieldType::U32 => format!(
            "u32::from_le_bytes([r[{}], r[{}], r[{}], r[{}]])",
            o,
            o + 1,
            o + 2,
            o + 3
        ),
        FieldType::U8 => format!("r[{o}]"),
    }
}

fn render_decoder(out: &mut String, layout: &RecordLayout) {
    let item_types: Vec<&str> = layout.fields.iter().map(|f| f.ty.rust_name()).collect();
    let names: Vec<&str> = layout.fields.iter().map(|f| f.name.as_str()).collect();

    out.push_str(&format!(
        "/// Decodes `VERSION_SPANS` into `({})` tuples.\n",
        names.join(", ")
    ));
    out.push_str(&format!(
        "pub fn iter_spans() -> impl Iterator<Item = ({})> {{\n",
        item_types.join(", ")
    ));
    out.push_str("    VERSION_SPANS.chunks_exact(RECORD_SIZE).map(|r| {\n");
    out.push_str("        (\n");
    for f in &layout.fields {
        out.push_str(&format!("            {},\n", field_expr(f)));
    }
    out.push_str("        )\n");
    out.push_str("    })\n");
    out.push_str("}\n");
}
