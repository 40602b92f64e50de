//! AFL++ fuzz target for the `ucdage` span reader and codec.
//!
//! This binary is intentionally stdin-driven, so it can be used with AFL++.
//! Build and run it via `cargo-afl`:
//!
//! ```bash
//! cargo install cargo-afl
//!
//! cargo afl build --release --features afl_fuzz --bin ucdage_afl_parse
//!
//! mkdir -p fuzz/afl/out
//!
//! cargo afl fuzz \
//!   -i fuzz/afl/in \
//!   -o fuzz/afl/out \
//!   target/release/ucdage_afl_parse
//! ```
//!
//! Rust panics normally unwind and exit with a non-crashing status code.
//! AFL++ only treats crashes as signals/aborts. We therefore catch any unwind
//! and turn it into `abort()`.

use std::io::Read;

use ucdage::parse::{self, HeaderPattern};
use ucdage::table::{MAX_CODEPOINT, UcdVersion};
use ucdage::{AgeError, SpanTable, VersionedSpan, decode, encode};

const MAX_INPUT_LEN: usize = 1_000_000; // 1MB guardrail; AFL++ will typically cap this anyway.

fn check_span(span: &VersionedSpan) {
    assert!(span.start <= span.stop, "invalid span: start > stop: {span:?}");
    assert!(span.stop <= MAX_CODEPOINT, "span beyond max codepoint: {span:?}");
}

fn run_one_input(data: &[u8]) {
    if data.len() > MAX_INPUT_LEN {
        return;
    }

    // UCD files should be UTF-8, but AFL++ will happily hand us arbitrary bytes.
    let src = String::from_utf8_lossy(data).to_string();

    // header scanning must be total.
    let first = src.lines().next().unwrap_or("");
    let _ = parse::parse_header_line(first, &HeaderPattern::default());

    let mut spans = Vec::new();
    for item in parse::parse_spans_str(&src) {
        match item {
            Ok(span) => {
                check_span(&span);
                spans.push(span);
            }
            Err(AgeError::MalformedRecord { .. }) => break,
            Err(e) => panic!("unexpected reader error: {e}"),
        }
    }

    // encode either fully succeeds and round-trips, or reports a range error.
    match encode(&spans) {
        Ok(bytes) => {
            let back: Vec<_> = decode(&bytes).unwrap().collect();
            assert_eq!(back, spans);
            let table = SpanTable::build(UcdVersion::new(0, 0, 0), &spans).unwrap();
            assert_eq!(table.as_bytes(), &bytes[..]);
        }
        Err(AgeError::Range { .. }) => {}
        Err(e) => panic!("unexpected encode error: {e}"),
    }

    // arbitrary bytes either decode whole or fail up front.
    if let Ok(dec) = decode(data) {
        assert_eq!(dec.count() * ucdage::RECORD_SIZE, data.len());
    }
}

fn main() {
    let mut data = Vec::new();
    std::io::stdin().read_to_end(&mut data).unwrap();

    // convert any panic into an abort().
    if std::panic::catch_unwind(|| run_one_input(&data)).is_err() {
        std::process::abort();
    }
}
