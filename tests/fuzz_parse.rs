//! Lightweight fuzz-style tests; no external fuzz harness required.

use ucdage::table::MAX_CODEPOINT;
use ucdage::{AgeError, VersionedSpan, decode, encode, parse};

fn check_span(span: &VersionedSpan) {
    assert!(span.start <= span.stop, "invalid span: start > stop: {span:?}");
    assert!(span.stop <= MAX_CODEPOINT, "span beyond max codepoint: {span:?}");
}

/// Drain the reader, checking every span; returns how many were produced.
fn drain(src: &str) -> usize {
    let mut n = 0;
    for item in parse::parse_spans_str(src) {
        match item {
            Ok(span) => {
                check_span(&span);
                n += 1;
            }
            Err(AgeError::MalformedRecord { .. }) => break,
            Err(e) => panic!("unexpected reader error: {e}"),
        }
    }
    n
}

#[derive(Clone)]
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    fn gen_range(&mut self, hi: usize) -> usize {
        (self.next_u64() as usize) % hi
    }
}

fn gen_ucd_like(rng: &mut XorShift64, len: usize) -> String {
    // restrict to a record-relevant alphabet, so we hit the interesting tokenizer paths.
    const DICT: &[u8] = b"0123456789ABCDEFabcdef..;;##  \n\t\r\\@:xyzU+-";
    let mut s = String::with_capacity(len);
    for _ in 0..len {
        s.push(DICT[rng.gen_range(DICT.len())] as char);
    }
    s
}

fn gen_record(rng: &mut XorShift64) -> (String, VersionedSpan) {
    let start = rng.gen_range(0x10FFFF) as u32;
    let width = rng.gen_range(0x400) as u32;
    let stop = start.saturating_add(width).min(MAX_CODEPOINT);
    let major = rng.gen_range(20) as u32;
    let minor = rng.gen_range(4) as u32;
    let line = if start == stop && rng.gen_range(2) == 0 {
        format!("{start:04X} ; {major}.{minor} # single")
    } else {
        format!("{start:04X}..{stop:04X} ; {major}.{minor} # range")
    };
    (line, VersionedSpan::new(start, stop, major, minor))
}

#[test]
fn fuzz_reader_random_inputs_total_and_in_bounds() {
    // keep cases bounded so this doesn't slow down normal `cargo test` too much.
    let mut rng = XorShift64::new(0xC0FFEE);
    for _case in 0..2_000 {
        let len = rng.gen_range(2_000);
        let input = gen_ucd_like(&mut rng, len);
        drain(&input);
    }
}

#[test]
fn fuzz_generated_records_parse_and_round_trip() {
    let mut rng = XorShift64::new(0xDECAF);
    for _case in 0..200 {
        let mut src = String::from("# DerivedAge-15.1.0.txt\n");
        let mut expected = Vec::new();
        for _ in 0..rng.gen_range(64) {
            if rng.gen_range(4) == 0 {
                src.push_str("# decoration\n\n");
            }
            let (line, span) = gen_record(&mut rng);
            src.push_str(&line);
            src.push('\n');
            expected.push(span);
        }

        let spans: Vec<_> = parse::parse_spans_str(&src)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(spans, expected);

        let bytes = encode(&spans).unwrap();
        assert_eq!(decode(&bytes).unwrap().collect::<Vec<_>>(), spans);
    }
}

#[test]
fn fuzz_decode_arbitrary_lengths() {
    let mut rng = XorShift64::new(0xBEEF);
    for _case in 0..500 {
        let len = rng.gen_range(200);
        let data: Vec<u8> = (0..len).map(|_| rng.next_u64() as u8).collect();
        match decode(&data) {
            Ok(dec) => assert_eq!(dec.count() * ucdage::RECORD_SIZE, len),
            Err(AgeError::Format { len: l, .. }) => assert_eq!(l, len),
            Err(e) => panic!("unexpected decode error: {e}"),
        }
    }
}

#[test]
fn pathological_separators_do_not_panic() {
    let inputs = [
        "..;..#..",
        ";;;;;;;;",
        "0041..;1.1",
        "..0041;1.1",
        "0041....0042;1.1",
        "0041 ; 1.1.",
        "0041 ; .1",
        "\\#0041 ; 1.1",
        "FFFFFFFFFFFFFFFFFFFFFFFF ; 1.1",
    ];
    for input in inputs {
        drain(input);
    }
}
