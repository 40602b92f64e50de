use serde::{Deserialize, Serialize};

/// An inclusive codepoint range `[start, stop]` introduced in UCD `major.minor`.
///
/// Single-codepoint records have `stop == start`. Construction through
/// [`VersionedSpan::new`] asserts `start <= stop` in debug builds; the reader
/// guarantees it for everything it yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionedSpan {
    pub start: u32,
    pub stop: u32,
    pub major: u32,
    pub minor: u32,
}

impl VersionedSpan {
    #[inline]
    pub fn new(start: u32, stop: u32, major: u32, minor: u32) -> Self {
        debug_assert!(start <= stop, "VersionedSpan start must be <= stop");
        Self {
            start,
            stop,
            major,
            minor,
        }
    }

    /// A span covering exactly one codepoint.
    #[inline]
    pub fn single(cp: u32, major: u32, minor: u32) -> Self {
        Self::new(cp, cp, major, minor)
    }

    /// Number of codepoints covered; zero for an inverted span.
    #[inline]
    pub fn len(&self) -> u64 {
        if self.stop < self.start {
            return 0;
        }
        u64::from(self.stop) - u64::from(self.start) + 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(&self, cp: u32) -> bool {
        self.start <= cp && cp <= self.stop
    }

    /// The `(major, minor)` pair this span was introduced in.
    #[inline]
    pub fn version(&self) -> (u32, u32) {
        (self.major, self.minor)
    }
}
