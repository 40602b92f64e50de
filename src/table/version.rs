use serde::{Deserialize, Serialize};
use std::fmt;

/// The `(major, minor, patch)` edition of the Unicode Character Database a
/// source file describes.
///
/// This is file-level metadata; individual spans only carry `major.minor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UcdVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl UcdVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn as_tuple(&self) -> (u32, u32, u32) {
        (self.major, self.minor, self.patch)
    }
}

impl fmt::Display for UcdVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
