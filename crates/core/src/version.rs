//! Dotted numeric version comparison
//!
//! SDK package directories are named `N[.N[.N]]` (`34.0.0`, `30.0.3`, `35`).
//! Versions are compared as `(major, minor, patch)` tuples. Only the leading
//! digit run of each segment is used, so `35.0.0-rc1` ranks as `35.0.0` and
//! a segment without leading digits counts as zero.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Three-field numeric version
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VersionTuple {
    /// First segment
    pub major: u64,
    /// Second segment, 0 when absent
    pub minor: u64,
    /// Third segment, 0 when absent
    pub patch: u64,
}

impl VersionTuple {
    /// Build a tuple from its components
    #[must_use]
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a dotted version string. Never fails.
    #[must_use]
    pub fn parse(version: &str) -> Self {
        let mut fields = version.trim().split('.').map(leading_number);
        Self {
            major: fields.next().unwrap_or(0),
            minor: fields.next().unwrap_or(0),
            patch: fields.next().unwrap_or(0),
        }
    }
}

impl fmt::Display for VersionTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

fn leading_number(segment: &str) -> u64 {
    let digits = segment
        .find(|c: char| !c.is_ascii_digit())
        .map_or(segment, |end| &segment[..end]);
    digits.parse().unwrap_or(0)
}

/// Returns true if `a >= b`
#[must_use]
pub fn version_ge(a: &str, b: &str) -> bool {
    VersionTuple::parse(a) >= VersionTuple::parse(b)
}

/// Pick the highest version from a list of names.
///
/// Names that compare equal keep their original order, so the first one wins.
pub fn latest_version<I, S>(names: I) -> Option<S>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut best: Option<(VersionTuple, S)> = None;
    for name in names {
        let tuple = VersionTuple::parse(name.as_ref());
        if best.as_ref().is_none_or(|(current, _)| tuple > *current) {
            best = Some((tuple, name));
        }
    }
    best.map(|(_, name)| name)
}
