//! Compiler version detection for the `check` command.
//!
//! `solc --version` prints something like
//! `Version: 0.8.24+commit.e11b9ed9.Linux.g++`; only the first `X.Y.Z` matters here.
//! Detection failures yield `None` and never abort a command.

use std::fmt;
use std::path::Path;
use std::process::Command;
use std::str::FromStr;

/// A `major.minor.patch` version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse the first `X.Y.Z` pattern found in a string.
    pub fn parse(s: &str) -> Option<Self> {
        s.char_indices()
            .filter(|(_, c)| c.is_ascii_digit())
            .find_map(|(i, _)| Self::parse_at(&s[i..]))
    }

    /// Parse `X.Y.Z` at the start of `s`; the patch may be followed by anything.
    fn parse_at(s: &str) -> Option<Self> {
        let mut parts = s.splitn(3, '.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        let patch_str: String = parts
            .next()?
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        let patch = patch_str.parse().ok()?;
        Some(Self::new(major, minor, patch))
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid version: {s}"))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Run `<binary> --version` and parse the output (stdout first, then stderr).
pub fn detect_version(binary: &Path) -> Option<Version> {
    let output = Command::new(binary).arg("--version").output().ok()?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if output.status.success() {
        if let Some(v) = Version::parse(&stdout) {
            return Some(v);
        }
    }
    Version::parse(&String::from_utf8_lossy(&output.stderr))
}
