use crate::error::{GitupError, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic version parsed from a tag such as `v1.2.3-beta+exp.sha.5114f85`
///
/// Numeric components are limited to `0..=255`. Missing pre-release or build
/// metadata is represented by an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SemanticVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
    pub pre_release: String,
    pub build: String,
}

impl SemanticVersion {
    /// Create a version without pre-release or build metadata
    pub fn new(major: u8, minor: u8, patch: u8) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            ..Default::default()
        }
    }

    /// Parse a `v<major>.<minor>.<patch>[-<pre>][+<build>]` tag
    ///
    /// Surrounding whitespace is ignored. Every malformed input yields
    /// [`GitupError::InvalidVersion`].
    pub fn parse(tag: &str) -> Result<Self> {
        let invalid = || GitupError::invalid_version(tag);

        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(invalid());
        }
        let rest = trimmed.strip_prefix('v').ok_or_else(invalid)?;

        // Only the first two dots separate numbers, the tail may hold dotted identifiers.
        let mut pieces = rest.splitn(3, '.');
        let (major, minor, tail) = match (pieces.next(), pieces.next(), pieces.next()) {
            (Some(major), Some(minor), Some(tail)) => (major, minor, tail),
            _ => return Err(invalid()),
        };

        let major = parse_component(major).ok_or_else(invalid)?;
        let minor = parse_component(minor).ok_or_else(invalid)?;

        let dash = tail.find('-');
        let plus = tail.find('+');
        let mut patch_end = tail.len();
        let mut pre_release = String::new();
        let mut build = String::new();

        if let Some(dash) = dash.filter(|&d| plus.map_or(true, |p| d < p)) {
            let end = plus.unwrap_or(tail.len());
            pre_release = tail[dash + 1..end].to_string();
            if pre_release.is_empty() {
                return Err(invalid());
            }
            patch_end = dash;
        }
        if let Some(plus) = plus {
            build = tail[plus + 1..].to_string();
            if build.is_empty() {
                return Err(invalid());
            }
            patch_end = patch_end.min(plus);
        }

        let patch = parse_component(&tail[..patch_end]).ok_or_else(invalid)?;

        Ok(SemanticVersion {
            major,
            minor,
            patch,
            pre_release,
            build,
        })
    }
}

impl FromStr for SemanticVersion {
    type Err = GitupError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre_release.is_empty() {
            write!(f, "-{}", self.pre_release)?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build)?;
        }
        Ok(())
    }
}

/// Unsigned decimal in `0..=255`; signs and empty strings are refused.
fn parse_component(s: &str) -> Option<u8> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<u8>().ok()
}
