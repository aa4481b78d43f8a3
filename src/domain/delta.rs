//! Structured difference between two tags

use crate::domain::SemanticVersion;
use crate::error::Result;
use std::cmp::Ordering;

/// Separator placed between the left and right value of a differing field
pub const DIFF_SEPARATOR: &str = "<>";

/// Componentwise `left - right` difference of two versions
///
/// Numeric fields hold the exact signed difference, so a negative value means
/// the left tag is behind the right one. `pre_release_diff` and `build_diff`
/// are empty when both sides agree and `"<left><><right>"` otherwise.
///
/// `order` is a plain textual comparison of the two tags with build metadata
/// stripped. It is only an overall up/down/equal hint: `"v9.0.0"` sorts after
/// `"v10.0.0"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDelta {
    pub major: i16,
    pub minor: i16,
    pub patch: i16,
    pub pre_release_diff: String,
    pub build_diff: String,
    pub order: Ordering,
}

impl Default for VersionDelta {
    fn default() -> Self {
        VersionDelta {
            major: 0,
            minor: 0,
            patch: 0,
            pre_release_diff: String::new(),
            build_diff: String::new(),
            order: Ordering::Equal,
        }
    }
}

impl VersionDelta {
    /// True when neither numeric components nor pre-release differ
    pub fn is_same_release(&self) -> bool {
        self.major == 0 && self.minor == 0 && self.patch == 0 && self.pre_release_diff.is_empty()
    }
}

/// Compare two tags, returning `tag1 - tag2`
///
/// Both tags must parse as [`SemanticVersion`]; the first parse error is
/// returned unchanged.
pub fn compare(tag1: &str, tag2: &str) -> Result<VersionDelta> {
    let left = SemanticVersion::parse(tag1)?;
    let right = SemanticVersion::parse(tag2)?;

    Ok(VersionDelta {
        major: i16::from(left.major) - i16::from(right.major),
        minor: i16::from(left.minor) - i16::from(right.minor),
        patch: i16::from(left.patch) - i16::from(right.patch),
        pre_release_diff: field_diff(&left.pre_release, &right.pre_release),
        build_diff: field_diff(&left.build, &right.build),
        order: strip_build(tag1).cmp(strip_build(tag2)),
    })
}

fn strip_build(tag: &str) -> &str {
    match tag.find('+') {
        Some(pos) => &tag[..pos],
        None => tag,
    }
}

fn field_diff(left: &str, right: &str) -> String {
    if left == right {
        String::new()
    } else {
        format!("{}{}{}", left, DIFF_SEPARATOR, right)
    }
}
