use std::fmt;

/// Non-fatal conditions reported to the operator while checking for updates.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateWarning {
    /// A confirmation answer was neither yes nor no
    UnrecognizedResponse { reason: String },
    /// A tag could not be read from the repository or its remote
    TagUnavailable { which: TagSide, reason: String },
    /// A tag exists but is not a semantic version
    UnparsableTag { reason: String },
}

/// Which end of the comparison a tag belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagSide {
    Local,
    Remote,
}

impl fmt::Display for TagSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagSide::Local => write!(f, "local"),
            TagSide::Remote => write!(f, "remote"),
        }
    }
}

impl fmt::Display for UpdateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateWarning::UnrecognizedResponse { reason } => write!(f, "{}", reason),
            UpdateWarning::TagUnavailable { which, reason } => {
                write!(f, "Cannot read {} tag: {}", which, reason)
            }
            UpdateWarning::UnparsableTag { reason } => {
                write!(f, "Cannot compare tags: {}", reason)
            }
        }
    }
}
