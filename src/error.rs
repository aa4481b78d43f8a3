use crate::domain::{Action, ChangeClass};
use thiserror::Error;

/// Unified error type for gitup operations
#[derive(Error, Debug)]
pub enum GitupError {
    #[error("not a valid semantic version: '{0}'")]
    InvalidVersion(String),

    #[error("unknown type of version: '{0}'")]
    UnknownChangeClass(String),

    #[error("unknown action's type: '{0}'")]
    UnknownAction(String),

    #[error("unable to downgrade behavior on {class} versions: {action} is weaker than inherited {inherited}")]
    CannotDowngradePolicy {
        class: ChangeClass,
        action: Action,
        inherited: Action,
    },

    #[error("no available update")]
    NoUpdateAvailable,

    #[error("only accepts yes or no as valid response, got '{0}'")]
    UnrecognizedConfirmation(String),

    #[error("directory path is undefined")]
    UndefinedPath,

    #[error("tag name is undefined")]
    UndefinedTag,

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in gitup
pub type Result<T> = std::result::Result<T, GitupError>;

impl GitupError {
    /// Create an invalid version error for the given tag
    pub fn invalid_version(tag: impl Into<String>) -> Self {
        GitupError::InvalidVersion(tag.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        GitupError::Config(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        GitupError::Remote(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GitupError::config("bad policy table");
        assert_eq!(err.to_string(), "Configuration error: bad policy table");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GitupError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_invalid_version_carries_tag() {
        let err = GitupError::invalid_version("v1.2");
        assert_eq!(err.to_string(), "not a valid semantic version: 'v1.2'");
    }

    #[test]
    fn test_downgrade_message_names_levels() {
        let err = GitupError::CannotDowngradePolicy {
            class: ChangeClass::Minor,
            action: Action::Manual,
            inherited: Action::Automatic,
        };
        let msg = err.to_string();
        assert!(msg.contains("minor"));
        assert!(msg.contains("manual"));
        assert!(msg.contains("automatic"));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (GitupError::NoUpdateAvailable, "no available update"),
            (GitupError::UndefinedPath, "directory path is undefined"),
            (GitupError::UndefinedTag, "tag name is undefined"),
            (GitupError::remote("x"), "Remote operation failed"),
            (
                GitupError::UnrecognizedConfirmation("maybe".to_string()),
                "only accepts yes or no",
            ),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
