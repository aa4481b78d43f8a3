use crate::error::{GitupError, Result};
use crate::git::Repository;
use std::cell::RefCell;

/// Mock repository for testing without actual git operations
///
/// Tags default to `None`, which makes the matching query fail. Every
/// successful or failed checkout request is recorded.
#[derive(Debug, Default)]
pub struct MockRepository {
    local_tag: Option<String>,
    remote_tag: Option<String>,
    fail_checkout: bool,
    checkouts: RefCell<Vec<String>>,
}

impl MockRepository {
    /// Create a repository on `local` whose upstream is at `remote`
    pub fn new(local: impl Into<String>, remote: impl Into<String>) -> Self {
        MockRepository {
            local_tag: Some(local.into()),
            remote_tag: Some(remote.into()),
            ..Default::default()
        }
    }

    /// Make `local_tag` fail
    pub fn without_local_tag(mut self) -> Self {
        self.local_tag = None;
        self
    }

    /// Make `last_tag` fail
    pub fn without_remote_tag(mut self) -> Self {
        self.remote_tag = None;
        self
    }

    /// Make `checkout_tag` fail after recording the request
    pub fn failing_checkout(mut self) -> Self {
        self.fail_checkout = true;
        self
    }

    /// Tags passed to `checkout_tag`, in call order
    pub fn checkouts(&self) -> Vec<String> {
        self.checkouts.borrow().clone()
    }
}

impl Repository for MockRepository {
    fn local_tag(&self) -> Result<String> {
        self.local_tag
            .clone()
            .ok_or_else(|| GitupError::Git(git2::Error::from_str("No names found")))
    }

    fn last_tag(&self) -> Result<String> {
        self.remote_tag
            .clone()
            .ok_or_else(|| GitupError::remote("fetch failed"))
    }

    fn checkout_tag(&self, tag: &str) -> Result<()> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(GitupError::UndefinedTag);
        }
        self.checkouts.borrow_mut().push(tag.to_string());
        if self.fail_checkout {
            return Err(GitupError::Git(git2::Error::from_str(
                "local changes would be overwritten",
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_tags() {
        let repo = MockRepository::new("v1.0.0", "v1.1.0");
        assert_eq!(repo.local_tag().unwrap(), "v1.0.0");
        assert_eq!(repo.last_tag().unwrap(), "v1.1.0");
    }

    #[test]
    fn test_mock_repository_failures() {
        let repo = MockRepository::new("v1.0.0", "v1.1.0")
            .without_local_tag()
            .without_remote_tag();
        assert!(repo.local_tag().is_err());
        assert!(repo.last_tag().is_err());
    }

    #[test]
    fn test_mock_repository_records_checkouts() {
        let repo = MockRepository::new("v1.0.0", "v1.1.0");
        repo.checkout_tag(" v1.1.0 ").unwrap();
        assert_eq!(repo.checkouts(), vec!["v1.1.0".to_string()]);
    }

    #[test]
    fn test_mock_repository_rejects_blank_tag() {
        let repo = MockRepository::default();
        assert!(matches!(repo.checkout_tag("  "), Err(GitupError::UndefinedTag)));
        assert!(repo.checkouts().is_empty());
    }

    #[test]
    fn test_mock_repository_failing_checkout() {
        let repo = MockRepository::new("v1.0.0", "v1.1.0").failing_checkout();
        assert!(repo.checkout_tag("v1.1.0").is_err());
        assert_eq!(repo.checkouts().len(), 1);
    }
}
