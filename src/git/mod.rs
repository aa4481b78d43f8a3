//! Git operations abstraction layer
//!
//! The update workflow only needs three things from version control: the tag
//! the checkout sits on, the newest tag upstream, and a way to switch to a tag.
//! They are expressed by the [Repository] trait so the workflow can run
//! against a real repository or an in-memory double.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! ```rust,no_run
//! # use gitup::git::{Git2Repository, Repository};
//! # fn example() -> gitup::Result<()> {
//! let repo = Git2Repository::open(".", "origin")?;
//! let local = repo.local_tag()?;
//! let latest = repo.last_tag()?;
//! if local != latest {
//!     repo.checkout_tag(&latest)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Version-control collaborator used by the update workflow
///
/// Every call is synchronous and may block on the filesystem or network.
/// Implementations map their own failures into [crate::error::GitupError].
pub trait Repository {
    /// Most recent tag reachable from the current checkout position
    fn local_tag(&self) -> Result<String>;

    /// Most recent tag upstream
    ///
    /// Refreshes the local view of remote tags before resolving it.
    fn last_tag(&self) -> Result<String>;

    /// Switch the working tree to `tag`
    ///
    /// Fails with [crate::error::GitupError::UndefinedTag] when `tag` is blank.
    fn checkout_tag(&self, tag: &str) -> Result<()>;
}
