//! Domain logic - pure version and policy rules independent of git operations

pub mod delta;
pub mod policy;
pub mod version;

pub use delta::{compare, VersionDelta};
pub use policy::{Action, ChangeClass, UpdatePolicy};
pub use version::SemanticVersion;
