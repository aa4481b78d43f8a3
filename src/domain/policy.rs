//! Per change class update policy with cascading lookup

use crate::error::{GitupError, Result};
use std::fmt;
use std::str::FromStr;

/// Granularity at which an update policy is configured
///
/// Variants are ordered from least specific (`Major`) to most specific
/// (`PreRelease`). Build metadata never drives updates and has no variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChangeClass {
    Major,
    Minor,
    Patch,
    PreRelease,
}

impl ChangeClass {
    /// All classes, least specific first
    pub const ALL: [ChangeClass; 4] = [
        ChangeClass::Major,
        ChangeClass::Minor,
        ChangeClass::Patch,
        ChangeClass::PreRelease,
    ];

    /// Position in the policy ledger
    pub fn index(self) -> usize {
        self as usize
    }

    /// The next less specific class, `None` for `Major`
    pub fn parent(self) -> Option<ChangeClass> {
        match self {
            ChangeClass::Major => None,
            ChangeClass::Minor => Some(ChangeClass::Major),
            ChangeClass::Patch => Some(ChangeClass::Minor),
            ChangeClass::PreRelease => Some(ChangeClass::Patch),
        }
    }
}

impl FromStr for ChangeClass {
    type Err = GitupError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(ChangeClass::Major),
            "minor" => Ok(ChangeClass::Minor),
            "patch" => Ok(ChangeClass::Patch),
            "pre-release" | "prerelease" => Ok(ChangeClass::PreRelease),
            other => Err(GitupError::UnknownChangeClass(other.to_string())),
        }
    }
}

impl TryFrom<u8> for ChangeClass {
    type Error = GitupError;

    /// Numeric codes 0 to 3; 4 (build metadata) and above are unknown.
    fn try_from(code: u8) -> Result<Self> {
        ChangeClass::ALL
            .get(usize::from(code))
            .copied()
            .ok_or_else(|| GitupError::UnknownChangeClass(code.to_string()))
    }
}

impl fmt::Display for ChangeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeClass::Major => write!(f, "major"),
            ChangeClass::Minor => write!(f, "minor"),
            ChangeClass::Patch => write!(f, "patch"),
            ChangeClass::PreRelease => write!(f, "pre-release"),
        }
    }
}

/// Strength of the response to an available update
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Action {
    /// Leave the checkout alone
    #[default]
    None,
    /// Ask the operator before switching
    Manual,
    /// Switch without asking
    Automatic,
}

impl FromStr for Action {
    type Err = GitupError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Action::None),
            "manual" => Ok(Action::Manual),
            "automatic" | "auto" => Ok(Action::Automatic),
            other => Err(GitupError::UnknownAction(other.to_string())),
        }
    }
}

impl TryFrom<u8> for Action {
    type Error = GitupError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Action::None),
            1 => Ok(Action::Manual),
            2 => Ok(Action::Automatic),
            other => Err(GitupError::UnknownAction(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::None => write!(f, "none"),
            Action::Manual => write!(f, "manual"),
            Action::Automatic => write!(f, "automatic"),
        }
    }
}

/// Action ledger indexed by [`ChangeClass`]
///
/// Strictness can only grow from `Major` towards `PreRelease`: a class
/// inherits at least the action in force for every less specific class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdatePolicy {
    until: [Action; 4],
}

impl UpdatePolicy {
    /// An empty policy where nothing is ever due
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `action` for `class`
    ///
    /// Fails with [`GitupError::CannotDowngradePolicy`] when `action` is weaker
    /// than what the less specific classes already imply. `Major` is never
    /// checked.
    pub fn set_action(&mut self, class: ChangeClass, action: Action) -> Result<()> {
        if let Some(parent) = class.parent() {
            let inherited = self.effective_action(parent);
            if action < inherited {
                return Err(GitupError::CannotDowngradePolicy {
                    class,
                    action,
                    inherited,
                });
            }
        }
        self.until[class.index()] = action;
        Ok(())
    }

    /// Parse both sides and delegate to [`UpdatePolicy::set_action`]
    pub fn set_action_str(&mut self, class: &str, action: &str) -> Result<()> {
        self.set_action(class.parse()?, action.parse()?)
    }

    /// Strongest action stored from `Major` down to `class`
    pub fn effective_action(&self, class: ChangeClass) -> Action {
        self.until[..=class.index()]
            .iter()
            .copied()
            .max()
            .unwrap_or_default()
    }

    /// Lookup by raw class index; anything out of range yields `Action::None`.
    pub fn action_at(&self, index: usize) -> Action {
        ChangeClass::ALL
            .get(index)
            .map_or(Action::None, |&class| self.effective_action(class))
    }

    /// Action stored for `class` itself, without cascading
    pub fn stored_action(&self, class: ChangeClass) -> Action {
        self.until[class.index()]
    }
}

impl fmt::Display for UpdatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = ChangeClass::ALL
            .iter()
            .map(|&class| format!("{}={}", class, self.effective_action(class)))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}
