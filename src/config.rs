use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::{ChangeClass, UpdatePolicy};
use crate::error::{GitupError, Result};

/// Name of the configuration file looked up in the working directory and the
/// user config directory
pub const CONFIG_FILE: &str = "gitup.toml";

/// Represents the complete configuration for gitup.
///
/// Contains the remote to refresh tags from and the update policy per change class.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default)]
    pub policy: PolicyConfig,
}

/// Returns the default remote name.
fn default_remote() -> String {
    "origin".to_string()
}

/// Action names per change class, as written in the file.
///
/// Values stay strings here so that a misspelled action is reported as an
/// unknown action rather than a TOML syntax error.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,

    #[serde(
        default,
        rename = "pre-release",
        alias = "prerelease",
        skip_serializing_if = "Option::is_none"
    )]
    pub pre_release: Option<String>,
}

impl PolicyConfig {
    fn entry(&self, class: ChangeClass) -> Option<&str> {
        match class {
            ChangeClass::Major => self.major.as_deref(),
            ChangeClass::Minor => self.minor.as_deref(),
            ChangeClass::Patch => self.patch.as_deref(),
            ChangeClass::PreRelease => self.pre_release.as_deref(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            policy: PolicyConfig::default(),
        }
    }
}

impl Config {
    /// Build the update policy described by the `[policy]` table.
    ///
    /// Slots are applied from major to pre-release through the validated
    /// setter, so a table that weakens a more specific class is rejected.
    pub fn policy(&self) -> Result<UpdatePolicy> {
        let mut policy = UpdatePolicy::new();
        for class in ChangeClass::ALL {
            if let Some(action) = self.policy.entry(class) {
                policy.set_action_str(&class.to_string(), action)?;
            }
        }
        Ok(policy)
    }

    /// Parse a configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| GitupError::config(e.to_string()))
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitup.toml` in current directory
/// 3. `gitup.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE).exists() {
        fs::read_to_string(CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    Config::from_toml(&config_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Action;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.remote, "origin");
        assert_eq!(config.policy().unwrap(), UpdatePolicy::new());
    }

    #[test]
    fn test_policy_from_toml() {
        let config = Config::from_toml(
            r#"
remote = "upstream"

[policy]
minor = "manual"
pre-release = "automatic"
"#,
        )
        .unwrap();

        assert_eq!(config.remote, "upstream");
        let policy = config.policy().unwrap();
        assert_eq!(policy.effective_action(ChangeClass::Major), Action::None);
        assert_eq!(policy.effective_action(ChangeClass::Patch), Action::Manual);
        assert_eq!(
            policy.effective_action(ChangeClass::PreRelease),
            Action::Automatic
        );
    }

    #[test]
    fn test_policy_downgrade_in_file_is_rejected() {
        let text = "[policy]\nmajor = \"automatic\"\npatch = \"none\"\n";
        let config = Config::from_toml(text).unwrap();
        assert!(matches!(
            config.policy(),
            Err(GitupError::CannotDowngradePolicy { .. })
        ));
    }

    #[test]
    fn test_unknown_action_in_file() {
        let config = Config::from_toml("[policy]\nminor = \"always\"\n").unwrap();
        assert!(matches!(config.policy(), Err(GitupError::UnknownAction(_))));
    }

    #[test]
    fn test_unknown_class_in_file() {
        let err = Config::from_toml("[policy]\nbuild = \"automatic\"\n").unwrap_err();
        assert!(matches!(err, GitupError::Config(_)));
    }

    #[test]
    fn test_pre_release_slot_reaches_policy() {
        let config = Config::from_toml("[policy]\npre-release = \"auto\"\n").unwrap();
        let policy = config.policy().unwrap();
        assert_eq!(policy.effective_action(ChangeClass::PreRelease), Action::Automatic);
        assert_eq!(policy.effective_action(ChangeClass::Patch), Action::None);
    }

    #[test]
    fn test_prerelease_alias() {
        let config = Config::from_toml("[policy]\nprerelease = \"manual\"\n").unwrap();
        assert_eq!(config.policy.pre_release.as_deref(), Some("manual"));
    }
}
