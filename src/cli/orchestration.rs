//! Main workflow orchestration logic
//!
//! Keeps the check-and-update flow out of main.rs so it can run against any
//! [Repository] and console without depending on clap.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::config::{load_config, Config};
use crate::domain::{Action, ChangeClass, UpdatePolicy};
use crate::error::{GitupError, Result};
use crate::git::{Git2Repository, Repository};
use crate::ui::Console;
use crate::updater::{UpdateOutcome, Updater};
use crate::warning::UpdateWarning;

/// Arguments for the update workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowArgs {
    /// Repository path
    pub path: String,

    /// Path to custom config file
    pub config_path: Option<String>,

    /// `CLASS=ACTION` overrides applied on top of the configured policy
    pub policy_overrides: Vec<String>,

    /// Only report whether an update is due
    pub check_only: bool,
}

/// Result of a workflow run that did not fail
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Tag the checkout was on, empty if it could not be read
    pub local_tag: String,

    /// Latest upstream tag, empty if it could not be read
    pub remote_tag: String,

    /// Whether the policy asked for an update
    pub due: bool,

    /// What `update` did, `None` when it was not attempted or nothing was due
    pub outcome: Option<UpdateOutcome>,

    /// Why due-ness could not be decided, if it could not
    pub warning: Option<UpdateWarning>,

    /// The policy that was applied
    pub policy: UpdatePolicy,
}

/// Parse a `CLASS=ACTION` policy override such as `minor=automatic`
pub fn parse_override(raw: &str) -> Result<(ChangeClass, Action)> {
    let (class, action) = raw.split_once('=').ok_or_else(|| {
        GitupError::config(format!(
            "Invalid policy override '{}': expected CLASS=ACTION",
            raw
        ))
    })?;
    Ok((class.trim().parse()?, action.trim().parse()?))
}

/// Build the policy from the configuration, then apply the overrides in order
pub fn build_policy(config: &Config, overrides: &[String]) -> Result<UpdatePolicy> {
    let mut policy = config.policy()?;
    for raw in overrides {
        let (class, action) = parse_override(raw)?;
        policy.set_action(class, action)?;
    }
    Ok(policy)
}

/// Main update workflow
///
/// 1. Load the configuration and build the policy
/// 2. Open the repository at `args.path`
/// 3. Check for an update and, unless `check_only`, apply it on the terminal
pub fn run(args: &WorkflowArgs) -> Result<WorkflowResult> {
    let config = load_config(args.config_path.as_deref())?;
    let policy = build_policy(&config, &args.policy_overrides)?;
    debug!(%policy, remote = %config.remote, "policy resolved");

    let repo = Git2Repository::open(&args.path, config.remote.clone())?;
    let mut updater = Updater::new(repo, Console::stdio());
    run_workflow(&mut updater, &policy, args.check_only)
}

/// Run one check (and, unless `check_only`, one update) for a repository
///
/// "Nothing due" is a normal result, not an error. Errors from the checkout
/// or the console are returned unchanged.
pub fn run_workflow<G, I, O>(
    updater: &mut Updater<G, I, O>,
    policy: &UpdatePolicy,
    check_only: bool,
) -> Result<WorkflowResult>
where
    G: Repository,
    I: BufRead,
    O: Write,
{
    let (due, outcome) = if check_only {
        (updater.is_update_due(policy), None)
    } else {
        match updater.update(policy) {
            Ok(outcome) => (true, Some(outcome)),
            Err(GitupError::NoUpdateAvailable) => (false, None),
            Err(e) => return Err(e),
        }
    };

    let local_tag = match &outcome {
        Some(UpdateOutcome::Updated { from, .. }) => from.clone(),
        _ => updater.local_tag().to_string(),
    };

    Ok(WorkflowResult {
        local_tag,
        remote_tag: updater.remote_tag().to_string(),
        due,
        outcome,
        warning: updater.warning().cloned(),
        policy: *policy,
    })
}
