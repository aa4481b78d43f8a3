//! Update orchestration for a single repository
//!
//! [Updater] asks its [Repository] for the local and latest tags, compares
//! them, picks an [Action] from the [UpdatePolicy] and then leaves the
//! checkout alone, asks the operator, or switches to the latest tag.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::domain::{compare, Action, ChangeClass, UpdatePolicy, VersionDelta};
use crate::error::{GitupError, Result};
use crate::git::Repository;
use crate::ui::Console;
use crate::warning::{TagSide, UpdateWarning};

/// Where the updater stands for its repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateState {
    #[default]
    Idle,
    Checking,
    Due(Action),
    UpToDate,
    Updating,
    Confirmed,
    Declined,
    Failed,
}

/// Successful result of [Updater::update]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The working tree now sits on `to`
    Updated { from: String, to: String },
    /// The operator said no; nothing changed
    Declined,
}

/// Update orchestrator owning the cached state of one repository
pub struct Updater<G, I, O> {
    git: G,
    console: Console<I, O>,
    local_tag: String,
    remote_tag: String,
    last_delta: VersionDelta,
    chosen_action: Action,
    state: UpdateState,
    warning: Option<UpdateWarning>,
}

impl<G: Repository, I: BufRead, O: Write> Updater<G, I, O> {
    pub fn new(git: G, console: Console<I, O>) -> Self {
        Updater {
            git,
            console,
            local_tag: String::new(),
            remote_tag: String::new(),
            last_delta: VersionDelta::default(),
            chosen_action: Action::None,
            state: UpdateState::Idle,
            warning: None,
        }
    }

    /// Whether the policy asks for an update
    ///
    /// Tags are fetched once and cached. Failing to read or compare them
    /// answers `false`; the reason is kept in [Updater::warning].
    pub fn is_update_due(&mut self, policy: &UpdatePolicy) -> bool {
        self.state = UpdateState::Checking;
        self.chosen_action = Action::None;
        self.warning = None;

        if let Err(warning) = self.fetch_tags() {
            debug!(%warning, "cannot tell whether an update is due");
            self.warning = Some(warning);
            self.state = UpdateState::Failed;
            return false;
        }

        self.last_delta = match compare(&self.local_tag, &self.remote_tag) {
            Ok(delta) => delta,
            Err(e) => {
                debug!(error = %e, "cannot compare tags");
                self.warning = Some(UpdateWarning::UnparsableTag {
                    reason: e.to_string(),
                });
                self.state = UpdateState::Failed;
                return false;
            }
        };

        if let Some(class) = behind_class(&self.last_delta) {
            self.chosen_action = policy.effective_action(class);
            debug!(
                local = %self.local_tag,
                remote = %self.remote_tag,
                %class,
                action = %self.chosen_action,
                "local checkout is behind"
            );
        }

        if self.chosen_action > Action::None {
            self.state = UpdateState::Due(self.chosen_action);
            true
        } else {
            self.state = UpdateState::UpToDate;
            false
        }
    }

    /// Move to the latest tag if the policy allows it
    ///
    /// Manual policies ask the operator first; a "no" is a successful
    /// [UpdateOutcome::Declined]. Fails with [GitupError::NoUpdateAvailable]
    /// when nothing is due, and passes checkout errors through unchanged.
    pub fn update(&mut self, policy: &UpdatePolicy) -> Result<UpdateOutcome> {
        if !self.confirm(policy)? {
            return Ok(UpdateOutcome::Declined);
        }
        self.apply()
    }

    /// Settle whether the due update may proceed, leaving [UpdateState::Confirmed]
    /// or [UpdateState::Declined]
    ///
    /// Automatic policies confirm without asking.
    pub fn confirm(&mut self, policy: &UpdatePolicy) -> Result<bool> {
        if !self.is_update_due(policy) {
            return Err(GitupError::NoUpdateAvailable);
        }

        if self.chosen_action == Action::Manual {
            self.console.prompt_update(&self.local_tag, &self.remote_tag)?;
            if !self.console.read_confirmation() {
                info!(remote = %self.remote_tag, "update declined");
                self.state = UpdateState::Declined;
                return Ok(false);
            }
        }
        self.state = UpdateState::Confirmed;
        Ok(true)
    }

    /// Check out the remote tag of a confirmed update
    ///
    /// Fails with [GitupError::NoUpdateAvailable] from any state other than
    /// [UpdateState::Confirmed].
    pub fn apply(&mut self) -> Result<UpdateOutcome> {
        if self.state != UpdateState::Confirmed {
            return Err(GitupError::NoUpdateAvailable);
        }

        self.state = UpdateState::Updating;
        if let Err(e) = self.git.checkout_tag(&self.remote_tag) {
            self.state = UpdateState::Failed;
            return Err(e);
        }

        info!(from = %self.local_tag, to = %self.remote_tag, "updated");
        let from = std::mem::replace(&mut self.local_tag, self.remote_tag.clone());
        self.state = UpdateState::UpToDate;
        Ok(UpdateOutcome::Updated {
            from,
            to: self.remote_tag.clone(),
        })
    }

    /// Tag of the checkout, empty until fetched
    pub fn local_tag(&self) -> &str {
        &self.local_tag
    }

    /// Latest upstream tag, empty until fetched
    pub fn remote_tag(&self) -> &str {
        &self.remote_tag
    }

    pub fn last_delta(&self) -> &VersionDelta {
        &self.last_delta
    }

    pub fn chosen_action(&self) -> Action {
        self.chosen_action
    }

    pub fn state(&self) -> UpdateState {
        self.state
    }

    /// Why the last check could not decide, if it could not
    pub fn warning(&self) -> Option<&UpdateWarning> {
        self.warning.as_ref()
    }

    pub fn git(&self) -> &G {
        &self.git
    }

    pub fn console(&self) -> &Console<I, O> {
        &self.console
    }

    fn fetch_tags(&mut self) -> std::result::Result<(), UpdateWarning> {
        if self.local_tag.is_empty() {
            self.local_tag = self.git.local_tag().map_err(|e| UpdateWarning::TagUnavailable {
                which: TagSide::Local,
                reason: e.to_string(),
            })?;
        }
        if self.remote_tag.is_empty() {
            self.remote_tag = self.git.last_tag().map_err(|e| UpdateWarning::TagUnavailable {
                which: TagSide::Remote,
                reason: e.to_string(),
            })?;
        }
        Ok(())
    }
}

/// The change class through which the local tag trails the remote one
///
/// The first differing numeric component decides; a positive difference
/// means the checkout is ahead. Equal numbers fall back to the pre-release.
fn behind_class(delta: &VersionDelta) -> Option<ChangeClass> {
    if delta.is_same_release() {
        return None;
    }
    let numeric = [
        (delta.major, ChangeClass::Major),
        (delta.minor, ChangeClass::Minor),
        (delta.patch, ChangeClass::Patch),
    ];
    match numeric.iter().find(|(diff, _)| *diff != 0) {
        Some(&(diff, class)) if diff < 0 => Some(class),
        Some(_) => None,
        None => Some(ChangeClass::PreRelease),
    }
}
