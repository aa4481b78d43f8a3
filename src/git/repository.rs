use crate::error::{GitupError, Result};
use git2::build::CheckoutBuilder;
use git2::{Commit, DescribeFormatOptions, DescribeOptions, Repository as Git2Repo};
use tracing::debug;

/// Wrapper around git2::Repository with our trait interface
///
/// The repository is located and validated once, when the wrapper is built.
pub struct Git2Repository {
    repo: Git2Repo,
    remote: String,
}

impl Git2Repository {
    /// Open or discover the git repository containing `path`
    ///
    /// Surrounding whitespace in `path` is ignored; a blank path fails with
    /// [GitupError::UndefinedPath]. Tags are refreshed from `remote`.
    pub fn open(path: &str, remote: impl Into<String>) -> Result<Self> {
        let path = path.trim();
        if path.is_empty() {
            return Err(GitupError::UndefinedPath);
        }
        let repo = Git2Repo::discover(path)?;
        debug!(path, git_dir = %repo.path().display(), "opened repository");

        Ok(Self::from_git2(repo, remote))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo, remote: impl Into<String>) -> Self {
        Git2Repository {
            repo,
            remote: remote.into(),
        }
    }

    /// Name of the nearest tag reachable from `commit`
    fn describe(&self, commit: &Commit<'_>) -> Result<String> {
        let mut options = DescribeOptions::new();
        options.describe_tags();
        let describe = commit.as_object().describe(&options)?;

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(0);
        Ok(describe.format(Some(&format))?.trim().to_string())
    }

    /// Fetch every tag from the configured remote
    fn fetch_tags(&self) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(&self.remote)
            .map_err(|e| {
                GitupError::remote(format!("Cannot find remote '{}': {}", self.remote, e))
            })?;

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            let username = username_from_url.unwrap_or("git");
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }
                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let path = home.join(".ssh").join(key);
                        if path.exists() {
                            if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                                return Ok(cred);
                            }
                        }
                    }
                }
            }
            git2::Cred::default()
        });

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(callbacks);

        remote
            .fetch(&["+refs/tags/*:refs/tags/*"], Some(&mut fetch_options), None)
            .map_err(|e| {
                GitupError::remote(format!("Fetch from '{}' failed: {}", self.remote, e))
            })?;
        debug!(remote = %self.remote, "fetched tags");
        Ok(())
    }

    /// Most recently committed commit carrying a tag
    fn latest_tagged_commit(&self) -> Result<Commit<'_>> {
        let names = self.repo.tag_names(None)?;
        let mut latest: Option<Commit<'_>> = None;

        for name in names.iter().flatten() {
            let reference = match self.repo.find_reference(&format!("refs/tags/{}", name)) {
                Ok(reference) => reference,
                Err(_) => continue,
            };
            // Tags on trees or blobs cannot be checked out as a release.
            let commit = match reference.peel_to_commit() {
                Ok(commit) => commit,
                Err(_) => continue,
            };
            let newer = latest
                .as_ref()
                .map_or(true, |current| commit.time().seconds() > current.time().seconds());
            if newer {
                latest = Some(commit);
            }
        }

        latest.ok_or_else(|| GitupError::Git(git2::Error::from_str("no tags found")))
    }
}

impl super::Repository for Git2Repository {
    fn local_tag(&self) -> Result<String> {
        let head = self.repo.head()?.peel_to_commit()?;
        let tag = self.describe(&head)?;
        debug!(%tag, "resolved local tag");
        Ok(tag)
    }

    fn last_tag(&self) -> Result<String> {
        self.fetch_tags()?;
        let commit = self.latest_tagged_commit()?;
        let tag = self.describe(&commit)?;
        debug!(%tag, commit = %commit.id(), "resolved latest tag");
        Ok(tag)
    }

    fn checkout_tag(&self, tag: &str) -> Result<()> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(GitupError::UndefinedTag);
        }

        let commit = self
            .repo
            .revparse_single(&format!("refs/tags/{}", tag))?
            .peel_to_commit()?;

        let mut checkout = CheckoutBuilder::new();
        checkout.safe();
        self.repo.checkout_tree(commit.as_object(), Some(&mut checkout))?;
        self.repo.set_head_detached(commit.id())?;

        debug!(%tag, commit = %commit.id(), "checked out tag");
        Ok(())
    }
}
