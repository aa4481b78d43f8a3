//! Test infrastructure for gitup integration tests.

#![allow(dead_code)]

use anyhow::Result;
use git2::{Oid, Repository, Signature, Time};
use std::path::Path;
use tempfile::TempDir;

/// A temporary git repository that plays the upstream role.
/// Automatically cleaned up when dropped.
pub struct Upstream {
    dir: TempDir,
    pub repo: Repository,
}

impl Upstream {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        let repo = Repository::init(dir.path())?;
        Ok(Upstream { dir, repo })
    }

    /// Creates an upstream with one lightweight-tagged commit per tag, one second apart.
    pub fn with_tags(tags: &[&str]) -> Result<Self> {
        let upstream = Self::new()?;
        for (i, tag) in tags.iter().enumerate() {
            upstream.release(tag, 1_000 + i as i64)?;
        }
        Ok(upstream)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn url(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }

    /// Commits a change at `seconds` and tags it with a lightweight tag.
    pub fn release(&self, tag: &str, seconds: i64) -> Result<Oid> {
        let oid = commit(&self.repo, tag, seconds)?;
        let object = self.repo.find_object(oid, None)?;
        self.repo.tag_lightweight(tag, &object, false)?;
        Ok(oid)
    }

    /// Commits a change at `seconds` and tags it with an annotated tag.
    pub fn annotated_release(&self, tag: &str, seconds: i64) -> Result<Oid> {
        let oid = commit(&self.repo, tag, seconds)?;
        let object = self.repo.find_object(oid, None)?;
        self.repo
            .tag(tag, &object, &signature(seconds)?, &format!("Release {}", tag), false)?;
        Ok(oid)
    }
}

/// A clone of an [Upstream], with `origin` pointing back at it.
pub struct Checkout {
    dir: TempDir,
    pub repo: Repository,
}

impl Checkout {
    pub fn clone_from(upstream: &Upstream) -> Result<Self> {
        let dir = TempDir::new()?;
        let repo = Repository::clone(&upstream.url(), dir.path())?;
        Ok(Checkout { dir, repo })
    }

    pub fn path_str(&self) -> String {
        self.dir.path().to_string_lossy().into_owned()
    }

    pub fn head_oid(&self) -> Result<Oid> {
        Ok(self.repo.head()?.peel_to_commit()?.id())
    }

    pub fn tag_oid(&self, tag: &str) -> Result<Oid> {
        Ok(self
            .repo
            .revparse_single(&format!("refs/tags/{}", tag))?
            .peel_to_commit()?
            .id())
    }

    pub fn read_version_file(&self) -> Result<String> {
        Ok(std::fs::read_to_string(self.dir.path().join("VERSION"))?)
    }
}

fn signature(seconds: i64) -> Result<Signature<'static>> {
    Ok(Signature::new(
        "Test User",
        "test@example.com",
        &Time::new(seconds, 0),
    )?)
}

/// Writes `content` to VERSION and commits it on HEAD.
pub fn commit(repo: &Repository, content: &str, seconds: i64) -> Result<Oid> {
    let workdir = repo
        .workdir()
        .ok_or_else(|| anyhow::anyhow!("bare repository"))?;
    std::fs::write(workdir.join("VERSION"), content)?;

    let mut index = repo.index()?;
    index.add_path(Path::new("VERSION"))?;
    index.write()?;
    let tree = repo.find_tree(index.write_tree()?)?;

    let parents = match repo.head() {
        Ok(head) => vec![head.peel_to_commit()?],
        Err(_) => Vec::new(),
    };
    let parent_refs: Vec<_> = parents.iter().collect();

    let sig = signature(seconds)?;
    Ok(repo.commit(Some("HEAD"), &sig, &sig, content, &tree, &parent_refs)?)
}
