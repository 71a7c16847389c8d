//! Version-control client abstraction
//!
//! This module provides a trait-based abstraction over the external
//! version-control tooling, allowing for a real subprocess-backed
//! implementation and a mock implementation for testing.
//!
//! The primary abstraction is the [VcsClient] trait, which names the tool
//! capabilities the mirror workflow needs. The concrete implementations:
//!
//! - [git_cli::GitCommandClient]: runs the `git` command-line tool
//! - [mock::MockVcsClient]: records invocations for tests
//!
//! Workflow code depends on the trait rather than a concrete client. Listing
//! methods return the tool's raw text output; parsing it is the job of
//! [crate::refs::parse_listing], so the unstable text contract stays out of
//! this interface.

pub mod git_cli;
pub mod mock;

pub use git_cli::GitCommandClient;
pub use mock::MockVcsClient;

use crate::error::Result;

/// Interface to the version-control tooling for tracked working copies.
///
/// Every method addresses one repository by its tracked name; the
/// implementation decides how that name maps to a working copy on disk. Any
/// failing invocation surfaces as [crate::error::MirrorError::Command] and
/// aborts the run.
///
/// Implementors must be `Send + Sync`.
pub trait VcsClient: Send + Sync {
    /// Fetch new upstream SVN revisions into the mirror.
    fn fetch_upstream(&self, repo: &str) -> Result<()>;

    /// Switch the working copy to the named branch.
    fn checkout_branch(&self, repo: &str, branch: &str) -> Result<()>;

    /// Rebase the checked-out branch onto the named upstream reference.
    fn rebase_onto(&self, repo: &str, upstream: &str) -> Result<()>;

    /// Raw listing of remote-tracking branch references, one name per line.
    fn list_remote_branches(&self, repo: &str) -> Result<String>;

    /// Raw listing of local branch references, one name per line.
    ///
    /// The line for the currently checked-out branch may carry a leading
    /// selection marker; callers parse with [crate::refs::parse_listing].
    fn list_local_branches(&self, repo: &str) -> Result<String>;

    /// Raw listing of local tag names, one per line.
    fn list_local_tags(&self, repo: &str) -> Result<String>;

    /// Create a local branch with the given name at the current HEAD.
    fn create_branch(&self, repo: &str, name: &str) -> Result<()>;

    /// Create an annotated tag with the given name and message.
    fn create_annotated_tag(&self, repo: &str, name: &str, message: &str) -> Result<()>;

    /// Force-push all local branches to the named remote.
    fn push_all_branches(&self, repo: &str, remote: &str) -> Result<()>;

    /// Force-push all local tags to the named remote.
    fn push_all_tags(&self, repo: &str, remote: &str) -> Result<()>;
}
