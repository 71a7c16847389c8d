use std::collections::BTreeSet;
use std::sync::Mutex;

use crate::error::{MirrorError, Result};
use crate::vcs::VcsClient;

/// One recorded invocation against the mock client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VcsCall {
    FetchUpstream { repo: String },
    CheckoutBranch { repo: String, branch: String },
    RebaseOnto { repo: String, upstream: String },
    ListRemoteBranches { repo: String },
    ListLocalBranches { repo: String },
    ListLocalTags { repo: String },
    CreateBranch { repo: String, name: String },
    CreateAnnotatedTag { repo: String, name: String, message: String },
    PushAllBranches { repo: String, remote: String },
    PushAllTags { repo: String, remote: String },
}

/// Mock client for testing the workflow without running any tooling.
///
/// Records every invocation, serves scripted listings, and tracks created
/// branches and tags so repeated runs observe their own effects. Listings are
/// rendered in the tool's plain-text shape, including the selection marker on
/// the current branch, so tests exercise the real parsing path.
pub struct MockVcsClient {
    remote_branches: Mutex<BTreeSet<String>>,
    local_branches: Mutex<BTreeSet<String>>,
    local_tags: Mutex<BTreeSet<String>>,
    current_branch: Mutex<String>,
    calls: Mutex<Vec<VcsCall>>,
    fail_on: Mutex<Option<&'static str>>,
}

impl MockVcsClient {
    /// Create a new empty mock client
    pub fn new() -> Self {
        MockVcsClient {
            remote_branches: Mutex::new(BTreeSet::new()),
            local_branches: Mutex::new(BTreeSet::new()),
            local_tags: Mutex::new(BTreeSet::new()),
            current_branch: Mutex::new("master".to_string()),
            calls: Mutex::new(Vec::new()),
            fail_on: Mutex::new(None),
        }
    }

    /// Seed a remote-tracking branch reference
    pub fn add_remote_branch(&mut self, name: impl Into<String>) {
        self.remote_branches.lock().unwrap().insert(name.into());
    }

    /// Seed a local branch
    pub fn add_local_branch(&mut self, name: impl Into<String>) {
        self.local_branches.lock().unwrap().insert(name.into());
    }

    /// Seed a local tag
    pub fn add_local_tag(&mut self, name: impl Into<String>) {
        self.local_tags.lock().unwrap().insert(name.into());
    }

    /// Make the named trait method fail with a simulated command error
    pub fn fail_on(&mut self, method: &'static str) {
        *self.fail_on.lock().unwrap() = Some(method);
    }

    /// Every invocation recorded so far, in order
    pub fn calls(&self) -> Vec<VcsCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Current local branch set
    pub fn local_branches(&self) -> BTreeSet<String> {
        self.local_branches.lock().unwrap().clone()
    }

    /// Current local tag set
    pub fn local_tags(&self) -> BTreeSet<String> {
        self.local_tags.lock().unwrap().clone()
    }

    fn record(&self, method: &'static str, repo: &str, call: VcsCall) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if *self.fail_on.lock().unwrap() == Some(method) {
            return Err(MirrorError::command(method, repo, 1, "simulated failure"));
        }
        Ok(())
    }
}

impl Default for MockVcsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl VcsClient for MockVcsClient {
    fn fetch_upstream(&self, repo: &str) -> Result<()> {
        self.record(
            "fetch_upstream",
            repo,
            VcsCall::FetchUpstream { repo: repo.to_string() },
        )
    }

    fn checkout_branch(&self, repo: &str, branch: &str) -> Result<()> {
        self.record(
            "checkout_branch",
            repo,
            VcsCall::CheckoutBranch {
                repo: repo.to_string(),
                branch: branch.to_string(),
            },
        )?;
        *self.current_branch.lock().unwrap() = branch.to_string();
        Ok(())
    }

    fn rebase_onto(&self, repo: &str, upstream: &str) -> Result<()> {
        self.record(
            "rebase_onto",
            repo,
            VcsCall::RebaseOnto {
                repo: repo.to_string(),
                upstream: upstream.to_string(),
            },
        )
    }

    fn list_remote_branches(&self, repo: &str) -> Result<String> {
        self.record(
            "list_remote_branches",
            repo,
            VcsCall::ListRemoteBranches { repo: repo.to_string() },
        )?;
        let listing = self
            .remote_branches
            .lock()
            .unwrap()
            .iter()
            .map(|name| format!("  {}\n", name))
            .collect();
        Ok(listing)
    }

    fn list_local_branches(&self, repo: &str) -> Result<String> {
        self.record(
            "list_local_branches",
            repo,
            VcsCall::ListLocalBranches { repo: repo.to_string() },
        )?;
        let current = self.current_branch.lock().unwrap().clone();
        let listing = self
            .local_branches
            .lock()
            .unwrap()
            .iter()
            .map(|name| {
                if *name == current {
                    format!("* {}\n", name)
                } else {
                    format!("  {}\n", name)
                }
            })
            .collect();
        Ok(listing)
    }

    fn list_local_tags(&self, repo: &str) -> Result<String> {
        self.record(
            "list_local_tags",
            repo,
            VcsCall::ListLocalTags { repo: repo.to_string() },
        )?;
        let listing = self
            .local_tags
            .lock()
            .unwrap()
            .iter()
            .map(|name| format!("{}\n", name))
            .collect();
        Ok(listing)
    }

    fn create_branch(&self, repo: &str, name: &str) -> Result<()> {
        self.record(
            "create_branch",
            repo,
            VcsCall::CreateBranch {
                repo: repo.to_string(),
                name: name.to_string(),
            },
        )?;
        self.local_branches.lock().unwrap().insert(name.to_string());
        Ok(())
    }

    fn create_annotated_tag(&self, repo: &str, name: &str, message: &str) -> Result<()> {
        self.record(
            "create_annotated_tag",
            repo,
            VcsCall::CreateAnnotatedTag {
                repo: repo.to_string(),
                name: name.to_string(),
                message: message.to_string(),
            },
        )?;
        self.local_tags.lock().unwrap().insert(name.to_string());
        Ok(())
    }

    fn push_all_branches(&self, repo: &str, remote: &str) -> Result<()> {
        self.record(
            "push_all_branches",
            repo,
            VcsCall::PushAllBranches {
                repo: repo.to_string(),
                remote: remote.to_string(),
            },
        )
    }

    fn push_all_tags(&self, repo: &str, remote: &str) -> Result<()> {
        self.record(
            "push_all_tags",
            repo,
            VcsCall::PushAllTags {
                repo: repo.to_string(),
                remote: remote.to_string(),
            },
        )
    }
}
