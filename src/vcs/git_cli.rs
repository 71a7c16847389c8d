use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::error::{MirrorError, Result};

use super::VcsClient;

/// How subprocess output is handled for non-listing invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Discard stdout, capture stderr; the capture is attached to the error
    /// when the command fails.
    #[default]
    Capture,
    /// Let the tool write straight to the terminal.
    Inherit,
}

/// [VcsClient] backed by the `git` command-line tool.
///
/// Each invocation runs with the working directory set to `<root>/<repo>`.
/// The SVN side is reached through `git svn`, which has no library
/// equivalent, so every operation goes through the CLI.
pub struct GitCommandClient {
    root: PathBuf,
    output: OutputMode,
}

impl GitCommandClient {
    /// Creates a client for working copies under the given root path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        GitCommandClient {
            root: root.into(),
            output: OutputMode::default(),
        }
    }

    /// Sets how subprocess output is handled.
    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    fn repo_path(&self, repo: &str) -> PathBuf {
        self.root.join(repo)
    }

    fn render(args: &[&str]) -> String {
        format!("git {}", args.join(" "))
    }

    /// Runs a mutating git command, discarding its stdout.
    fn run(&self, repo: &str, args: &[&str]) -> Result<()> {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(self.repo_path(repo));

        match self.output {
            OutputMode::Capture => {
                cmd.stdout(Stdio::null()).stderr(Stdio::piped());
                let output = cmd.output()?;
                if !output.status.success() {
                    return Err(MirrorError::command(
                        Self::render(args),
                        repo,
                        output.status.code().unwrap_or(-1),
                        String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
                    ));
                }
            }
            OutputMode::Inherit => {
                let status = cmd.status()?;
                if !status.success() {
                    return Err(MirrorError::command(
                        Self::render(args),
                        repo,
                        status.code().unwrap_or(-1),
                        String::new(),
                    ));
                }
            }
        }

        Ok(())
    }

    /// Runs a listing command and returns its stdout. Listing output is data,
    /// so stdout is always captured regardless of the output mode.
    fn run_listing(&self, repo: &str, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.repo_path(repo))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        if !output.status.success() {
            return Err(MirrorError::command(
                Self::render(args),
                repo,
                output.status.code().unwrap_or(-1),
                String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl VcsClient for GitCommandClient {
    fn fetch_upstream(&self, repo: &str) -> Result<()> {
        self.run(repo, &["svn", "fetch"])
    }

    fn checkout_branch(&self, repo: &str, branch: &str) -> Result<()> {
        self.run(repo, &["checkout", branch])
    }

    fn rebase_onto(&self, repo: &str, upstream: &str) -> Result<()> {
        self.run(repo, &["rebase", upstream])
    }

    fn list_remote_branches(&self, repo: &str) -> Result<String> {
        self.run_listing(repo, &["branch", "-r"])
    }

    fn list_local_branches(&self, repo: &str) -> Result<String> {
        self.run_listing(repo, &["branch"])
    }

    fn list_local_tags(&self, repo: &str) -> Result<String> {
        self.run_listing(repo, &["tag", "--list"])
    }

    fn create_branch(&self, repo: &str, name: &str) -> Result<()> {
        self.run(repo, &["branch", name])
    }

    fn create_annotated_tag(&self, repo: &str, name: &str, message: &str) -> Result<()> {
        self.run(repo, &["tag", "-a", "-m", message, name])
    }

    fn push_all_branches(&self, repo: &str, remote: &str) -> Result<()> {
        self.run(repo, &["push", remote, "--all", "--force"])
    }

    fn push_all_tags(&self, repo: &str, remote: &str) -> Result<()> {
        self.run(repo, &["push", remote, "--tags", "--force"])
    }
}
