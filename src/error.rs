use thiserror::Error;

/// Unified error type for svn-mirror operations
#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("command `{command}` failed with exit code {code} in '{repo}'")]
    Command {
        /// The command line that was run, e.g. "git svn fetch".
        command: String,
        /// Tracked repository the command ran in.
        repo: String,
        /// Exit code reported by the tool, or -1 if it died without one.
        code: i32,
        /// Captured standard error, empty when output was not captured.
        stderr: String,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in svn-mirror
pub type Result<T> = std::result::Result<T, MirrorError>;

impl MirrorError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        MirrorError::Config(msg.into())
    }

    /// Create a command-failure error from a finished invocation
    pub fn command(
        command: impl Into<String>,
        repo: impl Into<String>,
        code: i32,
        stderr: impl Into<String>,
    ) -> Self {
        MirrorError::Command {
            command: command.into(),
            repo: repo.into(),
            code,
            stderr: stderr.into(),
        }
    }

    /// Exit status the process should terminate with for this error.
    ///
    /// A failed invocation propagates the tool's own exit code; everything
    /// else (including a tool killed by a signal) maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            MirrorError::Command { code, .. } if *code > 0 => *code,
            _ => 1,
        }
    }

    /// Captured stderr of a failed invocation, if any was recorded.
    pub fn command_stderr(&self) -> Option<&str> {
        match self {
            MirrorError::Command { stderr, .. } if !stderr.is_empty() => Some(stderr),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MirrorError::config("test config issue");
        assert_eq!(err.to_string(), "configuration error: test config issue");
    }

    #[test]
    fn test_command_error_display() {
        let err = MirrorError::command("git svn fetch", "sqlalchemy", 128, "fatal: bad ref");
        let msg = err.to_string();
        assert!(msg.contains("git svn fetch"));
        assert!(msg.contains("sqlalchemy"));
        assert!(msg.contains("128"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: MirrorError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_exit_code_propagates_tool_code() {
        let err = MirrorError::command("git rebase trunk", "repo", 128, "");
        assert_eq!(err.exit_code(), 128);
    }

    #[test]
    fn test_exit_code_falls_back_to_one() {
        // Tool killed by a signal reports -1; config and I/O errors have no code.
        assert_eq!(MirrorError::command("git push", "repo", -1, "").exit_code(), 1);
        assert_eq!(MirrorError::config("bad").exit_code(), 1);
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(MirrorError::from(io_err).exit_code(), 1);
    }

    #[test]
    fn test_command_stderr_accessor() {
        let err = MirrorError::command("git tag", "repo", 1, "tag exists");
        assert_eq!(err.command_stderr(), Some("tag exists"));

        let quiet = MirrorError::command("git tag", "repo", 1, "");
        assert_eq!(quiet.command_stderr(), None);
        assert_eq!(MirrorError::config("x").command_stderr(), None);
    }
}
