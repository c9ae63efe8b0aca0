//! Command execution primitives shared by every machine backend.

use thiserror::Error;

/// Transport-level failures from remote command execution.
#[derive(Debug, Error)]
pub enum ExecError {
    /// Local process spawn error (ssh binary missing, fork failure).
    #[error("spawn error: {0}")]
    Spawn(#[from] std::io::Error),

    /// Could not establish a connection to the machine.
    #[error("connection to {host} failed: {detail}")]
    Connect {
        /// Target host.
        host: String,
        /// Why the connection failed.
        detail: String,
    },

    /// An established session broke mid-command.
    #[error("session error on {host}: {detail}")]
    Session {
        /// Target host.
        host: String,
        /// Why the session failed.
        detail: String,
    },
}

/// Captured output of one remote command.
///
/// A non-zero exit code is data, not an error: the command ran and the
/// machine answered. Transport failures are [`ExecError`].
#[derive(Debug, Clone)]
pub struct ExecOutput {
    /// Standard output.
    pub stdout: String,
    /// Standard error.
    pub stderr: String,
    /// Exit code (0 = success).
    pub exit_code: i32,
}

impl ExecOutput {
    /// Output of a command that exited zero.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: 0,
        }
    }

    /// Output of a failed command with diagnostics on stderr.
    pub fn failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            exit_code,
        }
    }

    /// Returns true if the command exited zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
