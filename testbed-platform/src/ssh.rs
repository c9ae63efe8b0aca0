//! SSH-backed machine implementation.
//!
//! Shells out to `ssh(1)` via `tokio::process::Command`. SSH keys must be
//! pre-configured; `BatchMode` rules out password prompts. Sessions map to
//! ControlMaster connections, so `open_session`/`close` cost one real dial
//! instead of one per command.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;

use crate::exec::{ExecError, ExecOutput};
use crate::machine::{Machine, Session};

/// SSH connection timeout in seconds.
const CONNECT_TIMEOUT_SECS: u32 = 30;

/// A machine reached through `ssh(1)`.
#[derive(Debug, Clone)]
pub struct SshMachine {
    host: String,
    user: String,
    private_address: String,
}

impl SshMachine {
    /// Create a handle for a machine reachable at `host` as `user`.
    ///
    /// `private_address` is the address the cluster tooling reports for the
    /// machine, which may differ from the address ssh dials.
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        private_address: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            private_address: private_address.into(),
        }
    }

    /// The `user@host` ssh destination.
    fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }
}

/// Common ssh options: no host-key prompt, bounded connect, no password
/// fallback.
fn base_args() -> Vec<String> {
    vec![
        "-o".into(),
        "StrictHostKeyChecking=no".into(),
        "-o".into(),
        format!("ConnectTimeout={}", CONNECT_TIMEOUT_SECS),
        "-o".into(),
        "BatchMode=yes".into(),
    ]
}

fn capture(output: std::process::Output) -> ExecOutput {
    ExecOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(-1),
    }
}

#[async_trait]
impl Machine for SshMachine {
    fn private_address(&self) -> &str {
        &self.private_address
    }

    async fn run(&self, cmd: &str) -> Result<ExecOutput, ExecError> {
        let output = Command::new("ssh")
            .args(base_args())
            .arg(self.destination())
            .arg(cmd)
            .output()
            .await?;
        Ok(capture(output))
    }

    async fn open_session(&self) -> Result<Box<dyn Session>, ExecError> {
        let socket = std::env::temp_dir().join(format!(
            "testbed-ssh-{}",
            uuid::Uuid::new_v4().as_simple()
        ));

        let output = Command::new("ssh")
            .args(base_args())
            .args(["-M", "-N", "-f", "-S"])
            .arg(&socket)
            .arg(self.destination())
            .output()
            .await?;

        if !output.status.success() {
            return Err(ExecError::Connect {
                host: self.host.clone(),
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(Box::new(SshSession {
            socket,
            destination: self.destination(),
            host: self.host.clone(),
        }))
    }

    async fn reboot(&self) -> Result<(), ExecError> {
        // The connection drops before the exit status makes it back, so the
        // command's own result is meaningless; only a spawn failure counts.
        self.run("sudo systemctl reboot").await.map(|_| ())
    }
}

/// A ControlMaster-multiplexed ssh session.
struct SshSession {
    socket: PathBuf,
    destination: String,
    host: String,
}

#[async_trait]
impl Session for SshSession {
    async fn run(&mut self, cmd: &str) -> Result<ExecOutput, ExecError> {
        let output = Command::new("ssh")
            .arg("-S")
            .arg(&self.socket)
            .arg(&self.destination)
            .arg(cmd)
            .output()
            .await?;
        Ok(capture(output))
    }

    async fn close(self: Box<Self>) -> Result<(), ExecError> {
        let output = Command::new("ssh")
            .arg("-S")
            .arg(&self.socket)
            .args(["-O", "exit"])
            .arg(&self.destination)
            .output()
            .await?;

        if !output.status.success() {
            return Err(ExecError::Session {
                host: self.host,
                detail: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
