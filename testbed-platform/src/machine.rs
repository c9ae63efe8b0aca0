//! The machine capability consumed by the cluster harness.
//!
//! # Design
//!
//! The harness never creates or destroys machines; it holds shared handles
//! (`Arc<dyn Machine>`) to machines the provisioning layer owns. The trait is
//! async and session-oriented:
//! - `run()` executes a single command over a throwaway connection
//! - `open_session()` establishes a reusable session for multiple commands;
//!   the caller must `close()` it on every exit path
//! - `reboot()` power-cycles the machine
//!
//! # Example
//!
//! ```ignore
//! let mut session = machine.open_session().await?;
//! let output = session.run("uptime").await;
//! session.close().await.ok();
//! println!("{}", output?.stdout);
//! ```

use async_trait::async_trait;

use crate::exec::{ExecError, ExecOutput};

/// A reusable remote session on one machine.
///
/// Sessions follow scoped-resource discipline: open immediately before use,
/// close before the enclosing operation returns, on success and failure
/// paths alike.
#[async_trait]
pub trait Session: Send {
    /// Run a command in this session, capturing stdout and stderr separately.
    async fn run(&mut self, cmd: &str) -> Result<ExecOutput, ExecError>;

    /// Close the session, releasing the underlying connection.
    async fn close(self: Box<Self>) -> Result<(), ExecError>;
}

/// A running machine reachable over a remote-execution transport.
///
/// Implementations handle the underlying mechanism (ssh, mock). The harness
/// treats handles as non-owning: machine lifecycle belongs to the
/// provisioning layer.
#[async_trait]
pub trait Machine: Send + Sync {
    /// The machine's private network address, as the cluster tooling
    /// reports it.
    fn private_address(&self) -> &str;

    /// Run a single command over a throwaway connection.
    async fn run(&self, cmd: &str) -> Result<ExecOutput, ExecError>;

    /// Open a reusable session for multiple commands.
    async fn open_session(&self) -> Result<Box<dyn Session>, ExecError>;

    /// Reboot the machine.
    async fn reboot(&self) -> Result<(), ExecError>;
}
