//! # testbed-platform
//!
//! Machine and remote-execution abstraction for the testbed harness.
//!
//! This crate defines the capability the cluster harness consumes from the
//! provisioning layer:
//! - [`Machine`] - a running machine reachable over SSH, identified by its
//!   private network address
//! - [`Session`] - a scoped remote session: opened immediately before use,
//!   closed on every exit path
//! - [`ExecOutput`] / [`ExecError`] - captured command output and
//!   transport-level failures
//!
//! Two implementations ship with the crate: [`SshMachine`], which shells out
//! to `ssh(1)`, and [`MockMachine`] for tests.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod exec;
mod machine;
mod mock;
mod ssh;

pub use exec::{ExecError, ExecOutput};
pub use machine::{Machine, Session};
pub use mock::MockMachine;
pub use ssh::SshMachine;
