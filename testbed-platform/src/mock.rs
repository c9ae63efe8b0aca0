//! Mock machine for testing.
//!
//! Allows queueing command outputs and capturing executed commands for
//! verification. Sessions and reboots are counted so tests can assert the
//! scoped-session discipline (every open matched by a close).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::exec::{ExecError, ExecOutput};
use crate::machine::{Machine, Session};

/// Mock machine for testing.
///
/// Outputs are served FIFO from a queue shared between one-shot `run` calls
/// and session `run` calls; an empty queue yields a successful empty output.
#[derive(Debug)]
pub struct MockMachine {
    private_address: String,
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    outputs: VecDeque<ExecOutput>,
    commands: Vec<String>,
    open_sessions: usize,
    reboots: usize,
    fail_next_run: Option<String>,
    fail_next_session: Option<String>,
}

impl MockMachine {
    /// Create a mock machine with the given private address.
    pub fn new(private_address: impl Into<String>) -> Self {
        Self {
            private_address: private_address.into(),
            inner: Arc::default(),
        }
    }

    /// Queue an output to be returned by the next command.
    pub fn queue_output(&self, output: ExecOutput) {
        let mut inner = self.inner.lock().unwrap();
        inner.outputs.push_back(output);
    }

    /// Queue a zero-exit output with the given stdout.
    pub fn queue_success(&self, stdout: &str) {
        self.queue_output(ExecOutput::ok(stdout));
    }

    /// Queue a non-zero output with the given stderr.
    pub fn queue_failure(&self, exit_code: i32, stderr: &str) {
        self.queue_output(ExecOutput::failed(exit_code, stderr));
    }

    /// Cause the next command (one-shot or in-session) to fail at the
    /// transport layer.
    pub fn fail_next_run(&self, detail: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_run = Some(detail.to_string());
    }

    /// Cause the next `open_session()` to fail.
    pub fn fail_next_session(&self, detail: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next_session = Some(detail.to_string());
    }

    /// All commands executed against this machine, in order.
    pub fn commands(&self) -> Vec<String> {
        let inner = self.inner.lock().unwrap();
        inner.commands.clone()
    }

    /// Number of sessions currently open (opened and not yet closed).
    pub fn open_sessions(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.open_sessions
    }

    /// Number of reboots issued.
    pub fn reboots(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.reboots
    }
}

fn next_output(inner: &mut Inner, host: &str, cmd: &str) -> Result<ExecOutput, ExecError> {
    inner.commands.push(cmd.to_string());

    if let Some(detail) = inner.fail_next_run.take() {
        return Err(ExecError::Session {
            host: host.to_string(),
            detail,
        });
    }

    Ok(inner.outputs.pop_front().unwrap_or_else(|| ExecOutput::ok("")))
}

#[async_trait]
impl Machine for MockMachine {
    fn private_address(&self) -> &str {
        &self.private_address
    }

    async fn run(&self, cmd: &str) -> Result<ExecOutput, ExecError> {
        let mut inner = self.inner.lock().unwrap();
        next_output(&mut inner, &self.private_address, cmd)
    }

    async fn open_session(&self) -> Result<Box<dyn Session>, ExecError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(detail) = inner.fail_next_session.take() {
            return Err(ExecError::Connect {
                host: self.private_address.clone(),
                detail,
            });
        }

        inner.open_sessions += 1;
        Ok(Box::new(MockSession {
            host: self.private_address.clone(),
            inner: Arc::clone(&self.inner),
        }))
    }

    async fn reboot(&self) -> Result<(), ExecError> {
        let mut inner = self.inner.lock().unwrap();
        inner.reboots += 1;
        Ok(())
    }
}

struct MockSession {
    host: String,
    inner: Arc<Mutex<Inner>>,
}

#[async_trait]
impl Session for MockSession {
    async fn run(&mut self, cmd: &str) -> Result<ExecOutput, ExecError> {
        let mut inner = self.inner.lock().unwrap();
        next_output(&mut inner, &self.host, cmd)
    }

    async fn close(self: Box<Self>) -> Result<(), ExecError> {
        let mut inner = self.inner.lock().unwrap();
        inner.open_sessions = inner.open_sessions.saturating_sub(1);
        Ok(())
    }
}
