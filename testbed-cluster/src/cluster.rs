//! The cluster handle: membership, command helpers, growth.

use std::collections::BTreeSet;
use std::sync::Arc;

use testbed_platform::{ExecOutput, Machine};

use crate::config;
use crate::convergence;
use crate::error::ClusterError;
use crate::manager::ClusterManager;
use crate::retry::retry;

/// How command helpers pick their control-plane target.
///
/// Kept as a named strategy so alternatives (round-robin, health-aware) can
/// slot in without touching the convergence algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionStrategy {
    /// Always the first control-plane machine, in provisioning order.
    #[default]
    FixedPrimary,
}

impl SelectionStrategy {
    fn target<'a>(&self, machines: &'a [Arc<dyn Machine>]) -> Option<&'a Arc<dyn Machine>> {
        match self {
            SelectionStrategy::FixedPrimary => machines.first(),
        }
    }
}

/// A live control-plane/worker cluster under test.
///
/// Holds shared handles to machines the provisioning layer owns, plus the
/// [`ClusterManager`] used to grow the control plane. Membership only grows;
/// there is no removal operation and no teardown of its own.
///
/// Operations are not internally serialized: concurrent calls against the
/// same cluster must be ordered by the caller.
pub struct Cluster {
    control_plane: Vec<Arc<dyn Machine>>,
    workers: Vec<Arc<dyn Machine>>,
    manager: Arc<dyn ClusterManager>,
    strategy: SelectionStrategy,
}

impl Cluster {
    /// Build a cluster handle from an already-running machine set.
    pub fn new(
        manager: Arc<dyn ClusterManager>,
        control_plane: Vec<Arc<dyn Machine>>,
        workers: Vec<Arc<dyn Machine>>,
    ) -> Self {
        Self {
            control_plane,
            workers,
            manager,
            strategy: SelectionStrategy::default(),
        }
    }

    /// Replace the target-selection strategy.
    pub fn with_strategy(mut self, strategy: SelectionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Control-plane machines, in provisioning order.
    pub fn control_plane(&self) -> &[Arc<dyn Machine>] {
        &self.control_plane
    }

    /// Worker machines, in provisioning order.
    pub fn workers(&self) -> &[Arc<dyn Machine>] {
        &self.workers
    }

    /// Run a kubectl subcommand, with elevated privilege and the fixed
    /// kubeconfig, against the selected control-plane machine.
    ///
    /// Returns captured stdout. A non-zero exit fails with
    /// [`ClusterError::Tool`] carrying the tool's stderr, so callers see the
    /// tool's own diagnostic rather than a generic transport failure.
    pub async fn kubectl(&self, cmd: &str) -> Result<String, ClusterError> {
        let wrapped = format!(
            "sudo {} --kubeconfig={} {}",
            config::KUBECTL_BIN,
            config::KUBECONFIG_PATH,
            cmd
        );
        let output = self.run_on_target(&wrapped).await?;

        if !output.success() {
            return Err(ClusterError::Tool {
                stderr: output.stderr.trim().to_owned(),
            });
        }
        Ok(output.stdout)
    }

    /// Run an arbitrary command against the selected control-plane machine.
    ///
    /// Convenience form for callers that don't care which machine answers.
    /// Stdout and stderr come back trimmed, and a non-zero exit is returned
    /// rather than raised, so batch callers can suppress noisy transient
    /// output themselves. Only transport failures are errors.
    pub async fn ssh(&self, cmd: &str) -> Result<ExecOutput, ClusterError> {
        let output = self.run_on_target(cmd).await?;
        Ok(ExecOutput {
            stdout: output.stdout.trim().to_owned(),
            stderr: output.stderr.trim().to_owned(),
            exit_code: output.exit_code,
        })
    }

    /// Grow the control plane by `count` nodes and block until the new
    /// nodes are observed as ready.
    ///
    /// Provisioning failure surfaces immediately with membership unchanged.
    /// If provisioning succeeds but the follow-up convergence check fails,
    /// the new machines stay appended: treat that error as "membership
    /// uncertain", not "provisioning failed".
    pub async fn add_masters(&mut self, count: usize) -> Result<(), ClusterError> {
        if count == 0 {
            return Err(ClusterError::InvalidCount { count });
        }

        let nodes = self.manager.add_masters(count).await?;
        tracing::debug!("provisioned {} control-plane nodes", nodes.len());
        self.control_plane.extend(nodes);

        self.node_check(config::ADD_MASTERS_RETRY_ATTEMPTS).await
    }

    /// Verify that the cluster tooling reports every known machine as a
    /// registered node, retrying up to `attempts` times with a fixed delay.
    ///
    /// Transport failures, tool failures, and membership mismatches are all
    /// retried alike: the tooling may simply not have converged yet. After
    /// the last attempt its error is returned unchanged.
    pub async fn node_check(&self, attempts: usize) -> Result<(), ClusterError> {
        retry(attempts, config::NODE_CHECK_DELAY, || self.check_once()).await
    }

    /// One convergence attempt: list nodes, parse, compare.
    async fn check_once(&self) -> Result<(), ClusterError> {
        let listing = self.kubectl(config::LIST_NODES_SUBCOMMAND).await?;
        let observed = convergence::parse_observed_addresses(&listing);
        let expected = self.expected_addresses();
        convergence::verify_membership(&observed, &expected)
    }

    /// Union of worker and control-plane addresses.
    fn expected_addresses(&self) -> BTreeSet<String> {
        self.workers
            .iter()
            .chain(self.control_plane.iter())
            .map(|machine| machine.private_address().to_owned())
            .collect()
    }

    /// Open a session on the selected machine, run one command, and close
    /// the session on every exit path.
    async fn run_on_target(&self, cmd: &str) -> Result<ExecOutput, ClusterError> {
        let target = self
            .strategy
            .target(&self.control_plane)
            .ok_or(ClusterError::EmptyControlPlane)?;

        let mut session = target.open_session().await?;
        let result = session.run(cmd).await;
        session.close().await.ok();

        Ok(result?)
    }
}
