//! Error types for cluster operations.

use std::collections::BTreeSet;

use testbed_platform::ExecError;
use thiserror::Error;

use crate::manager::ManagerError;

/// Errors from cluster operations.
///
/// `Divergence` and `MissingNode` are recoverable inside the convergence
/// retry loop and only become caller-visible once the retry budget is
/// exhausted. `Provisioning` is never retried.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// Session open or command execution failed at the transport layer.
    #[error("transport error: {0}")]
    Transport(#[from] ExecError),

    /// The remote tool command exited non-zero; the message body is the
    /// tool's own stderr, not the transport diagnostic.
    #[error("kubectl: {stderr}")]
    Tool {
        /// Captured stderr from the tool.
        stderr: String,
    },

    /// Observed node-set cardinality differs from expected.
    #[error("node count mismatch: observed {observed:?}, expected {expected:?}")]
    Divergence {
        /// Addresses the cluster tooling reported.
        observed: BTreeSet<String>,
        /// Addresses of all known machines.
        expected: BTreeSet<String>,
    },

    /// An expected address is absent from the observed set.
    #[error("node {address} missing from cluster tooling output")]
    MissingNode {
        /// The address that was not observed.
        address: String,
    },

    /// The cluster manager failed to create the requested nodes.
    /// Membership is unchanged.
    #[error("provisioning failed: {0}")]
    Provisioning(#[from] ManagerError),

    /// Command execution needs at least one control-plane machine.
    #[error("cluster has no control-plane machines")]
    EmptyControlPlane,

    /// A growth operation was asked for zero nodes.
    #[error("invalid node count: {count}")]
    InvalidCount {
        /// The rejected count.
        count: usize,
    },
}
