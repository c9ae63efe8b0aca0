//! Cluster-manager seam.
//!
//! The harness never creates machines itself; a [`ClusterManager`] knows how
//! to provision new control-plane nodes for its platform and hand back
//! machine handles. Implementors own machine lifecycle; the cluster only
//! appends the handles to its membership.

use std::sync::Arc;

use async_trait::async_trait;
use testbed_platform::Machine;
use thiserror::Error;

/// Provisioning failures.
///
/// Never retried by the cluster: a failed provisioning call leaves
/// membership unchanged and surfaces immediately.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// The platform backend could not create the nodes.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Provisions new control-plane nodes for a cluster.
///
/// Implementations are platform-specific (cloud API, pre-provisioned pool,
/// mock). The returned machines must be running and configured to join the
/// cluster; ordering within the batch is the implementor's guarantee.
#[async_trait]
pub trait ClusterManager: Send + Sync {
    /// Provision `count` new control-plane nodes and return their handles.
    async fn add_masters(&self, count: usize) -> Result<Vec<Arc<dyn Machine>>, ManagerError>;
}
