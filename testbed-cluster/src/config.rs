//! Configuration constants for cluster operations.
//!
//! Paths and timings shared by the command helpers and the convergence
//! checker.

use std::time::Duration;

/// kubectl binary location on control-plane machines.
pub const KUBECTL_BIN: &str = "./kubectl";

/// Admin kubeconfig location on control-plane machines.
pub const KUBECONFIG_PATH: &str = "/etc/kubernetes/kubeconfig";

/// Subcommand whose output lists registered nodes, one per line after a
/// header, address first.
pub const LIST_NODES_SUBCOMMAND: &str = "get nodes";

/// Delay between node-convergence check attempts.
pub const NODE_CHECK_DELAY: Duration = Duration::from_secs(10);

/// Retry budget for the convergence check after growing the control plane.
pub const ADD_MASTERS_RETRY_ATTEMPTS: usize = 12;
