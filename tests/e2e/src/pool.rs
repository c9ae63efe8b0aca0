//! Pre-provisioned pool manager.
//!
//! Bare-metal labs rarely create machines on demand. The pool manager
//! implements [`ClusterManager`] over a fixed set of spare machines that
//! are already booted and configured to join the cluster; "provisioning"
//! hands the next machines out of the pool.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use testbed_cluster::{ClusterManager, ManagerError};
use testbed_platform::Machine;

/// A [`ClusterManager`] backed by a fixed pool of spare machines.
pub struct PoolManager {
    pool: Mutex<Vec<Arc<dyn Machine>>>,
}

impl PoolManager {
    /// Create a manager over the given spares; machines are handed out in
    /// the order given.
    pub fn new(machines: Vec<Arc<dyn Machine>>) -> Self {
        Self {
            pool: Mutex::new(machines),
        }
    }

    /// Spares not yet handed out.
    pub fn remaining(&self) -> usize {
        self.pool.lock().unwrap().len()
    }
}

#[async_trait]
impl ClusterManager for PoolManager {
    async fn add_masters(&self, count: usize) -> Result<Vec<Arc<dyn Machine>>, ManagerError> {
        let mut pool = self.pool.lock().unwrap();
        if pool.len() < count {
            return Err(ManagerError::Backend(format!(
                "pool exhausted: requested {}, available {}",
                count,
                pool.len()
            )));
        }
        Ok(pool.drain(..count).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use testbed_platform::MockMachine;

    fn pool_of(addresses: &[&str]) -> PoolManager {
        PoolManager::new(
            addresses
                .iter()
                .map(|a| Arc::new(MockMachine::new(*a)) as Arc<dyn Machine>)
                .collect(),
        )
    }

    #[tokio::test]
    async fn hands_out_in_pool_order() {
        let manager = pool_of(&["10.0.0.2", "10.0.0.3", "10.0.0.4"]);

        let first = manager.add_masters(2).await.unwrap();
        assert_eq!(first[0].private_address(), "10.0.0.2");
        assert_eq!(first[1].private_address(), "10.0.0.3");
        assert_eq!(manager.remaining(), 1);
    }

    #[tokio::test]
    async fn exhaustion_is_a_backend_error() {
        let manager = pool_of(&["10.0.0.2"]);

        let result = manager.add_masters(2).await;

        assert!(matches!(result, Err(ManagerError::Backend(_))));
        // Nothing handed out on failure.
        assert_eq!(manager.remaining(), 1);
    }
}
