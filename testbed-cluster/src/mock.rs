//! Mock cluster manager for testing.
//!
//! Allows queueing provisioning batches and capturing requested counts for
//! verification.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use testbed_platform::Machine;

use crate::manager::{ClusterManager, ManagerError};

/// Mock cluster manager for testing.
///
/// Batches are served FIFO; a call with nothing queued fails like a backend
/// that could not create the nodes.
#[derive(Debug, Default)]
pub struct MockManager {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    batches: VecDeque<Vec<Arc<dyn Machine>>>,
    requests: Vec<usize>,
    fail_next: Option<String>,
}

impl std::fmt::Debug for Inner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inner")
            .field("queued_batches", &self.batches.len())
            .field("requests", &self.requests)
            .field("fail_next", &self.fail_next)
            .finish()
    }
}

impl MockManager {
    /// Create a mock manager with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a batch of machines to be returned by the next provisioning
    /// call.
    pub fn queue_batch(&self, machines: Vec<Arc<dyn Machine>>) {
        let mut inner = self.inner.lock().unwrap();
        inner.batches.push_back(machines);
    }

    /// Cause the next provisioning call to fail.
    pub fn fail_next(&self, detail: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next = Some(detail.to_string());
    }

    /// All requested counts, in call order.
    pub fn requests(&self) -> Vec<usize> {
        let inner = self.inner.lock().unwrap();
        inner.requests.clone()
    }
}

#[async_trait]
impl ClusterManager for MockManager {
    async fn add_masters(&self, count: usize) -> Result<Vec<Arc<dyn Machine>>, ManagerError> {
        let mut inner = self.inner.lock().unwrap();
        inner.requests.push(count);

        if let Some(detail) = inner.fail_next.take() {
            return Err(ManagerError::Backend(detail));
        }

        inner
            .batches
            .pop_front()
            .ok_or_else(|| ManagerError::Backend("no provisioning batch queued".into()))
    }
}
