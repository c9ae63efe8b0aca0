//! Live-cluster scenarios.
//!
//! All tests here drive a real cluster described by `TESTBED_*` environment
//! variables and are `#[ignore = "requires cluster"]`. They run serially:
//! one physical cluster, shared state.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use serial_test::serial;
    use testbed_cluster::Cluster;
    use testbed_platform::{Machine, SshMachine};

    use crate::config;
    use crate::pool::PoolManager;

    fn handles(machines: Vec<SshMachine>) -> Vec<Arc<dyn Machine>> {
        machines
            .into_iter()
            .map(|m| Arc::new(m) as Arc<dyn Machine>)
            .collect()
    }

    fn live_cluster() -> Cluster {
        let manager = Arc::new(PoolManager::new(handles(config::spare_masters())));
        Cluster::new(manager, handles(config::masters()), handles(config::workers()))
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires cluster"]
    async fn cluster_converges_from_initial_membership() {
        let cluster = live_cluster();
        cluster.node_check(3).await.expect("cluster did not converge");
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires cluster"]
    async fn kubectl_lists_every_known_machine() {
        let cluster = live_cluster();
        let listing = cluster.kubectl("get nodes").await.expect("kubectl failed");

        for machine in cluster.control_plane().iter().chain(cluster.workers().iter()) {
            assert!(
                listing.contains(machine.private_address()),
                "{} not in listing:\n{}",
                machine.private_address(),
                listing
            );
        }
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires cluster"]
    async fn ssh_runs_arbitrary_commands() {
        let cluster = live_cluster();
        let output = cluster.ssh("uptime").await.expect("ssh failed");

        assert!(output.success(), "uptime failed: {}", output.stderr);
        assert!(output.stdout.contains("load average"));
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires cluster"]
    async fn control_plane_grows_by_one() {
        let mut cluster = live_cluster();
        let before = cluster.control_plane().len();

        cluster
            .add_masters(1)
            .await
            .expect("add_masters did not converge (set TESTBED_SPARE_MASTERS)");

        assert_eq!(cluster.control_plane().len(), before + 1);
    }

    #[tokio::test]
    #[serial]
    #[ignore = "requires cluster"]
    async fn worker_reboot_reconverges() {
        let cluster = live_cluster();
        let worker = cluster.workers().first().expect("no workers configured");

        worker.reboot().await.expect("reboot failed");

        // Give the machine a head start before polling.
        tokio::time::sleep(Duration::from_secs(30)).await;
        cluster
            .node_check(12)
            .await
            .expect("cluster did not reconverge after reboot");
    }
}
