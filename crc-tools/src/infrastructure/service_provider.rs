use std::sync::Arc;

use domain_allocation::service::{AllocationService, UsageReconcileService};
use domain_resource::service::IdleResourceService;
use service_allocation::{AllocationServiceImpl, UsageReconcileServiceImpl};
use service_resource::IdleResourceServiceImpl;

use super::keystone::KeystoneClient;
use super::shell::{CommandRunner, LocalShell};
use super::slurm::{ScontrolPartitionRepo, SacctmgrAccountRepo, SinfoInventoryRepo, SlurmUsageRepo};
use crate::config::AppConfig;

/// Services wired to slurm and keystone.
pub struct ServiceProvider {
    pub idle_resource_service: Arc<dyn IdleResourceService>,
    pub allocation_service: Arc<dyn AllocationService>,
    pub usage_reconcile_service: Arc<dyn UsageReconcileService>,
}

impl ServiceProvider {
    pub fn build(config: &AppConfig) -> anyhow::Result<Self> {
        let runner: Arc<dyn CommandRunner> = Arc::new(LocalShell);
        let keystone = Arc::new(KeystoneClient::new(&config.keystone)?);

        let idle_resource_service = IdleResourceServiceImpl::builder()
            .node_inventory_repo(Arc::new(SinfoInventoryRepo::new(runner.clone())))
            .partition_repo(Arc::new(ScontrolPartitionRepo::new(runner.clone())))
            .cluster_types(config.clusters.types.clone())
            .ignored_clusters(config.clusters.ignored_clusters.clone())
            .ignored_partitions(config.clusters.ignored_partitions.clone())
            .build();
        let allocation_service = AllocationServiceImpl::builder()
            .allocation_repo(keystone)
            .account_repo(Arc::new(SacctmgrAccountRepo::new(runner.clone())))
            .build();
        let usage_reconcile_service = UsageReconcileServiceImpl::builder()
            .usage_repo(Arc::new(SlurmUsageRepo::new(runner)))
            .build();

        Ok(Self {
            idle_resource_service: Arc::new(idle_resource_service),
            allocation_service: Arc::new(allocation_service),
            usage_reconcile_service: Arc::new(usage_reconcile_service),
        })
    }
}
