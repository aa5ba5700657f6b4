//! Repositories backed by slurm commands.

use std::sync::Arc;

use anyhow::bail;
use async_trait::async_trait;
use chrono::NaiveDate;
use domain_allocation::{model::vo::AccountUsage, repository::{AccountRepo, UsageRepo}};
use domain_resource::{
    model::{
        entity::NodeResourceSample,
        vo::{record::parse_lines, KeyValueRecord, ResourceKind},
    },
    repository::{NodeInventoryRepo, PartitionRepo},
};
use infrastructure_command::SchedulerCommand;

use super::shell::{strip_cluster_banner, CommandRunner};

/// Node inventory read from `sinfo`.
pub struct SinfoInventoryRepo {
    runner: Arc<dyn CommandRunner>,
}

impl SinfoInventoryRepo {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl NodeInventoryRepo for SinfoInventoryRepo {
    async fn get_node_samples(
        &self,
        cluster: &str,
        partition: &str,
        kind: ResourceKind,
    ) -> anyhow::Result<Vec<NodeResourceSample>> {
        let (cluster, partition) = (cluster.to_string(), partition.to_string());
        let samples = match kind {
            ResourceKind::Cores => {
                let command = SchedulerCommand::IdleCores {
                    cluster: cluster.clone(),
                    partition: partition.clone(),
                };
                let output = strip_cluster_banner(&self.runner.run(&command).await?);
                parse_lines(&output, |line| {
                    NodeResourceSample::from_cpu_line(&cluster, &partition, line)
                })
            }
            ResourceKind::Gpus => {
                let command = SchedulerCommand::IdleGpus {
                    cluster: cluster.clone(),
                    partition: partition.clone(),
                };
                let output = strip_cluster_banner(&self.runner.run(&command).await?);
                parse_lines(&output, |line| {
                    NodeResourceSample::from_gpu_line(&cluster, &partition, line)
                })
            }
        };
        Ok(samples)
    }
}

/// Partitions read from `scontrol show partition`.
pub struct ScontrolPartitionRepo {
    runner: Arc<dyn CommandRunner>,
}

impl ScontrolPartitionRepo {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl PartitionRepo for ScontrolPartitionRepo {
    async fn get_partition_names(&self, cluster: &str) -> anyhow::Result<Vec<String>> {
        let command = SchedulerCommand::ShowPartitions {
            cluster: cluster.to_string(),
        };
        let output = strip_cluster_banner(&self.runner.run(&command).await?);
        Ok(KeyValueRecord::parse_blocks(&output)
            .iter()
            .filter_map(|record| record.get("PartitionName"))
            .map(str::to_string)
            .collect())
    }
}

/// Usage read from `sreport`.
pub struct SlurmUsageRepo {
    runner: Arc<dyn CommandRunner>,
}

impl SlurmUsageRepo {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl UsageRepo for SlurmUsageRepo {
    async fn get_account_usage(
        &self,
        account: &str,
        cluster: &str,
        start: NaiveDate,
    ) -> anyhow::Result<Option<AccountUsage>> {
        let command = SchedulerCommand::UsageByUser {
            account: account.to_string(),
            cluster: cluster.to_string(),
            start,
        };
        let output = self.runner.run(&command).await?;
        Ok(AccountUsage::from_sreport(cluster, &output))
    }
}

/// Accounts known to `sacctmgr`.
pub struct SacctmgrAccountRepo {
    runner: Arc<dyn CommandRunner>,
}

impl SacctmgrAccountRepo {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl AccountRepo for SacctmgrAccountRepo {
    async fn account_exists(&self, account: &str) -> anyhow::Result<bool> {
        let command = SchedulerCommand::AccountExists {
            account: account.to_string(),
        };
        let output = self.runner.run(&command).await?;
        Ok(!output.trim().is_empty())
    }

    async fn default_account(&self) -> anyhow::Result<String> {
        let output = self.runner.run(&SchedulerCommand::PrimaryGroup).await?;
        let group = output.trim();
        if group.is_empty() {
            bail!("Cannot determine the primary group of the current user");
        }
        Ok(group.to_string())
    }
}
