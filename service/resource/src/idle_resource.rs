use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use domain_resource::{
    exception::{ResourceException, ResourceResult},
    model::vo::{ClusterTypes, IdleResources, ResourceKind},
    repository::{NodeInventoryRepo, PartitionRepo},
    service::IdleResourceService,
};
use tracing::debug;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct IdleResourceServiceImpl {
    node_inventory_repo: Arc<dyn NodeInventoryRepo>,
    partition_repo: Arc<dyn PartitionRepo>,
    cluster_types: ClusterTypes,
    #[builder(default)]
    ignored_clusters: HashSet<String>,
    #[builder(default)]
    ignored_partitions: HashSet<String>,
}

#[async_trait]
impl IdleResourceService for IdleResourceServiceImpl {
    fn resource_kind(&self, cluster: &str) -> ResourceKind {
        self.cluster_types.kind_of(cluster)
    }

    fn clusters(&self) -> Vec<String> {
        self.cluster_types
            .clusters()
            .into_iter()
            .filter(|c| !self.ignored_clusters.contains(*c))
            .map(str::to_string)
            .collect()
    }

    async fn list_partitions(&self, cluster: &str) -> ResourceResult<Vec<String>> {
        let mut partitions = self
            .partition_repo
            .get_partition_names(cluster)
            .await
            .map_err(|source| ResourceException::PartitionsUnavailable {
                cluster: cluster.to_string(),
                source,
            })?;
        partitions.retain(|p| !self.ignored_partitions.contains(p));
        partitions.sort_unstable();
        partitions.dedup();
        Ok(partitions)
    }

    async fn count_idle(&self, cluster: &str, partition: &str) -> ResourceResult<IdleResources> {
        let kind = self.resource_kind(cluster);
        let samples = self
            .node_inventory_repo
            .get_node_samples(cluster, partition, kind)
            .await
            .map_err(|source| ResourceException::InventoryUnavailable {
                cluster: cluster.to_string(),
                partition: partition.to_string(),
                source,
            })?;
        debug!("Sampled {} nodes of {cluster}/{partition} ({kind})", samples.len());

        let idle: IdleResources = samples.iter().collect();
        if idle.is_exhausted() {
            return Ok(IdleResources::default());
        }
        Ok(idle)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use domain_resource::{
        mock::{MockNodeInventoryRepo, MockPartitionRepo},
        model::{entity::NodeResourceSample, vo::record::parse_lines, vo::IdleBucket},
    };
    use indoc::indoc;

    use super::*;

    const CPU_OUTPUT: &str = indoc! {"
        node1,2/4/0/4,3500
        node2,3/2/0/3,4000
    "};

    const GPU_OUTPUT: &str = indoc! {"
        node1_4_2_idle_3500
        node2_4_4_drain_4000
    "};

    fn inventory() -> MockNodeInventoryRepo {
        let mut repo = MockNodeInventoryRepo::new();
        repo.expect_get_node_samples().returning(|cluster, partition, kind| {
            Ok(match kind {
                ResourceKind::Cores => parse_lines(CPU_OUTPUT, |l| {
                    NodeResourceSample::from_cpu_line(cluster, partition, l)
                }),
                ResourceKind::Gpus => parse_lines(GPU_OUTPUT, |l| {
                    NodeResourceSample::from_gpu_line(cluster, partition, l)
                }),
            })
        });
        repo
    }

    fn load(inventory: MockNodeInventoryRepo, partitions: MockPartitionRepo) -> IdleResourceServiceImpl {
        IdleResourceServiceImpl::builder()
            .node_inventory_repo(Arc::new(inventory))
            .partition_repo(Arc::new(partitions))
            .cluster_types(ClusterTypes::new([
                ("smp".to_string(), ResourceKind::Cores),
                ("gpu".to_string(), ResourceKind::Gpus),
                ("azure".to_string(), ResourceKind::Cores),
            ]))
            .ignored_clusters(HashSet::from(["azure".to_string()]))
            .ignored_partitions(HashSet::from(["power9".to_string()]))
            .build()
    }

    #[tokio::test]
    async fn count_idle_cores() {
        let service = load(inventory(), MockPartitionRepo::new());
        let idle = service.count_idle("smp", "smp").await.unwrap();
        assert_eq!(idle.len(), 2);
        assert_eq!(
            idle.get(4),
            Some(&IdleBucket {
                node_count: 1,
                min_free_mem: 3500,
                max_free_mem: 3500
            })
        );
        assert_eq!(idle.get(2).unwrap().min_free_mem, 4000);
    }

    #[tokio::test]
    async fn count_idle_gpus() {
        let service = load(inventory(), MockPartitionRepo::new());
        let idle = service.count_idle("gpu", "a100").await.unwrap();
        assert_eq!(idle.get(2).unwrap().node_count, 1);
        assert_eq!(
            idle.get(0),
            Some(&IdleBucket {
                node_count: 1,
                min_free_mem: 0,
                max_free_mem: 0
            })
        );
    }

    #[tokio::test]
    async fn unknown_cluster_counts_cores() {
        let service = load(inventory(), MockPartitionRepo::new());
        assert_eq!(service.resource_kind("teach"), ResourceKind::Cores);
        let idle = service.count_idle("teach", "teach").await.unwrap();
        assert!(idle.get(4).is_some());
    }

    #[tokio::test]
    async fn empty_partition() {
        let mut repo = MockNodeInventoryRepo::new();
        repo.expect_get_node_samples().returning(|_, _, _| Ok(vec![]));
        let service = load(repo, MockPartitionRepo::new());
        let idle = service.count_idle("smp", "empty").await.unwrap();
        assert!(idle.is_empty());
    }

    #[tokio::test]
    async fn fully_allocated_partition() {
        let mut repo = MockNodeInventoryRepo::new();
        repo.expect_get_node_samples().returning(|cluster, partition, _| {
            Ok(parse_lines("node1,4/0/0/4,3500,alloc\nnode2,0/8/0/8,9000,drain\n", |l| {
                NodeResourceSample::from_cpu_line(cluster, partition, l)
            }))
        });
        let service = load(repo, MockPartitionRepo::new());
        let idle = service.count_idle("smp", "smp").await.unwrap();
        assert!(idle.is_empty());
    }

    #[tokio::test]
    async fn inventory_failure() {
        let mut repo = MockNodeInventoryRepo::new();
        repo.expect_get_node_samples()
            .returning(|_, _, _| Err(anyhow!("sinfo: command not found")));
        let service = load(repo, MockPartitionRepo::new());
        let err = service.count_idle("smp", "smp").await.unwrap_err();
        assert!(matches!(
            err,
            ResourceException::InventoryUnavailable { ref cluster, ref partition, .. }
                if cluster == "smp" && partition == "smp"
        ));
    }

    #[tokio::test]
    async fn partitions_without_ignored() {
        let mut partitions = MockPartitionRepo::new();
        partitions.expect_get_partition_names().returning(|_| {
            Ok(vec!["smp".to_string(), "power9".to_string(), "high-mem".to_string()])
        });
        let service = load(inventory(), partitions);
        assert_eq!(
            service.list_partitions("smp").await.unwrap(),
            vec!["high-mem".to_string(), "smp".to_string()]
        );
    }

    #[test]
    fn clusters_without_ignored() {
        let service = load(MockNodeInventoryRepo::new(), MockPartitionRepo::new());
        assert_eq!(service.clusters(), vec!["gpu".to_string(), "smp".to_string()]);
    }
}
