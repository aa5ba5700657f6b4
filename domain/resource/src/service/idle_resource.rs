//! Idle resource service.

use async_trait::async_trait;

use crate::exception::ResourceResult;
use crate::model::vo::{IdleResources, ResourceKind};

#[async_trait]
/// Idle resource service.
pub trait IdleResourceService: Send + Sync {
    /// Kind of resource `cluster` schedules.
    fn resource_kind(&self, cluster: &str) -> ResourceKind;

    /// Clusters to report on, without the ignored ones.
    fn clusters(&self) -> Vec<String>;

    /// Partitions of `cluster` to report on, without the ignored ones, sorted.
    async fn list_partitions(&self, cluster: &str) -> ResourceResult<Vec<String>>;

    /// Group the nodes of a partition by their number of idle resources.
    async fn count_idle(&self, cluster: &str, partition: &str) -> ResourceResult<IdleResources>;
}
