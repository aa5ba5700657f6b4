use async_trait::async_trait;

use crate::model::{entity::NodeResourceSample, vo::ResourceKind};

/// Per node resource samples of a partition.
#[async_trait]
pub trait NodeInventoryRepo: Send + Sync {
    /// Sample every node of `partition`, reading the counts of `kind`.
    ///
    /// Malformed node records are dropped, they never fail the whole call.
    async fn get_node_samples(
        &self,
        cluster: &str,
        partition: &str,
        kind: ResourceKind,
    ) -> anyhow::Result<Vec<NodeResourceSample>>;
}
