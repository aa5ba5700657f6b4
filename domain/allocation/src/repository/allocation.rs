use async_trait::async_trait;

use crate::model::entity::{AllocationRequest, ClusterAllocation};

/// Records of the allocation accounting service.
#[async_trait]
pub trait AllocationRepo: Send + Sync {
    /// Id of the research group owning the slurm account, `None` when there is none.
    async fn get_research_group_id(&self, account: &str) -> anyhow::Result<Option<u64>>;

    /// Approved allocation requests of a research group.
    async fn get_approved_requests(&self, group_id: u64) -> anyhow::Result<Vec<AllocationRequest>>;

    /// Per cluster awards of an allocation request.
    async fn get_allocations(&self, request_id: u64) -> anyhow::Result<Vec<ClusterAllocation>>;
}
