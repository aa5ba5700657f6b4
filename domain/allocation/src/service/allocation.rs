use async_trait::async_trait;
use chrono::NaiveDate;

use crate::exception::AllocationResult;
use crate::model::{
    entity::AllocationRequest,
    vo::{AwardsPerCluster, AwardsPerRequest},
};

/// Allocation requests and awards of slurm accounts.
#[async_trait]
pub trait AllocationService: Send + Sync {
    /// Fails with `UnknownAccount` when slurm does not know `account`.
    async fn ensure_account_exists(&self, account: &str) -> AllocationResult<()>;

    /// Account of the calling user.
    async fn default_account(&self) -> AllocationResult<String>;

    /// Approved requests of the account's research group that are active today.
    async fn get_active_requests(&self, account: &str) -> AllocationResult<Vec<AllocationRequest>>;

    /// Approved request that expired most recently, the greatest id wins a tie.
    async fn get_most_recent_expired_request(
        &self,
        account: &str,
    ) -> AllocationResult<Option<AllocationRequest>>;

    /// Awards of every request, missing amounts counted as 0.
    async fn get_awards_per_request(
        &self,
        requests: &[AllocationRequest],
    ) -> AllocationResult<AwardsPerRequest>;

    /// Awards of every request summed per cluster.
    async fn get_awards_per_cluster(
        &self,
        requests: &[AllocationRequest],
    ) -> AllocationResult<AwardsPerCluster>;

    /// Date usage counts from for `requests`.
    fn get_earliest_start_date(&self, requests: &[AllocationRequest]) -> NaiveDate;
}
