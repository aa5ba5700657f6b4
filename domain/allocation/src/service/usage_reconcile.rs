use async_trait::async_trait;
use chrono::NaiveDate;

use crate::exception::AllocationResult;
use crate::model::{entity::UsageSummary, vo::AwardsPerCluster};

/// Reconciles awards against recorded usage.
#[async_trait]
pub trait UsageReconcileService: Send + Sync {
    /// One summary per cluster with a non zero award, in cluster name order.
    async fn build_usage_summaries(
        &self,
        account: &str,
        awards: &AwardsPerCluster,
        start: NaiveDate,
    ) -> AllocationResult<Vec<UsageSummary>>;
}
