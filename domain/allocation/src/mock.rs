use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;

use crate::{
    model::{
        entity::{AllocationRequest, ClusterAllocation},
        vo::AccountUsage,
    },
    repository::{AccountRepo, AllocationRepo, UsageRepo},
};

mock! {
    pub AllocationRepo {}
    #[async_trait]
    impl AllocationRepo for AllocationRepo {
        async fn get_research_group_id(&self, account: &str) -> anyhow::Result<Option<u64>>;
        async fn get_approved_requests(&self, group_id: u64) -> anyhow::Result<Vec<AllocationRequest>>;
        async fn get_allocations(&self, request_id: u64) -> anyhow::Result<Vec<ClusterAllocation>>;
    }
}

mock! {
    pub AccountRepo {}
    #[async_trait]
    impl AccountRepo for AccountRepo {
        async fn account_exists(&self, account: &str) -> anyhow::Result<bool>;
        async fn default_account(&self) -> anyhow::Result<String>;
    }
}

mock! {
    pub UsageRepo {}
    #[async_trait]
    impl UsageRepo for UsageRepo {
        async fn get_account_usage(
            &self,
            account: &str,
            cluster: &str,
            start: NaiveDate,
        ) -> anyhow::Result<Option<AccountUsage>>;
    }
}
