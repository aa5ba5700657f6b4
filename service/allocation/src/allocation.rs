use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use domain_allocation::{
    exception::{AllocationException, AllocationResult},
    model::{
        entity::{request::earliest_start_date, AllocationRequest},
        vo::{sum_per_cluster, AwardsPerCluster, AwardsPerRequest},
    },
    repository::{AccountRepo, AllocationRepo},
    service::AllocationService,
};
use tracing::debug;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct AllocationServiceImpl {
    allocation_repo: Arc<dyn AllocationRepo>,
    account_repo: Arc<dyn AccountRepo>,
    #[builder(default = Local::now().date_naive())]
    today: NaiveDate,
}

impl AllocationServiceImpl {
    async fn get_approved_requests(&self, account: &str) -> AllocationResult<Vec<AllocationRequest>> {
        let group_id = self
            .allocation_repo
            .get_research_group_id(account)
            .await
            .map_err(|source| AllocationException::ExternalService { source })?
            .ok_or_else(|| AllocationException::UnknownAccount {
                account: account.to_string(),
            })?;
        let mut requests = self
            .allocation_repo
            .get_approved_requests(group_id)
            .await
            .map_err(|source| AllocationException::ExternalService { source })?;
        requests.retain(AllocationRequest::is_approved);
        debug!("Research group {group_id} of {account} has {} approved requests", requests.len());
        Ok(requests)
    }
}

#[async_trait]
impl AllocationService for AllocationServiceImpl {
    async fn ensure_account_exists(&self, account: &str) -> AllocationResult<()> {
        let exists = self
            .account_repo
            .account_exists(account)
            .await
            .map_err(|source| AllocationException::ExternalService { source })?;
        if !exists {
            return Err(AllocationException::UnknownAccount {
                account: account.to_string(),
            });
        }
        Ok(())
    }

    async fn default_account(&self) -> AllocationResult<String> {
        Ok(self.account_repo.default_account().await?)
    }

    async fn get_active_requests(&self, account: &str) -> AllocationResult<Vec<AllocationRequest>> {
        let mut requests = self.get_approved_requests(account).await?;
        requests.retain(|r| r.is_active_on(self.today));
        Ok(requests)
    }

    async fn get_most_recent_expired_request(
        &self,
        account: &str,
    ) -> AllocationResult<Option<AllocationRequest>> {
        let requests = self.get_approved_requests(account).await?;
        Ok(requests
            .into_iter()
            .filter(|r| r.is_expired_on(self.today))
            .max_by_key(|r| (r.expire_date, r.id)))
    }

    async fn get_awards_per_request(
        &self,
        requests: &[AllocationRequest],
    ) -> AllocationResult<AwardsPerRequest> {
        let mut awards = AwardsPerRequest::new();
        for request in requests {
            let allocations = self
                .allocation_repo
                .get_allocations(request.id)
                .await
                .map_err(|source| AllocationException::ExternalService { source })?;
            let per_cluster = awards.entry(request.id).or_default();
            for allocation in allocations {
                *per_cluster.entry(allocation.cluster_name.clone()).or_default() +=
                    allocation.awarded_or_zero();
            }
        }
        Ok(awards)
    }

    async fn get_awards_per_cluster(
        &self,
        requests: &[AllocationRequest],
    ) -> AllocationResult<AwardsPerCluster> {
        let per_request = self.get_awards_per_request(requests).await?;
        Ok(sum_per_cluster(&per_request))
    }

    fn get_earliest_start_date(&self, requests: &[AllocationRequest]) -> NaiveDate {
        earliest_start_date(requests, self.today)
    }
}
