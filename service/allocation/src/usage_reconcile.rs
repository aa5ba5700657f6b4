use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use domain_allocation::{
    exception::{AllocationException, AllocationResult},
    model::{entity::UsageSummary, vo::AwardsPerCluster},
    repository::UsageRepo,
    service::UsageReconcileService,
};
use tracing::debug;
use typed_builder::TypedBuilder;

#[derive(TypedBuilder)]
pub struct UsageReconcileServiceImpl {
    usage_repo: Arc<dyn UsageRepo>,
}

#[async_trait]
impl UsageReconcileService for UsageReconcileServiceImpl {
    async fn build_usage_summaries(
        &self,
        account: &str,
        awards: &AwardsPerCluster,
        start: NaiveDate,
    ) -> AllocationResult<Vec<UsageSummary>> {
        let mut summaries = vec![];
        for (cluster, &awarded) in awards.iter().filter(|(_, &awarded)| awarded > 0) {
            let usage = self
                .usage_repo
                .get_account_usage(account, cluster, start)
                .await
                .map_err(|source| AllocationException::UsageUnavailable {
                    cluster: cluster.clone(),
                    source,
                })?;
            if usage.is_none() {
                debug!("No usage of {account} on {cluster} since {start}");
            }
            summaries.push(UsageSummary::new(cluster.as_str(), awarded, usage));
        }
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use domain_allocation::{
        mock::MockUsageRepo,
        model::vo::{AccountUsage, PercentUsed, UsageRecord},
    };

    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 7).unwrap()
    }

    fn awards(entries: &[(&str, u64)]) -> AwardsPerCluster {
        entries.iter().map(|(c, a)| (c.to_string(), *a)).collect()
    }

    #[tokio::test]
    async fn no_usage_rows() {
        let mut repo = MockUsageRepo::new();
        repo.expect_get_account_usage().returning(|_, _, _| Ok(None));
        let service = UsageReconcileServiceImpl::builder().usage_repo(Arc::new(repo)).build();

        let summaries = service
            .build_usage_summaries("sam", &awards(&[("smp", 1000)]), start())
            .await
            .unwrap();
        assert_eq!(summaries.len(), 1);
        let summary = &summaries[0];
        assert_eq!(summary.used_total, 0);
        assert_eq!(summary.percent_used, PercentUsed::Exact(0));
        assert!(!summary.locked);
    }

    #[tokio::test]
    async fn zero_awards_skipped_in_cluster_order() {
        let mut repo = MockUsageRepo::new();
        repo.expect_get_account_usage().returning(|_, cluster, _| {
            Ok(Some(AccountUsage {
                total_used: 1000,
                per_user: vec![UsageRecord {
                    cluster_name: cluster.to_string(),
                    user_name: "sam".to_string(),
                    used: 1000,
                }],
            }))
        });
        let service = UsageReconcileServiceImpl::builder().usage_repo(Arc::new(repo)).build();

        let summaries = service
            .build_usage_summaries("sam", &awards(&[("smp", 1000), ("htc", 0), ("gpu", 4000)]), start())
            .await
            .unwrap();
        let clusters: Vec<&str> = summaries.iter().map(|s| s.cluster_name.as_str()).collect();
        assert_eq!(clusters, vec!["gpu", "smp"]);
        assert_eq!(summaries[0].percent_used, PercentUsed::Exact(25));
        assert!(summaries[1].locked);
        assert_eq!(summaries[1].per_user[0].cluster_name, "smp");
    }

    #[tokio::test]
    async fn usage_failure() {
        let mut repo = MockUsageRepo::new();
        repo.expect_get_account_usage()
            .returning(|_, _, _| Err(anyhow!("sreport: command not found")));
        let service = UsageReconcileServiceImpl::builder().usage_repo(Arc::new(repo)).build();
        let err = service
            .build_usage_summaries("sam", &awards(&[("smp", 1000)]), start())
            .await
            .unwrap_err();
        assert!(matches!(err, AllocationException::UsageUnavailable { ref cluster, .. } if cluster == "smp"));
    }
}
