use async_trait::async_trait;
use chrono::NaiveDate;

use crate::model::vo::AccountUsage;

/// Usage recorded by the scheduler.
#[async_trait]
pub trait UsageRepo: Send + Sync {
    /// Usage of `account` on `cluster` since `start`, `None` when the account has not run there.
    async fn get_account_usage(
        &self,
        account: &str,
        cluster: &str,
        start: NaiveDate,
    ) -> anyhow::Result<Option<AccountUsage>>;
}
