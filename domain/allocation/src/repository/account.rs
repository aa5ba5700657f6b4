use async_trait::async_trait;

/// Slurm accounts.
#[async_trait]
pub trait AccountRepo: Send + Sync {
    async fn account_exists(&self, account: &str) -> anyhow::Result<bool>;

    /// Account of the calling user, their primary group.
    async fn default_account(&self) -> anyhow::Result<String>;
}
