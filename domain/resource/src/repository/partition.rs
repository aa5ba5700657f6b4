use async_trait::async_trait;

#[async_trait]
pub trait PartitionRepo: Send + Sync {
    /// Names of all partitions configured on `cluster`.
    async fn get_partition_names(&self, cluster: &str) -> anyhow::Result<Vec<String>>;
}
