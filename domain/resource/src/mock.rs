use async_trait::async_trait;
use mockall::mock;

use crate::{
    model::{entity::NodeResourceSample, vo::ResourceKind},
    repository::{NodeInventoryRepo, PartitionRepo},
};

mock! {
    pub NodeInventoryRepo {}
    #[async_trait]
    impl NodeInventoryRepo for NodeInventoryRepo {
        async fn get_node_samples(
            &self,
            cluster: &str,
            partition: &str,
            kind: ResourceKind,
        ) -> anyhow::Result<Vec<NodeResourceSample>>;
    }
}

mock! {
    pub PartitionRepo {}
    #[async_trait]
    impl PartitionRepo for PartitionRepo {
        async fn get_partition_names(&self, cluster: &str) -> anyhow::Result<Vec<String>>;
    }
}
