use thiserror::Error;

pub type ResourceResult<T> = Result<T, ResourceException>;

#[derive(Error, Debug)]
pub enum ResourceException {
    #[error("Cannot read node inventory of partition: {partition} on cluster: {cluster}: {source}")]
    InventoryUnavailable {
        cluster: String,
        partition: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Cannot list partitions of cluster: {cluster}: {source}")]
    PartitionsUnavailable {
        cluster: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Resource internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for ResourceException {
    fn from(e: anyhow::Error) -> Self {
        ResourceException::InternalError { source: e }
    }
}
