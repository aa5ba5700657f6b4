use thiserror::Error;

pub type AllocationResult<T> = Result<T, AllocationException>;

#[derive(Error, Debug)]
pub enum AllocationException {
    #[error("No Slurm account was found with the name '{account}'.")]
    UnknownAccount { account: String },

    #[error("Accounting service request failed: {source}")]
    ExternalService {
        #[source]
        source: anyhow::Error,
    },

    #[error("Cannot read usage of cluster: {cluster}: {source}")]
    UsageUnavailable {
        cluster: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Allocation internal error: {source}")]
    InternalError {
        #[source]
        source: anyhow::Error,
    },
}

impl AllocationException {
    /// Error caused by the user rather than by a collaborator.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::UnknownAccount { .. })
    }
}

impl From<anyhow::Error> for AllocationException {
    fn from(e: anyhow::Error) -> Self {
        AllocationException::InternalError { source: e }
    }
}
