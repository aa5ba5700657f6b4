use serde::{Deserialize, Serialize};

/// Service units awarded on one cluster by an allocation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterAllocation {
    pub request_id: u64,
    pub cluster_name: String,
    /// `None` when the accounting service has no amount on record.
    pub awarded: Option<u64>,
}

impl ClusterAllocation {
    /// Awarded service units, a missing amount counts as 0.
    #[inline]
    pub fn awarded_or_zero(&self) -> u64 {
        self.awarded.unwrap_or(0)
    }
}
