pub mod usage;

use std::collections::BTreeMap;

#[rustfmt::skip]
pub use {
    usage::AccountUsage,
    usage::PercentUsed,
    usage::UsageRecord,
};

/// Awarded service units keyed by cluster name.
pub type AwardsPerCluster = BTreeMap<String, u64>;

/// Awarded service units per cluster, keyed by allocation request id.
pub type AwardsPerRequest = BTreeMap<u64, AwardsPerCluster>;

/// Awards of every request summed per cluster.
pub fn sum_per_cluster(per_request: &AwardsPerRequest) -> AwardsPerCluster {
    let mut awards = AwardsPerCluster::new();
    for (cluster, awarded) in per_request.values().flatten() {
        *awards.entry(cluster.clone()).or_default() += awarded;
    }
    awards
}
