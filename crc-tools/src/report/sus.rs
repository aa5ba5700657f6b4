use domain_allocation::model::vo::AwardsPerCluster;

use super::format_count;

/// Awarded service units of an account on each of `clusters`, clusters without an award show 0.
pub fn format_sus(account: &str, clusters: &[String], awards: &AwardsPerCluster) -> String {
    let width = clusters.iter().map(String::len).max().unwrap_or(0);
    let mut lines = vec![format!("Account {account}")];
    for cluster in clusters {
        let sus = awards.get(cluster).copied().unwrap_or(0);
        lines.push(format!(" cluster {cluster:>width$} has {} SUs", format_count(sus)));
    }
    lines.join("\n")
}
