use std::fmt::Write;

use domain_resource::model::vo::{IdleResources, ResourceKind};

use super::{format_gib, rule};

/// Summary of one partition, followed by an empty line.
pub fn format_idle_table(
    cluster: &str,
    partition: &str,
    kind: ResourceKind,
    idle: &IdleResources,
) -> String {
    let mut out = format!("Cluster: {cluster}, Partition: {partition}\n{}\n", rule('='));
    if idle.is_empty() {
        out.push_str(" No idle resources\n");
    } else {
        for (count, bucket) in idle.iter() {
            let _ = writeln!(
                out,
                "{:4} nodes w/ {count:3} idle {kind} {} - {} min-max free memory",
                bucket.node_count,
                format_gib(bucket.min_free_mem),
                format_gib(bucket.max_free_mem),
            );
        }
    }
    out.push('\n');
    out
}
