use std::fmt::Write;

use chrono::NaiveDate;
use domain_allocation::model::entity::UsageSummary;

use super::rule;

/// Usage of an account on every awarded cluster, one block per cluster.
pub fn format_usage_table(account: &str, start: NaiveDate, summaries: &[UsageSummary]) -> String {
    let mut out = format!(
        "{}\nSummary of Usage across all Clusters for '{account}' since {}\n",
        rule('='),
        start.format("%Y-%m-%d")
    );
    if summaries.is_empty() {
        let _ = writeln!(out, "{}\n No service units were awarded to '{account}'", rule('-'));
    }
    for summary in summaries {
        let _ = writeln!(out, "{}", rule('-'));
        let _ = writeln!(
            out,
            " CLUSTER: {} | AWARDED: {} | TOTAL USED: {} | % USED: {} | REMAINING: {}",
            summary.cluster_name,
            summary.awarded_total,
            summary.used_total,
            summary.percent_used,
            summary.remaining,
        );
        if summary.locked {
            let _ = writeln!(
                out,
                " LOCKED: the award on {} is used up, new jobs will not start",
                summary.cluster_name
            );
        }
        if summary.per_user.is_empty() {
            out.push_str(" No usage recorded\n");
            continue;
        }
        let _ = writeln!(out, " {:<30} {:>12} {:>8}", "USER", "USED", "% USED");
        for record in &summary.per_user {
            let _ = writeln!(
                out,
                " {:<30} {:>12} {:>8}",
                record.user_name,
                record.used,
                summary.user_percent(record).to_string(),
            );
        }
    }
    let _ = writeln!(out, "{}", rule('='));
    out
}

#[cfg(test)]
mod tests {
    use domain_allocation::model::vo::{AccountUsage, UsageRecord};

    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 7).unwrap()
    }

    fn usage(cluster: &str) -> Option<AccountUsage> {
        let record = |user: &str, used| UsageRecord {
            cluster_name: cluster.to_string(),
            user_name: user.to_string(),
            used,
        };
        Some(AccountUsage {
            total_used: 300,
            per_user: vec![record("user1", 100), record("user2", 200)],
        })
    }

    #[test]
    fn test_usage_table() {
        let summaries = vec![
            UsageSummary::new("cluster1", 1000, usage("cluster1")),
            UsageSummary::new("cluster2", 2000, usage("cluster2")),
        ];
        let table = format_usage_table("test_account", start(), &summaries);
        assert!(table.contains("'test_account' since 2024-05-07"));
        assert!(table.contains(
            " CLUSTER: cluster1 | AWARDED: 1000 | TOTAL USED: 300 | % USED: 30 | REMAINING: 700\n"
        ));
        assert!(table.contains(
            " CLUSTER: cluster2 | AWARDED: 2000 | TOTAL USED: 300 | % USED: 15 | REMAINING: 1700\n"
        ));
        assert!(table.contains(&format!(" {:<30} {:>12} {:>8}\n", "user2", 200, "20")));
        assert!(table.contains(&format!(" {:<30} {:>12} {:>8}\n", "user1", 100, "5")));
        assert!(!table.contains("LOCKED"));
        // Heavier users first.
        assert!(table.find("user2").unwrap() < table.find("user1").unwrap());
    }

    #[test]
    fn test_no_usage() {
        let summaries = vec![UsageSummary::new("cluster1", 1000, None)];
        let table = format_usage_table("test_account", start(), &summaries);
        assert!(table.contains("AWARDED: 1000 | TOTAL USED: 0 | % USED: 0 | REMAINING: 1000"));
        assert!(table.contains(" No usage recorded\n"));
    }

    #[test]
    fn test_locked() {
        let summaries = vec![UsageSummary::new("cluster1", 300, usage("cluster1"))];
        let table = format_usage_table("test_account", start(), &summaries);
        assert!(table.contains("% USED: 100 | REMAINING: 0"));
        assert!(table.contains(" LOCKED: the award on cluster1 is used up"));
    }

    #[test]
    fn test_small_usage() {
        let summaries = vec![UsageSummary::new("cluster1", 1_000_000, usage("cluster1"))];
        let table = format_usage_table("test_account", start(), &summaries);
        assert!(table.contains("% USED: <1"));
        assert!(table.contains(&format!(" {:<30} {:>12} {:>8}\n", "user1", 100, "<1")));
    }
}
