use std::fmt::Write;

use domain_allocation::model::{entity::AllocationRequest, vo::AwardsPerRequest};

use super::rule;

pub fn format_request_table(
    account: &str,
    requests: &[AllocationRequest],
    awards: &AwardsPerRequest,
) -> String {
    let mut out = format!(
        "{}\nResource Allocation Request Information for '{account}'\n{}\n",
        rule('='),
        rule('=')
    );
    let _ = writeln!(out, " {:<8} {:<40} {}", "ID", "TITLE", "EXPIRATION DATE");
    for request in requests {
        let _ = writeln!(out, "{}", rule('-'));
        let _ = writeln!(
            out,
            " {:<8} {:<40} {}",
            request.id,
            request.title,
            request.expire_date.format("%Y-%m-%d")
        );
        let _ = writeln!(out, " {:<8} {:<20} {}", "", "CLUSTER", "SERVICE UNITS");
        for (cluster, awarded) in awards.get(&request.id).into_iter().flatten() {
            let _ = writeln!(out, " {:<8} {:<20} {}", "", cluster, awarded);
        }
    }
    out
}
