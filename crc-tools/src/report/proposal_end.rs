use domain_allocation::model::entity::AllocationRequest;

/// End dates of the given requests. `expired` marks a fallback to the last expired request.
pub fn format_proposal_end(account: &str, requests: &[AllocationRequest], expired: bool) -> String {
    if requests.is_empty() {
        return format!("No allocation requests were found for account '{account}'");
    }
    let verb = if expired { "ended" } else { "ends" };
    requests
        .iter()
        .map(|r| {
            format!(
                "Proposal {} ({}) for account '{account}' {verb} on {}",
                r.id,
                r.title,
                r.expire_date.format("%m/%d/%y")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
