use crate::model::vo::{AccountUsage, PercentUsed, UsageRecord};

/// Awarded and used service units of an account on one cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageSummary {
    pub cluster_name: String,
    pub awarded_total: u64,
    pub used_total: u64,
    pub percent_used: PercentUsed,
    /// Sorted by descending usage.
    pub per_user: Vec<UsageRecord>,
    pub remaining: i64,
    /// The award is used up.
    pub locked: bool,
}

impl UsageSummary {
    /// Reconcile an award with the usage recorded against it. No usage means nothing was used.
    pub fn new(cluster_name: impl Into<String>, awarded_total: u64, usage: Option<AccountUsage>) -> Self {
        let AccountUsage {
            total_used: used_total,
            mut per_user,
        } = usage.unwrap_or_default();
        per_user.sort_by(|a, b| b.used.cmp(&a.used).then_with(|| a.user_name.cmp(&b.user_name)));

        let remaining = awarded_total as i64 - used_total as i64;
        Self {
            cluster_name: cluster_name.into(),
            awarded_total,
            used_total,
            percent_used: PercentUsed::of(used_total, awarded_total),
            per_user,
            remaining,
            locked: remaining <= 0,
        }
    }

    /// Share of the award a single user consumed.
    #[inline]
    pub fn user_percent(&self, record: &UsageRecord) -> PercentUsed {
        PercentUsed::of(record.used, self.awarded_total)
    }
}
