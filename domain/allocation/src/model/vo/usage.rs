use std::fmt;

use domain_resource::model::vo::record::{parse_count, parse_lines, split_fields};

/// Billing hours one user consumed on a cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRecord {
    pub cluster_name: String,
    pub user_name: String,
    pub used: u64,
}

/// Billing hours an account consumed on a cluster, in total and per user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountUsage {
    pub total_used: u64,
    pub per_user: Vec<UsageRecord>,
}

impl AccountUsage {
    /// Parse `sreport -nP cluster accountutilizationbyuser ... Format=Proper,Used`.
    ///
    /// The first line holds the account total (`|1234`), every following line a user
    /// (`Sam Smith|1000`). Returns `None` when the account has not run on the cluster.
    pub fn from_sreport(cluster: &str, output: &str) -> Option<Self> {
        let mut lines = output.trim().lines();
        let total = lines.next()?.trim().trim_matches('|');
        let rest: Vec<&str> = lines.collect();
        if rest.is_empty() {
            return match parse_count("total", total) {
                Ok(total_used) if total_used > 0 => Some(Self {
                    total_used,
                    per_user: vec![],
                }),
                _ => None,
            };
        }

        let per_user = parse_lines(&rest.join("\n"), |line| {
            let fields = split_fields(line.trim_end_matches('|'), '|', 2..=2)?;
            Ok(UsageRecord {
                cluster_name: cluster.to_string(),
                user_name: fields[0].trim().to_string(),
                used: parse_count("used", fields[1])?,
            })
        });
        let total_used = match parse_count("total", total) {
            Ok(total) => total,
            Err(e) => {
                tracing::warn!("Sum usage of {cluster} per user, account total unreadable: {e}");
                per_user.iter().map(|u| u.used).sum()
            }
        };

        Some(Self {
            total_used,
            per_user,
        })
    }
}

/// Share of an award that was used, rounded down to a whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentUsed {
    Exact(u64),
    /// Some usage, but less than one percent.
    LessThanOne,
}

impl PercentUsed {
    /// `floor(used / awarded * 100)`. An award of 0 is 0 percent used.
    pub fn of(used: u64, awarded: u64) -> Self {
        if awarded == 0 {
            return Self::Exact(0);
        }
        let percent = (u128::from(used) * 100 / u128::from(awarded)) as u64;
        if percent == 0 && used > 0 {
            Self::LessThanOne
        } else {
            Self::Exact(percent)
        }
    }

    #[inline]
    pub fn value(self) -> u64 {
        match self {
            Self::Exact(percent) => percent,
            Self::LessThanOne => 0,
        }
    }
}

impl Default for PercentUsed {
    fn default() -> Self {
        Self::Exact(0)
    }
}

impl fmt::Display for PercentUsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(percent) => write!(f, "{percent}"),
            Self::LessThanOne => f.write_str("<1"),
        }
    }
}
