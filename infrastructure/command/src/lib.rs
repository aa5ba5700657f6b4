//! Commands to interact with infrastructure

use chrono::NaiveDate;

/// Output format of `sinfo` for clusters whose resources are cores.
pub const CPU_SINFO_FORMAT: &str = "%N,%C,%e,%t";

/// Output format of `sinfo` for clusters whose resources are GPUs.
pub const GPU_SINFO_FORMAT: &str = "NodeList:_,gres:5_,gresUsed:12_,StateCompact:_,FreeMem";

/// Command to the slurm scheduler or the local system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerCommand {
    /// Per node core counts, free memory and state of a partition.
    IdleCores {
        cluster: String,
        partition: String,
    },

    /// Per node gres totals, gres usage, state and free memory of a partition.
    IdleGpus {
        cluster: String,
        partition: String,
    },

    /// All partitions configured on a cluster.
    ShowPartitions {
        /// Cluster name.
        cluster: String,
    },

    /// Look an account up in the slurm accounting database.
    AccountExists {
        /// Account name.
        account: String,
    },

    /// Billing hours of an account and its users on a cluster since a date.
    UsageByUser {
        account: String,
        cluster: String,
        start: NaiveDate,
    },

    /// Primary group of the calling user.
    PrimaryGroup,
}

impl SchedulerCommand {
    /// Program followed by its arguments.
    pub fn args(&self) -> Vec<String> {
        use SchedulerCommand::*;

        match self {
            IdleCores { cluster, partition } => vec![
                "sinfo".into(),
                "-h".into(),
                "-M".into(),
                cluster.clone(),
                "-p".into(),
                partition.clone(),
                "-N".into(),
                "-o".into(),
                CPU_SINFO_FORMAT.into(),
            ],
            IdleGpus { cluster, partition } => vec![
                "sinfo".into(),
                "-h".into(),
                "-M".into(),
                cluster.clone(),
                "-p".into(),
                partition.clone(),
                "-N".into(),
                format!("--Format={GPU_SINFO_FORMAT}"),
            ],
            ShowPartitions { cluster } => vec![
                "scontrol".into(),
                "-M".into(),
                cluster.clone(),
                "show".into(),
                "partition".into(),
            ],
            AccountExists { account } => vec![
                "sacctmgr".into(),
                "-n".into(),
                "list".into(),
                "account".into(),
                format!("account={account}"),
                "format=account%30".into(),
            ],
            UsageByUser {
                account,
                cluster,
                start,
            } => vec![
                "sreport".into(),
                "-nP".into(),
                "cluster".into(),
                "accountutilizationbyuser".into(),
                format!("Cluster={cluster}"),
                format!("Account={account}"),
                "-t".into(),
                "Hours".into(),
                format!("Start={}", start.format("%Y-%m-%d")),
                "-T".into(),
                "Billing".into(),
                "Format=Proper,Used".into(),
            ],
            PrimaryGroup => vec!["id".into(), "-gn".into()],
        }
    }

    /// Name of the program to run.
    pub fn program(&self) -> &'static str {
        use SchedulerCommand::*;

        match self {
            IdleCores { .. } | IdleGpus { .. } => "sinfo",
            ShowPartitions { .. } => "scontrol",
            AccountExists { .. } => "sacctmgr",
            UsageByUser { .. } => "sreport",
            PrimaryGroup => "id",
        }
    }

    /// Whether a non-zero exit makes the output meaningless. An empty `sacctmgr` listing
    /// reads as an unknown account, so its failures must not pass as empty output.
    pub fn requires_success(&self) -> bool {
        matches!(self, Self::AccountExists { .. } | Self::PrimaryGroup)
    }
}

impl std::fmt::Display for SchedulerCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.args().join(" "))
    }
}
