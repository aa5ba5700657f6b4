use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Idle resources and allocation usage on the CRC clusters.
#[derive(Parser, Debug)]
#[command(name = "crc-tools", version)]
pub struct Cli {
    /// Extra yaml configuration file, later files win
    #[arg(short, long = "config", value_name = "FILE", global = true)]
    pub config: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List idle cores or GPUs on each cluster partition
    Idle(IdleArgs),
    /// Show awarded and used service units of an account
    Usage(AccountArgs),
    /// Show service units awarded to an account on each cluster
    Sus(AccountArgs),
    /// Show when the allocation of an account ends
    ProposalEnd(AccountArgs),
}

#[derive(Args, Debug)]
pub struct IdleArgs {
    /// Only list this cluster, may be repeated
    #[arg(short = 'M', long = "cluster", value_name = "CLUSTER")]
    pub clusters: Vec<String>,

    /// Only list this partition, may be repeated
    #[arg(short, long = "partition", value_name = "PARTITION")]
    pub partitions: Vec<String>,

    /// Refresh the listing every SECS seconds until interrupted
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub watch: Option<u64>,
}

#[derive(Args, Debug)]
pub struct AccountArgs {
    /// Slurm account name [default: primary group of the current user]
    pub account: Option<String>,
}
