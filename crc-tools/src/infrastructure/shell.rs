use std::process::Output;

use anyhow::{bail, Context};
use async_trait::async_trait;
use infrastructure_command::SchedulerCommand;
use tracing::{debug, warn};

/// Runs scheduler commands and returns what they print to stdout.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &SchedulerCommand) -> anyhow::Result<String>;
}

/// Runs commands on this host, without a shell in between.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalShell;

#[async_trait]
impl CommandRunner for LocalShell {
    async fn run(&self, command: &SchedulerCommand) -> anyhow::Result<String> {
        let args = command.args();
        let Some((program, rest)) = args.split_first() else {
            bail!("Empty command");
        };
        debug!("Run `{command}`");
        let output = tokio::process::Command::new(program)
            .args(rest)
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("Cannot run {}", command.program()))?;

        check_output(command, &output)?;
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Warn about a failed run, or fail when the command's output depends on its success.
fn check_output(command: &SchedulerCommand, output: &Output) -> anyhow::Result<()> {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !output.status.success() {
        if command.requires_success() {
            bail!("`{command}` exited with {}: {}", output.status, stderr.trim());
        }
        warn!("`{command}` exited with {}: {}", output.status, stderr.trim());
    } else if !stderr.trim().is_empty() {
        warn!("`{command}` wrote to stderr: {}", stderr.trim());
    }
    Ok(())
}

/// Drop the `CLUSTER: name` banner slurm prints when a cluster is picked with `-M`.
pub fn strip_cluster_banner(output: &str) -> String {
    output
        .lines()
        .filter(|line| !line.trim_start().starts_with("CLUSTER:"))
        .collect::<Vec<_>>()
        .join("\n")
}
