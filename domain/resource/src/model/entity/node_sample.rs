use std::str::FromStr;

use crate::model::vo::record::{
    gres_count, parse_count, parse_optional_count, split_fields, RecordError,
};

/// Resource counts, free memory and state of one node, as reported by a single `sinfo` call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NodeResourceSample {
    pub node_name: String,
    pub cluster: String,
    pub partition: String,
    pub allocated: u64,
    pub idle: u64,
    pub other: u64,
    pub total: u64,
    /// Free memory in MB, `None` when slurm reports `N/A`.
    pub free_mem_mb: Option<u64>,
    pub state: NodeState,
}

/// Scheduler state of a node, reduced to what matters for availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeState {
    #[default]
    Normal,
    Drain,
    Down,
}

impl NodeState {
    /// Reduce a compact slurm state (`idle`, `mix`, `drng`, `drain*`, `down~`, ...).
    ///
    /// Draining nodes (`drng`) accept no new jobs and count as drained.
    pub fn from_compact(state: &str) -> Self {
        let state = state.to_ascii_lowercase();
        if state.contains("down") {
            Self::Down
        } else if state.contains("drain") || state.contains("drng") {
            Self::Drain
        } else {
            Self::Normal
        }
    }

    #[inline]
    pub fn is_unavailable(self) -> bool {
        matches!(self, Self::Drain | Self::Down)
    }
}

impl FromStr for NodeState {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_compact(s))
    }
}

impl NodeResourceSample {
    /// Idle resources the node offers. Drained and downed nodes offer none.
    #[inline]
    pub fn available(&self) -> u64 {
        if self.state.is_unavailable() {
            0
        } else {
            self.idle
        }
    }

    /// Free memory the node offers. Drained and downed nodes offer none.
    #[inline]
    pub fn available_free_mem(&self) -> u64 {
        if self.state.is_unavailable() {
            0
        } else {
            self.free_mem_mb.unwrap_or(0)
        }
    }

    /// Parse a line of `sinfo -N -o %N,%C,%e,%t`.
    ///
    /// Parse example: `node1,2/4/0/6,3500,mix`. The trailing state is optional.
    pub fn from_cpu_line(cluster: &str, partition: &str, line: &str) -> Result<Self, RecordError> {
        let fields = split_fields(line, ',', 3..=4)?;
        let counts = split_fields(fields[1], '/', 4..=4)?;
        let state = fields.get(3).map(|s| NodeState::from_compact(s)).unwrap_or_default();

        Ok(Self {
            node_name: fields[0].trim().to_string(),
            cluster: cluster.to_string(),
            partition: partition.to_string(),
            allocated: parse_count("allocated", counts[0])?,
            idle: parse_count("idle", counts[1])?,
            other: parse_count("other", counts[2])?,
            total: parse_count("total", counts[3])?,
            free_mem_mb: parse_optional_count("free_mem", fields[2])?,
            state,
        })
    }

    /// Parse a line of `sinfo -N --Format=NodeList:_,gres:5_,gresUsed:12_,StateCompact:_,FreeMem`.
    ///
    /// Parse example: `gpu-n1_gpu:4_gpu:2_mix_3500`. GPU counts are the trailing digits of the
    /// gres tokens.
    pub fn from_gpu_line(cluster: &str, partition: &str, line: &str) -> Result<Self, RecordError> {
        let fields = split_fields(line, '_', 5..=5)?;
        let total = gres_count(fields[1]);
        let allocated = gres_count(fields[2]);

        Ok(Self {
            node_name: fields[0].trim().to_string(),
            cluster: cluster.to_string(),
            partition: partition.to_string(),
            allocated,
            idle: total.saturating_sub(allocated),
            other: 0,
            total,
            free_mem_mb: parse_optional_count("free_mem", fields[4])?,
            state: NodeState::from_compact(fields[3]),
        })
    }
}
