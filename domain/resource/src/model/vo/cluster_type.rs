use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of resource a cluster schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    #[default]
    Cores,
    #[serde(alias = "GPUs")]
    Gpus,
}

impl ResourceKind {
    /// Unit printed after idle counts.
    pub fn unit(self) -> &'static str {
        match self {
            Self::Cores => "cores",
            Self::Gpus => "GPUs",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.unit())
    }
}

/// Resource kind of each known cluster. Clusters missing from the map schedule cores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterTypes(HashMap<String, ResourceKind>);

impl ClusterTypes {
    pub fn new(types: impl IntoIterator<Item = (String, ResourceKind)>) -> Self {
        Self(types.into_iter().collect())
    }

    pub fn kind_of(&self, cluster: &str) -> ResourceKind {
        self.0.get(cluster).copied().unwrap_or_default()
    }

    /// Known cluster names, sorted.
    pub fn clusters(&self) -> Vec<&str> {
        let mut clusters: Vec<&str> = self.0.keys().map(String::as_str).collect();
        clusters.sort_unstable();
        clusters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_cluster_defaults_to_cores() {
        let types = ClusterTypes::new([
            ("smp".to_string(), ResourceKind::Cores),
            ("gpu".to_string(), ResourceKind::Gpus),
        ]);
        assert_eq!(types.kind_of("gpu"), ResourceKind::Gpus);
        assert_eq!(types.kind_of("smp"), ResourceKind::Cores);
        assert_eq!(types.kind_of("azure"), ResourceKind::Cores);
        assert_eq!(types.clusters(), vec!["gpu", "smp"]);
    }

    #[test]
    fn test_units() {
        assert_eq!(ResourceKind::Cores.to_string(), "cores");
        assert_eq!(ResourceKind::Gpus.unit(), "GPUs");
    }
}
