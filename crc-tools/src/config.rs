use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use domain_resource::model::vo::{ClusterTypes, ResourceKind};
use serde::Deserialize;

use crate::telemetry::TelemetryConfig;

const CONFIG: &str = "crc-tools";
const CONFIG_ENV_PREFIX: &str = "CRC";
const CONFIG_ENV_SEPARATOR: &str = "__";

#[derive(Default, Clone, Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub clusters: ClustersConfig,
    #[serde(default)]
    pub keystone: KeystoneConfig,
}

#[derive(Clone, Deserialize, Debug)]
pub struct ClustersConfig {
    /// Resource each cluster schedules, clusters missing here count cores.
    #[serde(default = "ClustersConfig::default_types")]
    pub types: ClusterTypes,
    #[serde(default = "ClustersConfig::default_ignored_clusters")]
    pub ignored_clusters: HashSet<String>,
    #[serde(default = "ClustersConfig::default_ignored_partitions")]
    pub ignored_partitions: HashSet<String>,
}

impl ClustersConfig {
    fn default_types() -> ClusterTypes {
        ClusterTypes::new([
            ("smp".to_string(), ResourceKind::Cores),
            ("gpu".to_string(), ResourceKind::Gpus),
            ("mpi".to_string(), ResourceKind::Cores),
            ("htc".to_string(), ResourceKind::Cores),
            ("teach".to_string(), ResourceKind::Cores),
        ])
    }
    fn default_ignored_clusters() -> HashSet<String> {
        HashSet::from(["azure".to_string()])
    }
    fn default_ignored_partitions() -> HashSet<String> {
        [
            "pliu",
            "jdurrant",
            "kjordan",
            "lchong",
            "eschneider",
            "eschneider-mpi",
            "isenocak",
            "isenocak-mpi",
            "power9",
        ]
        .into_iter()
        .map(str::to_string)
        .collect()
    }
}

impl Default for ClustersConfig {
    fn default() -> Self {
        Self {
            types: Self::default_types(),
            ignored_clusters: Self::default_ignored_clusters(),
            ignored_partitions: Self::default_ignored_partitions(),
        }
    }
}

#[derive(Clone, Deserialize, Debug)]
pub struct KeystoneConfig {
    #[serde(default = "KeystoneConfig::default_url")]
    pub url: String,
    /// Pre-issued bearer token.
    #[serde(default)]
    pub token: String,
    #[serde(default = "KeystoneConfig::default_timeout_secs")]
    pub timeout_secs: u64,
    /// Cluster names keyed by keystone cluster id.
    #[serde(default = "KeystoneConfig::default_cluster_ids")]
    pub cluster_ids: BTreeMap<String, String>,
}

impl KeystoneConfig {
    fn default_url() -> String {
        "https://keystone.crc.pitt.edu".to_string()
    }
    fn default_timeout_secs() -> u64 {
        10
    }
    fn default_cluster_ids() -> BTreeMap<String, String> {
        [("1", "mpi"), ("2", "smp"), ("3", "htc"), ("4", "gpu")]
            .into_iter()
            .map(|(id, name)| (id.to_string(), name.to_string()))
            .collect()
    }
}

impl Default for KeystoneConfig {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
            token: Default::default(),
            timeout_secs: Self::default_timeout_secs(),
            cluster_ids: Self::default_cluster_ids(),
        }
    }
}

/// Layer `crc-tools.yaml` of the working directory, the given files and `CRC__*` variables.
pub fn build_config(files: &[PathBuf]) -> anyhow::Result<AppConfig> {
    let mut config = config::Config::builder().add_source(
        config::File::with_name(CONFIG)
            .required(false)
            .format(config::FileFormat::Yaml),
    );
    for file in files {
        config = config.add_source(
            config::File::from(file.as_path())
                .format(config::FileFormat::Yaml)
                .required(true),
        );
    }
    config = config.add_source(
        config::Environment::with_prefix(CONFIG_ENV_PREFIX)
            .separator(CONFIG_ENV_SEPARATOR)
            .try_parsing(true),
    );
    Ok(config.build()?.try_deserialize()?)
}
