//! Client of the keystone allocation accounting service.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use domain_allocation::{
    model::entity::{AllocationRequest, ClusterAllocation},
    repository::AllocationRepo,
};
use reqwest::{header::AUTHORIZATION, Client};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, warn};
use url::Url;

use crate::config::KeystoneConfig;

#[derive(Debug, Deserialize)]
struct ResearchGroupDto {
    id: u64,
}

#[derive(Debug, Deserialize)]
struct AllocationDto {
    request: u64,
    cluster: u64,
    #[serde(default)]
    awarded: Option<u64>,
}

pub struct KeystoneClient {
    client: Client,
    base_url: Url,
    token: String,
    cluster_ids: BTreeMap<String, String>,
}

impl KeystoneClient {
    pub fn new(config: &KeystoneConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url(&config.url)?,
            token: config.token.clone(),
            cluster_ids: config.cluster_ids.clone(),
        })
    }

    async fn http_get<T>(&self, path: &str, query: &[(&str, &str)]) -> anyhow::Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.base_url.join(path)?;
        debug!("GET {url} {query:?}");
        let mut request = self.client.get(url.clone()).query(query);
        if !self.token.is_empty() {
            request = request.header(AUTHORIZATION, format!("Bearer {}", self.token));
        }
        let response = request
            .send()
            .await
            .with_context(|| format!("Cannot reach {url}"))?
            .error_for_status()?;
        Ok(response
            .json()
            .await
            .with_context(|| format!("Unexpected response from {url}"))?)
    }

    fn cluster_name(&self, cluster_id: u64) -> String {
        cluster_name(&self.cluster_ids, cluster_id)
    }
}

/// Base url ending in a slash, joined paths are appended to its path.
fn base_url(url: &str) -> anyhow::Result<Url> {
    let url = if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{url}/")
    };
    Url::parse(&url).with_context(|| format!("Invalid keystone url {url:?}"))
}

fn cluster_name(cluster_ids: &BTreeMap<String, String>, cluster_id: u64) -> String {
    match cluster_ids.get(&cluster_id.to_string()) {
        Some(name) => name.to_lowercase(),
        None => {
            warn!("Unknown keystone cluster id {cluster_id}");
            cluster_id.to_string()
        }
    }
}

#[async_trait]
impl AllocationRepo for KeystoneClient {
    async fn get_research_group_id(&self, account: &str) -> anyhow::Result<Option<u64>> {
        let groups: Vec<ResearchGroupDto> = self
            .http_get("users/researchgroups/", &[("name", account)])
            .await?;
        Ok(groups.first().map(|g| g.id))
    }

    async fn get_approved_requests(&self, group_id: u64) -> anyhow::Result<Vec<AllocationRequest>> {
        let group_id = group_id.to_string();
        self.http_get("allocations/requests/", &[("group", group_id.as_str()), ("status", "AP")])
            .await
    }

    async fn get_allocations(&self, request_id: u64) -> anyhow::Result<Vec<ClusterAllocation>> {
        let request = request_id.to_string();
        let allocations: Vec<AllocationDto> = self
            .http_get("allocations/allocations/", &[("request", request.as_str())])
            .await?;
        Ok(allocations
            .into_iter()
            .map(|a| ClusterAllocation {
                request_id: a.request,
                cluster_name: self.cluster_name(a.cluster),
                awarded: a.awarded,
            })
            .collect())
    }
}
