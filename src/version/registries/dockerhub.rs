//! Docker Hub image tag registry implementation

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{DOCKERHUB_PAGE_SIZE, SourceKind, USER_AGENT};
use crate::version::error::RegistryError;
use crate::version::registries::check_status;
use crate::version::registry::Registry;

/// Default base URL for Docker Hub
const DEFAULT_BASE_URL: &str = "https://hub.docker.com";

/// Response from the Docker Hub tags API
#[derive(Debug, Deserialize)]
struct TagsResponse {
    results: Vec<Tag>,
}

#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
}

/// Registry implementation for Docker Hub image tags
pub struct DockerHubRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl DockerHubRegistry {
    /// Creates a new DockerHubRegistry with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
        }
    }

    /// Official images live under the `library` repositories path,
    /// everything else under its namespace.
    fn tags_url(&self, image: &str) -> String {
        match image.split_once('/') {
            Some((namespace, name)) => format!(
                "{}/v2/namespaces/{}/repositories/{}/tags",
                self.base_url, namespace, name
            ),
            None => format!("{}/v2/repositories/library/{}/tags", self.base_url, image),
        }
    }
}

impl Default for DockerHubRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl Registry for DockerHubRegistry {
    fn source_kind(&self) -> SourceKind {
        SourceKind::DockerHubImageTag
    }

    async fn fetch_all_versions(&self, package_name: &str) -> Result<Vec<String>, RegistryError> {
        let url = self.tags_url(package_name);
        debug!("Fetching Docker Hub tags: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("page_size", DOCKERHUB_PAGE_SIZE)])
            .send()
            .await?;

        let response = check_status(response, package_name, &url)?;

        let body: TagsResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse Docker Hub tags response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        Ok(body.results.into_iter().map(|t| t.name).collect())
    }
}
