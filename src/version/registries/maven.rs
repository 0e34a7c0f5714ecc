//! Maven Central search API registry implementation

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{MAVEN_ROWS, SourceKind, USER_AGENT};
use crate::version::error::RegistryError;
use crate::version::registries::check_status;
use crate::version::registry::Registry;

/// Default base URL for the Maven Central search API
const DEFAULT_BASE_URL: &str = "https://search.maven.org";

/// Response from the solrsearch endpoint with `core=gav`
#[derive(Debug, Deserialize)]
struct SearchResponse {
    response: SearchDocs,
}

#[derive(Debug, Deserialize)]
struct SearchDocs {
    docs: Vec<Artifact>,
}

#[derive(Debug, Deserialize)]
struct Artifact {
    #[serde(rename = "v")]
    version: String,
}

/// Registry implementation for Maven Central artifacts
pub struct MavenRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl MavenRegistry {
    /// Creates a new MavenRegistry with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
        }
    }

    /// Split `group:artifact` into its coordinates
    fn coordinates(package_name: &str) -> Result<(&str, &str), RegistryError> {
        match package_name.split_once(':') {
            Some((group, artifact)) if !group.is_empty() && !artifact.is_empty() => {
                Ok((group, artifact))
            }
            _ => Err(RegistryError::InvalidPackage {
                name: package_name.to_string(),
                reason: "expected group:artifact".to_string(),
            }),
        }
    }
}

impl Default for MavenRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl Registry for MavenRegistry {
    fn source_kind(&self) -> SourceKind {
        SourceKind::MavenArtifact
    }

    async fn fetch_all_versions(&self, package_name: &str) -> Result<Vec<String>, RegistryError> {
        let (group, artifact) = Self::coordinates(package_name)?;
        let url = format!("{}/solrsearch/select", self.base_url);
        let query = format!("g:{} AND a:{}", group, artifact);
        debug!("Fetching Maven artifact versions: {} ({})", url, query);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", query.as_str()),
                ("core", "gav"),
                ("rows", MAVEN_ROWS),
                ("wt", "json"),
            ])
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = check_status(response, package_name, &url)?;

        let body: SearchResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse Maven search response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        Ok(body.response.docs.into_iter().map(|d| d.version).collect())
    }
}
