//! GitHub REST API registry implementation (releases and tags)

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{GITHUB_PAGE_SIZE, SourceKind, USER_AGENT};
use crate::version::error::RegistryError;
use crate::version::registries::check_status;
use crate::version::registry::Registry;

/// Default base URL for GitHub API
const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Response item from GitHub Releases API
#[derive(Debug, Deserialize)]
struct Release {
    name: Option<String>,
    tag_name: String,
    #[serde(default)]
    draft: bool,
}

/// Response item from GitHub Tags API
#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
}

/// Which GitHub listing the registry reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Listing {
    Releases,
    Tags,
}

/// Registry implementation for GitHub releases or tags
pub struct GitHubRegistry {
    client: reqwest::Client,
    base_url: String,
    listing: Listing,
}

impl GitHubRegistry {
    /// Registry listing published releases; drafts are skipped
    pub fn releases(base_url: &str) -> Self {
        Self::new(base_url, Listing::Releases)
    }

    /// Registry listing git tags
    pub fn tags(base_url: &str) -> Self {
        Self::new(base_url, Listing::Tags)
    }

    fn new(base_url: &str, listing: Listing) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
            listing,
        }
    }

    pub fn default_releases() -> Self {
        Self::releases(DEFAULT_BASE_URL)
    }

    pub fn default_tags() -> Self {
        Self::tags(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl Registry for GitHubRegistry {
    fn source_kind(&self) -> SourceKind {
        match self.listing {
            Listing::Releases => SourceKind::GitHubRelease,
            Listing::Tags => SourceKind::GitHubTag,
        }
    }

    async fn fetch_all_versions(&self, package_name: &str) -> Result<Vec<String>, RegistryError> {
        let endpoint = match self.listing {
            Listing::Releases => "releases",
            Listing::Tags => "tags",
        };
        let url = format!("{}/repos/{}/{}", self.base_url, package_name, endpoint);
        debug!("Fetching GitHub {}: {}", endpoint, url);

        let response = self
            .client
            .get(&url)
            .query(&[("per_page", GITHUB_PAGE_SIZE)])
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let response = check_status(response, package_name, &url)?;

        let names = match self.listing {
            Listing::Releases => {
                let releases: Vec<Release> = response.json().await.map_err(|e| {
                    warn!("Failed to parse GitHub releases response: {}", e);
                    RegistryError::InvalidResponse(e.to_string())
                })?;
                releases
                    .into_iter()
                    .filter(|r| !r.draft)
                    .map(|r| match r.name {
                        Some(name) if !name.is_empty() => name,
                        _ => r.tag_name,
                    })
                    .collect()
            }
            Listing::Tags => {
                let tags: Vec<Tag> = response.json().await.map_err(|e| {
                    warn!("Failed to parse GitHub tags response: {}", e);
                    RegistryError::InvalidResponse(e.to_string())
                })?;
                tags.into_iter().map(|t| t.name).collect()
            }
        };

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[tokio::test]
    async fn fetch_releases_uses_release_name_and_skips_drafts() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/repos/scylladb/scylladb/releases")
            .match_query(Matcher::UrlEncoded("per_page".into(), "100".into()))
            .match_header("accept", "application/vnd.github+json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"name": "scylla-6.2.1", "tag_name": "scylla-6.2.1", "draft": false},
                    {"name": "scylla-6.3.0", "tag_name": "scylla-6.3.0", "draft": true},
                    {"name": "", "tag_name": "scylla-6.2.0", "draft": false},
                    {"name": null, "tag_name": "scylla-6.1.4"}
                ]"#,
            )
            .create_async()
            .await;

        let registry = GitHubRegistry::releases(&server.url());
        let result = registry
            .fetch_all_versions("scylladb/scylladb")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            result,
            vec![
                "scylla-6.2.1".to_string(),
                "scylla-6.2.0".to_string(),
                "scylla-6.1.4".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn fetch_tags_returns_tag_names() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/repos/golang/go/tags")
            .match_query(Matcher::UrlEncoded("per_page".into(), "100".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"name": "go1.22.1"}, {"name": "weekly.2012-03-27"}]"#)
            .create_async()
            .await;

        let registry = GitHubRegistry::tags(&server.url());
        let result = registry.fetch_all_versions("golang/go").await.unwrap();

        mock.assert_async().await;
        assert_eq!(registry.source_kind(), SourceKind::GitHubTag);
        assert_eq!(
            result,
            vec!["go1.22.1".to_string(), "weekly.2012-03-27".to_string()]
        );
    }

    #[tokio::test]
    async fn fetch_returns_not_found_for_nonexistent_repo() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/repos/nonexistent/repo/releases")
            .match_query(Matcher::Any)
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let registry = GitHubRegistry::releases(&server.url());
        let result = registry.fetch_all_versions("nonexistent/repo").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::NotFound(_))));
    }

    #[tokio::test]
    async fn fetch_returns_rate_limited_for_429() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/repos/scylladb/scylladb/tags")
            .match_query(Matcher::Any)
            .with_status(429)
            .with_header("retry-after", "60")
            .with_body(r#"{"message": "API rate limit exceeded"}"#)
            .create_async()
            .await;

        let registry = GitHubRegistry::tags(&server.url());
        let result = registry.fetch_all_versions("scylladb/scylladb").await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(RegistryError::RateLimited {
                retry_after_secs: Some(60)
            })
        ));
    }

    #[tokio::test]
    async fn fetch_returns_invalid_response_for_malformed_body() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/repos/some/repo/releases")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"unexpected": true}"#)
            .create_async()
            .await;

        let registry = GitHubRegistry::releases(&server.url());
        let result = registry.fetch_all_versions("some/repo").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::InvalidResponse(_))));
    }
}
