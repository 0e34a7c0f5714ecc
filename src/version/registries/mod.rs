//! Registry implementations for fetching release names

pub mod dockerhub;
pub mod github;
pub mod maven;

pub use dockerhub::DockerHubRegistry;
pub use github::GitHubRegistry;
pub use maven::MavenRegistry;

use tracing::warn;

use crate::config::SourceKind;
use crate::version::error::RegistryError;
use crate::version::registry::Registry;

/// Create the registry serving `kind`, pointed at its public endpoint
pub fn create_registry(kind: SourceKind) -> Box<dyn Registry> {
    match kind {
        SourceKind::GitHubRelease => Box::new(GitHubRegistry::default_releases()),
        SourceKind::GitHubTag => Box::new(GitHubRegistry::default_tags()),
        SourceKind::DockerHubImageTag => Box::new(DockerHubRegistry::default()),
        SourceKind::MavenArtifact => Box::new(MavenRegistry::default()),
    }
}

/// Map the HTTP status of a registry response to a `RegistryError`
pub(crate) fn check_status(
    response: reqwest::Response,
    package_name: &str,
    url: &str,
) -> Result<reqwest::Response, RegistryError> {
    let status = response.status();

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(RegistryError::NotFound(package_name.to_string()));
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        return Err(RegistryError::RateLimited {
            retry_after_secs: retry_after,
        });
    }

    if !status.is_success() {
        warn!("Registry returned status {}: {}", status, url);
        return Err(RegistryError::InvalidResponse(format!(
            "Unexpected status: {}",
            status
        )));
    }

    Ok(response)
}
