//! Registry trait for fetching release names from various sources

#[cfg(test)]
use mockall::automock;

use crate::config::SourceKind;
use crate::version::error::RegistryError;

/// Trait for fetching the raw tag names of a package from a registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Returns the kind of source this implementation handles
    fn source_kind(&self) -> SourceKind;

    /// Fetches the tag names for a package
    ///
    /// # Arguments
    /// * `package_name` - `owner/repo` for GitHub, `image` or `namespace/image`
    ///   for Docker Hub, `group:artifact` for Maven
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Names in the order the registry returned them
    /// * `Err(RegistryError)` - If the fetch fails
    async fn fetch_all_versions(&self, package_name: &str) -> Result<Vec<String>, RegistryError>;
}
