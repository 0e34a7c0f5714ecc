//! Registry test utilities

use std::collections::HashMap;

use async_trait::async_trait;

use get_version::config::SourceKind;
use get_version::version::error::RegistryError;
use get_version::version::registry::Registry;

/// In-memory registry answering from a fixed table of package names
pub struct StubRegistry {
    source_kind: SourceKind,
    names: HashMap<String, Vec<String>>,
}

impl StubRegistry {
    pub fn new(source_kind: SourceKind) -> Self {
        Self {
            source_kind,
            names: HashMap::new(),
        }
    }

    pub fn with_names(mut self, package: &str, names: Vec<&str>) -> Self {
        self.names.insert(
            package.to_string(),
            names.into_iter().map(|n| n.to_string()).collect(),
        );
        self
    }
}

#[async_trait]
impl Registry for StubRegistry {
    fn source_kind(&self) -> SourceKind {
        self.source_kind
    }

    async fn fetch_all_versions(&self, package_name: &str) -> Result<Vec<String>, RegistryError> {
        match self.names.get(package_name) {
            Some(names) => Ok(names.clone()),
            None => Err(RegistryError::NotFound(package_name.to_string())),
        }
    }
}
