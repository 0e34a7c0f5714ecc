//! Conversion of raw registry tag names into versions

use tracing::debug;

use crate::version::types::{Version, Versions};

/// A tag name that could not be turned into a version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredVersion {
    pub raw: String,
    pub reason: String,
}

/// Versions parsed from one registry response, plus everything rejected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedVersions {
    pub versions: Versions,
    pub ignored: Vec<IgnoredVersion>,
}

/// Parse every name, stripping `prefix` first when one is configured.
///
/// Names without the prefix, or that fail to parse, are recorded as ignored
/// instead of aborting the whole list.
pub fn extract_versions<I, S>(names: I, prefix: &str) -> FetchedVersions
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut versions = Vec::new();
    let mut ignored = Vec::new();

    for name in names {
        let name = name.as_ref();
        let Some(stripped) = name.strip_prefix(prefix) else {
            ignored.push(IgnoredVersion {
                raw: name.to_string(),
                reason: format!("version {:?} does not have prefix {:?}", name, prefix),
            });
            continue;
        };

        match Version::parse(stripped) {
            Ok(version) => versions.push(version.with_prefix(prefix)),
            Err(e) => ignored.push(IgnoredVersion {
                raw: name.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    debug!(
        "Extracted {} versions, ignored {}",
        versions.len(),
        ignored.len()
    );

    FetchedVersions {
        versions: Versions::new(versions),
        ignored,
    }
}
