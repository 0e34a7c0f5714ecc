//! Shared helpers for integration tests

#![allow(dead_code)]

pub mod registry;

pub use registry::StubRegistry;

use get_version::version::{Version, Versions};

/// Parse a list of unprefixed versions, panicking on malformed input
pub fn versions(values: &[&str]) -> Versions {
    values.iter().map(|v| Version::parse(v).unwrap()).collect()
}

/// Render versions ascending, the order every assertion compares in
pub fn sorted_strings(versions: Versions) -> Vec<String> {
    versions.sorted(false).to_strings(true)
}
