//! Composition of filters: `and` narrows in sequence, `or` unions

use indexmap::IndexSet;

use crate::filter::{Filter, VersionFilter};
use crate::version::types::Versions;

/// Applies each filter to the output of the previous one
#[derive(Debug, Clone)]
pub struct And(pub Vec<VersionFilter>);

impl Filter for And {
    fn apply(&self, versions: Versions) -> Versions {
        self.0
            .iter()
            .fold(versions, |narrowed, filter| filter.apply(narrowed))
    }
}

/// Applies each filter to the same input and unions the results.
///
/// Equal versions collapse into one. The result is in first-seen order,
/// which callers should not rely on.
#[derive(Debug, Clone)]
pub struct Or(pub Vec<VersionFilter>);

impl Filter for Or {
    fn apply(&self, versions: Versions) -> Versions {
        let mut union = IndexSet::new();
        for filter in &self.0 {
            union.extend(filter.apply(versions.clone()));
        }
        union.into_iter().collect()
    }
}
