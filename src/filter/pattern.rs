//! `major.minor.patch` filter built from three component patterns
//!
//! Position selectors resolve inside the group fixed by the more significant
//! components: `*.*.LAST` keeps the newest patch of every `major.minor`, not
//! the single newest patch overall.

use std::fmt;

use crate::filter::Filter;
use crate::filter::component::{Component, ComponentPattern};
use crate::filter::error::{ComponentValidationError, FilterError};
use crate::version::types::{Version, Versions};

#[derive(Debug, Clone)]
pub struct Pattern {
    major: ComponentPattern,
    minor: ComponentPattern,
    patch: ComponentPattern,
}

impl Pattern {
    /// Parse `major.minor.patch`; only the first two dots separate slots.
    ///
    /// Every slot is validated and all failures are reported together.
    pub fn parse(value: &str) -> Result<Self, FilterError> {
        let chunks: Vec<&str> = value.splitn(3, '.').collect();
        let [major, minor, patch] = chunks[..] else {
            return Err(FilterError::Parse(value.to_string()));
        };

        let mut errors = Vec::new();
        let mut validate = |component: Component, text: &str| match ComponentPattern::parse(text) {
            Ok(pattern) => Some(pattern),
            Err(source) => {
                errors.push(ComponentValidationError { component, source });
                None
            }
        };

        let major = validate(Component::Major, major);
        let minor = validate(Component::Minor, minor);
        let patch = validate(Component::Patch, patch);

        match (major, minor, patch) {
            (Some(major), Some(minor), Some(patch)) => Ok(Self {
                major,
                minor,
                patch,
            }),
            _ => Err(FilterError::Validation {
                pattern: value.to_string(),
                errors,
            }),
        }
    }

    fn apply_patch(&self, versions: Versions) -> Versions {
        self.patch.apply(versions, Component::Patch)
    }
}

impl Filter for Pattern {
    /// Grouping works on contiguous runs, so `versions` must already be
    /// sorted ascending when the minor or patch slot is a position.
    fn apply(&self, versions: Versions) -> Versions {
        let filtered = self.major.apply(versions, Component::Major);

        if !self.minor.is_position() && !self.patch.is_position() {
            let filtered = self.minor.apply(filtered, Component::Minor);
            return self.apply_patch(filtered);
        }

        if !self.patch.is_position() {
            return filtered.group_and_filter(Version::major, |group| {
                let group = self.minor.apply(group, Component::Minor);
                self.apply_patch(group)
            });
        }

        filtered.group_and_filter(Version::major, |group| {
            self.minor
                .apply(group, Component::Minor)
                .group_and_filter(Version::minor, |group| self.apply_patch(group))
        })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
