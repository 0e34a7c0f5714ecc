//! Global position filter: `FIRST[+N]` / `LAST[-N]` over the whole list
//!
//! Unlike a position inside a version pattern, this selects by rank in the
//! flat sorted list, so `LAST-1` keeps meaning "second newest" even across a
//! major version bump.

use std::fmt;

use crate::filter::Filter;
use crate::filter::component::Position;
use crate::filter::error::FilterError;
use crate::version::types::Versions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalPosition {
    position: Position,
}

impl GlobalPosition {
    pub fn parse(value: &str) -> Result<Self, FilterError> {
        Position::parse(value)
            .map(|position| Self { position })
            .map_err(|source| FilterError::InvalidPosition {
                value: value.to_string(),
                source,
            })
    }

    /// Whether a filter chunk is written as a global position: no dots and a
    /// leading `FIRST` or `LAST`
    pub fn matches_syntax(value: &str) -> bool {
        !value.contains('.') && Position::has_keyword(value)
    }
}

impl Filter for GlobalPosition {
    fn apply(&self, versions: Versions) -> Versions {
        if versions.is_empty() {
            return versions;
        }

        // Rank distinct versions so duplicates do not shift offsets
        let mut unique = versions.sorted(false).into_inner();
        unique.dedup();
        match self.position.index(unique.len()) {
            Some(index) => Versions::new(vec![unique.swap_remove(index)]),
            None => Versions::default(),
        }
    }
}

impl fmt::Display for GlobalPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.position, f)
    }
}
