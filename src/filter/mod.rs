//! Version filter engine
//!
//! A filter expression narrows a list of versions. It is parsed once into a
//! [`VersionFilter`]; every error surfaces at parse time and applying a
//! parsed filter never fails.
//!
//! # Grammar
//!
//! ```text
//! expression := ""                         identity
//!             | chunk (" and " chunk)*     sequential narrowing
//!             | chunk (" or " chunk)*      union
//! chunk      := position                   no dots, FIRST/LAST keyword
//!             | slot "." slot "." slot     major.minor.patch
//! position   := "FIRST" ["+" N] | "LAST" ["-" N]
//! slot       := "*" | position | regex | literal
//! ```
//!
//! # Modules
//!
//! - [`component`]: Matcher for one slot and the `FIRST`/`LAST` position syntax
//! - [`pattern`]: `major.minor.patch` pattern with per-group position resolution
//! - [`position`]: Rank selection over the whole sorted list
//! - [`logic`]: `and` / `or` composition
//! - [`error`]: Parse and validation errors

pub mod component;
pub mod error;
pub mod logic;
pub mod pattern;
pub mod position;

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::filter::error::FilterError;
use crate::filter::logic::{And, Or};
use crate::filter::pattern::Pattern;
use crate::filter::position::GlobalPosition;
use crate::version::types::Versions;

const AND: &str = " and ";
const OR: &str = " or ";

/// Something that narrows a list of versions
pub trait Filter: Send + Sync {
    /// Returns the versions this filter keeps. The result is not re-sorted
    /// for display; order it explicitly when rendering.
    fn apply(&self, versions: Versions) -> Versions;
}

/// A parsed filter expression
#[derive(Debug, Clone)]
pub enum VersionFilter {
    /// Empty expression: keeps everything
    Identity,
    Pattern(Pattern),
    Position(GlobalPosition),
    And(And),
    Or(Or),
}

impl Filter for VersionFilter {
    fn apply(&self, versions: Versions) -> Versions {
        match self {
            VersionFilter::Identity => versions,
            VersionFilter::Pattern(pattern) => pattern.apply(versions),
            VersionFilter::Position(position) => position.apply(versions),
            VersionFilter::And(and) => and.apply(versions),
            VersionFilter::Or(or) => or.apply(versions),
        }
    }
}

/// Parse a whole filter expression.
///
/// An expression may join chunks with ` and ` or with ` or `, but not both.
pub fn parse_filter(expression: &str) -> Result<VersionFilter, FilterError> {
    if expression.is_empty() {
        return Ok(VersionFilter::Identity);
    }

    let has_and = expression.contains(AND);
    let has_or = expression.contains(OR);

    let filter = match (has_and, has_or) {
        (true, true) => return Err(FilterError::MixedOperators(expression.to_string())),
        (true, false) => VersionFilter::And(And(parse_chunks(expression, AND)?)),
        (false, true) => VersionFilter::Or(Or(parse_chunks(expression, OR)?)),
        (false, false) => parse_chunk(expression)?,
    };

    debug!("Parsed filter {:?} as {}", expression, filter);
    Ok(filter)
}

fn parse_chunks(expression: &str, operator: &str) -> Result<Vec<VersionFilter>, FilterError> {
    expression.split(operator).map(parse_chunk).collect()
}

fn parse_chunk(chunk: &str) -> Result<VersionFilter, FilterError> {
    if GlobalPosition::matches_syntax(chunk) {
        GlobalPosition::parse(chunk).map(VersionFilter::Position)
    } else {
        Pattern::parse(chunk).map(VersionFilter::Pattern)
    }
}

impl FromStr for VersionFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_filter(s)
    }
}

impl fmt::Display for VersionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionFilter::Identity => Ok(()),
            VersionFilter::Pattern(pattern) => write!(f, "{}", pattern),
            VersionFilter::Position(position) => write!(f, "{}", position),
            VersionFilter::And(And(filters)) => write_joined(f, filters, AND),
            VersionFilter::Or(Or(filters)) => write_joined(f, filters, OR),
        }
    }
}

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    filters: &[VersionFilter],
    operator: &str,
) -> fmt::Result {
    for (i, filter) in filters.iter().enumerate() {
        if i > 0 {
            f.write_str(operator)?;
        }
        write!(f, "{}", filter)?;
    }
    Ok(())
}
