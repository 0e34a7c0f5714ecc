//! Matcher for a single `major`, `minor` or `patch` slot of a filter

use std::fmt;

use regex::Regex;

use crate::filter::error::ComponentError;
use crate::version::types::{Version, Versions};

const FIRST: &str = "FIRST";
const LAST: &str = "LAST";

/// One of the three dotted slots of a version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Major,
    Minor,
    Patch,
}

impl Component {
    /// Text of this component as displayed, patch suffix included
    pub fn render(self, version: &Version) -> String {
        match self {
            Component::Major => version.major_str().to_string(),
            Component::Minor => version.minor_str().to_string(),
            Component::Patch => version.patch_str(),
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Component::Major => "major",
            Component::Minor => "minor",
            Component::Patch => "patch",
        })
    }
}

/// End of a sorted list a position counts from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    First,
    Last,
}

/// `FIRST[+N]` or `LAST[-N]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub anchor: Anchor,
    pub offset: usize,
}

impl Position {
    /// Whether `value` opens with one of the position keywords
    pub fn has_keyword(value: &str) -> bool {
        value.starts_with(FIRST) || value.starts_with(LAST)
    }

    pub fn parse(value: &str) -> Result<Self, ComponentError> {
        let (anchor, keyword, operator) = if value.starts_with(FIRST) {
            (Anchor::First, FIRST, '+')
        } else if value.starts_with(LAST) {
            (Anchor::Last, LAST, '-')
        } else {
            return Err(ComponentError::MissingKeyword);
        };

        let rest = &value[keyword.len()..];
        if rest.is_empty() {
            return Ok(Self { anchor, offset: 0 });
        }

        let Some(digits) = rest.strip_prefix(operator) else {
            return Err(ComponentError::WrongOperator {
                keyword,
                expected: operator,
            });
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ComponentError::InvalidOffset { keyword, operator });
        }
        let offset = digits
            .parse()
            .map_err(|_| ComponentError::InvalidOffset { keyword, operator })?;

        Ok(Self { anchor, offset })
    }

    /// Index this position refers to in a list of `len` items, if any
    pub fn index(&self, len: usize) -> Option<usize> {
        if self.offset >= len {
            return None;
        }
        match self.anchor {
            Anchor::First => Some(self.offset),
            Anchor::Last => Some(len - 1 - self.offset),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.anchor, self.offset) {
            (Anchor::First, 0) => f.write_str(FIRST),
            (Anchor::Last, 0) => f.write_str(LAST),
            (Anchor::First, n) => write!(f, "{}+{}", FIRST, n),
            (Anchor::Last, n) => write!(f, "{}-{}", LAST, n),
        }
    }
}

/// Pattern for one component, classified once when parsed
#[derive(Debug, Clone)]
pub enum ComponentPattern {
    /// `*`
    Any,
    /// `FIRST[+N]` / `LAST[-N]` over the unique values of the current group
    Position(Position),
    /// Text containing `(` or `[`
    Regex(Regex),
    /// Exact text of the component
    Literal(String),
}

impl ComponentPattern {
    pub fn parse(value: &str) -> Result<Self, ComponentError> {
        if value.is_empty() {
            return Err(ComponentError::Empty);
        }
        if value == "*" {
            return Ok(Self::Any);
        }

        let regex_like = value.contains('(') || value.contains('[');
        if Position::has_keyword(value) && !regex_like {
            return Position::parse(value).map(Self::Position);
        }
        if regex_like {
            return Regex::new(value)
                .map(Self::Regex)
                .map_err(|e| ComponentError::InvalidRegex(e.to_string()));
        }

        Ok(Self::Literal(value.to_string()))
    }

    pub fn is_position(&self) -> bool {
        matches!(self, Self::Position(_))
    }

    /// Narrow `versions` to those whose `component` matches.
    ///
    /// Survivors keep their relative order. A position outside the unique
    /// values of `versions` matches nothing.
    pub fn apply(&self, versions: Versions, component: Component) -> Versions {
        match self {
            Self::Any => versions,
            Self::Position(position) => match component {
                Component::Major => {
                    let values = versions.unique_majors();
                    keep_position(versions, &values, *position, |v| v.major())
                }
                Component::Minor => {
                    let values = versions.unique_minors();
                    keep_position(versions, &values, *position, |v| v.minor())
                }
                Component::Patch => {
                    let values = versions.unique_patches();
                    keep_position(versions, &values, *position, |v| v.patch().clone())
                }
            },
            Self::Regex(regex) => versions.retain(|v| regex.is_match(&component.render(v))),
            Self::Literal(literal) => versions.retain(|v| component.render(v) == *literal),
        }
    }
}

fn keep_position<K: PartialEq>(
    versions: Versions,
    values: &[K],
    position: Position,
    key: impl Fn(&Version) -> K,
) -> Versions {
    match position.index(values.len()) {
        Some(index) => {
            let target = &values[index];
            versions.retain(|v| key(v) == *target)
        }
        None => Versions::default(),
    }
}

impl fmt::Display for ComponentPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Position(position) => fmt::Display::fmt(position, f),
            Self::Regex(regex) => f.write_str(regex.as_str()),
            Self::Literal(literal) => f.write_str(literal),
        }
    }
}
