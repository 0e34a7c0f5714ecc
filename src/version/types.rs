//! Version model shared by the sources and the filter engine
//!
//! A version is `major.minor[.patch]` where the patch may carry a suffix
//! (`3-dev`, `1-1-ubi8`). Ordering and equality ignore the display prefix
//! and the raw text of each component.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::version::error::VersionError;

static PATCH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]+)([a-z0-9._-]*)$").expect("patch regex must compile")
});

/// Third version component, possibly with a non-numeric suffix
#[derive(Debug, Clone, Default)]
pub struct Patch {
    numeric: Option<u64>,
    suffix: String,
    raw: String,
}

impl Patch {
    /// Patch of a `major.minor` version that never had a third component
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a patch from its parts; the rendered text is derived from them.
    pub fn new(numeric: u64, suffix: impl Into<String>) -> Self {
        Self {
            numeric: Some(numeric),
            suffix: suffix.into(),
            raw: String::new(),
        }
    }

    /// Parse the text of a third component.
    ///
    /// Text without leading digits is kept whole as the suffix (`dev`).
    /// Text with leading digits must continue with `[a-z0-9._-]` only.
    pub fn parse(value: &str) -> Result<Self, VersionError> {
        if value.is_empty() {
            return Err(VersionError::InvalidPatch(value.to_string()));
        }

        if !value.starts_with(|c: char| c.is_ascii_digit()) {
            return Ok(Self {
                numeric: None,
                suffix: value.to_string(),
                raw: value.to_string(),
            });
        }

        let captures = PATCH_REGEX
            .captures(value)
            .ok_or_else(|| VersionError::InvalidPatch(value.to_string()))?;
        let numeric = captures[1]
            .parse::<u64>()
            .map_err(|_| VersionError::InvalidPatch(value.to_string()))?;

        Ok(Self {
            numeric: Some(numeric),
            suffix: captures[2].to_string(),
            raw: value.to_string(),
        })
    }

    pub fn numeric(&self) -> Option<u64> {
        self.numeric
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// True for the placeholder patch of a two-part version
    pub fn is_empty(&self) -> bool {
        self.numeric.is_none() && self.suffix.is_empty()
    }

    pub fn is_dev(&self) -> bool {
        self.suffix.contains("dev")
    }

    pub fn is_pre(&self) -> bool {
        self.suffix.contains("pre")
    }

    pub fn is_rc(&self) -> bool {
        self.suffix.contains("rc")
    }

    /// A patch without suffix is a production release
    pub fn is_prod(&self) -> bool {
        self.suffix.is_empty()
    }
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.raw.is_empty() {
            return f.write_str(&self.raw);
        }
        match self.numeric {
            Some(numeric) => write!(f, "{}{}", numeric, self.suffix),
            None => f.write_str(&self.suffix),
        }
    }
}

impl PartialEq for Patch {
    fn eq(&self, other: &Self) -> bool {
        self.numeric == other.numeric && self.suffix == other.suffix
    }
}

impl Eq for Patch {}

impl Hash for Patch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.numeric.hash(state);
        self.suffix.hash(state);
    }
}

impl PartialOrd for Patch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Patch {
    /// A missing patch sorts first, then the numeric value. On a tie the
    /// production patch sorts last, so `3-rc1 < 3`. Two suffixed patches fall
    /// back to the suffix text to keep the ordering total.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .is_empty()
            .cmp(&self.is_empty())
            .then_with(|| self.numeric.cmp(&other.numeric))
            .then_with(|| self.is_prod().cmp(&other.is_prod()))
            .then_with(|| self.suffix.cmp(&other.suffix))
    }
}

/// A parsed `major.minor[.patch]` version with an optional display prefix
#[derive(Debug, Clone)]
pub struct Version {
    major: u64,
    major_raw: String,
    minor: u64,
    minor_raw: String,
    patch: Patch,
    prefix: String,
}

impl Version {
    pub fn new(major: u64, minor: u64, patch: Patch) -> Self {
        Self {
            major,
            major_raw: major.to_string(),
            minor,
            minor_raw: minor.to_string(),
            patch,
            prefix: String::new(),
        }
    }

    /// Parse `major.minor` or `major.minor.patch`.
    ///
    /// Only the first two dots split; anything after the second dot belongs
    /// to the patch (`1.2.3.4` has patch `3.4`).
    pub fn parse(value: &str) -> Result<Self, VersionError> {
        let mut parts = value.splitn(3, '.');
        let (Some(major_raw), Some(minor_raw)) = (parts.next(), parts.next()) else {
            return Err(VersionError::InvalidFormat(value.to_string()));
        };

        let major = parse_number(major_raw)
            .ok_or_else(|| VersionError::InvalidMajor(value.to_string()))?;
        let minor = parse_number(minor_raw)
            .ok_or_else(|| VersionError::InvalidMinor(value.to_string()))?;
        let patch = match parts.next() {
            Some(patch) => Patch::parse(patch)?,
            None => Patch::empty(),
        };

        Ok(Self {
            major,
            major_raw: major_raw.to_string(),
            minor,
            minor_raw: minor_raw.to_string(),
            patch,
            prefix: String::new(),
        })
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> &Patch {
        &self.patch
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Major component exactly as it appeared in the input
    pub fn major_str(&self) -> &str {
        &self.major_raw
    }

    pub fn minor_str(&self) -> &str {
        &self.minor_raw
    }

    /// Patch component as displayed, including its suffix
    pub fn patch_str(&self) -> String {
        self.patch.to_string()
    }

    /// Rendering without the prefix
    pub fn no_prefix_string(&self) -> String {
        if self.patch.is_empty() {
            format!("{}.{}", self.major_raw, self.minor_raw)
        } else {
            format!("{}.{}.{}", self.major_raw, self.minor_raw, self.patch)
        }
    }
}

fn parse_number(value: &str) -> Option<u64> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.no_prefix_string())
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.major == other.major && self.minor == other.minor && self.patch == other.patch
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.major.hash(state);
        self.minor.hash(state);
        self.patch.hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
    }
}

/// Ordered list of versions, the unit every filter consumes and produces
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Versions(Vec<Version>);

impl Versions {
    pub fn new(versions: Vec<Version>) -> Self {
        Self(versions)
    }

    pub fn into_inner(self) -> Vec<Version> {
        self.0
    }

    /// Sort ascending, or descending when `reverse` is set
    pub fn sorted(mut self, reverse: bool) -> Self {
        if reverse {
            self.0.sort_by(|a, b| b.cmp(a));
        } else {
            self.0.sort();
        }
        self
    }

    /// Keep the versions matching `keep`, preserving their relative order
    pub fn retain(mut self, keep: impl FnMut(&Version) -> bool) -> Self {
        self.0.retain(keep);
        self
    }

    pub fn unique_majors(&self) -> Vec<u64> {
        self.unique_by(Version::major)
    }

    pub fn unique_minors(&self) -> Vec<u64> {
        self.unique_by(Version::minor)
    }

    pub fn unique_patches(&self) -> Vec<Patch> {
        self.unique_by(|v| v.patch().clone())
    }

    /// Distinct values of `key`, in ascending order of the value itself
    fn unique_by<K: Ord>(&self, key: impl Fn(&Version) -> K) -> Vec<K> {
        let mut values: Vec<K> = self.0.iter().map(key).collect();
        values.sort();
        values.dedup();
        values
    }

    /// Partition into contiguous runs of equal `key`, run `filter` on each
    /// run and concatenate the results in run order.
    ///
    /// The list must be sorted ascending: equal keys are only merged when
    /// they are adjacent.
    pub fn group_and_filter<K: PartialEq>(
        self,
        key: impl Fn(&Version) -> K,
        mut filter: impl FnMut(Versions) -> Versions,
    ) -> Versions {
        debug_assert!(self.0.is_sorted(), "group_and_filter requires ascending input");

        let mut out = Vec::with_capacity(self.0.len());
        let mut group: Vec<Version> = Vec::new();
        let mut current: Option<K> = None;

        for version in self.0 {
            let next = key(&version);
            if current.as_ref().is_some_and(|k| *k != next) {
                out.extend(filter(Versions(std::mem::take(&mut group))).0);
            }
            current = Some(next);
            group.push(version);
        }
        if !group.is_empty() {
            out.extend(filter(Versions(group)).0);
        }

        Versions(out)
    }

    /// Render every version, with or without its prefix
    pub fn to_strings(&self, with_prefix: bool) -> Vec<String> {
        self.0
            .iter()
            .map(|v| {
                if with_prefix {
                    v.to_string()
                } else {
                    v.no_prefix_string()
                }
            })
            .collect()
    }
}

impl Deref for Versions {
    type Target = [Version];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Version>> for Versions {
    fn from(versions: Vec<Version>) -> Self {
        Self(versions)
    }
}

impl FromIterator<Version> for Versions {
    fn from_iter<I: IntoIterator<Item = Version>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Versions {
    type Item = Version;
    type IntoIter = std::vec::IntoIter<Version>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Versions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.to_strings(true).join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn versions(values: &[&str]) -> Versions {
        values.iter().map(|v| Version::parse(v).unwrap()).collect()
    }

    #[rstest]
    #[case("1.2", 1, 2, None, "")]
    #[case("1.2.3", 1, 2, Some(3), "")]
    #[case("1.2.3-dev", 1, 2, Some(3), "-dev")]
    #[case("7.9.0-1-ubi8", 7, 9, Some(0), "-1-ubi8")]
    #[case("1.2.3.4", 1, 2, Some(3), ".4")]
    #[case("1.2.dev", 1, 2, None, "dev")]
    fn parse_extracts_components(
        #[case] input: &str,
        #[case] major: u64,
        #[case] minor: u64,
        #[case] numeric: Option<u64>,
        #[case] suffix: &str,
    ) {
        let version = Version::parse(input).unwrap();

        assert_eq!(version.major(), major);
        assert_eq!(version.minor(), minor);
        assert_eq!(version.patch().numeric(), numeric);
        assert_eq!(version.patch().suffix(), suffix);
        assert_eq!(version.to_string(), input);
    }

    #[rstest]
    #[case("1", VersionError::InvalidFormat("1".to_string()))]
    #[case("", VersionError::InvalidFormat("".to_string()))]
    #[case("a.2.3", VersionError::InvalidMajor("a.2.3".to_string()))]
    #[case("+1.2.3", VersionError::InvalidMajor("+1.2.3".to_string()))]
    #[case("1.b.3", VersionError::InvalidMinor("1.b.3".to_string()))]
    #[case("1.2.3+build", VersionError::InvalidPatch("3+build".to_string()))]
    #[case("1.2.3-DEV", VersionError::InvalidPatch("3-DEV".to_string()))]
    #[case("1.2.", VersionError::InvalidPatch("".to_string()))]
    fn parse_rejects_malformed_input(#[case] input: &str, #[case] expected: VersionError) {
        assert_eq!(Version::parse(input).unwrap_err(), expected);
    }

    #[test]
    fn patch_classification_checks_suffix() {
        let dev = Patch::parse("3-dev").unwrap();
        let rc = Patch::parse("3-rc1").unwrap();
        let pre = Patch::parse("3-pre2").unwrap();
        let prod = Patch::parse("3").unwrap();

        assert!(dev.is_dev() && !dev.is_prod());
        assert!(rc.is_rc() && !rc.is_dev());
        assert!(pre.is_pre());
        assert!(prod.is_prod() && !prod.is_rc());
    }

    #[test]
    fn production_patch_sorts_after_suffixed_patch() {
        let rc = Patch::parse("3-rc1").unwrap();
        let prod = Patch::parse("3").unwrap();
        let next = Patch::parse("4-rc1").unwrap();

        assert!(rc < prod);
        assert!(prod < next);
    }

    #[rstest]
    #[case("1.2", "1.2.dev")]
    #[case("1.2", "1.2.0")]
    #[case("1.2.dev", "1.2.0")]
    #[case("1.2.dev", "1.2.pre")]
    #[case("1.2.0-rc1", "1.2.0")]
    fn missing_patch_sorts_before_any_patch(#[case] lower: &str, #[case] higher: &str) {
        let lower = Version::parse(lower).unwrap();
        let higher = Version::parse(higher).unwrap();

        assert!(lower < higher);
        assert!(higher > lower);
    }

    #[test]
    fn equality_ignores_prefix_and_raw_text() {
        let a = Version::parse("01.2.3").unwrap().with_prefix("v");
        let b = Version::new(1, 2, Patch::new(3, ""));

        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);
        assert_eq!(a.to_string(), "v01.2.3");
        assert_eq!(b.to_string(), "1.2.3");
    }

    #[test]
    fn sorted_orders_by_major_minor_patch() {
        let input = versions(&["2.2.1", "1.10.0", "2.2", "1.2.0", "2.2.1-rc1", "2.2.0"]);

        assert_eq!(
            input.clone().sorted(false).to_strings(true),
            vec!["1.2.0", "1.10.0", "2.2", "2.2.0", "2.2.1-rc1", "2.2.1"]
        );
        assert_eq!(
            input.sorted(true).to_strings(true),
            vec!["2.2.1", "2.2.1-rc1", "2.2.0", "2.2", "1.10.0", "1.2.0"]
        );
    }

    #[test]
    fn unique_values_follow_numeric_order() {
        let input = versions(&["10.1.0", "9.1.0", "9.2.10", "9.2.9", "9.2.9-rc1"]);

        assert_eq!(input.unique_majors(), vec![9, 10]);
        assert_eq!(input.unique_minors(), vec![1, 2]);
        let patches: Vec<String> = input.unique_patches().iter().map(ToString::to_string).collect();
        assert_eq!(patches, vec!["0", "9-rc1", "9", "10"]);
    }

    #[test]
    fn group_and_filter_applies_filter_per_contiguous_run() {
        let input = versions(&["1.1.0", "1.2.0", "2.1.0", "2.2.0", "2.3.0"]);

        let result = input.group_and_filter(Version::major, |group| {
            let last = group.last().cloned();
            last.into_iter().collect()
        });

        assert_eq!(result.to_strings(true), vec!["1.2.0", "2.3.0"]);
    }

    #[test]
    fn group_and_filter_on_empty_list_returns_empty() {
        let result = Versions::default().group_and_filter(Version::major, |group| group);

        assert!(result.is_empty());
    }
}
