//! Loose version ordering and the documentation version history.
//!
//! Package versions reported by pip are not always strict semver
//! (`1.5.4`, `0.6.24`, `3.1.0rc1`, `2.0.post1`), so [`Version`] compares them
//! the forgiving way: the string is split into runs of digits and runs of
//! letters, everything else is a separator.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Number of previous releases offered by the version picker.
pub const PICKER_LEN: usize = 3;

/// Regex splitting a version string into numeric and alphabetic components.
static COMPONENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+|[A-Za-z]+").expect("COMPONENT_REGEX must compile"));

/// A single component of a [`Version`].
///
/// Numeric components sort before alphabetic ones at the same position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Component {
    Number(u64),
    Text(String),
}

/// A loosely-parsed version string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawVersion", into = "String")]
pub struct Version {
    raw: String,
    components: Vec<Component>,
}

/// Error returned when a string contains no version components.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid version: {0:?}")]
pub struct VersionParseError(pub String);

impl Version {
    /// Parse a version string.
    pub fn parse(input: &str) -> Result<Self, VersionParseError> {
        let raw = input.trim();
        let components: Vec<Component> = COMPONENT_REGEX
            .find_iter(raw)
            .map(|m| {
                let s = m.as_str();
                // Digit runs too long for u64 still order sensibly as text.
                s.parse()
                    .map(Component::Number)
                    .unwrap_or_else(|_| Component::Text(s.to_string()))
            })
            .collect();

        if components.is_empty() {
            return Err(VersionParseError(input.to_string()));
        }

        Ok(Self {
            raw: raw.to_string(),
            components,
        })
    }

    /// The version as originally written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Version as written in YAML. Unquoted dotted versions arrive as floats
/// with trailing zeros lost, so only strings and integers are accepted.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawVersion {
    Text(String),
    Integer(u64),
    Float(f64),
}

impl TryFrom<RawVersion> for Version {
    type Error = VersionParseError;

    fn try_from(value: RawVersion) -> Result<Self, Self::Error> {
        match value {
            RawVersion::Text(s) => Self::parse(&s),
            RawVersion::Integer(n) => Self::parse(&n.to_string()),
            // 3.10 has already become 3.1 by now.
            RawVersion::Float(f) => Err(VersionParseError(format!(
                "{}; quote dotted versions in YAML",
                f
            ))),
        }
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.raw
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.components == other.components
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lexicographic: a strict prefix is the smaller version.
        self.components.cmp(&other.components)
    }
}

/// Ordered list of published documentation versions, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionHistory {
    versions: Vec<String>,
}

impl VersionHistory {
    /// Create a history from versions in release order.
    pub fn new<I, S>(versions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            versions: versions.into_iter().map(Into::into).collect(),
        }
    }

    /// All known versions in release order.
    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    /// Versions offered by the picker while building `current`.
    ///
    /// The last [`PICKER_LEN`] entries of the history, most recent first,
    /// leaving out `current`. Older releases never fill the gap.
    pub fn picker(&self, current: &str) -> Vec<&str> {
        let start = self.versions.len().saturating_sub(PICKER_LEN);
        self.versions[start..]
            .iter()
            .rev()
            .map(String::as_str)
            .filter(|v| *v != current)
            .collect()
    }

    /// The picker entries joined the way Sphinx expects them in `-Aversions`.
    pub fn picker_display(&self, current: &str) -> String {
        self.picker(current).join(",")
    }
}
