//! Semantic version representation
//!
//! Follows the canonical grammar `major.minor.patch[-pre.pre...][+build.build...]`
//! described at https://semver.org. Pre-release identifiers keep their
//! numeric/alphanumeric distinction because the next-version logic and the
//! quad encoding both depend on it.

use crate::error::{RtagError, Result};
use std::fmt;
use std::str::FromStr;

/// Largest version component that survives the trip into Win32 version resources
pub const MAX_COMPONENT: u64 = u16::MAX as u64;

/// A single pre-release identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    /// Purely numeric identifier, e.g. the `1` in `alpha.1`
    Numeric(u64),
    /// Identifier containing at least one non-digit, e.g. `alpha`
    Alphanumeric(String),
}

impl Identifier {
    /// Classify an already validated identifier
    pub fn parse(s: &str) -> Self {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = s.parse::<u64>() {
                return Identifier::Numeric(n);
            }
        }
        Identifier::Alphanumeric(s.to_string())
    }

    /// Numeric value, if this is a numeric identifier
    pub fn as_number(&self) -> Option<u64> {
        match self {
            Identifier::Numeric(n) => Some(*n),
            Identifier::Alphanumeric(_) => None,
        }
    }

    /// Textual value, if this is an alphanumeric identifier
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Identifier::Numeric(_) => None,
            Identifier::Alphanumeric(s) => Some(s),
        }
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Identifier::parse(s)
    }
}

impl From<u64> for Identifier {
    fn from(n: u64) -> Self {
        Identifier::Numeric(n)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::Alphanumeric(s) => write!(f, "{}", s),
        }
    }
}

/// Semantic version with pre-release and build identifiers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Vec<Identifier>,
    pub build: Vec<String>,
}

impl SemanticVersion {
    /// Create a release version without pre-release or build identifiers
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
            pre: Vec::new(),
            build: Vec::new(),
        }
    }

    /// Parse the canonical form, e.g. "1.2.3-rc.1+build.5"
    pub fn parse(text: &str) -> Result<Self> {
        let parsed =
            semver::Version::parse(text).map_err(|_| RtagError::version_parse(text))?;

        let mut pre = Vec::new();
        if !parsed.pre.is_empty() {
            for part in parsed.pre.as_str().split('.') {
                let identifier = Identifier::parse(part);
                // numeric identifiers must fit the numeric representation
                if identifier
                    .as_text()
                    .is_some_and(|t| t.bytes().all(|b| b.is_ascii_digit()))
                {
                    return Err(RtagError::version_parse(text));
                }
                pre.push(identifier);
            }
        }
        let build = if parsed.build.is_empty() {
            Vec::new()
        } else {
            parsed
                .build
                .as_str()
                .split('.')
                .map(str::to_string)
                .collect()
        };

        Ok(SemanticVersion {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            pre,
            build,
        })
    }

    /// Parse a tag name, accepting one leading prefix character such as 'v'
    ///
    /// The error carries the text exactly as it was passed in.
    pub fn parse_tolerant(text: &str) -> Result<Self> {
        let stripped = match text.chars().next() {
            Some(c) if !c.is_ascii_digit() && c != '.' => &text[c.len_utf8()..],
            _ => text,
        };
        SemanticVersion::parse(stripped).map_err(|_| RtagError::version_parse(text))
    }

    /// True when there are no pre-release identifiers
    pub fn is_release(&self) -> bool {
        self.pre.is_empty()
    }

    /// Record the distance from the tag as the leading build identifier
    pub fn with_additional_commits(&self, additional_commits: u64) -> Self {
        let mut ret = self.clone();
        if additional_commits > 0 {
            ret.build.insert(0, additional_commits.to_string());
        }
        ret
    }

    pub fn increment_patch(&self) -> Result<Self> {
        Ok(SemanticVersion::new(
            self.major,
            self.minor,
            incremented(self.patch)?,
        ))
    }

    pub fn increment_minor(&self) -> Result<Self> {
        Ok(SemanticVersion::new(self.major, incremented(self.minor)?, 0))
    }

    pub fn increment_major(&self) -> Result<Self> {
        Ok(SemanticVersion::new(incremented(self.major)?, 0, 0))
    }

    /// Copy with `pre` replaced by `[kind, iteration]`
    pub fn with_pre_release(&self, kind: Identifier, iteration: u64) -> Self {
        SemanticVersion {
            pre: vec![kind, Identifier::Numeric(iteration)],
            ..self.clone()
        }
    }

    /// Copy with the pre-release identifiers dropped
    pub fn without_pre_release(&self) -> Self {
        SemanticVersion {
            pre: Vec::new(),
            ..self.clone()
        }
    }

    /// Copy with the build identifiers dropped
    pub fn without_build(&self) -> Self {
        SemanticVersion {
            build: Vec::new(),
            ..self.clone()
        }
    }

    /// Pre-release identifiers joined with '.', empty for releases
    pub fn pre_string(&self) -> String {
        join(&self.pre)
    }

    /// Build identifiers joined with '.', empty when there are none
    pub fn build_string(&self) -> String {
        join(&self.build)
    }
}

fn incremented(component: u64) -> Result<u64> {
    match component.checked_add(1) {
        Some(n) if n <= MAX_COMPONENT => Ok(n),
        _ => Err(RtagError::VersionNumberTooLarge),
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

impl FromStr for SemanticVersion {
    type Err = RtagError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if !self.pre.is_empty() {
            write!(f, "-{}", self.pre_string())?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build_string())?;
        }
        Ok(())
    }
}
