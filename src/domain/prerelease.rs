//! Pre-release kinds and the release-type choice offered after an increment
//!
//! According to semver.org: https://semver.org/#spec-item-9

use crate::domain::version::{Identifier, SemanticVersion};
use crate::error::{RtagError, Result};
use std::fmt;
use std::str::FromStr;

/// Kind of a pre-release, taken from its first identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreReleaseKind {
    /// Alpha pre-release
    Alpha,
    /// Beta pre-release
    Beta,
    /// Release candidate
    ReleaseCandidate,
    /// Any other identifier; it can only be bumped
    Other(Identifier),
}

impl PreReleaseKind {
    /// Classify the leading pre-release identifier
    ///
    /// Only the exact spellings "alpha", "beta" and "rc" have an upgrade path.
    pub fn of(identifier: &Identifier) -> Self {
        match identifier.as_text() {
            Some("alpha") => PreReleaseKind::Alpha,
            Some("beta") => PreReleaseKind::Beta,
            Some("rc") => PreReleaseKind::ReleaseCandidate,
            _ => PreReleaseKind::Other(identifier.clone()),
        }
    }

    /// Identifier that spells this kind inside a version
    pub fn identifier(&self) -> Identifier {
        match self {
            PreReleaseKind::Alpha => Identifier::Alphanumeric("alpha".to_string()),
            PreReleaseKind::Beta => Identifier::Alphanumeric("beta".to_string()),
            PreReleaseKind::ReleaseCandidate => Identifier::Alphanumeric("rc".to_string()),
            PreReleaseKind::Other(id) => id.clone(),
        }
    }
}

impl fmt::Display for PreReleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

/// Release type picked after a patch/minor/major increment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreReleaseChoice {
    Alpha,
    Beta,
    ReleaseCandidate,
    Release,
}

impl PreReleaseChoice {
    /// Every accepted choice, in the order it is offered
    pub const ALL: [PreReleaseChoice; 4] = [
        PreReleaseChoice::Alpha,
        PreReleaseChoice::Beta,
        PreReleaseChoice::ReleaseCandidate,
        PreReleaseChoice::Release,
    ];

    /// Keyword the user types to select this choice
    pub fn keyword(&self) -> &'static str {
        match self {
            PreReleaseChoice::Alpha => "alpha",
            PreReleaseChoice::Beta => "beta",
            PreReleaseChoice::ReleaseCandidate => "rc",
            PreReleaseChoice::Release => "release",
        }
    }

    /// Finalize a candidate version with this release type
    ///
    /// Pre-release choices start at iteration 1; `Release` clears `pre`.
    pub fn apply(&self, candidate: &SemanticVersion) -> SemanticVersion {
        let kind = match self {
            PreReleaseChoice::Alpha => PreReleaseKind::Alpha,
            PreReleaseChoice::Beta => PreReleaseKind::Beta,
            PreReleaseChoice::ReleaseCandidate => PreReleaseKind::ReleaseCandidate,
            PreReleaseChoice::Release => return candidate.without_pre_release(),
        };
        candidate.with_pre_release(kind.identifier(), 1)
    }
}

impl FromStr for PreReleaseChoice {
    type Err = RtagError;

    fn from_str(s: &str) -> Result<Self> {
        PreReleaseChoice::ALL
            .into_iter()
            .find(|choice| choice.keyword() == s)
            .ok_or_else(|| {
                RtagError::tag(format!(
                    "invalid release type '{}', expected one of alpha/beta/rc/release",
                    s
                ))
            })
    }
}

impl fmt::Display for PreReleaseChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_of_known_identifiers() {
        assert_eq!(PreReleaseKind::of(&"alpha".into()), PreReleaseKind::Alpha);
        assert_eq!(PreReleaseKind::of(&"beta".into()), PreReleaseKind::Beta);
        assert_eq!(
            PreReleaseKind::of(&"rc".into()),
            PreReleaseKind::ReleaseCandidate
        );
    }

    #[test]
    fn test_kind_aliases_are_not_upgradable() {
        assert_eq!(
            PreReleaseKind::of(&"a".into()),
            PreReleaseKind::Other(Identifier::Alphanumeric("a".to_string()))
        );
        assert_eq!(
            PreReleaseKind::of(&"RC".into()),
            PreReleaseKind::Other(Identifier::Alphanumeric("RC".to_string()))
        );
    }

    #[test]
    fn test_kind_numeric_identifier() {
        let kind = PreReleaseKind::of(&Identifier::Numeric(3));
        assert_eq!(kind, PreReleaseKind::Other(Identifier::Numeric(3)));
        assert_eq!(kind.to_string(), "3");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(PreReleaseKind::Alpha.to_string(), "alpha");
        assert_eq!(PreReleaseKind::Beta.to_string(), "beta");
        assert_eq!(PreReleaseKind::ReleaseCandidate.to_string(), "rc");
    }

    #[test]
    fn test_choice_parse_accepts_only_keywords() {
        assert_eq!("alpha".parse::<PreReleaseChoice>().unwrap(), PreReleaseChoice::Alpha);
        assert_eq!("beta".parse::<PreReleaseChoice>().unwrap(), PreReleaseChoice::Beta);
        assert_eq!(
            "rc".parse::<PreReleaseChoice>().unwrap(),
            PreReleaseChoice::ReleaseCandidate
        );
        assert_eq!(
            "release".parse::<PreReleaseChoice>().unwrap(),
            PreReleaseChoice::Release
        );
        for invalid in ["a", "Alpha", "gamma", "", " rc"] {
            assert!(invalid.parse::<PreReleaseChoice>().is_err(), "{invalid}");
        }
    }

    #[test]
    fn test_choice_apply() {
        let candidate = SemanticVersion::parse("1.3.0").unwrap();
        assert_eq!(
            PreReleaseChoice::Alpha.apply(&candidate).to_string(),
            "1.3.0-alpha.1"
        );
        assert_eq!(
            PreReleaseChoice::Beta.apply(&candidate).to_string(),
            "1.3.0-beta.1"
        );
        assert_eq!(
            PreReleaseChoice::ReleaseCandidate.apply(&candidate).to_string(),
            "1.3.0-rc.1"
        );
        assert_eq!(PreReleaseChoice::Release.apply(&candidate), candidate);
    }
}
