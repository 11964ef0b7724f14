//! Parsing of `git describe --tags --long` output

use crate::domain::quad::Quad;
use crate::domain::version::SemanticVersion;
use crate::error::{RtagError, Result};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

// The tag group is greedy: a tag that itself ends in "-<n>-g<hex>" is split at
// the rightmost position that still matches.
static DESCRIBE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.*)-(\d+)-g([0-9a-f]+)$").expect("describe pattern is a valid regex")
});

/// Result of parsing `git describe --long`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    /// Nearest tag, exactly as named in the repository
    pub tag: String,
    /// Number of commits after the tag
    pub additional_commits: u64,
    /// Abbreviated commit hash
    pub short_hash: String,
}

impl Description {
    /// Parse `<tag>-<commits>-g<hash>`, ignoring surrounding whitespace
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let captures = DESCRIBE_PATTERN
            .captures(trimmed)
            .ok_or_else(|| RtagError::describe_parse(text))?;

        // \d+ guarantees the count is non-negative, so only overflow can fail here
        let additional_commits = captures[2]
            .parse::<i64>()
            .map_err(|source| RtagError::CommitCountOverflow {
                raw: text.to_string(),
                source,
            })?
            .unsigned_abs();

        Ok(Description {
            tag: captures[1].to_string(),
            additional_commits,
            short_hash: captures[3].to_string(),
        })
    }
}

impl FromStr for Description {
    type Err = RtagError;

    fn from_str(s: &str) -> Result<Self> {
        Description::parse(s)
    }
}

/// Version information derived from a describe result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    /// Version as parsed from the tag
    pub semantic_tag: SemanticVersion,
    /// Same version with the additional commits recorded as build metadata
    pub semantic: SemanticVersion,
    pub additional_commits: u64,
}

impl VersionInfo {
    /// Version quad of the tagged version plus the commit distance
    pub fn quad(&self) -> Result<Quad> {
        Quad::from_version(&self.semantic_tag, self.additional_commits)
    }

    /// Pre-release suffix of the tag, e.g. "rc.1"
    pub fn pre(&self) -> String {
        self.semantic_tag.pre_string()
    }

    /// Build suffix of the tag
    pub fn build(&self) -> String {
        self.semantic_tag.build_string()
    }
}

/// Extract version info from a describe result
///
/// Fails with the tag's parse error if the tag is not a semantic version;
/// callers are expected to fall back to older tags in that case.
pub fn parse_version(description: &Description) -> Result<VersionInfo> {
    let semantic_tag = SemanticVersion::parse_tolerant(&description.tag)?;
    let semantic = semantic_tag.with_additional_commits(description.additional_commits);
    Ok(VersionInfo {
        semantic_tag,
        semantic,
        additional_commits: description.additional_commits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_parse() {
        let d = Description::parse("v1.2.3-4-gabc1234").unwrap();
        assert_eq!(d.tag, "v1.2.3");
        assert_eq!(d.additional_commits, 4);
        assert_eq!(d.short_hash, "abc1234");
    }

    #[test]
    fn test_describe_parse_trims_whitespace() {
        let d = Description::parse("  v0.1.0-0-g0123456789abcdef\n").unwrap();
        assert_eq!(d.tag, "v0.1.0");
        assert_eq!(d.additional_commits, 0);
        assert_eq!(d.short_hash, "0123456789abcdef");
    }

    #[test]
    fn test_describe_parse_dashed_tag() {
        let d = Description::parse("release-1.0.0-rc.1-12-gdeadbee").unwrap();
        assert_eq!(d.tag, "release-1.0.0-rc.1");
        assert_eq!(d.additional_commits, 12);
    }

    #[test]
    fn test_describe_parse_empty_tag() {
        let d = Description::parse("-3-gabc").unwrap();
        assert_eq!(d.tag, "");
        assert_eq!(d.additional_commits, 3);
    }

    #[test]
    fn test_describe_parse_takes_rightmost_split() {
        let d = Description::parse("v1-2-gaaa-5-gbbb").unwrap();
        assert_eq!(d.tag, "v1-2-gaaa");
        assert_eq!(d.additional_commits, 5);
        assert_eq!(d.short_hash, "bbb");
    }

    #[test]
    fn test_describe_parse_round_trip() {
        for (tag, n, hash) in [("v1.0.0", 0, "a"), ("x-y", 17, "0f0f0f0"), ("", 1, "9")] {
            let text = format!("{}-{}-g{}", tag, n, hash);
            let d = Description::parse(&text).unwrap();
            assert_eq!(
                d,
                Description {
                    tag: tag.to_string(),
                    additional_commits: n,
                    short_hash: hash.to_string(),
                }
            );
        }
    }

    #[test]
    fn test_describe_parse_invalid() {
        for text in [
            "",
            "v1.2.3",
            "v1.2.3-4",
            "v1.2.3-4-abc",
            "v1.2.3-4-gABC",
            "v1.2.3-4-gxyz",
            "v1.2.3-x-gabc",
        ] {
            let err = Description::parse(text).unwrap_err();
            assert!(
                matches!(&err, RtagError::DescribeParse { raw } if raw == text),
                "{text}: {err}"
            );
        }
    }

    #[test]
    fn test_describe_parse_commit_count_overflow() {
        let err = Description::parse("v1.0.0-9223372036854775808-gabc").unwrap_err();
        assert!(matches!(err, RtagError::CommitCountOverflow { .. }));

        let d = Description::parse("v1.0.0-9223372036854775807-gabc").unwrap();
        assert_eq!(d.additional_commits, i64::MAX as u64);
    }

    #[test]
    fn test_parse_version_with_commits() {
        let d = Description::parse("v1.2.3-rc.1-7-gabcdef0").unwrap();
        let vi = parse_version(&d).unwrap();
        assert_eq!(vi.semantic_tag.to_string(), "1.2.3-rc.1");
        assert_eq!(vi.semantic.to_string(), "1.2.3-rc.1+7");
        assert_eq!(vi.additional_commits, 7);
        assert_eq!(vi.pre(), "rc.1");
        assert_eq!(vi.build(), "");
        assert_eq!(vi.quad().unwrap().to_string(), "1.2.3.30107");
    }

    #[test]
    fn test_parse_version_without_commits() {
        let d = Description::parse("2.0.0+linux-0-g1234567").unwrap();
        let vi = parse_version(&d).unwrap();
        assert_eq!(vi.semantic, vi.semantic_tag);
        assert_eq!(vi.build(), "linux");
    }

    #[test]
    fn test_parse_version_propagates_tag_error() {
        let d = Description::parse("nightly-3-gabc").unwrap();
        let err = parse_version(&d).unwrap_err();
        assert!(matches!(err, RtagError::VersionParse { raw } if raw == "nightly"));
    }

    #[test]
    fn test_parse_version_quad_error_is_deferred() {
        let d = Description::parse("v1.0.0-gamma-2-gabc").unwrap();
        let vi = parse_version(&d).unwrap();
        assert!(matches!(vi.quad(), Err(RtagError::UnsupportedPreRelease)));
    }
}
