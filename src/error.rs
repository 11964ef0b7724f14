use std::num::ParseIntError;

use thiserror::Error;

/// Unified error type for rtag operations
#[derive(Error, Debug)]
pub enum RtagError {
    #[error("failed to parse `git describe` result: '{raw}'")]
    DescribeParse { raw: String },

    #[error("commit count in `git describe` result is out of range: '{raw}'")]
    CommitCountOverflow {
        raw: String,
        #[source]
        source: ParseIntError,
    },

    #[error("'{raw}' does not conform to semantic version syntax")]
    VersionParse { raw: String },

    #[error("version number is too large")]
    VersionNumberTooLarge,

    #[error("release number is too large")]
    ReleaseNumberTooLarge,

    #[error("unsupported pre-release content")]
    UnsupportedPreRelease,

    #[error("repository has no tags (git describe failed)")]
    NoTags,

    #[error("no tag in the repository conforms to semantic version syntax")]
    NoSemanticTag,

    #[error("working tree is modified since last commit; commit your changes before updating the tag")]
    DirtyWorktree,

    #[error("exiting")]
    Cancelled,

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in rtag
pub type Result<T> = std::result::Result<T, RtagError>;

impl RtagError {
    /// Create a describe parse error carrying the raw text
    pub fn describe_parse(raw: impl Into<String>) -> Self {
        RtagError::DescribeParse { raw: raw.into() }
    }

    /// Create a version parse error carrying the raw text
    pub fn version_parse(raw: impl Into<String>) -> Self {
        RtagError::VersionParse { raw: raw.into() }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        RtagError::Config(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        RtagError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        RtagError::Remote(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RtagError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RtagError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_parse_errors_carry_raw_text() {
        let err = RtagError::describe_parse("garbage-output");
        assert!(err.to_string().contains("garbage-output"));

        let err = RtagError::version_parse("release-x");
        assert!(err.to_string().contains("release-x"));
        assert!(matches!(err, RtagError::VersionParse { raw } if raw == "release-x"));
    }

    #[test]
    fn test_commit_count_overflow_keeps_source() {
        use std::error::Error;

        let source = "99999999999999999999".parse::<i64>().unwrap_err();
        let err = RtagError::CommitCountOverflow {
            raw: "v1-99999999999999999999-gabc".to_string(),
            source,
        };
        assert!(err.source().is_some());
    }

    #[test]
    fn test_quad_error_messages() {
        let error_pairs = vec![
            (RtagError::VersionNumberTooLarge, "version number is too large"),
            (RtagError::ReleaseNumberTooLarge, "release number is too large"),
            (
                RtagError::UnsupportedPreRelease,
                "unsupported pre-release content",
            ),
        ];

        for (err, expected) in error_pairs {
            assert_eq!(err.to_string(), expected);
        }
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (RtagError::config("x"), "Configuration error"),
            (RtagError::tag("x"), "Tag error"),
            (RtagError::remote("x"), "Remote operation failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
