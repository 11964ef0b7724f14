//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the git queries rtag
//! needs, allowing for a real implementation backed by `git2` and a mock
//! implementation for testing.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! ```rust
//! # use rtag::git::Repository;
//! # use rtag::domain::{parse_version, Description};
//! # fn example<R: Repository>(repo: &R) -> rtag::Result<()> {
//! let description = Description::parse(&repo.describe_head()?)?;
//! let info = parse_version(&description)?;
//! println!("{} ({})", info.semantic, info.quad()?);
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{parse_version, Description, SemanticVersion, VersionInfo};
use crate::error::{RtagError, Result};
use tracing::debug;

/// Snapshot of the working tree state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepoStats {
    /// Current branch, `None` for a detached HEAD
    pub branch: Option<String>,
    /// Full hash of HEAD
    pub hash: String,
    /// Abbreviated hash of HEAD
    pub short_hash: String,
    /// Author date of HEAD formatted as `%Y-%m-%dT%H:%M:%S`
    pub author_date: String,
    /// Modified, staged or untracked files are present
    pub dirty: bool,
}

/// Git queries and commands used by the tagging workflow
pub trait Repository {
    /// Collect branch, hash, author date and dirty state of HEAD
    fn stats(&self) -> Result<RepoStats>;

    /// `git describe --tags --long` of HEAD
    ///
    /// # Returns
    /// * `Err(RtagError::NoTags)` - If no tag is reachable from HEAD
    fn describe_head(&self) -> Result<String>;

    /// `git describe --tags --long` of the commit a tag points to
    fn describe_tag(&self, tag: &str) -> Result<String>;

    /// All tag names, most recently created first
    fn tags_newest_first(&self) -> Result<Vec<String>>;

    /// Create an annotated tag at HEAD
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push a single tag to a remote
    fn push_tag(&self, remote: &str, tag: &str) -> Result<()>;
}

/// Find the most recent tag that is a semantic version and can be described
///
/// Used when the nearest tag does not follow semantic versioning.
pub fn last_semantic_tag<R: Repository + ?Sized>(repo: &R) -> Result<(String, VersionInfo)> {
    for tag in repo.tags_newest_first()? {
        if SemanticVersion::parse_tolerant(&tag).is_err() {
            debug!(%tag, "skipping non-semantic tag");
            continue;
        }

        let description = match repo
            .describe_tag(&tag)
            .and_then(|text| Description::parse(&text))
        {
            Ok(description) => description,
            Err(e) => {
                debug!(%tag, error = %e, "skipping tag that cannot be described");
                continue;
            }
        };

        // describe may name a different tag on the same commit, the version comes from ours
        let info = parse_version(&Description {
            tag: tag.clone(),
            ..description
        })?;
        return Ok((tag, info));
    }

    Err(RtagError::NoSemanticTag)
}
