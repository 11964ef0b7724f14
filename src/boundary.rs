use std::fmt;

/// Warnings that occur when tagging near the edges of a repository's history.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Repository has no tags yet
    NoTags { first_tag: String },
    /// HEAD already carries the latest tag
    AlreadyTagged { tag: String },
    /// Latest tag is not a semantic version but an older one is
    NonSemanticTag { tag: String, fallback: String },
    /// Working tree has changes and the configuration allows tagging anyway
    DirtyWorktree,
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoTags { first_tag } => write!(
                f,
                "the repo does not yet have any tags assigned, the first tag can be '{}'",
                first_tag
            ),
            BoundaryWarning::AlreadyTagged { tag } => {
                write!(f, "your repo state is already tagged as '{}'", tag)
            }
            BoundaryWarning::NonSemanticTag { tag, fallback } => write!(
                f,
                "last tag '{}' does not conform to semantic version syntax, \
                 however there is an older tag '{}' that can be used instead",
                tag, fallback
            ),
            BoundaryWarning::DirtyWorktree => {
                write!(f, "modified since last commit (use 'git status' for more detail)")
            }
        }
    }
}
