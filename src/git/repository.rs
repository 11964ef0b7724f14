use crate::error::{RtagError, Result};
use crate::git::RepoStats;
use chrono::{FixedOffset, TimeZone};
use git2::{
    DescribeFormatOptions, DescribeOptions, ErrorClass, ErrorCode, Object, Repository as Git2Repo,
    StatusOptions,
};
use std::path::Path;
use tracing::{debug, info};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        if repo.is_bare() {
            return Err(RtagError::tag("dir is outside of git worktree"));
        }
        debug!(path = %repo.path().display(), "opened repository");

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn describe_object(&self, object: &Object<'_>) -> Result<String> {
        let mut options = DescribeOptions::new();
        options.describe_tags();

        let mut format = DescribeFormatOptions::new();
        format.always_use_long_format(true);

        // libgit2 reports "no reference found" as a generic describe error
        let describe = object.describe(&options).map_err(|e| {
            if e.code() == ErrorCode::NotFound || e.class() == ErrorClass::Describe {
                RtagError::NoTags
            } else {
                RtagError::Git(e)
            }
        })?;
        let text = describe.format(Some(&format))?;
        debug!(%text, "git describe");
        Ok(text)
    }

    /// Creation time of a tag: tagger date if annotated, committer date otherwise
    fn tag_time(&self, name: &str) -> Option<i64> {
        let reference = self
            .repo
            .find_reference(&format!("refs/tags/{}", name))
            .ok()?;
        let tagger_time = reference
            .peel_to_tag()
            .ok()
            .and_then(|tag| tag.tagger().map(|sig| sig.when().seconds()));
        tagger_time.or_else(|| {
            reference
                .peel_to_commit()
                .ok()
                .map(|commit| commit.committer().when().seconds())
        })
    }
}

fn format_git_time(time: git2::Time) -> String {
    FixedOffset::east_opt(time.offset_minutes() * 60)
        .and_then(|offset| offset.timestamp_opt(time.seconds(), 0).single())
        .map(|date| date.format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_default()
}

impl super::Repository for Git2Repository {
    fn stats(&self) -> Result<RepoStats> {
        let head = self.repo.head()?;
        let branch = if head.is_branch() {
            head.shorthand().map(str::to_string)
        } else {
            None
        };

        let commit = head.peel_to_commit()?;
        let short_hash = commit
            .as_object()
            .short_id()?
            .as_str()
            .unwrap_or_default()
            .to_string();

        let mut options = StatusOptions::new();
        options.include_untracked(true).include_ignored(false);
        let dirty = !self.repo.statuses(Some(&mut options))?.is_empty();

        let author_date = format_git_time(commit.author().when());

        Ok(RepoStats {
            branch,
            hash: commit.id().to_string(),
            short_hash,
            author_date,
            dirty,
        })
    }

    fn describe_head(&self) -> Result<String> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch => return Err(RtagError::NoTags),
            Err(e) => return Err(e.into()),
        };
        let commit = head.peel_to_commit()?;
        self.describe_object(commit.as_object())
    }

    fn describe_tag(&self, tag: &str) -> Result<String> {
        let commit = self
            .repo
            .revparse_single(&format!("refs/tags/{}", tag))
            .and_then(|object| object.peel_to_commit())
            .map_err(|e| RtagError::tag(format!("Cannot find tag '{}': {}", tag, e)))?;
        self.describe_object(commit.as_object())
    }

    fn tags_newest_first(&self) -> Result<Vec<String>> {
        let names = self.repo.tag_names(None)?;

        let mut tags: Vec<(i64, String)> = names
            .iter()
            .flatten()
            .filter_map(|name| self.tag_time(name).map(|time| (time, name.to_string())))
            .collect();
        tags.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(tags.into_iter().map(|(_, name)| name).collect())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        let signature = self.repo.signature()?;

        self.repo
            .tag(name, head.as_object(), &signature, message, false)
            .map_err(|e| RtagError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        info!(tag = name, "created annotated tag");
        Ok(())
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        let mut remote_handle = self
            .repo
            .find_remote(remote)
            .map_err(|_| RtagError::remote(format!("No remote named '{}' found", remote)))?;

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            let username = username_from_url.unwrap_or("git");
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }
                if let Some(home) = dirs::home_dir() {
                    for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                        let path = home.join(".ssh").join(key);
                        if path.exists() {
                            return git2::Cred::ssh_key(username, None, &path, None);
                        }
                    }
                }
            }
            git2::Cred::default()
        });

        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "Push failed for {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/tags/{0}:refs/tags/{0}", tag);
        remote_handle
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| match e.class() {
                git2::ErrorClass::Net => {
                    RtagError::remote(format!("Network error during push: {}", e))
                }
                _ => RtagError::remote(format!("Failed to push tag '{}': {}", tag, e)),
            })?;

        info!(tag, remote, "pushed tag");
        Ok(())
    }
}
