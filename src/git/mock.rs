use crate::error::{RtagError, Result};
use crate::git::{RepoStats, Repository};
use std::cell::RefCell;
use std::collections::HashMap;

/// Mock repository for testing without actual git operations
///
/// Tags are reported newest first in the order they were added.
pub struct MockRepository {
    stats: RepoStats,
    head_description: Option<String>,
    tags: Vec<String>,
    tag_descriptions: HashMap<String, String>,
    tag_listing_error: Option<String>,
    created: RefCell<Vec<(String, String)>>,
    pushed: RefCell<Vec<(String, String)>>,
}

impl MockRepository {
    /// Create a new mock repository without tags
    pub fn new() -> Self {
        MockRepository {
            stats: RepoStats {
                branch: Some("main".to_string()),
                hash: "0123456789abcdef0123456789abcdef01234567".to_string(),
                short_hash: "0123456".to_string(),
                author_date: "2024-01-01T12:00:00".to_string(),
                dirty: false,
            },
            head_description: None,
            tags: Vec::new(),
            tag_descriptions: HashMap::new(),
            tag_listing_error: None,
            created: RefCell::new(Vec::new()),
            pushed: RefCell::new(Vec::new()),
        }
    }

    /// Set the describe output of HEAD
    pub fn set_head_description(&mut self, description: impl Into<String>) {
        self.head_description = Some(description.into());
    }

    /// Add a tag (older than all tags added before it) with its describe output
    pub fn add_tag(&mut self, name: impl Into<String>, description: impl Into<String>) {
        let name = name.into();
        self.tag_descriptions.insert(name.clone(), description.into());
        self.tags.push(name);
    }

    /// Make listing tags fail with a git error
    pub fn fail_tag_listing(&mut self, message: impl Into<String>) {
        self.tag_listing_error = Some(message.into());
    }

    /// Mark the working tree as modified
    pub fn set_dirty(&mut self, dirty: bool) {
        self.stats.dirty = dirty;
    }

    /// Tags created so far as (name, message)
    pub fn created_tags(&self) -> Vec<(String, String)> {
        self.created.borrow().clone()
    }

    /// Tags pushed so far as (remote, name)
    pub fn pushed_tags(&self) -> Vec<(String, String)> {
        self.pushed.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn stats(&self) -> Result<RepoStats> {
        Ok(self.stats.clone())
    }

    fn describe_head(&self) -> Result<String> {
        self.head_description.clone().ok_or(RtagError::NoTags)
    }

    fn describe_tag(&self, tag: &str) -> Result<String> {
        self.tag_descriptions
            .get(tag)
            .cloned()
            .ok_or_else(|| RtagError::tag(format!("Tag not found: {}", tag)))
    }

    fn tags_newest_first(&self) -> Result<Vec<String>> {
        if let Some(message) = &self.tag_listing_error {
            return Err(RtagError::Git(git2::Error::from_str(message)));
        }
        Ok(self.tags.clone())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        let mut created = self.created.borrow_mut();
        if created.iter().any(|(existing, _)| existing == name) || self.tags.iter().any(|t| t == name)
        {
            return Err(RtagError::tag(format!("Tag '{}' already exists", name)));
        }
        created.push((name.to_string(), message.to_string()));
        Ok(())
    }

    fn push_tag(&self, remote: &str, tag: &str) -> Result<()> {
        self.pushed
            .borrow_mut()
            .push((remote.to_string(), tag.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_without_tags() {
        let repo = MockRepository::new();
        assert!(matches!(repo.describe_head(), Err(RtagError::NoTags)));
        assert!(repo.tags_newest_first().unwrap().is_empty());
    }

    #[test]
    fn test_mock_repository_tags() {
        let mut repo = MockRepository::new();
        repo.add_tag("v2.0.0", "v2.0.0-1-gabc");
        repo.add_tag("v1.0.0", "v1.0.0-5-gabc");

        assert_eq!(repo.tags_newest_first().unwrap(), ["v2.0.0", "v1.0.0"]);
        assert_eq!(repo.describe_tag("v1.0.0").unwrap(), "v1.0.0-5-gabc");
        assert!(repo.describe_tag("v3.0.0").is_err());
    }

    #[test]
    fn test_mock_repository_records_commands() {
        let repo = MockRepository::new();
        repo.create_annotated_tag("v1.0.0", "tagging as v1.0.0").unwrap();
        repo.push_tag("origin", "v1.0.0").unwrap();

        assert!(repo.create_annotated_tag("v1.0.0", "again").is_err());
        assert_eq!(
            repo.created_tags(),
            [("v1.0.0".to_string(), "tagging as v1.0.0".to_string())]
        );
        assert_eq!(
            repo.pushed_tags(),
            [("origin".to_string(), "v1.0.0".to_string())]
        );
    }

    #[test]
    fn test_mock_repository_tag_listing_error() {
        let mut repo = MockRepository::new();
        repo.fail_tag_listing("object database is corrupt");
        assert!(matches!(repo.tags_newest_first(), Err(RtagError::Git(_))));
    }

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert!(!repo.stats().unwrap().dirty);
    }
}
