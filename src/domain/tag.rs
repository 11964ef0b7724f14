use crate::domain::version::SemanticVersion;

/// Prefix used when none is configured and nothing can be inferred
pub const DEFAULT_PREFIX: &str = "v";

/// Represents a git tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    /// Create a new tag from a string
    pub fn new(name: impl Into<String>) -> Self {
        Tag { name: name.into() }
    }

    /// Tag name for a version, e.g. prefix="v", version="1.2.3" -> "v1.2.3"
    pub fn for_version(prefix: &str, version: &SemanticVersion) -> Self {
        Tag::new(format!("{}{}", prefix, version))
    }

    /// Guess the prefix convention of an existing tag
    ///
    /// "1.2.3" -> "", "v1.2.3" -> "v", "V1.2.3" -> "V", anything else -> "v"
    pub fn detect_prefix(&self) -> String {
        let mut chars = self.name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), _) if c.is_ascii_digit() => String::new(),
            (Some(c @ ('v' | 'V')), Some(d)) if d.is_ascii_digit() => c.to_string(),
            _ => DEFAULT_PREFIX.to_string(),
        }
    }

    /// Annotation message stored with the tag
    pub fn message(&self) -> String {
        format!("tagging as {}", self.name)
    }
}

/// How the prefix of a new tag is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagPrefix {
    /// Follow the convention of the previous tag
    Auto,
    /// Always use the given prefix (may be empty)
    Fixed(String),
}

impl TagPrefix {
    /// Prefix to use given the previous tag, if any
    pub fn resolve(&self, previous: Option<&Tag>) -> String {
        match (self, previous) {
            (TagPrefix::Fixed(prefix), _) => prefix.clone(),
            (TagPrefix::Auto, Some(tag)) => tag.detect_prefix(),
            (TagPrefix::Auto, None) => DEFAULT_PREFIX.to_string(),
        }
    }
}

impl From<Option<String>> for TagPrefix {
    fn from(prefix: Option<String>) -> Self {
        match prefix {
            Some(prefix) => TagPrefix::Fixed(prefix),
            None => TagPrefix::Auto,
        }
    }
}
