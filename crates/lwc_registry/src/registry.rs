//! Tag registry mapping qualified tag names to their metadata.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::naming::qualified_name;

/// Documentation used when a tag has none.
pub const DOC_PLACEHOLDER: &str = "[doc placeholder]";

/// Metadata for a single tag.
///
/// Values are immutable and replaced wholesale on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMetadata {
    /// Kebab-case attribute names, in declaration order.
    pub attributes: Vec<String>,
    /// Markdown documentation shown on hover.
    pub documentation: String,
}

impl TagMetadata {
    /// Create metadata with the placeholder documentation.
    pub fn new(attributes: Vec<String>) -> Self {
        Self {
            attributes,
            documentation: DOC_PLACEHOLDER.to_string(),
        }
    }

    /// Create metadata with explicit documentation.
    pub fn with_documentation(attributes: Vec<String>, documentation: impl Into<String>) -> Self {
        Self {
            attributes,
            documentation: documentation.into(),
        }
    }

    /// Check whether the tag declares `attribute`.
    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.attributes.iter().any(|a| a == attribute)
    }
}

impl Default for TagMetadata {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Thread-safe tag registry.
///
/// Writes replace a whole entry under the write lock, and [`TagRegistry::list`]
/// copies every entry under a single read lock, so readers never observe a
/// half-applied update.
pub struct TagRegistry {
    tags: RwLock<FxHashMap<String, Arc<TagMetadata>>>,
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TagRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tags: RwLock::new(FxHashMap::default()),
        }
    }

    /// Insert or overwrite a tag.
    pub fn set(&self, qualified: impl Into<String>, metadata: TagMetadata) {
        self.tags.write().insert(qualified.into(), Arc::new(metadata));
    }

    /// Remove a tag. Removing an unknown tag is a no-op.
    pub fn remove(&self, qualified: &str) -> Option<Arc<TagMetadata>> {
        self.tags.write().remove(qualified)
    }

    /// Look up a tag.
    pub fn get(&self, qualified: &str) -> Option<Arc<TagMetadata>> {
        self.tags.read().get(qualified).cloned()
    }

    /// Check if a tag exists.
    pub fn contains(&self, qualified: &str) -> bool {
        self.tags.read().contains_key(qualified)
    }

    /// Snapshot of every entry, sorted by tag name.
    pub fn list(&self) -> Vec<(String, Arc<TagMetadata>)> {
        let mut entries: Vec<_> = {
            let tags = self.tags.read();
            tags.iter()
                .map(|(name, meta)| (name.clone(), Arc::clone(meta)))
                .collect()
        };
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Sorted tag names.
    pub fn tag_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.tags.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Register a custom component directly, bypassing file indexing.
    ///
    /// Attribute names are stored exactly as given.
    pub fn set_override(&self, namespace: &str, tag: &str, attributes: &[&str]) {
        let attributes = attributes.iter().map(|a| a.to_string()).collect();
        self.set(qualified_name(namespace, tag), TagMetadata::new(attributes));
    }

    /// Get the number of tags.
    pub fn len(&self) -> usize {
        self.tags.read().len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tags.read().is_empty()
    }
}
