//! Tag identity derived from file locations.
//!
//! A component lives at `<namespace>/<tag>/<tag>.js`. Only the file whose
//! stem matches its directory defines the component; every other file in
//! that directory (helpers, tests, templates) is ignored by the registry.

mod attribute;

pub use attribute::*;

use std::ffi::OsStr;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::error::NameError;

/// Namespace shared by all custom components in a single-namespace project.
pub const DEFAULT_NAMESPACE: &str = "c";

/// Namespace prefix used for platform built-ins.
pub const STANDARD_NAMESPACE: &str = "lightning";

/// Directory segment that marks component sources.
pub const COMPONENTS_DIR: &str = "lightningcomponents";

/// Extension of component source files.
pub const COMPONENT_EXTENSION: &str = "js";

/// How custom component namespaces are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutMode {
    /// All custom components share the `c` namespace.
    SingleNamespace,
    /// Namespace is the directory above the component directory.
    #[default]
    DirectoryNamespace,
}

/// Resolved identity of a component source file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentName {
    pub namespace: String,
    pub tag: String,
}

impl ComponentName {
    /// Create a component name from its parts.
    pub fn new(namespace: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            tag: tag.into(),
        }
    }

    /// Registry key, e.g. `c-myButton`.
    pub fn qualified(&self) -> String {
        qualified_name(&self.namespace, &self.tag)
    }
}

/// Join a namespace and a tag into a registry key.
#[inline]
pub fn qualified_name(namespace: &str, tag: &str) -> String {
    format!("{}-{}", namespace, tag)
}

/// Resolve the component identity of `path`.
///
/// Operates purely on path segments and never touches the file system.
pub fn resolve(path: &Path, layout: LayoutMode) -> Result<ComponentName, NameError> {
    let invalid = || NameError::InvalidPath {
        path: path.to_path_buf(),
    };

    let stem = path.file_stem().and_then(OsStr::to_str).ok_or_else(invalid)?;
    let parent = path.parent().ok_or_else(invalid)?;
    let parent_name = parent
        .file_name()
        .and_then(OsStr::to_str)
        .ok_or_else(invalid)?;

    if stem != parent_name {
        return Err(NameError::NotCanonical {
            path: path.to_path_buf(),
        });
    }

    let namespace = match layout {
        LayoutMode::SingleNamespace => DEFAULT_NAMESPACE,
        LayoutMode::DirectoryNamespace => parent
            .parent()
            .and_then(Path::file_name)
            .and_then(OsStr::to_str)
            .ok_or_else(|| NameError::MissingNamespace {
                path: path.to_path_buf(),
            })?,
    };

    Ok(ComponentName::new(namespace, parent_name))
}

/// Check whether `path` looks like a component source: a `.js` file with a
/// `lightningcomponents` directory somewhere above it.
pub fn is_component_source(path: &Path) -> bool {
    let has_extension = path
        .extension()
        .is_some_and(|ext| ext == COMPONENT_EXTENSION);

    let under_components = path
        .parent()
        .is_some_and(|dir| {
            dir.components()
                .any(|c| matches!(c, Component::Normal(name) if name == COMPONENTS_DIR))
        });

    has_extension && under_components
}
