//! Workspace discovery.

use std::path::{Path, PathBuf};

use crate::naming::{is_component_source, LayoutMode};

/// Project file marking a single-namespace (`c`) layout.
pub const SFDX_PROJECT_FILE: &str = "sfdx-project.json";

/// Directories never descended into.
const ALWAYS_IGNORED: &[&str] = &["node_modules"];

/// Source of the files that make up a workspace.
pub trait WorkspaceDiscovery: Send + Sync {
    /// How custom component namespaces are derived in this workspace.
    fn layout(&self) -> LayoutMode;

    /// Every candidate component source in the workspace.
    fn find_all_modules(&self) -> Vec<PathBuf>;
}

/// Detect the layout mode of the workspace rooted at `root`.
pub fn detect_layout(root: &Path) -> LayoutMode {
    if root.join(SFDX_PROJECT_FILE).is_file() {
        LayoutMode::SingleNamespace
    } else {
        LayoutMode::DirectoryNamespace
    }
}

/// Workspace discovery backed by a directory walk.
#[derive(Debug, Clone)]
pub struct FsWorkspace {
    root: PathBuf,
    layout: LayoutMode,
    ignored: Vec<String>,
}

impl FsWorkspace {
    /// Create a workspace rooted at `root`, detecting its layout.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let layout = detect_layout(&root);
        Self {
            root,
            layout,
            ignored: Vec::new(),
        }
    }

    /// Override the detected layout.
    pub fn with_layout(mut self, layout: LayoutMode) -> Self {
        self.layout = layout;
        self
    }

    /// Skip additional directory names during discovery.
    pub fn with_ignored(mut self, ignored: Vec<String>) -> Self {
        self.ignored = ignored;
        self
    }

    fn is_ignored_dir(&self, name: &str) -> bool {
        name.starts_with('.')
            || ALWAYS_IGNORED.contains(&name)
            || self.ignored.iter().any(|i| i == name)
    }
}

impl WorkspaceDiscovery for FsWorkspace {
    fn layout(&self) -> LayoutMode {
        self.layout
    }

    fn find_all_modules(&self) -> Vec<PathBuf> {
        let mut modules = Vec::new();

        let walker = walkdir::WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                // Don't filter the root directory itself
                if e.depth() == 0 || !e.file_type().is_dir() {
                    return true;
                }
                !self.is_ignored_dir(&e.file_name().to_string_lossy())
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_file() && is_component_source(entry.path()) {
                modules.push(entry.into_path());
            }
        }

        modules
    }
}
