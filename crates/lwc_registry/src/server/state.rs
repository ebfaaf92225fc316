//! Server state management.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use tower_lsp::lsp_types::FileEvent;

use crate::catalog::{load_standard_catalog, CatalogSource};
use crate::changes::{BatchSummary, ChangeProcessor};
use crate::compiler::{ApiScanner, ComponentCompiler};
use crate::config::{load_config, LwcConfig};
use crate::document::DocumentStore;
use crate::error::CatalogError;
use crate::indexer::{IndexSummary, Indexer};
use crate::naming::LayoutMode;
use crate::registry::TagRegistry;

/// Workspace the server was initialized with.
#[derive(Debug, Clone)]
pub struct WorkspaceInfo {
    pub root: PathBuf,
    pub config: LwcConfig,
    pub layout: LayoutMode,
}

impl WorkspaceInfo {
    /// Load configuration for the workspace at `root`.
    pub fn load(root: &Path) -> Self {
        let config = load_config(root);
        let layout = config.layout_mode(root);
        Self {
            root: root.to_path_buf(),
            config,
            layout,
        }
    }
}

/// Server state containing all runtime data.
pub struct ServerState {
    /// Document store for managing open documents
    pub documents: DocumentStore,
    /// Tag registry shared with the indexer
    registry: Arc<TagRegistry>,
    /// Change processor driving incremental indexing
    processor: ChangeProcessor,
    /// Workspace root and settings, set on initialize
    workspace: RwLock<Option<WorkspaceInfo>>,
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerState {
    /// Create a server state using the built-in `@api` scanner.
    pub fn new() -> Self {
        Self::with_compiler(Arc::new(ApiScanner::new()))
    }

    /// Create a server state using `compiler` for component metadata.
    pub fn with_compiler(compiler: Arc<dyn ComponentCompiler>) -> Self {
        let registry = Arc::new(TagRegistry::new());
        let indexer = Arc::new(Indexer::new(Arc::clone(&registry), compiler));

        Self {
            documents: DocumentStore::new(),
            registry,
            processor: ChangeProcessor::new(indexer),
            workspace: RwLock::new(None),
        }
    }

    /// Get the tag registry.
    pub fn registry(&self) -> &Arc<TagRegistry> {
        &self.registry
    }

    /// Set the workspace root and load its configuration.
    pub fn set_workspace_root(&self, root: &Path) {
        *self.workspace.write() = Some(WorkspaceInfo::load(root));
    }

    /// Get the workspace, if initialized.
    pub fn workspace(&self) -> Option<WorkspaceInfo> {
        self.workspace.read().clone()
    }

    /// Layout of the current workspace.
    pub fn layout(&self) -> LayoutMode {
        self.workspace
            .read()
            .as_ref()
            .map(|w| w.layout)
            .unwrap_or_default()
    }

    /// Load built-ins and index the workspace.
    ///
    /// A catalog failure is returned after the workspace has still been
    /// indexed, so custom components stay available.
    pub async fn bootstrap(&self) -> Result<IndexSummary, CatalogError> {
        let Some(workspace) = self.workspace() else {
            load_standard_catalog(&self.registry, &CatalogSource::Bundled).await?;
            return Ok(IndexSummary::default());
        };

        let catalog = load_standard_catalog(
            &self.registry,
            &workspace.config.catalog_source(&workspace.root),
        )
        .await;

        let discovery = workspace.config.workspace(&workspace.root);
        let summary = self.processor.indexer().index_all(&discovery).await;

        catalog.map(|_| summary)
    }

    /// Apply a batch of watched-file events.
    pub async fn process_events(&self, events: &[FileEvent]) -> BatchSummary {
        self.processor.process_events(events, self.layout()).await
    }
}
