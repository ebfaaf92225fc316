//! File change processing.
//!
//! Watched-file notifications arrive in batches. Only component sources
//! (`.js` files under a `lightningcomponents` directory) affect the registry.

use std::path::PathBuf;
use std::sync::Arc;

use tower_lsp::lsp_types::{FileChangeType, FileEvent};

use crate::indexer::Indexer;
use crate::naming::{is_component_source, LayoutMode};

/// Kind of file-system change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Changed,
    Deleted,
}

/// A single file change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

impl FileChange {
    /// Create a file change.
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Convert an LSP file event. Returns `None` for non-file URIs and
    /// unknown change types.
    pub fn from_event(event: &FileEvent) -> Option<Self> {
        let kind = match event.typ {
            FileChangeType::CREATED => ChangeKind::Created,
            FileChangeType::CHANGED => ChangeKind::Changed,
            FileChangeType::DELETED => ChangeKind::Deleted,
            _ => return None,
        };
        let path = event.uri.to_file_path().ok()?;
        Some(Self { path, kind })
    }
}

/// Counts from processing one batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Events that re-indexed a component.
    pub indexed: usize,
    /// Events that removed a component.
    pub removed: usize,
    /// Events ignored by the filter or the name resolver.
    pub skipped: usize,
}

/// Drives the indexer from file change batches.
#[derive(Clone)]
pub struct ChangeProcessor {
    indexer: Arc<Indexer>,
}

impl ChangeProcessor {
    /// Create a processor for `indexer`.
    pub fn new(indexer: Arc<Indexer>) -> Self {
        Self { indexer }
    }

    /// Get the underlying indexer.
    pub fn indexer(&self) -> &Arc<Indexer> {
        &self.indexer
    }

    /// Apply a batch of changes in the order received.
    ///
    /// Created and changed files are (re)indexed; deleted files are removed.
    pub async fn process_batch(
        &self,
        changes: &[FileChange],
        layout: LayoutMode,
    ) -> BatchSummary {
        let mut summary = BatchSummary::default();

        for change in changes {
            if !is_component_source(&change.path) {
                summary.skipped += 1;
                continue;
            }

            tracing::debug!("{:?}: {}", change.kind, change.path.display());

            match change.kind {
                ChangeKind::Created | ChangeKind::Changed => {
                    match self.indexer.index_file(&change.path, layout).await {
                        Some(_) => summary.indexed += 1,
                        None => summary.skipped += 1,
                    }
                }
                ChangeKind::Deleted => match self.indexer.unindex_file(&change.path, layout) {
                    Some(_) => summary.removed += 1,
                    None => summary.skipped += 1,
                },
            }
        }

        summary
    }

    /// Apply a batch of LSP file events.
    pub async fn process_events(&self, events: &[FileEvent], layout: LayoutMode) -> BatchSummary {
        let changes: Vec<_> = events.iter().filter_map(FileChange::from_event).collect();
        let mut summary = self.process_batch(&changes, layout).await;
        summary.skipped += events.len() - changes.len();
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{CompileOutput, ComponentCompiler, ComponentMetadata, PropertyDecl};
    use crate::registry::{TagMetadata, TagRegistry};
    use async_trait::async_trait;
    use std::path::Path;
    use tower_lsp::lsp_types::Url;

    struct StemCompiler;

    #[async_trait]
    impl ComponentCompiler for StemCompiler {
        async fn compile(&self, path: &Path) -> CompileOutput {
            let stem = path.file_stem().unwrap().to_string_lossy().to_string();
            CompileOutput::ok(ComponentMetadata {
                properties: vec![PropertyDecl {
                    name: format!("{}Value", stem),
                }],
                doc: None,
            })
        }
    }

    fn processor() -> ChangeProcessor {
        let indexer = Indexer::new(Arc::new(TagRegistry::new()), Arc::new(StemCompiler));
        ChangeProcessor::new(Arc::new(indexer))
    }

    const LAYOUT: LayoutMode = LayoutMode::DirectoryNamespace;
    const FOO: &str = "/ws/lightningcomponents/ns/foo/foo.js";
    const BAR: &str = "/ws/lightningcomponents/ns/bar/bar.js";

    #[tokio::test]
    async fn test_created_then_deleted() {
        let processor = processor();

        processor
            .process_batch(&[FileChange::new(FOO, ChangeKind::Created)], LAYOUT)
            .await;
        assert_eq!(
            processor.indexer().registry().get("ns-foo").unwrap().attributes,
            vec!["foo-value"]
        );

        let summary = processor
            .process_batch(&[FileChange::new(FOO, ChangeKind::Deleted)], LAYOUT)
            .await;
        assert_eq!(summary.removed, 1);
        assert!(processor.indexer().registry().is_empty());
    }

    #[tokio::test]
    async fn test_changed_reindexes() {
        let processor = processor();
        processor
            .indexer()
            .registry()
            .set("ns-foo", TagMetadata::default());

        let summary = processor
            .process_batch(&[FileChange::new(FOO, ChangeKind::Changed)], LAYOUT)
            .await;

        assert_eq!(summary.indexed, 1);
        assert_eq!(
            processor.indexer().registry().get("ns-foo").unwrap().attributes,
            vec!["foo-value"]
        );
    }

    #[tokio::test]
    async fn test_disjoint_creates_are_order_independent() {
        let forward = processor();
        let backward = processor();
        let a = FileChange::new(FOO, ChangeKind::Created);
        let b = FileChange::new(BAR, ChangeKind::Created);

        forward.process_batch(&[a.clone(), b.clone()], LAYOUT).await;
        backward.process_batch(&[b, a], LAYOUT).await;

        assert_eq!(
            forward.indexer().registry().list(),
            backward.indexer().registry().list()
        );
    }

    #[tokio::test]
    async fn test_same_key_applied_in_order() {
        let processor = processor();
        let summary = processor
            .process_batch(
                &[
                    FileChange::new(FOO, ChangeKind::Created),
                    FileChange::new(FOO, ChangeKind::Deleted),
                ],
                LAYOUT,
            )
            .await;

        assert_eq!(summary.indexed, 1);
        assert_eq!(summary.removed, 1);
        assert!(processor.indexer().registry().is_empty());
    }

    #[tokio::test]
    async fn test_irrelevant_files_are_skipped() {
        let processor = processor();
        let summary = processor
            .process_batch(
                &[
                    FileChange::new("/ws/lightningcomponents/ns/foo/foo.html", ChangeKind::Created),
                    FileChange::new("/ws/src/ns/foo/foo.js", ChangeKind::Created),
                    FileChange::new("/ws/lightningcomponents/ns/foo/bar.js", ChangeKind::Created),
                ],
                LAYOUT,
            )
            .await;

        assert_eq!(summary.skipped, 3);
        assert!(processor.indexer().registry().is_empty());
    }

    #[tokio::test]
    async fn test_delete_never_indexed_is_noop() {
        let processor = processor();
        let summary = processor
            .process_batch(&[FileChange::new(BAR, ChangeKind::Deleted)], LAYOUT)
            .await;

        assert_eq!(summary.removed, 1);
        assert!(processor.indexer().registry().is_empty());
    }

    #[tokio::test]
    async fn test_process_lsp_events() {
        let processor = processor();
        let events = vec![
            FileEvent::new(Url::from_file_path(FOO).unwrap(), FileChangeType::CREATED),
            FileEvent::new(
                Url::parse("untitled:Untitled-1").unwrap(),
                FileChangeType::CREATED,
            ),
        ];

        let summary = processor
            .process_events(&events, LayoutMode::SingleNamespace)
            .await;

        assert_eq!(summary.indexed, 1);
        assert_eq!(summary.skipped, 1);
        assert!(processor.indexer().registry().contains("c-foo"));
    }
}
