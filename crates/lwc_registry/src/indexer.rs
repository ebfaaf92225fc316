//! Component indexing.
//!
//! Compiles component sources and commits their public shape to the
//! [`TagRegistry`]. Used for the bulk pass at startup and for single-file
//! updates driven by change events.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use crate::compiler::{
    extract_attributes, ComponentCompiler, DiagnosticSink, TracingDiagnosticSink,
};
use crate::naming::{resolve, LayoutMode};
use crate::registry::{TagMetadata, TagRegistry, DOC_PLACEHOLDER};
use crate::workspace::WorkspaceDiscovery;

/// Counts from a bulk indexing pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexSummary {
    /// Files handed to the indexer.
    pub files: usize,
    /// Files that produced a registry entry.
    pub indexed: usize,
}

/// Indexer connecting the compiler to the registry.
pub struct Indexer {
    registry: Arc<TagRegistry>,
    compiler: Arc<dyn ComponentCompiler>,
    sink: Arc<dyn DiagnosticSink>,
}

impl Indexer {
    /// Create an indexer that logs compiler diagnostics.
    pub fn new(registry: Arc<TagRegistry>, compiler: Arc<dyn ComponentCompiler>) -> Self {
        Self {
            registry,
            compiler,
            sink: Arc::new(TracingDiagnosticSink),
        }
    }

    /// Replace the diagnostic sink.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Get the registry this indexer writes to.
    pub fn registry(&self) -> &Arc<TagRegistry> {
        &self.registry
    }

    /// Index a single file.
    ///
    /// Returns the qualified tag name when the file is a canonical component
    /// file. A file that fails to compile still reserves its tag with no
    /// attributes. A file that no longer exists is removed instead and
    /// yields `None`.
    pub async fn index_file(&self, path: &Path, layout: LayoutMode) -> Option<String> {
        let name = match resolve(path, layout) {
            Ok(name) => name,
            Err(e) => {
                tracing::trace!("not indexing: {}", e);
                return None;
            }
        };

        let output = self.compiler.compile(path).await;
        if output.source_missing {
            tracing::debug!("source gone, dropping: {}", path.display());
            self.registry.remove(&name.qualified());
            return None;
        }
        if !output.diagnostics.is_empty() {
            self.sink.report(path, &output.diagnostics);
        }

        let metadata = match output.result {
            Some(result) => TagMetadata::with_documentation(
                extract_attributes(&result.metadata),
                result
                    .metadata
                    .doc
                    .unwrap_or_else(|| DOC_PLACEHOLDER.to_string()),
            ),
            None => TagMetadata::default(),
        };

        let qualified = name.qualified();
        self.registry.set(qualified.clone(), metadata);
        Some(qualified)
    }

    /// Remove the tag defined by `path`.
    ///
    /// Returns the qualified tag name when the file is a canonical component
    /// file, whether or not it was registered.
    pub fn unindex_file(&self, path: &Path, layout: LayoutMode) -> Option<String> {
        let qualified = resolve(path, layout).ok()?.qualified();
        self.registry.remove(&qualified);
        Some(qualified)
    }

    /// Index every module the workspace reports.
    ///
    /// Files are compiled one at a time to bound the load on the compiler.
    pub async fn index_all(&self, workspace: &dyn WorkspaceDiscovery) -> IndexSummary {
        let start = Instant::now();
        let layout = workspace.layout();
        let files = workspace.find_all_modules();

        let mut indexed = 0;
        for file in &files {
            if self.index_file(file, layout).await.is_some() {
                indexed += 1;
            }
        }

        tracing::info!(
            "indexed {} components from {} files in {}ms",
            indexed,
            files.len(),
            start.elapsed().as_millis()
        );

        IndexSummary {
            files: files.len(),
            indexed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::{CompileDiagnostic, CompileOutput, ComponentMetadata, PropertyDecl};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::path::PathBuf;

    /// Compiler returning canned output keyed on the file stem.
    struct FakeCompiler;

    #[async_trait]
    impl ComponentCompiler for FakeCompiler {
        async fn compile(&self, path: &Path) -> CompileOutput {
            let stem = path.file_stem().unwrap().to_string_lossy();
            if stem == "broken" {
                return CompileOutput::failed(vec![CompileDiagnostic::error("syntax error")]);
            }
            if stem == "gone" {
                return CompileOutput::missing();
            }
            CompileOutput::ok(ComponentMetadata {
                properties: vec![
                    PropertyDecl {
                        name: "iconName".to_string(),
                    },
                    PropertyDecl {
                        name: "label".to_string(),
                    },
                ],
                doc: None,
            })
        }
    }

    #[derive(Default)]
    struct CollectingSink(Mutex<Vec<(PathBuf, usize)>>);

    impl DiagnosticSink for CollectingSink {
        fn report(&self, path: &Path, diagnostics: &[CompileDiagnostic]) {
            self.0.lock().push((path.to_path_buf(), diagnostics.len()));
        }
    }

    struct StaticWorkspace(Vec<PathBuf>);

    impl WorkspaceDiscovery for StaticWorkspace {
        fn layout(&self) -> LayoutMode {
            LayoutMode::DirectoryNamespace
        }

        fn find_all_modules(&self) -> Vec<PathBuf> {
            self.0.clone()
        }
    }

    fn indexer() -> Indexer {
        Indexer::new(Arc::new(TagRegistry::new()), Arc::new(FakeCompiler))
    }

    const LAYOUT: LayoutMode = LayoutMode::DirectoryNamespace;

    #[tokio::test]
    async fn test_index_file() {
        let indexer = indexer();
        let key = indexer
            .index_file(Path::new("/ws/lightningcomponents/ns/foo/foo.js"), LAYOUT)
            .await;

        assert_eq!(key.as_deref(), Some("ns-foo"));
        let tag = indexer.registry().get("ns-foo").unwrap();
        assert_eq!(tag.attributes, vec!["icon-name", "label"]);
        assert_eq!(tag.documentation, DOC_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_index_then_unindex_round_trip() {
        let indexer = indexer();
        let path = Path::new("/ws/lightningcomponents/ns/foo/foo.js");

        indexer.index_file(path, LAYOUT).await;
        assert_eq!(indexer.unindex_file(path, LAYOUT).as_deref(), Some("ns-foo"));
        assert!(indexer.registry().is_empty());
    }

    #[tokio::test]
    async fn test_index_twice_is_idempotent() {
        let indexer = indexer();
        let path = Path::new("/ws/lightningcomponents/ns/foo/foo.js");

        indexer.index_file(path, LAYOUT).await;
        let first = indexer.registry().get("ns-foo").unwrap();
        indexer.index_file(path, LAYOUT).await;

        assert_eq!(indexer.registry().len(), 1);
        assert_eq!(*indexer.registry().get("ns-foo").unwrap(), *first);
    }

    #[tokio::test]
    async fn test_non_canonical_file_is_skipped() {
        let indexer = indexer();
        let key = indexer
            .index_file(Path::new("/ws/ns/foo/bar.js"), LAYOUT)
            .await;

        assert!(key.is_none());
        assert!(indexer.registry().is_empty());
    }

    #[tokio::test]
    async fn test_shallow_path_is_skipped() {
        let indexer = indexer();
        assert!(indexer
            .index_file(Path::new("foo/foo.js"), LAYOUT)
            .await
            .is_none());
        assert!(indexer.unindex_file(Path::new("foo/foo.js"), LAYOUT).is_none());
    }

    #[tokio::test]
    async fn test_compile_failure_reserves_tag_and_reports() {
        let sink = Arc::new(CollectingSink::default());
        let indexer = indexer().with_sink(sink.clone());
        let path = Path::new("/ws/lightningcomponents/ns/broken/broken.js");

        let key = indexer.index_file(path, LAYOUT).await;

        assert_eq!(key.as_deref(), Some("ns-broken"));
        assert!(indexer.registry().get("ns-broken").unwrap().attributes.is_empty());
        assert_eq!(*sink.0.lock(), vec![(path.to_path_buf(), 1)]);
    }

    #[tokio::test]
    async fn test_missing_source_removes_tag() {
        let sink = Arc::new(CollectingSink::default());
        let indexer = indexer().with_sink(sink.clone());
        let path = Path::new("/ws/lightningcomponents/ns/gone/gone.js");
        indexer.registry().set("ns-gone", TagMetadata::default());

        assert!(indexer.index_file(path, LAYOUT).await.is_none());
        assert!(!indexer.registry().contains("ns-gone"));
        assert!(sink.0.lock().is_empty());
    }

    #[tokio::test]
    async fn test_unindex_never_indexed_is_noop() {
        let indexer = indexer();
        indexer.registry().set("lightning-button", TagMetadata::default());

        indexer.unindex_file(Path::new("/ws/lightningcomponents/ns/foo/foo.js"), LAYOUT);
        assert_eq!(indexer.registry().tag_names(), vec!["lightning-button"]);
    }

    #[tokio::test]
    async fn test_index_all() {
        let indexer = indexer();
        let workspace = StaticWorkspace(vec![
            PathBuf::from("/ws/lightningcomponents/ns/foo/foo.js"),
            PathBuf::from("/ws/lightningcomponents/ns/foo/helper.js"),
            PathBuf::from("/ws/lightningcomponents/other/bar/bar.js"),
        ]);

        let summary = indexer.index_all(&workspace).await;

        assert_eq!(summary, IndexSummary { files: 3, indexed: 2 });
        assert_eq!(indexer.registry().tag_names(), vec!["ns-foo", "other-bar"]);
    }
}
