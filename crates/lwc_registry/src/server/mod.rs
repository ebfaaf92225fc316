//! LSP server implementation.
//!
//! This module contains the core LSP server using tower-lsp.

mod capabilities;
mod state;

pub use capabilities::*;
pub use state::*;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::ide::{CompletionService, HoverService};
use crate::registry::TagRegistry;

/// Parameters of `lwc/setCustomAttributes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCustomAttributesParams {
    pub namespace: String,
    pub tag: String,
    pub attributes: Vec<String>,
}

/// A registry entry as returned by `lwc/tags`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
    pub name: String,
    pub attributes: Vec<String>,
    pub documentation: String,
}

impl TagEntry {
    /// Snapshot every registry entry, sorted by name.
    pub fn collect(registry: &TagRegistry) -> Vec<TagEntry> {
        registry
            .list()
            .into_iter()
            .map(|(name, meta)| TagEntry {
                name,
                attributes: meta.attributes.clone(),
                documentation: meta.documentation.clone(),
            })
            .collect()
    }
}

/// The LWC language server.
pub struct LwcServer {
    /// LSP client for sending notifications
    client: Client,
    /// Server state, shared with background indexing tasks
    state: Arc<ServerState>,
}

impl LwcServer {
    /// Create a new server instance.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            state: Arc::new(ServerState::new()),
        }
    }

    /// Get the server state.
    pub fn state(&self) -> &Arc<ServerState> {
        &self.state
    }

    /// Handle `lwc/setCustomAttributes`.
    pub async fn set_custom_attributes(&self, params: SetCustomAttributesParams) -> Result<()> {
        let attributes: Vec<&str> = params.attributes.iter().map(String::as_str).collect();
        self.state
            .registry()
            .set_override(&params.namespace, &params.tag, &attributes);
        Ok(())
    }

    /// Handle `lwc/tags`.
    pub async fn tags(&self) -> Result<Vec<TagEntry>> {
        Ok(TagEntry::collect(self.state.registry()))
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for LwcServer {
    #[allow(deprecated)] // root_uri is still what most clients send
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let root = params
            .workspace_folders
            .as_ref()
            .and_then(|folders| folders.first())
            .map(|folder| folder.uri.clone())
            .or(params.root_uri)
            .and_then(|uri| uri.to_file_path().ok());

        if let Some(root) = root {
            tracing::info!("workspace root: {}", root.display());
            self.state.set_workspace_root(&root);
        }

        Ok(InitializeResult {
            capabilities: server_capabilities(),
            server_info: Some(ServerInfo {
                name: "lwc-language-server".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        if let Err(e) = self
            .client
            .register_capability(vec![watched_files_registration()])
            .await
        {
            tracing::warn!("failed to register file watcher: {}", e);
        }

        let state = Arc::clone(&self.state);
        let client = self.client.clone();
        tokio::spawn(async move {
            match state.bootstrap().await {
                Ok(summary) => {
                    client
                        .log_message(
                            MessageType::INFO,
                            format!("indexed {} custom components", summary.indexed),
                        )
                        .await;
                }
                Err(e) => {
                    tracing::error!("{}", e);
                    client.show_message(MessageType::ERROR, e.to_string()).await;
                }
            }
        });
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        self.state.documents.open(doc.uri, &doc.text, doc.version);
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        self.state.documents.apply_changes(
            &params.text_document.uri,
            params.content_changes,
            params.text_document.version,
        );
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.state.documents.close(&params.text_document.uri);
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        // Batches run independently so a slow compile never blocks the client.
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let summary = state.process_events(&params.changes).await;
            tracing::debug!("processed watched files: {:?}", summary);
        });
    }

    async fn hover(&self, params: HoverParams) -> Result<Option<Hover>> {
        let uri = &params.text_document_position_params.text_document.uri;
        let position = params.text_document_position_params.position;

        let Some(word) = self
            .state
            .documents
            .get(uri)
            .and_then(|doc| doc.word_at(position))
        else {
            return Ok(None);
        };

        Ok(HoverService::hover(self.state.registry(), &word))
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = &params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;

        let Some(before) = self
            .state
            .documents
            .get(uri)
            .and_then(|doc| doc.text_before(position))
        else {
            return Ok(None);
        };

        Ok(CompletionService::complete(self.state.registry(), &before))
    }
}
