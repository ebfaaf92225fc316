//! # lwc_registry
//!
//! Live tag registry and language server core for Lightning Web Components.
//!
//! ## Architecture
//!
//! ```text
//! +------------------------------------------------------------------+
//! |                     lwc_registry (LSP Server)                     |
//! +------------------------------------------------------------------+
//! |                                                                    |
//! |  +--------------------+     +-------------------+                  |
//! |  |   LSP Transport    |     |   Server Core     |                  |
//! |  |   (tower-lsp)      |<--->|   (request/event) |                  |
//! |  +--------------------+     +-------------------+                  |
//! |                                      |                             |
//! |                   +------------------+------------------+          |
//! |                   v                                     v          |
//! |  +----------------------------+      +---------------------------+ |
//! |  |  Standard Catalog Loader   |      |     Change Processor      | |
//! |  |  (bundled built-ins)       |      |  (watched file batches)   | |
//! |  +----------------------------+      +---------------------------+ |
//! |                   |                                     |          |
//! |                   |                  +------------------+          |
//! |                   |                  v                             |
//! |                   |      +---------------------------+             |
//! |                   |      |  Indexer                  |             |
//! |                   |      |  NameResolver + Compiler  |             |
//! |                   |      +---------------------------+             |
//! |                   v                  |                             |
//! |  +-----------------------------------------------------------+    |
//! |  |                      Tag Registry                          |    |
//! |  |  lightning-button -> [icon-name, label, ...]               |    |
//! |  |  c-myCard         -> [title-text, ...]                     |    |
//! |  +-----------------------------------------------------------+    |
//! +------------------------------------------------------------------+
//! ```
//!
//! ## Tag identity
//!
//! A component is defined by `<namespace>/<tag>/<tag>.js` under a
//! `lightningcomponents` directory. In single-namespace (SFDX) projects every
//! custom component is registered as `c-<tag>`; otherwise the namespace is
//! the directory above the component directory.
//!
//! ## Usage
//!
//! ```no_run
//! #[tokio::main]
//! async fn main() {
//!     lwc_registry::serve().await.unwrap();
//! }
//! ```

pub mod catalog;
pub mod changes;
pub mod compiler;
pub mod config;
pub mod document;
pub mod error;
pub mod ide;
pub mod indexer;
pub mod naming;
pub mod registry;
pub mod server;
pub mod utils;
pub mod workspace;

pub use catalog::{load_standard_catalog, CatalogSource};
pub use changes::{ChangeKind, ChangeProcessor, FileChange};
pub use compiler::{ApiScanner, ComponentCompiler, DiagnosticSink};
pub use error::{CatalogError, NameError};
pub use indexer::{IndexSummary, Indexer};
pub use naming::{resolve, to_kebab, ComponentName, LayoutMode};
pub use registry::{TagMetadata, TagRegistry};
pub use server::LwcServer;
pub use workspace::{FsWorkspace, WorkspaceDiscovery};

use tower_lsp::{LspService, Server};

/// Initialize file-based logging to .sfdx/tools/lwc-ls.log
fn init_file_logging() {
    use std::fs::{create_dir_all, OpenOptions};
    use std::sync::Once;
    use tracing_subscriber::fmt::writer::MakeWriterExt;

    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let log_dir = std::env::current_dir()
            .ok()
            .map(|p| p.join(".sfdx/tools"))
            .unwrap_or_else(|| std::env::temp_dir().join("lwc-ls"));

        let _ = create_dir_all(&log_dir);

        let log_path = log_dir.join("lwc-ls.log");

        // Fall back to stderr when the log file can't be opened
        if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
            tracing_subscriber::fmt()
                .with_writer(file.and(std::io::stderr))
                .with_ansi(false)
                .init();
        } else {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .init();
        }
    });
}

fn build_service() -> (LspService<LwcServer>, tower_lsp::ClientSocket) {
    LspService::build(LwcServer::new)
        .custom_method("lwc/setCustomAttributes", LwcServer::set_custom_attributes)
        .custom_method("lwc/tags", LwcServer::tags)
        .finish()
}

/// Start the LSP server using stdio transport.
pub async fn serve() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_file_logging();

    tracing::info!("Starting lwc language server");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = build_service();
    Server::new(stdin, stdout, socket).serve(service).await;

    Ok(())
}

/// Start the LSP server on a TCP socket.
///
/// This is useful for debugging and testing.
pub async fn serve_tcp(port: u16) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use tokio::net::TcpListener;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting lwc language server on port {}", port);

    let listener = TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    let (stream, addr) = listener.accept().await?;
    tracing::info!("Accepted connection from {}", addr);

    let (read, write) = tokio::io::split(stream);

    let (service, socket) = build_service();
    Server::new(read, write, socket).serve(service).await;

    Ok(())
}
