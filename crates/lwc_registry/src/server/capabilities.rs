//! LSP server capabilities declaration.

use tower_lsp::lsp_types::*;

use crate::ide::trigger_characters;

/// Glob for the component sources the client should watch.
pub const COMPONENT_GLOB: &str = "**/lightningcomponents/**/*.js";

/// Build the server capabilities to advertise to the client.
pub fn server_capabilities() -> ServerCapabilities {
    ServerCapabilities {
        // Document synchronization
        text_document_sync: Some(TextDocumentSyncCapability::Options(
            TextDocumentSyncOptions {
                open_close: Some(true),
                change: Some(TextDocumentSyncKind::INCREMENTAL),
                will_save: Some(false),
                will_save_wait_until: Some(false),
                save: None,
            },
        )),

        hover_provider: Some(HoverProviderCapability::Simple(true)),

        completion_provider: Some(CompletionOptions {
            trigger_characters: Some(trigger_characters()),
            resolve_provider: Some(false),
            work_done_progress_options: WorkDoneProgressOptions::default(),
            all_commit_characters: None,
            completion_item: None,
        }),

        ..Default::default()
    }
}

/// Registration asking the client to report component source changes.
pub fn watched_files_registration() -> Registration {
    let options = DidChangeWatchedFilesRegistrationOptions {
        watchers: vec![FileSystemWatcher {
            glob_pattern: GlobPattern::String(COMPONENT_GLOB.to_string()),
            kind: Some(WatchKind::Create | WatchKind::Change | WatchKind::Delete),
        }],
    };

    Registration {
        id: "lwc-watched-components".to_string(),
        method: "workspace/didChangeWatchedFiles".to_string(),
        register_options: serde_json::to_value(options).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capabilities() {
        let caps = server_capabilities();
        assert!(caps.hover_provider.is_some());
        assert!(caps
            .completion_provider
            .unwrap()
            .trigger_characters
            .unwrap()
            .contains(&"<".to_string()));
    }

    #[test]
    fn test_watched_files_registration() {
        let registration = watched_files_registration();
        let options = registration.register_options.unwrap();
        assert_eq!(options["watchers"][0]["globPattern"], COMPONENT_GLOB);
    }
}
