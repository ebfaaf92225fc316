//! Completion provider for component tags and attributes.

use tower_lsp::lsp_types::{
    CompletionItem, CompletionItemKind, CompletionResponse, Documentation, MarkupContent,
    MarkupKind,
};

use super::CursorContext;
use crate::registry::{TagMetadata, TagRegistry};

/// Characters that trigger completion.
pub const TRIGGER_CHARACTERS: &[char] = &[
    '<', // Tag name completion
    '-', // Namespaced tag names
    ' ', // Attribute completion
];

/// Get trigger characters as strings.
pub fn trigger_characters() -> Vec<String> {
    TRIGGER_CHARACTERS.iter().map(|c| c.to_string()).collect()
}

/// Completion service backed by the tag registry.
pub struct CompletionService;

impl CompletionService {
    /// Get completions for the text preceding the cursor.
    pub fn complete(registry: &TagRegistry, before: &str) -> Option<CompletionResponse> {
        let items = match CursorContext::detect(before) {
            CursorContext::TagName { partial } => Self::tag_completions(registry, &partial),
            CursorContext::Attribute { tag, partial } => {
                Self::attribute_completions(registry, &tag, &partial)
            }
            CursorContext::Text => Vec::new(),
        };

        if items.is_empty() {
            None
        } else {
            Some(CompletionResponse::Array(items))
        }
    }

    /// Tag names starting with `partial`.
    fn tag_completions(registry: &TagRegistry, partial: &str) -> Vec<CompletionItem> {
        registry
            .list()
            .into_iter()
            .filter(|(name, _)| name.starts_with(partial))
            .map(|(name, meta)| Self::tag_item(&name, &meta))
            .collect()
    }

    /// Attributes of `tag` starting with `partial`, skipping unknown tags.
    fn attribute_completions(
        registry: &TagRegistry,
        tag: &str,
        partial: &str,
    ) -> Vec<CompletionItem> {
        let Some(meta) = registry.get(tag) else {
            return Vec::new();
        };

        meta.attributes
            .iter()
            .filter(|attr| attr.starts_with(partial))
            .map(|attr| CompletionItem {
                label: attr.clone(),
                kind: Some(CompletionItemKind::PROPERTY),
                detail: Some(format!("<{}> attribute", tag)),
                ..Default::default()
            })
            .collect()
    }

    fn tag_item(name: &str, meta: &TagMetadata) -> CompletionItem {
        CompletionItem {
            label: name.to_string(),
            kind: Some(CompletionItemKind::CLASS),
            detail: Some(format!("{} attributes", meta.attributes.len())),
            documentation: Some(Documentation::MarkupContent(MarkupContent {
                kind: MarkupKind::Markdown,
                value: meta.documentation.clone(),
            })),
            ..Default::default()
        }
    }
}
