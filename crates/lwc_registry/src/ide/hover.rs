//! Hover information for component tags.

use tower_lsp::lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind};

use crate::registry::{TagMetadata, TagRegistry};

/// Hover service backed by the tag registry.
pub struct HoverService;

impl HoverService {
    /// Hover for the tag named `word`, if it is registered.
    pub fn hover(registry: &TagRegistry, word: &str) -> Option<Hover> {
        let meta = registry.get(word)?;

        Some(Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value: Self::render(word, &meta),
            }),
            range: None,
        })
    }

    /// Render markdown for a tag.
    pub fn render(tag: &str, meta: &TagMetadata) -> String {
        let mut value = format!("**<{}>**\n\n{}", tag, meta.documentation);

        if !meta.attributes.is_empty() {
            value.push_str("\n\n**Attributes:** ");
            let attrs: Vec<_> = meta.attributes.iter().map(|a| format!("`{}`", a)).collect();
            value.push_str(&attrs.join(", "));
        }

        value
    }
}
