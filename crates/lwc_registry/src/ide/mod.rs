//! IDE features backed by the tag registry.
//!
//! - Tag name completion after `<`
//! - Attribute completion inside an open tag
//! - Hover documentation for tags

pub mod completion;
pub mod hover;

pub use completion::{trigger_characters, CompletionService, TRIGGER_CHARACTERS};
pub use hover::HoverService;

/// Where the cursor sits in template markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorContext {
    /// Typing a tag name: `<c-fo|`
    TagName { partial: String },
    /// Inside an open tag after its name: `<c-foo lab|`
    Attribute { tag: String, partial: String },
    /// Anywhere else.
    Text,
}

impl CursorContext {
    /// Classify the cursor from the text preceding it.
    pub fn detect(before: &str) -> Self {
        let Some(open) = before.rfind('<') else {
            return Self::Text;
        };
        if before[open..].contains('>') {
            return Self::Text;
        }

        let inside = &before[open + 1..];
        if inside.starts_with('/') || inside.starts_with('!') {
            return Self::Text;
        }

        match inside.find(char::is_whitespace) {
            None => Self::TagName {
                partial: inside.to_string(),
            },
            Some(end) => {
                let partial = inside
                    .rsplit(|c: char| c.is_whitespace())
                    .next()
                    .unwrap_or_default();
                // Still inside a quoted attribute value.
                if inside.matches('"').count() % 2 == 1 || partial.contains('=') {
                    return Self::Text;
                }
                Self::Attribute {
                    tag: inside[..end].to_string(),
                    partial: partial.to_string(),
                }
            }
        }
    }
}
