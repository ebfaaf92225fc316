//! Open-document store backed by ropes.

use dashmap::DashMap;
use ropey::Rope;
use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent, Url};

use crate::utils::position_to_offset;

/// A document opened by the client.
#[derive(Debug)]
pub struct Document {
    pub uri: Url,
    pub version: i32,
    pub content: Rope,
}

impl Document {
    /// Create a new document.
    pub fn new(uri: Url, content: &str, version: i32) -> Self {
        Self {
            uri,
            version,
            content: Rope::from_str(content),
        }
    }

    /// Get the document content as a string.
    pub fn text(&self) -> String {
        self.content.to_string()
    }

    /// Text from the start of the document up to `position`.
    pub fn text_before(&self, position: Position) -> Option<String> {
        let offset = position_to_offset(&self.content, position)?;
        Some(self.content.byte_slice(..offset).to_string())
    }

    /// The tag-like word (letters, digits, `-`, `_`) under `position`.
    pub fn word_at(&self, position: Position) -> Option<String> {
        let offset = position_to_offset(&self.content, position)?;
        let char_idx = self.content.try_byte_to_char(offset).ok()?;
        let is_word = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';

        let mut start = char_idx;
        while start > 0 && is_word(self.content.char(start - 1)) {
            start -= 1;
        }
        let mut end = char_idx;
        while end < self.content.len_chars() && is_word(self.content.char(end)) {
            end += 1;
        }

        if start == end {
            None
        } else {
            Some(self.content.slice(start..end).to_string())
        }
    }

    /// Apply an incremental or full change.
    pub fn apply_change(&mut self, change: &TextDocumentContentChangeEvent, new_version: i32) {
        self.version = new_version;

        let Some(range) = change.range else {
            self.content = Rope::from_str(&change.text);
            return;
        };

        let start = position_to_offset(&self.content, range.start)
            .and_then(|o| self.content.try_byte_to_char(o).ok());
        let end = position_to_offset(&self.content, range.end)
            .and_then(|o| self.content.try_byte_to_char(o).ok());

        if let (Some(start), Some(end)) = (start, end) {
            self.content.remove(start..end);
            self.content.insert(start, &change.text);
        }
    }
}

/// Thread-safe document store.
#[derive(Default)]
pub struct DocumentStore {
    documents: DashMap<Url, Document>,
}

impl DocumentStore {
    /// Create a new document store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a document, replacing any previous version.
    pub fn open(&self, uri: Url, content: &str, version: i32) {
        let doc = Document::new(uri.clone(), content, version);
        self.documents.insert(uri, doc);
    }

    /// Close a document.
    pub fn close(&self, uri: &Url) {
        self.documents.remove(uri);
    }

    /// Get a document by URI.
    pub fn get(&self, uri: &Url) -> Option<dashmap::mapref::one::Ref<'_, Url, Document>> {
        self.documents.get(uri)
    }

    /// Apply changes to a document.
    pub fn apply_changes(
        &self,
        uri: &Url,
        changes: Vec<TextDocumentContentChangeEvent>,
        version: i32,
    ) {
        if let Some(mut doc) = self.documents.get_mut(uri) {
            for change in changes {
                doc.apply_change(&change, version);
            }
        }
    }

    /// Check if a document is open.
    pub fn contains(&self, uri: &Url) -> bool {
        self.documents.contains_key(uri)
    }

    /// Get the number of open documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
