//! Error types for tag resolution and catalog loading.

use std::path::PathBuf;

/// Why a path could not be mapped to a component tag.
///
/// Every variant is an expected outcome for non-component files. Callers on
/// the indexing path treat them as a silent skip.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// File base name differs from its parent directory name.
    #[error("not a canonical component file: {}", path.display())]
    NotCanonical { path: PathBuf },

    /// Path is too shallow to carry a namespace directory.
    #[error("no namespace directory above component: {}", path.display())]
    MissingNamespace { path: PathBuf },

    /// Path has no usable file stem or parent directory.
    #[error("invalid component path: {}", path.display())]
    InvalidPath { path: PathBuf },
}

/// Error type for standard catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog document could not be read.
    #[error("failed to read standard catalog {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog document is not valid JSON or does not match the schema.
    #[error("failed to parse standard catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but an entry violates the catalog rules.
    #[error("invalid catalog entry `{component}`: {reason}")]
    InvalidEntry { component: String, reason: String },
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
