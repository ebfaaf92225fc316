//! Standard component catalog loading.
//!
//! The catalog is a JSON object keyed by built-in component name:
//!
//! ```json
//! { "button": { "attributes": [{ "name": "iconName" }] } }
//! ```
//!
//! Each entry is registered as `lightning-<name>` with kebab-case attributes.
//! The whole document is validated before anything is inserted, so a failed
//! load leaves the registry untouched.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{CatalogError, CatalogResult};
use crate::naming::{qualified_name, to_kebab, STANDARD_NAMESPACE};
use crate::registry::{TagMetadata, TagRegistry};

/// Catalog bundled with the server.
pub const BUNDLED_CATALOG: &str = include_str!("../resources/standard-lwc.json");

/// Where to read the standard catalog from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CatalogSource {
    /// The catalog compiled into the binary.
    #[default]
    Bundled,
    /// A catalog document on disk.
    File(PathBuf),
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    #[serde(default)]
    attributes: Option<Vec<CatalogAttribute>>,
}

#[derive(Debug, Deserialize)]
struct CatalogAttribute {
    name: String,
}

/// Parse and validate a catalog document into registry entries.
pub fn parse_catalog(text: &str) -> CatalogResult<Vec<(String, TagMetadata)>> {
    let document: BTreeMap<String, CatalogEntry> = serde_json::from_str(text)?;

    document
        .into_iter()
        .map(|(component, entry)| {
            if component.trim().is_empty() {
                return Err(CatalogError::InvalidEntry {
                    component,
                    reason: "empty component name".to_string(),
                });
            }

            let mut attributes = Vec::new();
            for attr in entry.attributes.unwrap_or_default() {
                if attr.name.trim().is_empty() {
                    return Err(CatalogError::InvalidEntry {
                        component,
                        reason: "empty attribute name".to_string(),
                    });
                }
                attributes.push(to_kebab(&attr.name));
            }

            Ok((
                qualified_name(STANDARD_NAMESPACE, &component),
                TagMetadata::new(attributes),
            ))
        })
        .collect()
}

/// Load a catalog document from text into the registry.
///
/// Returns the number of built-in tags registered.
pub fn load_catalog_str(registry: &TagRegistry, text: &str) -> CatalogResult<usize> {
    let entries = parse_catalog(text)?;
    let count = entries.len();

    for (name, metadata) in entries {
        registry.set(name, metadata);
    }

    Ok(count)
}

/// Load the standard catalog from `source` into the registry.
pub async fn load_standard_catalog(
    registry: &TagRegistry,
    source: &CatalogSource,
) -> CatalogResult<usize> {
    let count = match source {
        CatalogSource::Bundled => load_catalog_str(registry, BUNDLED_CATALOG)?,
        CatalogSource::File(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| CatalogError::Read {
                    path: path.clone(),
                    source,
                })?;
            load_catalog_str(registry, &text)?
        }
    };

    tracing::info!("loaded {} standard components", count);
    Ok(count)
}
