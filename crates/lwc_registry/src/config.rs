//! Configuration file loading.
//!
//! Reads `lwc.config.json` from the workspace root. A missing file yields the
//! defaults; an unreadable or invalid one is logged and also yields the
//! defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogSource;
use crate::naming::LayoutMode;
use crate::workspace::{detect_layout, FsWorkspace};

/// Config file name.
pub const CONFIG_FILE: &str = "lwc.config.json";

/// Layout selection in the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutSetting {
    /// Detect from the presence of `sfdx-project.json`.
    #[default]
    Auto,
    SingleNamespace,
    DirectoryNamespace,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LwcConfig {
    /// Namespace layout of the workspace.
    pub layout: LayoutSetting,

    /// Path to a standard catalog overriding the bundled one. Relative paths
    /// are resolved against the workspace root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standard_catalog: Option<PathBuf>,

    /// Extra directory names skipped during discovery.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore: Vec<String>,
}

impl LwcConfig {
    /// Resolve the layout mode for the workspace at `root`.
    pub fn layout_mode(&self, root: &Path) -> LayoutMode {
        match self.layout {
            LayoutSetting::Auto => detect_layout(root),
            LayoutSetting::SingleNamespace => LayoutMode::SingleNamespace,
            LayoutSetting::DirectoryNamespace => LayoutMode::DirectoryNamespace,
        }
    }

    /// Resolve the standard catalog source for the workspace at `root`.
    pub fn catalog_source(&self, root: &Path) -> CatalogSource {
        match &self.standard_catalog {
            Some(path) if path.is_absolute() => CatalogSource::File(path.clone()),
            Some(path) => CatalogSource::File(root.join(path)),
            None => CatalogSource::Bundled,
        }
    }

    /// Build the filesystem workspace described by this config.
    pub fn workspace(&self, root: &Path) -> FsWorkspace {
        FsWorkspace::new(root)
            .with_layout(self.layout_mode(root))
            .with_ignored(self.ignore.clone())
    }
}

/// Load `lwc.config.json` from `dir`.
pub fn load_config(dir: &Path) -> LwcConfig {
    let config_path = dir.join(CONFIG_FILE);

    if !config_path.exists() {
        return LwcConfig::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", config_path.display(), e);
                LwcConfig::default()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", config_path.display(), e);
            LwcConfig::default()
        }
    }
}
