//! Page configuration loading and URL overrides

use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Unknown log level '{0}'")]
    InvalidLogLevel(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Maximum tracing level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub markup: MarkupConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            catalog: CatalogConfig::default(),
            markup: MarkupConfig::default(),
            viewer: ViewerConfig::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// URL of a catalog document; the built-in catalog is used when unset
    #[serde(default)]
    pub url: Option<String>,
}

/// Element ids and selectors the page markup must provide
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    pub modal_id: String,
    /// Selector for the close control inside the modal
    pub close_selector: String,
    pub viewer_id: String,
    pub rotate_toggle_id: String,
    pub reset_view_id: String,
    pub number_id: String,
    pub title_id: String,
    pub description_id: String,
    pub specs_id: String,
    pub facts_id: String,
    pub hotspot_selector: String,
    /// Attribute on each hotspot holding its component id
    pub hotspot_attribute: String,
    /// Selector for the loading indicator inside the viewer
    pub loading_selector: String,
    /// Class of the inline error element added next to the viewer
    pub error_class: String,
    /// Class toggled on the modal and rotate toggle when active
    pub active_class: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            modal_id: "componentModal".to_string(),
            close_selector: ".modal-close".to_string(),
            viewer_id: "componentViewer".to_string(),
            rotate_toggle_id: "rotateToggle".to_string(),
            reset_view_id: "resetView".to_string(),
            number_id: "componentNumber".to_string(),
            title_id: "componentTitle".to_string(),
            description_id: "componentDescription".to_string(),
            specs_id: "componentSpecs".to_string(),
            facts_id: "componentFacts".to_string(),
            hotspot_selector: ".hotspot".to_string(),
            hotspot_attribute: "data-component".to_string(),
            loading_selector: ".model-loading".to_string(),
            error_class: "model-error".to_string(),
            active_class: "active".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Headline of the inline message shown when a model fails to load
    #[serde(default = "default_error_message")]
    pub error_message: String,
    #[serde(default = "default_error_hint")]
    pub error_hint: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            error_message: default_error_message(),
            error_hint: default_error_hint(),
        }
    }
}

fn default_error_message() -> String {
    "Error loading model".to_string()
}

fn default_error_hint() -> String {
    "Check console for details".to_string()
}

impl ExplorerConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply already-decoded `?catalog=` and `?log=` URL parameters
    pub fn apply_overrides(&mut self, catalog: Option<String>, log: Option<String>) {
        if let Some(url) = catalog {
            self.catalog.url = Some(url);
        }
        if let Some(level) = log {
            self.log_level = level;
        }
    }

    /// Parsed `log_level`
    pub fn max_level(&self) -> Result<tracing::Level, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}

/// Load configuration from file, falling back to defaults when it is absent
#[cfg(not(target_arch = "wasm32"))]
pub fn load_config(path: &Path) -> Result<ExplorerConfig, ConfigError> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config = ExplorerConfig::from_toml(&content)?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    } else {
        tracing::info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        Ok(ExplorerConfig::default())
    }
}
