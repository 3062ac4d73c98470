//! Component catalog - Maps component identifiers to their descriptive records
//!
//! The catalog is data: it is parsed from a TOML (or JSON) document, validated
//! once and never mutated afterwards. Digit-key shortcuts are declared in the
//! document as an ordered list rather than derived from map order.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashMap;
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;
use thiserror::Error;

/// Catalog shipped with the page, used when no external catalog is configured
pub const BUILTIN_CATALOG: &str = include_str!("../assets/catalog.toml");

/// Digit keys usable as shortcuts, in order
const SHORTCUT_KEYS: [char; 9] = ['1', '2', '3', '4', '5', '6', '7', '8', '9'];

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Component id must not be empty")]
    EmptyId,
    #[error("Component '{0}' is defined more than once")]
    DuplicateComponent(String),
    #[error("Shortcut refers to unknown component '{0}'")]
    UnknownShortcut(String),
    #[error("{0} shortcuts declared, only digits 1-9 are available")]
    TooManyShortcuts(usize),
}

/// Identifier of a catalog component (e.g. "battery")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(pub String);

impl ComponentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ComponentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A headline figure shown as a value/label card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fact {
    pub value: String,
    pub label: String,
}

impl Fact {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Everything the modal shows for one component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: ComponentId,
    /// Short display label (e.g. "01")
    pub number: String,
    pub title: String,
    /// Asset reference handed to the 3D viewer as-is
    #[serde(rename = "model", alias = "modelPath", alias = "model_path")]
    pub model_path: String,
    #[serde(default)]
    pub description: String,
    /// Display order is document order
    #[serde(default)]
    pub specs: Vec<String>,
    /// Display order is document order
    #[serde(default)]
    pub facts: Vec<Fact>,
}

/// Catalog document as written on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDocument {
    /// Version of the catalog format
    #[serde(default = "default_version")]
    pub version: String,
    /// Component ids bound to digit keys 1..9, in order
    #[serde(default)]
    pub shortcuts: Vec<ComponentId>,
    #[serde(default)]
    pub component: Vec<ComponentRecord>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl CatalogDocument {
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Parse a document, picking JSON or TOML from its first character
    pub fn parse(content: &str) -> Result<Self, CatalogError> {
        if content.trim_start().starts_with('{') {
            Self::from_json(content)
        } else {
            Self::from_toml(content)
        }
    }
}

/// Validated, read-only component catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    components: HashMap<ComponentId, ComponentRecord>,
    /// Ids in document order
    order: Vec<ComponentId>,
    shortcuts: Vec<ComponentId>,
}

impl Catalog {
    /// Validate a parsed document and build the catalog from it
    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogError> {
        let mut components = HashMap::with_capacity(document.component.len());
        let mut order = Vec::with_capacity(document.component.len());

        for record in document.component {
            if record.id.as_str().is_empty() {
                return Err(CatalogError::EmptyId);
            }
            if components.contains_key(&record.id) {
                return Err(CatalogError::DuplicateComponent(record.id.0));
            }
            order.push(record.id.clone());
            components.insert(record.id.clone(), record);
        }

        if document.shortcuts.len() > SHORTCUT_KEYS.len() {
            return Err(CatalogError::TooManyShortcuts(document.shortcuts.len()));
        }
        if let Some(unknown) = document
            .shortcuts
            .iter()
            .find(|id| !components.contains_key(*id))
        {
            return Err(CatalogError::UnknownShortcut(unknown.0.clone()));
        }

        tracing::debug!(
            components = order.len(),
            shortcuts = document.shortcuts.len(),
            "Catalog built"
        );

        Ok(Self {
            components,
            order,
            shortcuts: document.shortcuts,
        })
    }

    /// Parse and validate a TOML or JSON catalog document
    pub fn parse(content: &str) -> Result<Self, CatalogError> {
        Self::from_document(CatalogDocument::parse(content)?)
    }

    /// Load a catalog document from a file (host tooling and tests)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// The catalog embedded in the crate
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::parse(BUILTIN_CATALOG)
    }

    /// Look up a component; a miss is not an error
    pub fn lookup(&self, id: &str) -> Option<&ComponentRecord> {
        self.components.get(id)
    }

    /// Resolve a key name ("1".."9") through the shortcut list
    pub fn shortcut(&self, key: &str) -> Option<&ComponentId> {
        let mut chars = key.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return None;
        };
        let index = SHORTCUT_KEYS.iter().position(|k| *k == c)?;
        self.shortcuts.get(index)
    }

    /// Component ids in document order
    pub fn ids(&self) -> impl Iterator<Item = &ComponentId> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
