//! EV Explorer Core - Component catalog, configuration and presentation logic
//!
//! This crate holds everything the explorer page does that does not need a
//! browser:
//! - Component catalog (identifier to record mapping plus digit shortcuts)
//! - Page configuration (markup ids, catalog source, log level)
//! - Viewer state and the presentation controller driving a [`Page`]

pub mod catalog;
pub mod config;
pub mod controller;
pub mod state;

pub use catalog::{Catalog, CatalogDocument, CatalogError, ComponentId, ComponentRecord, Fact};
pub use config::{ConfigError, ExplorerConfig, MarkupConfig, ViewerConfig};
pub use controller::{Controller, InputEvent, Page, TextField};
pub use state::ViewerState;
