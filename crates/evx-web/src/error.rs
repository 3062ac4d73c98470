//! Errors raised while wiring the page

use evx_core::{CatalogError, ConfigError};
use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug)]
pub enum WebError {
    #[error("No window available")]
    NoWindow,
    #[error("No document available")]
    NoDocument,
    #[error("Page markup is missing '{0}'")]
    MissingElement(String),
    #[error("JavaScript error: {0}")]
    Js(String),
    #[error("Fetch failed: {0}")]
    Fetch(#[from] gloo_net::Error),
    #[error("HTTP {status} {status_text} for {url}")]
    Status {
        url: String,
        status: u16,
        status_text: String,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<JsValue> for WebError {
    fn from(value: JsValue) -> Self {
        Self::Js(
            value
                .as_string()
                .unwrap_or_else(|| format!("{:?}", value)),
        )
    }
}
