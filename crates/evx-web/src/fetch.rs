//! Fetching the optional config and catalog documents

use evx_core::{Catalog, ExplorerConfig};
use gloo_net::http::Request;

use crate::error::WebError;

/// Decoded `?config=`, `?catalog=` and `?log=` parameters of the page URL
#[derive(Debug, Clone, Default)]
pub struct UrlParams {
    pub config: Option<String>,
    pub catalog: Option<String>,
    pub log: Option<String>,
}

impl UrlParams {
    /// Read the parameters with the browser's own URL parser
    pub fn from_href(href: &str) -> Result<Self, WebError> {
        let params = web_sys::Url::new(href)?.search_params();
        Ok(Self {
            config: params.get("config"),
            catalog: params.get("catalog"),
            log: params.get("log"),
        })
    }
}

/// Fetch a text document relative to the page
pub async fn fetch_text(url: &str) -> Result<String, WebError> {
    let response = Request::get(url).send().await?;

    if !response.ok() {
        return Err(WebError::Status {
            url: url.to_string(),
            status: response.status(),
            status_text: response.status_text(),
        });
    }

    Ok(response.text().await?)
}

/// Build the page config: defaults, then `?config=` document, then URL overrides.
///
/// Runs before logging is set up, so problems go straight to the console.
pub async fn resolve_config(params: &UrlParams) -> ExplorerConfig {
    let mut config = ExplorerConfig::default();

    if let Some(url) = &params.config {
        let loaded = match fetch_text(url).await {
            Ok(text) => ExplorerConfig::from_toml(&text).map_err(WebError::from),
            Err(e) => Err(e),
        };
        match loaded {
            Ok(loaded) => config = loaded,
            Err(e) => web_sys::console::warn_1(
                &format!("Ignoring config from {}: {}", url, e).into(),
            ),
        }
    }

    config.apply_overrides(params.catalog.clone(), params.log.clone());
    config
}

/// Load the configured catalog, falling back to the built-in one
pub async fn load_catalog(url: Option<&str>) -> Result<Catalog, WebError> {
    if let Some(url) = url {
        let loaded = match fetch_text(url).await {
            Ok(text) => Catalog::parse(&text).map_err(WebError::from),
            Err(e) => Err(e),
        };
        match loaded {
            Ok(catalog) if catalog.is_empty() => {
                tracing::warn!(url, "Catalog has no components, using built-in");
            }
            Ok(catalog) => {
                tracing::info!(url, components = catalog.len(), "Loaded catalog");
                return Ok(catalog);
            }
            Err(e) => {
                tracing::error!(url, error = %e, "Failed to load catalog, using built-in");
            }
        }
    }

    Ok(Catalog::builtin()?)
}
