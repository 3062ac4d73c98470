//! Page startup: config, logging, catalog, controller, listeners

use std::cell::RefCell;
use std::rc::Rc;

use evx_core::{Controller, ExplorerConfig};

use crate::dom::DomPage;
use crate::error::WebError;
use crate::events;
use crate::fetch::{load_catalog, resolve_config, UrlParams};

pub async fn run() -> Result<(), WebError> {
    let window = web_sys::window().ok_or(WebError::NoWindow)?;
    let document = window.document().ok_or(WebError::NoDocument)?;
    let href = window.location().href()?;
    let params = UrlParams::from_href(&href)?;

    let config = resolve_config(&params).await;
    init_logging(&config);

    if let Some(url) = &params.catalog {
        tracing::info!(url = %url, "Using catalog from URL parameter");
    }

    let catalog = load_catalog(config.catalog.url.as_deref()).await?;
    let components = catalog.len();
    tracing::debug!(ids = ?catalog.ids().collect::<Vec<_>>(), "Catalog components");

    let page = DomPage::bind(&document, &config.markup)?;
    let mut controller = Controller::new(catalog, page).with_viewer_config(config.viewer.clone());
    controller.initialize();

    let controller = Rc::new(RefCell::new(controller));
    events::install(&controller, &document, &config.markup)?;

    tracing::info!(components, "EV Explorer ready");
    Ok(())
}

fn init_logging(config: &ExplorerConfig) {
    let level = config.max_level().unwrap_or_else(|e| {
        web_sys::console::warn_1(&format!("{}, logging at info", e).into());
        tracing::Level::INFO
    });

    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(level)
            .build(),
    );
}
