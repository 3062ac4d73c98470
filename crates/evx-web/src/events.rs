//! DOM event listeners feeding the controller

use std::cell::RefCell;
use std::rc::Rc;

use evx_core::{Controller, InputEvent, MarkupConfig};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, KeyboardEvent};

use crate::dom::{element_by_id, DomPage};
use crate::error::WebError;

/// Controller shared by every listener closure
pub type SharedController = Rc<RefCell<Controller<DomPage>>>;

/// Register all page listeners. Closures live as long as the page.
pub fn install(
    controller: &SharedController,
    document: &Document,
    markup: &MarkupConfig,
) -> Result<(), WebError> {
    let (modal, viewer) = {
        let c = controller.borrow();
        (c.page().modal().clone(), c.page().viewer().clone())
    };

    let hotspots = install_hotspots(controller, document, markup)?;
    tracing::debug!(hotspots, "Hotspot listeners installed");

    let close = document
        .query_selector(&markup.close_selector)?
        .ok_or_else(|| WebError::MissingElement(markup.close_selector.clone()))?;
    on_event(controller, &close, "click", |_| Some(InputEvent::CloseClicked))?;

    let backdrop = JsValue::from(modal.clone());
    on_event(controller, &modal, "click", move |event| {
        let target = event.target().map(JsValue::from);
        is_backdrop_target(target.as_ref(), &backdrop).then_some(InputEvent::BackdropClicked)
    })?;

    on_event(controller, document, "keydown", |event| {
        event
            .dyn_ref::<KeyboardEvent>()
            .map(|key| InputEvent::KeyPressed(key.key()))
    })?;

    let rotate = element_by_id(document, &markup.rotate_toggle_id)?;
    on_event(controller, &rotate, "click", |_| {
        Some(InputEvent::RotateToggleClicked)
    })?;

    let reset = element_by_id(document, &markup.reset_view_id)?;
    on_event(controller, &reset, "click", |_| {
        Some(InputEvent::ResetViewClicked)
    })?;

    on_event(controller, &viewer, "load", |_| Some(InputEvent::ModelLoaded))?;
    on_event(controller, &viewer, "error", |event| {
        Some(InputEvent::ModelFailed(describe_error(&event)))
    })?;

    Ok(())
}

/// One click listener per hotspot; returns how many were wired
fn install_hotspots(
    controller: &SharedController,
    document: &Document,
    markup: &MarkupConfig,
) -> Result<u32, WebError> {
    let nodes = document.query_selector_all(&markup.hotspot_selector)?;
    let mut installed = 0;

    for i in 0..nodes.length() {
        let Some(hotspot) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        let Some(id) = hotspot.get_attribute(&markup.hotspot_attribute) else {
            tracing::warn!(
                attribute = %markup.hotspot_attribute,
                "Hotspot without component id, skipping"
            );
            continue;
        };

        on_event(controller, &hotspot, "click", move |_| {
            Some(InputEvent::HotspotClicked(id.clone()))
        })?;
        installed += 1;
    }

    Ok(installed)
}

/// Attach a listener that maps a DOM event to an optional controller input
fn on_event<F>(
    controller: &SharedController,
    target: &EventTarget,
    kind: &str,
    mut map: F,
) -> Result<(), WebError>
where
    F: FnMut(Event) -> Option<InputEvent> + 'static,
{
    let controller = controller.clone();
    let listener = Closure::wrap(Box::new(move |event: Event| {
        if let Some(input) = map(event) {
            dispatch(&controller, input);
        }
    }) as Box<dyn FnMut(Event)>);

    target.add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(())
}

fn dispatch(controller: &SharedController, input: InputEvent) {
    match controller.try_borrow_mut() {
        Ok(mut c) => c.handle(input),
        Err(_) => tracing::warn!(?input, "Controller busy, dropping event"),
    }
}

/// A modal click closes it only when it lands on the modal element itself;
/// clicks bubbling up from the content carry a different target.
fn is_backdrop_target<T: PartialEq>(target: Option<&T>, backdrop: &T) -> bool {
    target == Some(backdrop)
}

/// Best-effort description of a viewer `error` event
fn describe_error(event: &Event) -> String {
    let event_value: &JsValue = event.as_ref();
    match js_sys::Reflect::get(event_value, &"detail".into()) {
        Ok(detail) if !detail.is_undefined() && !detail.is_null() => {
            js_sys::JSON::stringify(&detail)
                .ok()
                .and_then(|s| s.as_string())
                .unwrap_or_else(|| format!("{:?}", detail))
        }
        _ => event.type_(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Target(&'static str);

    #[test]
    fn test_backdrop_target() {
        let modal = Target("componentModal");

        assert!(is_backdrop_target(Some(&Target("componentModal")), &modal));
        assert!(!is_backdrop_target(Some(&Target("componentTitle")), &modal));
        assert!(!is_backdrop_target(Some(&Target("componentViewer")), &modal));
        assert!(!is_backdrop_target(None, &modal));
    }
}
