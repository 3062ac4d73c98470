//! DOM-backed implementation of the controller's page

use evx_core::{Fact, MarkupConfig, Page, TextField};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::error::WebError;

/// Orbit/target value the viewer treats as "pick automatically"
const CAMERA_AUTO: &str = "auto auto auto";
const FOV_AUTO: &str = "auto";

const ERROR_STYLE: &str = "position: absolute; top: 50%; left: 50%; \
    transform: translate(-50%, -50%); color: var(--secondary); text-align: center;";

/// Page elements resolved once at startup
pub struct DomPage {
    document: Document,
    body: Option<HtmlElement>,
    modal: Element,
    viewer: HtmlElement,
    rotate_toggle: Element,
    number: Element,
    title: Element,
    description: Element,
    specs: Element,
    facts: Element,
    markup: MarkupConfig,
}

impl DomPage {
    /// Look up every element the controller writes to
    pub fn bind(document: &Document, markup: &MarkupConfig) -> Result<Self, WebError> {
        let viewer = element_by_id(document, &markup.viewer_id)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| WebError::MissingElement(markup.viewer_id.clone()))?;

        Ok(Self {
            document: document.clone(),
            body: document.body(),
            modal: element_by_id(document, &markup.modal_id)?,
            viewer,
            rotate_toggle: element_by_id(document, &markup.rotate_toggle_id)?,
            number: element_by_id(document, &markup.number_id)?,
            title: element_by_id(document, &markup.title_id)?,
            description: element_by_id(document, &markup.description_id)?,
            specs: element_by_id(document, &markup.specs_id)?,
            facts: element_by_id(document, &markup.facts_id)?,
            markup: markup.clone(),
        })
    }

    pub fn modal(&self) -> &Element {
        &self.modal
    }

    pub fn viewer(&self) -> &HtmlElement {
        &self.viewer
    }

    fn loading_indicator(&self) -> Option<HtmlElement> {
        self.viewer
            .query_selector(&self.markup.loading_selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn render_specs_inner(&self, specs: &[String]) -> Result<(), JsValue> {
        self.specs.set_text_content(None);
        for spec in specs {
            let item = self.document.create_element("li")?;
            item.set_text_content(Some(spec));
            self.specs.append_child(&item)?;
        }
        Ok(())
    }

    fn render_facts_inner(&self, facts: &[Fact]) -> Result<(), JsValue> {
        self.facts.set_text_content(None);
        for fact in facts {
            let card = self.document.create_element("div")?;
            card.set_class_name("fact-card");

            let value = self.document.create_element("span")?;
            value.set_class_name("fact-value");
            value.set_text_content(Some(&fact.value));

            let label = self.document.create_element("span")?;
            label.set_class_name("fact-label");
            label.set_text_content(Some(&fact.label));

            card.append_child(&value)?;
            card.append_child(&label)?;
            self.facts.append_child(&card)?;
        }
        Ok(())
    }

    fn show_model_error_inner(&self, message: &str, hint: &str) -> Result<(), JsValue> {
        let Some(container) = self.viewer.parent_element() else {
            return Ok(());
        };

        let error = self.document.create_element("div")?;
        error.set_class_name(&self.markup.error_class);
        error.set_attribute("style", ERROR_STYLE)?;

        let headline = self.document.create_element("p")?;
        headline.set_text_content(Some(message));
        let detail = self.document.create_element("p")?;
        detail.set_attribute("style", "font-size: 0.8rem;")?;
        detail.set_text_content(Some(hint));

        error.append_child(&headline)?;
        error.append_child(&detail)?;
        container.append_child(&error)?;
        Ok(())
    }

    fn clear_model_error_inner(&self) -> Result<(), JsValue> {
        let Some(container) = self.viewer.parent_element() else {
            return Ok(());
        };

        let stale = container.query_selector_all(&format!(".{}", self.markup.error_class))?;
        for i in 0..stale.length() {
            if let Some(el) = stale.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                el.remove();
            }
        }
        Ok(())
    }

    fn reset_camera_inner(&self) -> Result<(), JsValue> {
        let viewer: &JsValue = self.viewer.as_ref();
        js_sys::Reflect::set(viewer, &"cameraOrbit".into(), &CAMERA_AUTO.into())?;
        js_sys::Reflect::set(viewer, &"cameraTarget".into(), &CAMERA_AUTO.into())?;
        js_sys::Reflect::set(viewer, &"fieldOfView".into(), &FOV_AUTO.into())?;
        Ok(())
    }

    fn set_auto_rotate_inner(&self, delay_ms: Option<u32>) -> Result<(), JsValue> {
        match delay_ms {
            Some(delay) => {
                self.viewer.set_attribute("auto-rotate", "")?;
                self.viewer
                    .set_attribute("auto-rotate-delay", &delay.to_string())?;
            }
            None => {
                self.viewer.remove_attribute("auto-rotate")?;
                self.viewer.remove_attribute("auto-rotate-delay")?;
            }
        }
        Ok(())
    }
}

impl Page for DomPage {
    fn set_text(&mut self, field: TextField, text: &str) {
        let target = match field {
            TextField::Number => &self.number,
            TextField::Title => &self.title,
            TextField::Description => &self.description,
        };
        target.set_text_content(Some(text));
    }

    fn render_specs(&mut self, specs: &[String]) {
        log_failure("render specs", self.render_specs_inner(specs));
    }

    fn render_facts(&mut self, facts: &[Fact]) {
        log_failure("render facts", self.render_facts_inner(facts));
    }

    fn set_loading(&mut self, visible: bool) {
        if let Some(indicator) = self.loading_indicator() {
            let display = if visible { "block" } else { "none" };
            log_failure(
                "toggle loading indicator",
                indicator.style().set_property("display", display),
            );
        }
    }

    fn set_model_source(&mut self, src: &str) {
        log_failure("set model source", self.viewer.set_attribute("src", src));
    }

    fn set_auto_rotate(&mut self, delay_ms: Option<u32>) {
        log_failure("set auto-rotate", self.set_auto_rotate_inner(delay_ms));
    }

    fn set_rotate_indicator(&mut self, active: bool) {
        log_failure(
            "toggle rotate indicator",
            self.rotate_toggle
                .class_list()
                .toggle_with_force(&self.markup.active_class, active),
        );
    }

    fn reset_camera(&mut self) {
        log_failure("reset camera", self.reset_camera_inner());
    }

    fn reveal_viewer(&mut self) {
        let style = self.viewer.style();
        log_failure("show viewer", style.set_property("display", "block"));
        log_failure("show viewer", style.set_property("opacity", "1"));
    }

    fn show_model_error(&mut self, message: &str, hint: &str) {
        log_failure("show model error", self.show_model_error_inner(message, hint));
    }

    fn clear_model_error(&mut self) {
        log_failure("clear model error", self.clear_model_error_inner());
    }

    fn set_modal_visible(&mut self, visible: bool) {
        log_failure(
            "toggle modal",
            self.modal
                .class_list()
                .toggle_with_force(&self.markup.active_class, visible),
        );
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        let Some(body) = &self.body else { return };
        let style = body.style();
        if locked {
            log_failure("lock scroll", style.set_property("overflow", "hidden"));
        } else {
            log_failure("unlock scroll", style.remove_property("overflow"));
        }
    }
}

pub fn element_by_id(document: &Document, id: &str) -> Result<Element, WebError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| WebError::MissingElement(format!("#{}", id)))
}

/// DOM writes are best effort; a failure is logged and the page carries on
fn log_failure<T>(action: &str, result: Result<T, JsValue>) {
    if let Err(e) = result {
        tracing::warn!(action, error = ?e, "DOM update failed");
    }
}
