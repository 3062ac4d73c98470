//! Presentation controller - turns input events into page updates
//!
//! The controller owns the catalog and the [`ViewerState`] and talks to the
//! page only through the [`Page`] trait. The browser implements it on top of
//! the DOM; tests implement it with a recorder.

use crate::catalog::{Catalog, ComponentId, Fact};
use crate::config::ViewerConfig;
use crate::state::ViewerState;

/// Auto-rotation always starts immediately
pub const AUTO_ROTATE_DELAY_MS: u32 = 0;

/// Text targets in the modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Number,
    Title,
    Description,
}

/// View operations the controller needs from the page
pub trait Page {
    fn set_text(&mut self, field: TextField, text: &str);
    /// Replace the specs list, one item per entry
    fn render_specs(&mut self, specs: &[String]);
    /// Replace the facts grid, one card per fact
    fn render_facts(&mut self, facts: &[Fact]);
    fn set_loading(&mut self, visible: bool);
    /// Point the viewer widget at a new asset
    fn set_model_source(&mut self, src: &str);
    /// `Some(delay)` enables auto-rotate after `delay` ms, `None` disables it
    fn set_auto_rotate(&mut self, delay_ms: Option<u32>);
    fn set_rotate_indicator(&mut self, active: bool);
    /// Return camera orbit, camera target and field of view to automatic
    fn reset_camera(&mut self);
    /// Make the viewer element visible and opaque
    fn reveal_viewer(&mut self);
    fn show_model_error(&mut self, message: &str, hint: &str);
    fn clear_model_error(&mut self);
    fn set_modal_visible(&mut self, visible: bool);
    fn set_scroll_locked(&mut self, locked: bool);
}

/// Everything the page can ask the controller to react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A hotspot carrying this component id was clicked
    HotspotClicked(String),
    /// A key was pressed, named as in `KeyboardEvent.key`
    KeyPressed(String),
    CloseClicked,
    /// Click landed on the modal backdrop itself, not its content
    BackdropClicked,
    RotateToggleClicked,
    ResetViewClicked,
    ModelLoaded,
    /// The viewer failed to load the current asset
    ModelFailed(String),
}

pub struct Controller<P: Page> {
    catalog: Catalog,
    page: P,
    state: ViewerState,
    viewer: ViewerConfig,
}

impl<P: Page> Controller<P> {
    pub fn new(catalog: Catalog, page: P) -> Self {
        Self {
            catalog,
            page,
            state: ViewerState::default(),
            viewer: ViewerConfig::default(),
        }
    }

    pub fn with_viewer_config(mut self, viewer: ViewerConfig) -> Self {
        self.viewer = viewer;
        self
    }

    /// Bring the page in line with the initial state
    pub fn initialize(&mut self) {
        self.page.set_rotate_indicator(self.state.auto_rotate);
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    /// Route one input event
    pub fn handle(&mut self, event: InputEvent) {
        match event {
            InputEvent::HotspotClicked(id) => {
                self.open_component(&id);
            }
            InputEvent::KeyPressed(key) => self.key_pressed(&key),
            InputEvent::CloseClicked | InputEvent::BackdropClicked => self.close_modal(),
            InputEvent::RotateToggleClicked => {
                self.toggle_auto_rotate();
            }
            InputEvent::ResetViewClicked => self.reset_view(),
            InputEvent::ModelLoaded => self.model_loaded(),
            InputEvent::ModelFailed(detail) => self.model_failed(&detail),
        }
    }

    fn key_pressed(&mut self, key: &str) {
        if self.state.modal_open {
            if key == "Escape" {
                self.close_modal();
            }
            return;
        }

        if let Some(id) = self.catalog.shortcut(key).cloned() {
            self.open_component(id.as_str());
        }
    }

    /// Show a component in the modal. Unknown ids are ignored; returns
    /// whether the modal now shows `id`.
    pub fn open_component(&mut self, id: &str) -> bool {
        let Some(record) = self.catalog.lookup(id) else {
            return false;
        };

        self.state.current = Some(ComponentId::new(id));

        self.page.set_text(TextField::Number, &record.number);
        self.page.set_text(TextField::Title, &record.title);
        self.page.set_text(TextField::Description, &record.description);
        self.page.render_specs(&record.specs);
        self.page.render_facts(&record.facts);

        self.page.clear_model_error();
        self.page.set_loading(true);
        self.page.set_model_source(&record.model_path);
        self.state.model_src = Some(record.model_path.clone());

        // Every open starts rotating, whatever the toggle said before
        self.state.auto_rotate = true;
        self.page.set_auto_rotate(Some(AUTO_ROTATE_DELAY_MS));
        self.page.set_rotate_indicator(true);

        self.state.modal_open = true;
        self.page.set_modal_visible(true);
        self.page.set_scroll_locked(true);

        tracing::info!(component = %id, model = %record.model_path, "Opened component");
        true
    }

    /// Hide the modal; does nothing when it is already closed
    pub fn close_modal(&mut self) {
        if !self.state.modal_open && self.state.current.is_none() {
            return;
        }

        self.page.set_modal_visible(false);
        self.page.set_scroll_locked(false);
        self.state.modal_open = false;
        if let Some(id) = self.state.current.take() {
            tracing::debug!(component = %id, "Closed component");
        }
    }

    /// Flip auto-rotation and return the new setting
    pub fn toggle_auto_rotate(&mut self) -> bool {
        self.state.auto_rotate = !self.state.auto_rotate;
        if self.state.auto_rotate {
            self.page.set_auto_rotate(Some(AUTO_ROTATE_DELAY_MS));
        } else {
            self.page.set_auto_rotate(None);
        }
        self.page.set_rotate_indicator(self.state.auto_rotate);
        self.state.auto_rotate
    }

    /// Return the camera to its defaults; nothing to do before any model
    pub fn reset_view(&mut self) {
        if self.state.model_src.is_none() {
            return;
        }
        self.page.reset_camera();
    }

    pub fn model_loaded(&mut self) {
        tracing::debug!(model = ?self.state.model_src, "Model loaded");
        self.page.set_loading(false);
        self.page.reveal_viewer();
    }

    /// Report a failed asset load inline; the modal stays usable
    pub fn model_failed(&mut self, detail: &str) {
        tracing::error!(
            path = self.state.model_src.as_deref().unwrap_or("<none>"),
            error = %detail,
            "Error loading model"
        );
        self.page.set_loading(false);
        self.page
            .show_model_error(&self.viewer.error_message, &self.viewer.error_hint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Page double recording the last value of every view operation
    #[derive(Debug, Default)]
    struct RecordingPage {
        number: String,
        title: String,
        description: String,
        specs: Vec<String>,
        facts: Vec<Fact>,
        loading: bool,
        model_src: Option<String>,
        auto_rotate: Option<Option<u32>>,
        rotate_indicator: Option<bool>,
        camera_resets: usize,
        revealed: bool,
        error: Option<(String, String)>,
        modal_visible: bool,
        scroll_locked: bool,
        calls: usize,
    }

    impl Page for RecordingPage {
        fn set_text(&mut self, field: TextField, text: &str) {
            self.calls += 1;
            let target = match field {
                TextField::Number => &mut self.number,
                TextField::Title => &mut self.title,
                TextField::Description => &mut self.description,
            };
            *target = text.to_string();
        }

        fn render_specs(&mut self, specs: &[String]) {
            self.calls += 1;
            self.specs = specs.to_vec();
        }

        fn render_facts(&mut self, facts: &[Fact]) {
            self.calls += 1;
            self.facts = facts.to_vec();
        }

        fn set_loading(&mut self, visible: bool) {
            self.calls += 1;
            self.loading = visible;
        }

        fn set_model_source(&mut self, src: &str) {
            self.calls += 1;
            self.model_src = Some(src.to_string());
        }

        fn set_auto_rotate(&mut self, delay_ms: Option<u32>) {
            self.calls += 1;
            self.auto_rotate = Some(delay_ms);
        }

        fn set_rotate_indicator(&mut self, active: bool) {
            self.calls += 1;
            self.rotate_indicator = Some(active);
        }

        fn reset_camera(&mut self) {
            self.calls += 1;
            self.camera_resets += 1;
        }

        fn reveal_viewer(&mut self) {
            self.calls += 1;
            self.revealed = true;
        }

        fn show_model_error(&mut self, message: &str, hint: &str) {
            self.calls += 1;
            self.error = Some((message.to_string(), hint.to_string()));
        }

        fn clear_model_error(&mut self) {
            self.calls += 1;
            self.error = None;
        }

        fn set_modal_visible(&mut self, visible: bool) {
            self.calls += 1;
            self.modal_visible = visible;
        }

        fn set_scroll_locked(&mut self, locked: bool) {
            self.calls += 1;
            self.scroll_locked = locked;
        }
    }

    fn controller() -> Controller<RecordingPage> {
        let catalog = Catalog::builtin().unwrap();
        let mut controller = Controller::new(catalog, RecordingPage::default());
        controller.initialize();
        controller
    }

    #[test]
    fn test_open_renders_every_component() {
        let mut c = controller();
        let ids: Vec<String> = c.catalog().ids().map(|id| id.to_string()).collect();

        for id in ids {
            assert!(c.open_component(&id));
            let record = c.catalog().lookup(&id).unwrap().clone();
            let page = c.page();

            assert_eq!(page.number, record.number);
            assert_eq!(page.title, record.title);
            assert_eq!(page.description, record.description);
            assert_eq!(page.specs, record.specs);
            assert_eq!(page.facts, record.facts);
            assert_eq!(page.model_src.as_deref(), Some(record.model_path.as_str()));
            assert!(page.loading);
            assert!(page.modal_visible);
            assert!(page.scroll_locked);
            assert_eq!(c.state().current_id(), Some(id.as_str()));
        }
    }

    #[test]
    fn test_open_unknown_is_noop() {
        let mut c = controller();
        let calls = c.page().calls;
        let before = c.state().clone();

        assert!(!c.open_component("flux-capacitor"));
        assert_eq!(c.state(), &before);
        assert_eq!(c.page().calls, calls);
        assert!(!c.page().modal_visible);

        // A miss while open leaves the open component alone
        c.open_component("motor");
        let before = c.state().clone();
        c.handle(InputEvent::HotspotClicked("warp-core".to_string()));
        assert_eq!(c.state(), &before);
        assert_eq!(c.page().title, "Electric Motor");
    }

    #[test]
    fn test_close_resets_and_is_idempotent() {
        let mut c = controller();
        c.open_component("battery");
        c.close_modal();

        assert!(c.state().current.is_none());
        assert!(!c.state().is_open());
        assert!(!c.page().modal_visible);
        assert!(!c.page().scroll_locked);

        let calls = c.page().calls;
        c.close_modal();
        assert_eq!(c.page().calls, calls);
        assert!(c.state().current.is_none());
    }

    #[test]
    fn test_toggle_auto_rotate_twice_restores() {
        let mut c = controller();
        assert!(c.state().auto_rotate);
        assert_eq!(c.page().rotate_indicator, Some(true));

        assert!(!c.toggle_auto_rotate());
        assert_eq!(c.page().auto_rotate, Some(None));
        assert_eq!(c.page().rotate_indicator, Some(false));

        assert!(c.toggle_auto_rotate());
        assert_eq!(c.page().auto_rotate, Some(Some(0)));
        assert_eq!(c.page().rotate_indicator, Some(true));
    }

    #[test]
    fn test_open_forces_auto_rotate() {
        let mut c = controller();
        c.toggle_auto_rotate();
        assert!(!c.state().auto_rotate);

        c.open_component("tires");
        assert!(c.state().auto_rotate);
        assert_eq!(c.page().auto_rotate, Some(Some(0)));
        assert_eq!(c.page().rotate_indicator, Some(true));
    }

    #[test]
    fn test_auto_rotate_delay_ignores_config() {
        let viewer: ViewerConfig = toml::from_str(
            r#"
auto_rotate_delay_ms = 250
error_message = "Model unavailable"
"#,
        )
        .unwrap();
        assert_eq!(viewer.error_message, "Model unavailable");

        let mut c = Controller::new(Catalog::builtin().unwrap(), RecordingPage::default())
            .with_viewer_config(viewer);
        c.open_component("battery");
        assert_eq!(c.page().auto_rotate, Some(Some(0)));

        c.toggle_auto_rotate();
        c.toggle_auto_rotate();
        assert_eq!(c.page().auto_rotate, Some(Some(0)));

        c.toggle_auto_rotate();
        c.open_component("motor");
        assert_eq!(c.page().auto_rotate, Some(Some(0)));
    }

    #[test]
    fn test_digit_shortcuts() {
        let mut c = controller();
        c.handle(InputEvent::KeyPressed("1".to_string()));
        assert_eq!(c.state().current_id(), Some("battery"));

        // Ignored while open
        c.handle(InputEvent::KeyPressed("2".to_string()));
        assert_eq!(c.state().current_id(), Some("battery"));

        c.close_modal();
        c.handle(InputEvent::KeyPressed("4".to_string()));
        assert_eq!(c.state().current_id(), Some("suspension"));

        c.close_modal();
        for key in ["0", "5", "9", "x", "Enter"] {
            c.handle(InputEvent::KeyPressed(key.to_string()));
            assert!(!c.state().is_open(), "key {key} should not open");
        }
    }

    #[test]
    fn test_escape_closes_only_when_open() {
        let mut c = controller();
        let calls = c.page().calls;
        c.handle(InputEvent::KeyPressed("Escape".to_string()));
        assert_eq!(c.page().calls, calls);

        c.handle(InputEvent::HotspotClicked("motor".to_string()));
        assert!(c.state().is_open());
        c.handle(InputEvent::KeyPressed("Escape".to_string()));
        assert!(!c.state().is_open());
        assert!(c.state().current.is_none());
    }

    #[test]
    fn test_close_and_backdrop_events() {
        let mut c = controller();
        c.handle(InputEvent::HotspotClicked("battery".to_string()));
        c.handle(InputEvent::CloseClicked);
        assert!(!c.state().is_open());

        c.handle(InputEvent::HotspotClicked("battery".to_string()));
        c.handle(InputEvent::BackdropClicked);
        assert!(!c.state().is_open());
    }

    #[test]
    fn test_reset_view() {
        let mut c = controller();
        c.handle(InputEvent::ResetViewClicked);
        assert_eq!(c.page().camera_resets, 0);

        c.open_component("motor");
        c.handle(InputEvent::ResetViewClicked);
        assert_eq!(c.page().camera_resets, 1);
    }

    #[test]
    fn test_model_loaded() {
        let mut c = controller();
        c.open_component("battery");
        assert!(c.page().loading);

        c.handle(InputEvent::ModelLoaded);
        assert!(!c.page().loading);
        assert!(c.page().revealed);
    }

    #[test]
    fn test_model_failure_keeps_modal_usable() {
        let mut c = controller();
        c.open_component("battery");
        c.handle(InputEvent::ModelFailed("404 Not Found".to_string()));

        assert!(!c.page().loading);
        assert_eq!(
            c.page().error,
            Some((
                "Error loading model".to_string(),
                "Check console for details".to_string()
            ))
        );
        assert_eq!(c.state().current_id(), Some("battery"));
        assert!(c.state().is_open());

        // Opening another component clears the stale message
        c.close_modal();
        c.open_component("motor");
        assert!(c.page().error.is_none());
        assert_eq!(c.state().current_id(), Some("motor"));
    }

    #[test]
    fn test_stale_signal_after_switch() {
        let mut c = controller();
        c.open_component("battery");
        c.open_component("motor");

        // Late success for the superseded asset only touches the indicator
        c.model_loaded();
        assert_eq!(c.state().current_id(), Some("motor"));
        assert_eq!(c.page().model_src.as_deref(), Some("./models/3d-electric-motor.glb"));
    }
}
