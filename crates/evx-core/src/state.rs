//! Viewer state owned by the presentation controller

use crate::catalog::ComponentId;

/// What the page is currently showing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerState {
    /// Component shown in the modal, `None` while closed
    pub current: Option<ComponentId>,
    pub modal_open: bool,
    pub auto_rotate: bool,
    /// Last asset reference handed to the viewer
    pub model_src: Option<String>,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            current: None,
            modal_open: false,
            // The rotate toggle starts active
            auto_rotate: true,
            model_src: None,
        }
    }
}

impl ViewerState {
    pub fn is_open(&self) -> bool {
        self.modal_open
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current.as_ref().map(|id| id.as_str())
    }
}
