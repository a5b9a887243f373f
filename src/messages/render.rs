//! Render state - data structure sent from App layer to UI for rendering

use crate::app::state::Screen;
use crate::constants::DEFAULT_API_BASE_URL;
use crate::messages::ui_events::{DialogKind, InputMode, ScreenKind};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub screen: Screen,
    pub input_mode: InputMode,
    pub show_help: bool,
    /// Origin used to build image links
    pub api_base_url: String,
}

impl RenderState {
    pub fn screen_kind(&self) -> ScreenKind {
        self.screen.kind()
    }

    pub fn dialog_kind(&self) -> DialogKind {
        self.screen.dialog_kind()
    }

    pub fn is_loading(&self) -> bool {
        self.screen.is_loading()
    }
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            screen: Screen::default(),
            input_mode: InputMode::Normal,
            show_help: false,
            api_base_url: String::from(DEFAULT_API_BASE_URL),
        }
    }
}
