use crate::config::UiConfig;

use super::SessionState;

/// What the page around the immersive view should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiContext {
    /// Text on the full-viewport overlay that enters the immersive session
    pub overlay_prompt: String,
    /// Label on the file picker
    pub file_picker_label: String,
    /// Filter for the file picker, in `<input accept>` syntax
    pub file_picker_accept: String,
    /// Whether the overlay is currently showing
    pub overlay_visible: bool,
    /// "Selected: <name>" while a user file is active
    pub selected_label: Option<String>,
}

impl UiContext {
    /// Create the UI state shown before anything has happened
    pub fn new(config: &UiConfig) -> Self {
        Self {
            overlay_prompt: config.overlay_prompt.clone(),
            file_picker_label: config.file_picker_label.clone(),
            file_picker_accept: "video/*".to_string(),
            overlay_visible: true,
            selected_label: None,
        }
    }

    /// Bring the UI in line with the session and media state
    pub fn update(&mut self, session_state: SessionState, selected_label: Option<String>) {
        self.overlay_visible = session_state == SessionState::Inline;
        self.selected_label = selected_label;
    }
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new(&Default::default())
    }
}
