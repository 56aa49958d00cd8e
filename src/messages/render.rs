//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::{HeaderField, InputMode, Panel, SettingsField};
use crate::models::{AuthConfig, HeaderEntry, HttpMethod, RequestSpec, ResolvedOutcome};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Request form
    pub method: HttpMethod,
    pub url: String,
    pub body: String,
    pub headers: Vec<HeaderEntry>,
    pub auth: AuthConfig,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Headers panel
    pub selected_header: usize,
    pub header_field: HeaderField,

    // Response; None while idle or in flight
    pub outcome: Option<ResolvedOutcome>,
    pub response_scroll: u16,
    pub is_loading: bool,

    // Variables popup
    pub show_settings: bool,
    pub variables: Vec<(String, String)>,
    pub selected_variable: usize,
    pub settings_field: SettingsField,
    pub new_variable_name: String,
    pub new_variable_value: String,

    // Popups
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        let request = RequestSpec::default();
        RenderState {
            method: request.method,
            url: request.url_template,
            body: request.body,
            headers: request.headers,
            auth: request.auth,
            active_panel: Panel::Url,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            selected_header: 0,
            header_field: HeaderField::Key,
            outcome: None,
            response_scroll: 0,
            is_loading: false,
            show_settings: false,
            variables: Vec::new(),
            selected_variable: 0,
            settings_field: SettingsField::Name,
            new_variable_name: String::new(),
            new_variable_value: String::new(),
            show_help: false,
        }
    }
}
