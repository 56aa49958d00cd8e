//! App state - pure data structure with no I/O logic

use crate::config::AppConfig;
use crate::messages::ui_events::{HeaderField, InputMode, Panel, SettingsField};
use crate::messages::RenderState;
use crate::models::{AuthConfig, RequestSpec, ResolvedOutcome};
use crate::variables::VariableStore;

/// Variables popup state
#[derive(Clone, Debug)]
pub struct SettingsState {
    pub visible: bool,
    pub field: SettingsField,
    pub new_name: String,
    pub new_value: String,
    pub selected: usize,
}

impl Default for SettingsState {
    fn default() -> Self {
        SettingsState {
            visible: false,
            field: SettingsField::Name,
            new_name: String::new(),
            new_value: String::new(),
            selected: 0,
        }
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Request form
    pub request: RequestSpec,
    pub cursor_position: usize,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub response_scroll: u16,

    // Response
    pub outcome: Option<ResolvedOutcome>,
    pub is_loading: bool,
    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,

    // Headers panel
    pub selected_header: usize,
    pub header_field: HeaderField,

    // Session variables
    pub variables: VariableStore,
    pub settings: SettingsState,

    // Popups
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&AppConfig::default())
    }
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let request = RequestSpec {
            url_template: config.default_url.clone(),
            ..RequestSpec::default()
        };
        AppState {
            cursor_position: request.url_template.len(),
            request,
            active_panel: Panel::Url,
            input_mode: InputMode::Normal,
            response_scroll: 0,
            outcome: None,
            is_loading: false,
            next_request_id: 1,
            pending_request_id: None,
            selected_header: 0,
            header_field: HeaderField::Key,
            variables: config.variable_store(),
            settings: SettingsState::default(),
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Get the current input field content
    pub fn current_input(&self) -> &str {
        match self.active_panel {
            Panel::Url => &self.request.url_template,
            Panel::Body => &self.request.body,
            Panel::Headers => match self.request.headers.get(self.selected_header) {
                Some(header) => match self.header_field {
                    HeaderField::Key => &header.key,
                    HeaderField::Value => &header.value,
                },
                None => "",
            },
            Panel::Auth => match &self.request.auth {
                AuthConfig::Bearer(token) => token,
                AuthConfig::None => "",
            },
            Panel::Response => "",
        }
    }

    /// Get mutable reference to current input field, if the panel has one
    pub fn current_input_mut(&mut self) -> Option<&mut String> {
        match self.active_panel {
            Panel::Url => Some(&mut self.request.url_template),
            Panel::Body => Some(&mut self.request.body),
            Panel::Headers => {
                let field = self.header_field;
                self.request
                    .headers
                    .get_mut(self.selected_header)
                    .map(|header| match field {
                        HeaderField::Key => &mut header.key,
                        HeaderField::Value => &mut header.value,
                    })
            }
            Panel::Auth => match &mut self.request.auth {
                AuthConfig::Bearer(token) => Some(token),
                AuthConfig::None => None,
            },
            Panel::Response => None,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            method: self.request.method,
            url: self.request.url_template.clone(),
            body: self.request.body.clone(),
            headers: self.request.headers.clone(),
            auth: self.request.auth.clone(),
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            selected_header: self.selected_header,
            header_field: self.header_field,
            outcome: self.outcome.clone(),
            response_scroll: self.response_scroll,
            is_loading: self.is_loading,
            show_settings: self.settings.visible,
            variables: self
                .variables
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            selected_variable: self.settings.selected,
            settings_field: self.settings.field,
            new_variable_name: self.settings.new_name.clone(),
            new_variable_value: self.settings.new_value.clone(),
            show_help: self.show_help,
        }
    }
}
