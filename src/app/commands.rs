//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::messages::ui_events::{HeaderField, InputMode, SettingsField};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{AuthConfig, HeaderEntry};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev();
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        if self.current_input_mut().is_none() {
            return;
        }
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.current_input().len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            if cursor_pos <= input.len() {
                input.insert(cursor_pos, c);
                self.cursor_position = cursor_pos + c.len_utf8();
            }
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    // ========================
    // HTTP Method
    // ========================

    pub fn cycle_method(&mut self) {
        if !self.is_loading {
            self.request.method = self.request.method.next();
        }
    }

    // ========================
    // Response scrolling
    // ========================

    pub fn scroll_up(&mut self) {
        self.response_scroll = self.response_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.response_scroll = self.response_scroll.saturating_add(1);
    }

    // ========================
    // Headers
    // ========================

    pub fn next_header(&mut self) {
        if !self.request.headers.is_empty() {
            self.selected_header = (self.selected_header + 1) % self.request.headers.len();
        }
    }

    pub fn prev_header(&mut self) {
        if !self.request.headers.is_empty() {
            self.selected_header = self
                .selected_header
                .checked_sub(1)
                .unwrap_or(self.request.headers.len() - 1);
        }
    }

    /// Append an empty header row and select it
    pub fn add_header(&mut self) {
        self.request.headers.push(HeaderEntry::default());
        self.selected_header = self.request.headers.len() - 1;
        self.header_field = HeaderField::Key;
    }

    /// Replace the key or value of the row at `index`
    pub fn update_header(&mut self, index: usize, field: HeaderField, value: impl Into<String>) {
        if let Some(header) = self.request.headers.get_mut(index) {
            match field {
                HeaderField::Key => header.key = value.into(),
                HeaderField::Value => header.value = value.into(),
            }
        }
    }

    /// Remove the row at `index`, keeping the selection in range
    pub fn remove_header(&mut self, index: usize) {
        if index >= self.request.headers.len() {
            return;
        }
        self.request.headers.remove(index);
        if self.selected_header >= self.request.headers.len() {
            self.selected_header = self.request.headers.len().saturating_sub(1);
        }
    }

    pub fn delete_header(&mut self) {
        self.remove_header(self.selected_header);
    }

    pub fn switch_header_field(&mut self) {
        self.header_field = self.header_field.toggle();
        self.cursor_position = self.current_input().len();
    }

    // ========================
    // Auth
    // ========================

    pub fn toggle_auth(&mut self) {
        self.request.auth = match &self.request.auth {
            AuthConfig::None => AuthConfig::Bearer(String::new()),
            AuthConfig::Bearer(_) => AuthConfig::None,
        };
    }

    // ========================
    // Variables popup
    // ========================

    pub fn toggle_settings(&mut self) {
        self.settings.visible = !self.settings.visible;
        self.input_mode = InputMode::Normal;
    }

    pub fn settings_char(&mut self, c: char) {
        self.settings_input_mut().push(c);
    }

    pub fn settings_backspace(&mut self) {
        self.settings_input_mut().pop();
    }

    pub fn settings_next_field(&mut self) {
        self.settings.field = self.settings.field.toggle();
    }

    fn settings_input_mut(&mut self) -> &mut String {
        match self.settings.field {
            SettingsField::Name => &mut self.settings.new_name,
            SettingsField::Value => &mut self.settings.new_value,
        }
    }

    /// Add the typed variable when both name and value are filled in
    pub fn add_variable(&mut self) {
        if self.settings.new_name.is_empty() || self.settings.new_value.is_empty() {
            return;
        }
        let name = std::mem::take(&mut self.settings.new_name);
        let value = std::mem::take(&mut self.settings.new_value);
        tracing::debug!(name = %name, "Setting variable");
        self.variables.set(name, value);
        self.settings.field = SettingsField::Name;
    }

    pub fn remove_variable(&mut self, name: &str) {
        self.variables.remove(name);
        if self.settings.selected >= self.variables.len() {
            self.settings.selected = self.variables.len().saturating_sub(1);
        }
    }

    pub fn remove_selected_variable(&mut self) {
        let name = self
            .variables
            .iter()
            .nth(self.settings.selected)
            .map(|(name, _)| name.to_string());
        if let Some(name) = name {
            self.remove_variable(&name);
        }
    }

    pub fn next_variable(&mut self) {
        if !self.variables.is_empty() {
            self.settings.selected = (self.settings.selected + 1) % self.variables.len();
        }
    }

    pub fn prev_variable(&mut self) {
        if !self.variables.is_empty() {
            self.settings.selected = self
                .settings
                .selected
                .checked_sub(1)
                .unwrap_or(self.variables.len() - 1);
        }
    }

    // ========================
    // Request sending
    // ========================

    /// Snapshot the form and clear the previous outcome
    pub fn prepare_request(&mut self) -> Option<NetworkCommand> {
        if self.is_loading {
            return None;
        }

        self.is_loading = true;
        self.outcome = None;
        self.response_scroll = 0;

        let id = self.next_id();
        self.pending_request_id = Some(id);

        Some(NetworkCommand::ExecuteRequest {
            id,
            spec: self.request.clone(),
            variables: self.variables.clone(),
        })
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        let response_id = response.id();
        if self.pending_request_id != Some(response_id) {
            tracing::debug!(id = response_id, "Dropping outcome for stale request");
            return;
        }

        match response {
            NetworkResponse::Completed { outcome, .. } => {
                self.outcome = Some(outcome);
                self.is_loading = false;
                self.pending_request_id = None;
                self.response_scroll = 0;
            }
        }
    }

    // ========================
    // Help
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::messages::ui_events::Panel;
    use crate::models::{HttpMethod, ResolvedOutcome};
    use crate::variables::VariableStore;

    fn state() -> AppState {
        AppState::new(&AppConfig::default())
    }

    fn complete(state: &mut AppState, id: u64, outcome: ResolvedOutcome) {
        state.handle_response(NetworkResponse::Completed { id, outcome });
    }

    #[test]
    fn starts_with_seeded_variable_and_one_empty_header() {
        let state = state();
        assert_eq!(state.variables.get("baseUrl"), Some("https://api.example.com"));
        assert_eq!(state.request.headers, vec![HeaderEntry::default()]);
    }

    #[test]
    fn submitting_clears_previous_outcome() {
        let mut state = state();
        let Some(NetworkCommand::ExecuteRequest { id, .. }) = state.prepare_request() else {
            panic!("expected a request command");
        };
        complete(&mut state, id, ResolvedOutcome::failure("old"));
        assert!(state.outcome.is_some());

        let Some(NetworkCommand::ExecuteRequest { id, .. }) = state.prepare_request() else {
            panic!("expected a request command");
        };
        assert!(state.outcome.is_none());
        assert!(state.is_loading);

        complete(&mut state, id, ResolvedOutcome::failure("Connection failed: refused"));
        assert_eq!(
            state.outcome,
            Some(ResolvedOutcome::failure("Connection failed: refused"))
        );
        assert!(!state.is_loading);
    }

    #[test]
    fn ignores_send_while_in_flight() {
        let mut state = state();
        assert!(state.prepare_request().is_some());
        assert!(state.prepare_request().is_none());
    }

    #[test]
    fn stale_outcomes_are_dropped() {
        let mut state = state();
        state.prepare_request();
        complete(&mut state, 99, ResolvedOutcome::failure("stale"));
        assert!(state.outcome.is_none());
        assert!(state.is_loading);
    }

    #[test]
    fn request_snapshot_carries_variables() {
        let mut state = state();
        state.variables.set("token", "abc");
        match state.prepare_request() {
            Some(NetworkCommand::ExecuteRequest { spec, variables, .. }) => {
                assert_eq!(spec, state.request);
                assert_eq!(variables.get("token"), Some("abc"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn header_rows_are_edited_by_position() {
        let mut state = state();
        state.add_header();
        state.update_header(1, HeaderField::Key, "X-Api-Key");
        state.update_header(1, HeaderField::Value, "secret");
        state.update_header(5, HeaderField::Key, "ignored");
        assert_eq!(state.request.headers[1], HeaderEntry::new("X-Api-Key", "secret"));

        state.remove_header(0);
        assert_eq!(state.request.headers, vec![HeaderEntry::new("X-Api-Key", "secret")]);
        assert_eq!(state.selected_header, 0);

        state.remove_header(3);
        assert_eq!(state.request.headers.len(), 1);
    }

    #[test]
    fn typing_edits_selected_header_field() {
        let mut state = state();
        state.active_panel = Panel::Headers;
        state.start_editing();
        for c in "Accept".chars() {
            state.enter_char(c);
        }
        state.switch_header_field();
        for c in "text/plain".chars() {
            state.enter_char(c);
        }
        state.delete_char();
        assert_eq!(state.request.headers[0], HeaderEntry::new("Accept", "text/plai"));
    }

    #[test]
    fn auth_panel_is_only_editable_with_bearer() {
        let mut state = state();
        state.active_panel = Panel::Auth;
        state.start_editing();
        assert_eq!(state.input_mode, InputMode::Normal);

        state.toggle_auth();
        state.start_editing();
        state.enter_char('t');
        assert_eq!(state.request.auth, AuthConfig::Bearer("t".into()));

        state.toggle_auth();
        assert_eq!(state.request.auth, AuthConfig::None);
    }

    #[test]
    fn add_variable_requires_name_and_value() {
        let mut state = state();
        state.variables = VariableStore::new();

        state.settings_char('k');
        state.add_variable();
        assert!(state.variables.is_empty());
        assert_eq!(state.settings.new_name, "k");

        state.settings_next_field();
        state.settings_char('v');
        state.add_variable();
        assert_eq!(state.variables.get("k"), Some("v"));
        assert!(state.settings.new_name.is_empty());
        assert!(state.settings.new_value.is_empty());
    }

    #[test]
    fn remove_selected_variable_keeps_selection_in_range() {
        let mut state = state();
        state.variables = [("a", "1"), ("b", "2")].into_iter().collect();
        state.next_variable();
        state.remove_selected_variable();
        assert_eq!(state.variables.get("b"), None);
        assert_eq!(state.settings.selected, 0);

        state.remove_variable("missing");
        assert_eq!(state.variables.len(), 1);
    }

    #[test]
    fn method_is_locked_while_loading() {
        let mut state = state();
        state.prepare_request();
        state.cycle_method();
        assert_eq!(state.request.method, HttpMethod::GET);
    }
}
