//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,
    ScrollUp,
    ScrollDown,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Request actions
    SendRequest,
    CycleMethod,

    // Headers
    NextHeader,
    PrevHeader,
    AddHeader,
    DeleteHeader,
    SwitchHeaderField,

    // Auth
    ToggleAuth,

    // Variables popup
    ToggleSettings,
    SettingsChar(char),
    SettingsBackspace,
    SettingsNextField,
    AddVariable,
    NextVariable,
    PrevVariable,
    RemoveVariable,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Active panel in the UI (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Panel {
    Url,
    Body,
    Headers,
    Auth,
    Response,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Url => Panel::Body,
            Panel::Body => Panel::Headers,
            Panel::Headers => Panel::Auth,
            Panel::Auth => Panel::Response,
            Panel::Response => Panel::Url,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Url => Panel::Response,
            Panel::Body => Panel::Url,
            Panel::Headers => Panel::Body,
            Panel::Auth => Panel::Headers,
            Panel::Response => Panel::Auth,
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Which half of the selected header row is being edited
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HeaderField {
    Key,
    Value,
}

impl HeaderField {
    pub fn toggle(&self) -> HeaderField {
        match self {
            HeaderField::Key => HeaderField::Value,
            HeaderField::Value => HeaderField::Key,
        }
    }
}

/// Input focused in the variables popup
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SettingsField {
    Name,
    Value,
}

impl SettingsField {
    pub fn toggle(&self) -> SettingsField {
        match self {
            SettingsField::Name => SettingsField::Value,
            SettingsField::Value => SettingsField::Name,
        }
    }
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    show_help: bool,
    show_settings: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    // Handle popups first
    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    if show_settings {
        return match key.code {
            KeyCode::Esc => Some(UiEvent::ToggleSettings),
            KeyCode::Enter => Some(UiEvent::AddVariable),
            KeyCode::Tab | KeyCode::BackTab => Some(UiEvent::SettingsNextField),
            KeyCode::Backspace => Some(UiEvent::SettingsBackspace),
            KeyCode::Up => Some(UiEvent::PrevVariable),
            KeyCode::Down => Some(UiEvent::NextVariable),
            KeyCode::Delete => Some(UiEvent::RemoveVariable),
            KeyCode::Char(c) => Some(UiEvent::SettingsChar(c)),
            _ => None,
        };
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Char('v') => Some(UiEvent::ToggleSettings),
            KeyCode::Tab => Some(UiEvent::NextPanel),
            KeyCode::BackTab => Some(UiEvent::PrevPanel),
            KeyCode::Char('e') | KeyCode::Enter => match active_panel {
                Panel::Url | Panel::Body | Panel::Headers | Panel::Auth => {
                    Some(UiEvent::StartEditing)
                }
                Panel::Response => None,
            },
            KeyCode::Char('m') => Some(UiEvent::CycleMethod),
            KeyCode::Char('s') => Some(UiEvent::SendRequest),
            KeyCode::Up => match active_panel {
                Panel::Headers => Some(UiEvent::PrevHeader),
                Panel::Response => Some(UiEvent::ScrollUp),
                _ => None,
            },
            KeyCode::Down => match active_panel {
                Panel::Headers => Some(UiEvent::NextHeader),
                Panel::Response => Some(UiEvent::ScrollDown),
                _ => None,
            },
            KeyCode::Char('a') if active_panel == Panel::Headers => Some(UiEvent::AddHeader),
            KeyCode::Char('d') if active_panel == Panel::Headers => Some(UiEvent::DeleteHeader),
            KeyCode::Char('t') if active_panel == Panel::Auth => Some(UiEvent::ToggleAuth),
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            KeyCode::Tab if active_panel == Panel::Headers => Some(UiEvent::SwitchHeaderField),
            KeyCode::Enter => match active_panel {
                Panel::Url => Some(UiEvent::SendRequest),
                Panel::Body => Some(UiEvent::CharInput('\n')),
                _ => Some(UiEvent::StopEditing),
            },
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn settings_popup_captures_text_keys() {
        let event = key_to_ui_event(press(KeyCode::Char('q')), Panel::Url, InputMode::Normal, false, true);
        assert_eq!(event, Some(UiEvent::SettingsChar('q')));

        let event = key_to_ui_event(press(KeyCode::Enter), Panel::Url, InputMode::Normal, false, true);
        assert_eq!(event, Some(UiEvent::AddVariable));
    }

    #[test]
    fn enter_inserts_newline_only_in_body() {
        let enter = press(KeyCode::Enter);
        assert_eq!(
            key_to_ui_event(enter, Panel::Body, InputMode::Editing, false, false),
            Some(UiEvent::CharInput('\n'))
        );
        assert_eq!(
            key_to_ui_event(enter, Panel::Url, InputMode::Editing, false, false),
            Some(UiEvent::SendRequest)
        );
        assert_eq!(
            key_to_ui_event(enter, Panel::Headers, InputMode::Editing, false, false),
            Some(UiEvent::StopEditing)
        );
    }

    #[test]
    fn header_keys_only_apply_in_headers_panel() {
        let add = press(KeyCode::Char('a'));
        assert_eq!(
            key_to_ui_event(add, Panel::Headers, InputMode::Normal, false, false),
            Some(UiEvent::AddHeader)
        );
        assert_eq!(key_to_ui_event(add, Panel::Body, InputMode::Normal, false, false), None);
    }

    #[test]
    fn tab_switches_header_field_while_editing() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Tab), Panel::Headers, InputMode::Editing, false, false),
            Some(UiEvent::SwitchHeaderField)
        );
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            key_to_ui_event(key, Panel::Body, InputMode::Editing, false, true),
            Some(UiEvent::Quit)
        );
    }

    #[test]
    fn panel_cycle_round_trips() {
        let mut panel = Panel::Url;
        for _ in 0..5 {
            panel = panel.next();
        }
        assert_eq!(panel, Panel::Url);
        assert_eq!(Panel::Url.prev(), Panel::Response);
    }
}
