//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::ui_events::InputMode;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Panel navigation
            UiEvent::NextPanel => self.state.next_panel(),
            UiEvent::PrevPanel => self.state.prev_panel(),
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            // Input editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),

            // Request actions
            UiEvent::CycleMethod => self.state.cycle_method(),
            UiEvent::SendRequest => {
                if self.state.input_mode == InputMode::Editing {
                    self.state.stop_editing();
                }
                if let Some(cmd) = self.state.prepare_request() {
                    let _ = self.network_tx.send(cmd);
                }
            }

            // Headers
            UiEvent::NextHeader => self.state.next_header(),
            UiEvent::PrevHeader => self.state.prev_header(),
            UiEvent::AddHeader => self.state.add_header(),
            UiEvent::DeleteHeader => self.state.delete_header(),
            UiEvent::SwitchHeaderField => self.state.switch_header_field(),

            // Auth
            UiEvent::ToggleAuth => self.state.toggle_auth(),

            // Variables popup
            UiEvent::ToggleSettings => self.state.toggle_settings(),
            UiEvent::SettingsChar(c) => self.state.settings_char(c),
            UiEvent::SettingsBackspace => self.state.settings_backspace(),
            UiEvent::SettingsNextField => self.state.settings_next_field(),
            UiEvent::AddVariable => self.state.add_variable(),
            UiEvent::NextVariable => self.state.next_variable(),
            UiEvent::PrevVariable => self.state.prev_variable(),
            UiEvent::RemoveVariable => self.state.remove_selected_variable(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::ResolvedOutcome;

    #[tokio::test]
    async fn send_event_emits_command_and_render_updates() {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (net_cmd_tx, mut net_cmd_rx) = mpsc::unbounded_channel();
        let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();

        let actor = AppActor::new(AppState::new(&AppConfig::default()), net_cmd_tx, render_tx);
        let handle = tokio::spawn(actor.run(ui_rx, net_resp_rx));

        let initial = render_rx.recv().await.unwrap();
        assert!(!initial.is_loading);

        ui_tx.send(UiEvent::SendRequest).unwrap();
        let id = match net_cmd_rx.recv().await.unwrap() {
            NetworkCommand::ExecuteRequest { id, .. } => id,
            other => panic!("unexpected command: {:?}", other),
        };
        let loading = render_rx.recv().await.unwrap();
        assert!(loading.is_loading);
        assert!(loading.outcome.is_none());

        net_resp_tx
            .send(NetworkResponse::Completed { id, outcome: ResolvedOutcome::failure("boom") })
            .unwrap();
        let done = render_rx.recv().await.unwrap();
        assert!(!done.is_loading);
        assert_eq!(done.outcome, Some(ResolvedOutcome::failure("boom")));

        ui_tx.send(UiEvent::Quit).unwrap();
        assert!(matches!(net_cmd_rx.recv().await, Some(NetworkCommand::Shutdown)));
        handle.await.unwrap();
    }
}
