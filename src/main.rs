//! Courier TUI - Actor-based HTTP request composer
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async request execution

use std::io;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;

use courier_tui::app::{AppActor, AppState};
use courier_tui::config::AppConfig;
use courier_tui::constants::{APP_NAME, APP_VERSION, LOG_FILE_NAME};
use courier_tui::messages::ui_events::{key_to_ui_event, HeaderField, InputMode, Panel, SettingsField};
use courier_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use courier_tui::models::{AuthConfig, ResolvedOutcome};
use courier_tui::network::{NetworkActor, ReqwestTransport};
use courier_tui::ui::{
    self, cursor_cell, format_elapsed, highlight_json, method_color, plain_lines, status_color,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(version = APP_VERSION, "Starting {}", APP_NAME);
    let config = AppConfig::load();

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(ReqwestTransport::new(), net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(AppState::new(&config), net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_panel,
                    current_state.input_mode,
                    current_state.show_help,
                    current_state.show_settings,
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Method + URL
            Constraint::Length(8),  // Panels (Body/Headers/Auth)
            Constraint::Min(5),     // Response
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_url_bar(f, state, chunks[0]);
    draw_middle_panels(f, state, chunks[1]);
    draw_response(f, state, chunks[2]);
    draw_status_bar(f, state, chunks[3]);

    // Popups
    if state.show_settings {
        draw_settings_popup(f, state, area);
    }

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn focus_style(is_focused: bool, input_mode: InputMode) -> Style {
    if is_focused && input_mode == InputMode::Editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Put the terminal cursor at byte offset `cursor` of `text`, drawn inside
/// the borders of `area` after `prefix` columns.
fn place_cursor(f: &mut Frame, area: Rect, text: &str, cursor: usize, prefix: usize) {
    let (column, row) = cursor_cell(text, cursor);
    let max_x = area.x + area.width.saturating_sub(2);
    let max_y = area.y + area.height.saturating_sub(2);
    let cursor_x = (area.x + (prefix + column) as u16 + 1).min(max_x);
    let cursor_y = (area.y + row as u16 + 1).min(max_y);
    f.set_cursor_position(Position::new(cursor_x, cursor_y));
}

fn draw_url_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Url;
    let mcolor = method_color(state.method.as_str());
    let loading = if state.is_loading { " [...]" } else { "" };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(is_focused, state.input_mode))
        .title(format!(" {}{} ", state.method.as_str(), loading))
        .title_style(Style::default().fg(mcolor).bold());

    let input = Paragraph::new(state.url.as_str()).block(block);
    f.render_widget(input, area);

    if is_focused && state.input_mode == InputMode::Editing {
        place_cursor(f, area, &state.url, state.cursor_position, 0);
    }
}

fn draw_middle_panels(f: &mut Frame, state: &RenderState, area: Rect) {
    let tabs_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let tab_titles = vec!["Body", "Headers", "Auth"];
    let selected_tab = match state.active_panel {
        Panel::Body => 0,
        Panel::Headers => 1,
        Panel::Auth => 2,
        _ => 0,
    };

    let tabs = ui::render_tabs(&tab_titles, selected_tab);
    f.render_widget(tabs, tabs_area[0]);

    let content_area = tabs_area[1];
    match state.active_panel {
        Panel::Body | Panel::Url | Panel::Response => draw_body_panel(f, state, content_area),
        Panel::Headers => draw_headers_panel(f, state, content_area),
        Panel::Auth => draw_auth_panel(f, state, content_area),
    }
}

fn draw_body_panel(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Body;

    let title = if state.method.has_body() {
        " Body "
    } else {
        " Body (not sent with GET/DELETE) "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(is_focused, state.input_mode))
        .title(title);

    let body_style = if state.method.has_body() {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let body = Paragraph::new(state.body.as_str())
        .style(body_style)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(body, area);

    if is_focused && state.input_mode == InputMode::Editing {
        place_cursor(f, area, &state.body, state.cursor_position, 0);
    }
}

fn draw_headers_panel(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Headers;
    let editing = is_focused && state.input_mode == InputMode::Editing;

    let items: Vec<ListItem> = state
        .headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let selected = is_focused && i == state.selected_header;
            let key = if h.key.is_empty() { "<key>" } else { h.key.as_str() };
            let value = if h.value.is_empty() { "<value>" } else { h.value.as_str() };

            let field_style = |field: HeaderField| {
                if selected && editing && state.header_field == field {
                    Style::default().fg(Color::Yellow).underlined()
                } else if selected {
                    Style::default().fg(Color::Yellow).bold()
                } else if h.is_blank() {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default()
                }
            };

            ListItem::new(Line::from(vec![
                Span::styled(key.to_string(), field_style(HeaderField::Key)),
                Span::raw(": "),
                Span::styled(value.to_string(), field_style(HeaderField::Value)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(is_focused, state.input_mode))
            .title(" Headers (a:add d:del e:edit Tab:key/value) "),
    );
    f.render_widget(list, area);
}

fn draw_auth_panel(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Auth;

    let content = match &state.auth {
        AuthConfig::None => String::from("Press 't' to use a bearer token"),
        AuthConfig::Bearer(token) => format!(
            "Token: {}",
            if token.is_empty() { "<empty>" } else { token }
        ),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(is_focused, state.input_mode))
        .title(format!(" Auth: {} (t:toggle) ", state.auth.label()));

    let auth = Paragraph::new(content).block(block);
    f.render_widget(auth, area);

    if is_focused && state.input_mode == InputMode::Editing {
        if let AuthConfig::Bearer(token) = &state.auth {
            place_cursor(f, area, token, state.cursor_position, "Token: ".len());
        }
    }
}

fn draw_response(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Response;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<Line> = match &state.outcome {
        None if state.is_loading => {
            block = block.title(" Response ");
            vec![Line::from(Span::styled("Loading...", Style::default().fg(Color::DarkGray)))]
        }
        None => {
            block = block.title(" Response ");
            vec![Line::from(Span::styled(
                "Press 's' to send the request, 'v' to edit variables, '?' for help.",
                Style::default().fg(Color::DarkGray),
            ))]
        }
        Some(ResolvedOutcome::Failure { message }) => {
            block = block.title(Span::styled(" Error ", Style::default().fg(Color::Red).bold()));
            vec![Line::from(Span::styled(
                format!("Error: {}", message),
                Style::default().fg(Color::Red).bold(),
            ))]
        }
        Some(ResolvedOutcome::Success { status, headers, body, elapsed_ms }) => {
            block = block
                .title(Span::styled(
                    format!(" {} ", status),
                    Style::default().fg(status_color(*status)).bold(),
                ))
                .title_bottom(Line::from(format!(" {} ", format_elapsed(*elapsed_ms))).right_aligned());

            let mut lines = vec![Line::from(Span::styled("Headers:", Style::default().bold()))];
            for (key, value) in headers {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {}: ", key), Style::default().fg(Color::Gray)),
                    Span::raw(value.clone()),
                ]));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("Body:", Style::default().bold())));
            let text = body.display();
            if body.is_structured() {
                lines.extend(highlight_json(&text));
            } else {
                lines.extend(plain_lines(&text));
            }
            lines
        }
    };

    let response = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.response_scroll, 0));
    f.render_widget(response, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.is_loading {
        " Loading... "
    } else if state.input_mode == InputMode::Editing && state.active_panel == Panel::Body {
        " ESC:stop editing | arrows:move | Enter:new line "
    } else if state.input_mode == InputMode::Editing {
        " ESC:stop editing | arrows:move | Enter:done "
    } else {
        " Tab:panel | e:edit | m:method | s:send | v:variables | ?:help | q:quit "
    };

    let bar = Paragraph::new(status)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_settings_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(70, 60, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Name + value inputs
            Constraint::Min(3),     // Variable list
        ])
        .split(popup_area);

    let inputs = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[0]);

    let input_style = |field: SettingsField| {
        if state.settings_field == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };

    let name = Paragraph::new(state.new_variable_name.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(input_style(SettingsField::Name))
            .title(" Variable Name ")
            .style(Style::default().bg(Color::Black)),
    );
    let value = Paragraph::new(state.new_variable_value.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(input_style(SettingsField::Value))
            .title(" Value (Enter:add) ")
            .style(Style::default().bg(Color::Black)),
    );

    let items: Vec<ListItem> = state
        .variables
        .iter()
        .map(|(k, v)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{{{{{}}}}}", k), Style::default().fg(Color::Cyan)),
                Span::raw(" = "),
                Span::raw(v.clone()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Variables (↑/↓ select, Del remove, Esc close) ")
                .style(Style::default().bg(Color::Black)),
        )
        .highlight_style(Style::default().fg(Color::Yellow).bold());

    let mut list_state = ListState::default();
    if !state.variables.is_empty() {
        list_state.select(Some(state.selected_variable));
    }

    f.render_widget(Clear, popup_area);
    f.render_widget(name, inputs[0]);
    f.render_widget(value, inputs[1]);
    f.render_stateful_widget(list, chunks[1], &mut list_state);

    let (target, text) = match state.settings_field {
        SettingsField::Name => (inputs[0], &state.new_variable_name),
        SettingsField::Value => (inputs[1], &state.new_variable_value),
    };
    place_cursor(f, target, text, text.len(), 0);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 COURIER TUI - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Switch panels
   ↑ / ↓              Scroll response / select header

 REQUEST
   m                  Cycle HTTP method
   s                  Send request
   e / Enter          Edit current field
   Enter (body)       New line; Esc stops editing
   {{name}}           Variable placeholder in the URL

 HEADERS
   a                  Add empty header
   d                  Delete selected header
   Tab (editing)      Switch between key and value

 AUTH
   t                  Toggle bearer token

 VARIABLES
   v                  Open / close variables
   Tab                Switch name / value input
   Enter              Add variable (needs name and value)
   Del                Remove selected variable

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
