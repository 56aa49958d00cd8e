//! # Courier TUI
//!
//! A minimal terminal HTTP request composer and response inspector.
//!
//! ## Features
//! - HTTP methods: GET, POST, PUT, DELETE
//! - `{{variable}}` placeholders in the URL, resolved from session variables
//! - Editable header list and request body
//! - Bearer token auth
//! - Response status, headers, timing and JSON-aware body view
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod config;
pub mod constants;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;
pub mod variables;

// Re-export commonly used types
pub use models::{AuthConfig, HeaderEntry, HttpMethod, RequestSpec, ResolvedOutcome, ResponseBody};
pub use variables::VariableStore;
pub use network::{execute, ReqwestTransport, Transport};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor};
pub use network::NetworkActor;
