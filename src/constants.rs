//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// URL template of a new request; empty unless the config file sets one
pub const DEFAULT_URL_TEMPLATE: &str = "";

/// Variable seeded into the store when no config file provides any
pub const DEFAULT_VARIABLE: (&str, &str) = ("baseUrl", "https://api.example.com");

/// Directory under the home directory holding the optional config file
pub const CONFIG_DIR_NAME: &str = ".courier";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Log file written in the working directory
pub const LOG_FILE_NAME: &str = "courier.log";

/// Header injected by bearer auth
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Application name
pub const APP_NAME: &str = "Courier TUI";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
