use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// HTTP Method enum
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
    PUT,
    DELETE,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
        }
    }

    pub fn next(&self) -> HttpMethod {
        match self {
            HttpMethod::GET => HttpMethod::POST,
            HttpMethod::POST => HttpMethod::PUT,
            HttpMethod::PUT => HttpMethod::DELETE,
            HttpMethod::DELETE => HttpMethod::GET,
        }
    }

    /// Only POST and PUT ever carry a request body
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::POST | HttpMethod::PUT)
    }
}

/// Authentication configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AuthConfig {
    #[default]
    None,
    Bearer(String),
}

impl AuthConfig {
    pub fn label(&self) -> &'static str {
        match self {
            AuthConfig::None => "None",
            AuthConfig::Bearer(_) => "Bearer",
        }
    }

    /// Bearer token to inject, if any. Empty tokens inject nothing.
    pub fn bearer_token(&self) -> Option<&str> {
        match self {
            AuthConfig::Bearer(token) if !token.is_empty() => Some(token.as_str()),
            _ => None,
        }
    }
}

/// A single editable header row
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    pub key: String,
    pub value: String,
}

impl HeaderEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        HeaderEntry {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.key.trim().is_empty()
    }
}

/// A request as composed in the form, before variable resolution
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub url_template: String,
    pub headers: Vec<HeaderEntry>,
    pub body: String,
    pub auth: AuthConfig,
}

impl Default for RequestSpec {
    fn default() -> Self {
        use crate::constants::DEFAULT_URL_TEMPLATE;
        RequestSpec {
            method: HttpMethod::GET,
            url_template: String::from(DEFAULT_URL_TEMPLATE),
            headers: vec![HeaderEntry::default()],
            body: String::new(),
            auth: AuthConfig::None,
        }
    }
}

/// Decoded response body
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Text(String),
}

impl ResponseBody {
    /// Text shown in the response pane. Objects and arrays are
    /// pretty-printed; scalars are shown raw, strings without quotes.
    pub fn display(&self) -> String {
        match self {
            ResponseBody::Json(serde_json::Value::String(text)) => text.clone(),
            ResponseBody::Json(value) if self.is_structured() => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            ResponseBody::Json(value) => value.to_string(),
            ResponseBody::Text(text) => text.clone(),
        }
    }

    /// A JSON object or array, worth syntax highlighting
    pub fn is_structured(&self) -> bool {
        matches!(self, ResponseBody::Json(value) if value.is_object() || value.is_array())
    }
}

/// Terminal result of one submission
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedOutcome {
    Success {
        status: u16,
        headers: BTreeMap<String, String>,
        body: ResponseBody,
        elapsed_ms: f64,
    },
    Failure {
        message: String,
    },
}

impl ResolvedOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        ResolvedOutcome::Failure {
            message: message.into(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ResolvedOutcome::Success { status, .. } => Some(*status),
            ResolvedOutcome::Failure { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ResolvedOutcome::Success { .. })
    }
}
