//! Request resolver - builds outgoing requests and normalizes responses

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::constants::AUTHORIZATION_HEADER;
use crate::models::{HeaderEntry, RequestSpec, ResolvedOutcome, ResponseBody};
use crate::network::transport::{OutgoingRequest, Transport, TransportError, TransportResponse};
use crate::variables::VariableStore;

/// Why a submission produced no response
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

/// Collapse header rows into a map; blank keys are dropped and later
/// duplicates win. Keys are compared exactly.
pub fn flatten_headers(entries: &[HeaderEntry]) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    for entry in entries {
        if entry.is_blank() {
            continue;
        }
        headers.insert(entry.key.clone(), entry.value.clone());
    }
    headers
}

/// Build a request from the form snapshot
pub fn build_request(spec: &RequestSpec, variables: &VariableStore) -> OutgoingRequest {
    let url = variables.resolve(&spec.url_template);

    let mut headers = flatten_headers(&spec.headers);

    // Add auth
    if let Some(token) = spec.auth.bearer_token() {
        // The transport folds header names, so any spelling of the header
        // would otherwise be sent alongside ours.
        headers.retain(|key, _| !key.eq_ignore_ascii_case(AUTHORIZATION_HEADER));
        headers.insert(
            AUTHORIZATION_HEADER.to_string(),
            format!("Bearer {}", token),
        );
    }

    // Add body
    let body = if spec.method.has_body() && !spec.body.is_empty() {
        Some(spec.body.clone())
    } else {
        None
    };

    tracing::debug!(
        method = spec.method.as_str(),
        headers = headers.len(),
        has_body = body.is_some(),
        "Built request"
    );

    OutgoingRequest {
        method: spec.method,
        url,
        headers,
        body,
    }
}

/// Collapse response header pairs into a map, keeping the last value per key
pub fn flatten_response_headers(pairs: &[(String, String)]) -> BTreeMap<String, String> {
    pairs.iter().cloned().collect()
}

/// Decode the body according to its content type
pub fn decode_body(response: &TransportResponse) -> Result<ResponseBody, serde_json::Error> {
    let is_json = response
        .content_type()
        .map(|ct| ct.contains("application/json"))
        .unwrap_or(false);

    if is_json {
        serde_json::from_slice(&response.body).map(ResponseBody::Json)
    } else {
        Ok(ResponseBody::Text(
            String::from_utf8_lossy(&response.body).into_owned(),
        ))
    }
}

/// Milliseconds rounded to two decimal places
pub fn elapsed_millis(elapsed: Duration) -> f64 {
    (elapsed.as_nanos() as f64 / 10_000.0).round() / 100.0
}

/// Turn a raw response into a display outcome
pub fn normalize_response(response: TransportResponse, elapsed: Duration) -> ResolvedOutcome {
    match decode_body(&response) {
        Ok(body) => ResolvedOutcome::Success {
            status: response.status,
            headers: flatten_response_headers(&response.headers),
            body,
            elapsed_ms: elapsed_millis(elapsed),
        },
        Err(e) => {
            // Status and headers are dropped along with the body
            tracing::warn!(status = response.status, error = %e, "Response declared JSON but failed to decode");
            ResolvedOutcome::failure(ExecuteError::Decode(e).to_string())
        }
    }
}

/// Send the request and read its body. The elapsed time stops when the
/// status and headers arrive; reading the body is not timed.
async fn dispatch<T: Transport>(
    transport: &T,
    request: OutgoingRequest,
) -> Result<(TransportResponse, Duration), ExecuteError> {
    let start = Instant::now();
    let (head, pending) = transport.send(request).await?;
    let elapsed = start.elapsed();

    let body = transport.read_body(pending).await?;
    Ok((head.with_body(body), elapsed))
}

/// Execute a composed request through the given transport
pub async fn execute<T: Transport>(
    transport: &T,
    spec: &RequestSpec,
    variables: &VariableStore,
) -> ResolvedOutcome {
    let request = build_request(spec, variables);
    tracing::info!(method = request.method.as_str(), url = %request.url, "Dispatching request");

    match dispatch(transport, request).await {
        Ok((response, elapsed)) => normalize_response(response, elapsed),
        Err(e) => ResolvedOutcome::failure(e.to_string()),
    }
}
