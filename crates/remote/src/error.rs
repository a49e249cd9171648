/// Error type for remote operations, shared by both clients.
#[derive(Debug)]
pub enum RemoteError {
    /// Network error (DNS, connection refused, timeout)
    Network(String),
    /// HTTP error with status code
    Http(u16, String),
    /// Server rejected the request (400/422 with message)
    Validation(String),
    /// Resource does not exist (404)
    NotFound(String),
    /// Response body did not decode as expected
    Parse(String),
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RemoteError::Network(msg) => write!(f, "Network error: {}", msg),
            RemoteError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            RemoteError::Validation(msg) => write!(f, "{}", msg),
            RemoteError::NotFound(msg) => write!(f, "Not found: {}", msg),
            RemoteError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for RemoteError {}

/// Map a non-success response to the right error variant, passing
/// successful responses through untouched.
pub(crate) fn check(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, RemoteError> {
    let status = response.status().as_u16();
    if response.status().is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    let msg = error_message(status, &body);
    match status {
        400 | 422 => Err(RemoteError::Validation(msg)),
        404 => Err(RemoteError::NotFound(msg)),
        _ => Err(RemoteError::Http(status, msg)),
    }
}

/// Pull a human-readable message out of an error body. The registry
/// reports `{"detail": ...}`, the values API `{"error": {"message":
/// ...}}`; anything else falls back to the raw body or the status.
fn error_message(status: u16, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(msg) = json["error"]["message"].as_str() {
            return msg.to_string();
        }
        if let Some(msg) = json["detail"].as_str() {
            return msg.to_string();
        }
        if let Some(msg) = json["message"].as_str() {
            return msg.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("status {}", status)
    } else {
        trimmed.to_string()
    }
}
