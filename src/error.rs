use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a call to the backend. The `Display` text is what the form
/// shows as its status message.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request never produced a response.
    #[error("{operation}: {source}")]
    Network {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response. `detail` is whatever the backend said, if it said
    /// anything structured.
    #[error("{operation}{}", detail_suffix(.detail))]
    Status {
        operation: &'static str,
        status: StatusCode,
        detail: Option<String>,
    },

    /// 2xx with a body we could not decode.
    #[error("{operation}: invalid response body: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

impl RequestError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            RequestError::Network { source, .. } | RequestError::Decode { source, .. } => {
                source.status()
            }
        }
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

/// Pull a human-readable message out of an error body: `{"detail": "..."}`,
/// `{"detail": [{"msg": "..."}, ...]}` or `{"error": "..."}`.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    let detail = match value.get("detail") {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(serde_json::Value::Array(entries)) => {
            let msgs: Vec<&str> = entries
                .iter()
                .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
                .collect();
            (!msgs.is_empty()).then(|| msgs.join("; "))
        }
        _ => None,
    };

    detail
        .or_else(|| value.get("error").and_then(|e| e.as_str()).map(|s| s.to_string()))
        .filter(|s| !s.trim().is_empty())
}
