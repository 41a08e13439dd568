//! Error types for the API client.

use serde::{Deserialize, Serialize};

use crate::transport::TransportError;

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The base URL, path or continuation URL did not form a valid URL.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The request never completed (connection refused, DNS failure, timeout).
    #[error("Request failed: {0}")]
    Transport(#[from] TransportError),
    /// The API answered with a non-success status.
    #[error("{}", describe_status(*status, envelope.as_ref(), body))]
    HttpStatus {
        status: u16,
        /// The provider's error body, when it parsed as one.
        envelope: Option<ErrorEnvelope>,
        /// Raw body text, truncated.
        body: String,
    },
    /// A success body that is not JSON.
    #[error("Failed to decode response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },
    /// The client could not be configured.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl Error {
    /// HTTP status for [`Error::HttpStatus`], `None` for every other kind.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The provider's own status text (e.g. `NOT_FOUND`), if it sent one.
    pub fn provider_status(&self) -> Option<&str> {
        self.envelope().and_then(|e| e.status.as_deref())
    }

    /// The provider's human-readable error message, if it sent one.
    pub fn message(&self) -> Option<&str> {
        self.envelope().and_then(ErrorEnvelope::message)
    }

    /// Request identifier echoed by the provider on failure.
    pub fn request_id(&self) -> Option<&str> {
        self.envelope().and_then(|e| e.request_id.as_deref())
    }

    fn envelope(&self) -> Option<&ErrorEnvelope> {
        match self {
            Error::HttpStatus { envelope, .. } => envelope.as_ref(),
            _ => None,
        }
    }
}

/// Error body returned by the API alongside a non-success status.
///
/// Older endpoints put the text in `error`, newer ones in `message`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ErrorEnvelope {
    pub status: Option<String>,
    pub request_id: Option<String>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ErrorEnvelope {
    /// Parses `body` as an error envelope. A JSON object carrying none of the
    /// known fields does not count as one.
    pub fn parse(body: &[u8]) -> Option<Self> {
        let envelope = serde_json::from_slice::<ErrorEnvelope>(body).ok()?;
        if envelope.status.is_none() && envelope.message().is_none() {
            return None;
        }
        Some(envelope)
    }

    /// `message`, falling back to the legacy `error` field.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().or(self.error.as_deref())
    }
}

fn describe_status(status: u16, envelope: Option<&ErrorEnvelope>, body: &str) -> String {
    let Some(envelope) = envelope else {
        return if body.is_empty() {
            format!("Request failed with status {}", status)
        } else {
            format!("Request failed with status {}: {}", status, body)
        };
    };
    let mut out = format!("Request failed with status {}", status);
    if let Some(provider_status) = &envelope.status {
        out.push_str(&format!(" ({})", provider_status));
    }
    if let Some(message) = envelope.message() {
        out.push_str(&format!(": {}", message));
    }
    if let Some(request_id) = &envelope.request_id {
        out.push_str(&format!(" [request id {}]", request_id));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_prefers_message_over_error() {
        let env = ErrorEnvelope::parse(
            br#"{"status":"ERROR","message":"new","error":"old","request_id":"r1"}"#,
        )
        .unwrap();
        assert_eq!(env.message(), Some("new"));

        let env = ErrorEnvelope::parse(br#"{"status":"ERROR","error":"Unknown API Key"}"#).unwrap();
        assert_eq!(env.message(), Some("Unknown API Key"));
    }

    #[test]
    fn envelope_rejects_non_envelopes() {
        assert!(ErrorEnvelope::parse(b"Internal Server Error").is_none());
        assert!(ErrorEnvelope::parse(b"").is_none());
        assert!(ErrorEnvelope::parse(br#"{"foo":1}"#).is_none());
        assert!(ErrorEnvelope::parse(b"[1,2]").is_none());
    }

    #[test]
    fn display_includes_provider_fields() {
        let err = Error::HttpStatus {
            status: 404,
            envelope: ErrorEnvelope::parse(
                br#"{"status":"NOT_FOUND","request_id":"abc","message":"Ticker not found."}"#,
            ),
            body: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "Request failed with status 404 (NOT_FOUND): Ticker not found. [request id abc]"
        );
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.provider_status(), Some("NOT_FOUND"));
        assert_eq!(err.message(), Some("Ticker not found."));
        assert_eq!(err.request_id(), Some("abc"));
    }

    #[test]
    fn display_without_envelope_uses_body() {
        let err = Error::HttpStatus {
            status: 502,
            envelope: None,
            body: "Bad Gateway".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed with status 502: Bad Gateway");
        assert_eq!(err.message(), None);

        let err = Error::Config("missing key".to_string());
        assert_eq!(err.status(), None);
    }
}
