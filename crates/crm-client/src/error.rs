//! Client-side error type and the server's error envelope.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// Error body returned by the API for every non-2xx response.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    /// Stable identifier such as `invalid_request` or `not_found`.
    pub code: String,
    pub message: String,
    pub trace_id: Option<String>,
    /// Field violations for `invalid_request` responses.
    pub details: Option<Value>,
}

/// Errors raised by [`crate::ApiClient`] and [`crate::QueryCache`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The base URL or a derived endpoint was malformed.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    /// The request never produced a response, or its body was unreadable.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with its error envelope.
    #[error("{status}: {}", body.message)]
    Api {
        status: StatusCode,
        body: ApiErrorBody,
    },
    /// The server answered with a non-2xx status and no recognisable envelope.
    #[error("unexpected {status} response")]
    UnexpectedStatus { status: StatusCode, body: String },
    /// A successful response body did not match the expected type.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    /// A cache entry was read back as a different type than it was stored as.
    #[error("cached value for {key} has an unexpected type")]
    CachedTypeMismatch { key: String },
}

impl ClientError {
    /// HTTP status of a server-side failure.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the server reported a missing or foreign resource.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Whether the session is missing or expired.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Build the error for a non-2xx response body.
    pub(crate) fn from_response_body(status: StatusCode, body: &[u8]) -> Self {
        match serde_json::from_slice::<ApiErrorBody>(body) {
            Ok(body) => Self::Api { status, body },
            Err(_) => Self::UnexpectedStatus {
                status,
                body: String::from_utf8_lossy(body).into_owned(),
            },
        }
    }
}
