//! Error types shared by the panel controllers, the API client and the
//! browser binding.

use thiserror::Error;

/// Failure to reach part of a panel's markup or its editor.
///
/// These abort the current interaction; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("panel '{panel}': no element matches {locator}")]
    MissingElement { panel: String, locator: String },

    #[error("editor '{0}' could not be attached")]
    EditorUnavailable(String),

    #[error("host error: {0}")]
    Host(String),
}

/// Failure of a query round trip. Rendered into the panel's error block.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// The server answered with its `{exception, details}` error document.
    #[error("{exception}: {details}")]
    Server { exception: String, details: String },

    /// Non-success status whose body is not the server's error document.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl QueryError {
    /// Name shown in bold in the error block.
    pub fn exception_name(&self) -> &str {
        match self {
            QueryError::Server { exception, .. } => exception,
            QueryError::Http { .. } => "HttpError",
            QueryError::Transport(_) => "NetworkError",
            QueryError::MalformedResponse(_) => "MalformedResponse",
        }
    }

    /// Plain-text line shown under the exception name.
    pub fn details(&self) -> String {
        match self {
            QueryError::Server { details, .. } => details.clone(),
            QueryError::Http { status, body } => {
                if body.trim().is_empty() {
                    format!("status {}", status)
                } else {
                    format!("status {}: {}", status, body.trim())
                }
            }
            QueryError::Transport(message) | QueryError::MalformedResponse(message) => {
                message.clone()
            }
        }
    }
}

impl From<reqwest::Error> for QueryError {
    fn from(err: reqwest::Error) -> Self {
        QueryError::Transport(err.to_string())
    }
}
