//! Error types for vCHS API calls

use super::codec::WireFormat;
use reqwest::StatusCode;
use serde::Deserialize;

/// Result alias used by every API caller
pub type Result<T> = std::result::Result<T, VchsError>;

/// Failure of a single API call
#[derive(Debug, thiserror::Error)]
pub enum VchsError {
    /// Connection or IO failure while talking to the server
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Login was answered with anything other than the success status
    #[error("authentication failed with status {status}")]
    AuthFailure { status: StatusCode },

    /// A successful response lacked a header the caller depends on
    #[error("response is missing the {0} header")]
    MissingHeader(&'static str),

    /// A record that must name an existing resource carried no id
    #[error("{0} record has no id")]
    MissingId(&'static str),

    #[error("unexpected status {status}")]
    UnexpectedStatus {
        status: StatusCode,
        content_type: Option<String>,
        body: String,
    },

    #[error("failed to decode {format} body: {message}")]
    Decode { format: WireFormat, message: String },

    #[error("failed to encode {format} body: {message}")]
    Encode { format: WireFormat, message: String },
}

/// Error document some endpoints return alongside a failure status
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl VchsError {
    /// HTTP status carried by the error, if the server answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::AuthFailure { status } | Self::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Decode the server's error document from an unexpected-status response
    pub fn error_body(&self) -> Option<ErrorBody> {
        let Self::UnexpectedStatus {
            content_type, body, ..
        } = self
        else {
            return None;
        };
        if body.trim().is_empty() {
            return None;
        }
        WireFormat::from_content_type(content_type.as_deref())
            .decode(body)
            .ok()
    }
}

/// Format an API error for display
/// Security: keeps raw server bodies out of user-facing output
pub fn format_api_error(error: &VchsError) -> String {
    match error {
        VchsError::Transport(_) => {
            "Request failed. Check your network connection and hostname.".to_string()
        }
        VchsError::InvalidUrl(e) => format!("Invalid URL: {}", e),
        VchsError::AuthFailure { .. } => "Could not log in with provided credentials.".to_string(),
        VchsError::MissingHeader(name) => format!("Server response did not include {}.", name),
        VchsError::MissingId(what) => format!("Cannot address a {} without an id.", what),
        VchsError::Decode { format, .. } => format!("Could not read the {} response.", format),
        VchsError::Encode { format, .. } => format!("Could not build the {} request.", format),
        VchsError::UnexpectedStatus { status, .. } => match status.as_u16() {
            401 => "Session is not authorized. Log in again.".to_string(),
            403 => "Permission denied.".to_string(),
            404 => "Resource not found.".to_string(),
            409 => "Resource conflict. The resource may already exist or be in use.".to_string(),
            500 | 503 => "Service temporarily unavailable. Please try again.".to_string(),
            code => format!("ERROR . {}", code),
        },
    }
}
