//! Error types for the Denvr client.
//!
//! Validation failures are their own variant so callers can branch on the
//! kind instead of matching message text. Transport errors are passed
//! through unchanged from the HTTP layer.

use std::path::PathBuf;

use crate::endpoint::HttpMethod;

/// Errors returned by every client operation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DenvrError {
    // Validation errors (raised before any network activity)
    #[error("missing required parameter(s) for {method} {path}: {}", .missing.join(", "))]
    MissingParameters {
        method: HttpMethod,
        path: String,
        missing: Vec<String>,
    },

    #[error("unknown argument '{name}' for endpoint {endpoint}")]
    UnknownArgument { endpoint: String, name: String },

    #[error("failed to encode request parameters")]
    Encode(#[source] serde_json::Error),

    // Transport errors
    #[error("HTTP request failed")]
    RequestFailed(#[source] reqwest::Error),

    #[error("failed to read response body")]
    ResponseRead(#[source] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to parse response JSON")]
    Decode(#[source] serde_json::Error),

    // Setup errors
    #[error("invalid server URL: {url}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to create HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("config file not found: {0:?}")]
    ConfigNotFound(PathBuf),

    #[error("failed to read config file: {path:?}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {path:?}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl DenvrError {
    /// True for errors produced by parameter validation, before dispatch.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DenvrError::MissingParameters { .. } | DenvrError::UnknownArgument { .. }
        )
    }

    /// True for errors raised while talking to the API.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DenvrError::RequestFailed(_)
                | DenvrError::ResponseRead(_)
                | DenvrError::HttpStatus { .. }
                | DenvrError::Decode(_)
        )
    }

    /// Names of the missing required parameters, if this is a validation error.
    pub fn missing_parameters(&self) -> Option<&[String]> {
        match self {
            DenvrError::MissingParameters { missing, .. } => Some(missing),
            _ => None,
        }
    }

    /// HTTP status of a non-success response.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            DenvrError::HttpStatus { status, .. } => Some(*status),
            DenvrError::RequestFailed(e) | DenvrError::ResponseRead(e) => e.status(),
            _ => None,
        }
    }
}

/// Result type alias for Denvr client operations
pub type Result<T> = std::result::Result<T, DenvrError>;

/// Format an API error for display
/// Security: Sanitizes error messages to avoid leaking API response bodies
pub fn format_api_error(error: &DenvrError) -> String {
    if error.is_validation() {
        return error.to_string();
    }

    if let Some(status) = error.status() {
        return match status.as_u16() {
            400 => "Invalid request. Check your parameters.".to_string(),
            401 => "Authentication failed. Check the token in your denvr config.".to_string(),
            403 => "Permission denied for this tenancy.".to_string(),
            404 => "Resource not found.".to_string(),
            409 => "Resource conflict. The resource may already exist or be in use.".to_string(),
            429 => "Rate limit exceeded. Please try again later.".to_string(),
            500..=599 => "Denvr service temporarily unavailable. Please try again.".to_string(),
            code => format!("Request failed with HTTP status {}.", code),
        };
    }

    match error {
        DenvrError::RequestFailed(_) => {
            "Request failed. Check your network connection and try again.".to_string()
        }
        DenvrError::Decode(_) => "The API returned a response that is not valid JSON.".to_string(),
        other => {
            // Truncate long error messages and remove potential sensitive data
            let error_str = other.to_string();
            let sanitized = error_str
                .chars()
                .filter(|c| c.is_ascii_graphic() || *c == ' ')
                .take(80)
                .collect::<String>();

            if sanitized.len() < error_str.len() {
                format!("{}...", sanitized)
            } else {
                sanitized
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing(names: &[&str]) -> DenvrError {
        DenvrError::MissingParameters {
            method: HttpMethod::Get,
            path: "/api/v1/servers/snapshots/GetSnapshot".to_string(),
            missing: names.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_missing_parameters_message_names_all() {
        let err = missing(&["Id", "Namespace"]);
        assert_eq!(
            err.to_string(),
            "missing required parameter(s) for GET /api/v1/servers/snapshots/GetSnapshot: Id, Namespace"
        );
    }

    #[test]
    fn test_missing_parameters_is_validation() {
        let err = missing(&["Id"]);
        assert!(err.is_validation());
        assert!(!err.is_transport());
        assert_eq!(err.missing_parameters(), Some(&["Id".to_string()][..]));
    }

    #[test]
    fn test_http_status_is_transport() {
        let err = DenvrError::HttpStatus {
            status: reqwest::StatusCode::NOT_FOUND,
            body: "{}".to_string(),
        };
        assert!(err.is_transport());
        assert!(!err.is_validation());
        assert!(err.missing_parameters().is_none());
        assert_eq!(format_api_error(&err), "Resource not found.");
    }

    #[test]
    fn test_format_server_error() {
        let err = DenvrError::HttpStatus {
            status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
            body: "upstream connect error".to_string(),
        };
        let message = format_api_error(&err);
        assert!(message.contains("temporarily unavailable"));
        assert!(!message.contains("upstream"));
    }

    #[test]
    fn test_format_validation_error_keeps_names() {
        let message = format_api_error(&missing(&["Cluster"]));
        assert!(message.contains("Cluster"));
    }
}
