use serde::Deserialize;
use thiserror::Error;

/// Failures while turning an [`crate::Endpoint`] into a request URL.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum RouterError {
    /// The base URL could not be parsed, or cannot carry a path.
    #[error("the provided base URL is invalid, check the URL configuration")]
    InvalidBaseUrl,

    /// Path and query could not be assembled into an absolute URL.
    #[error(
        "failed to build a valid URL from the given components, check the path or query parameters"
    )]
    InvalidComponents,
}

/// Errors returned by [`crate::ApiService`] and the transports.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The endpoint description is malformed.
    #[error(transparent)]
    Router(#[from] RouterError),

    /// The connectivity gate reported no usable network; nothing was sent.
    #[error("the network connection is unavailable")]
    Offline,

    /// The transport did not produce a usable HTTP response.
    #[error("the server response was not a valid HTTP response")]
    InvalidResponse,

    /// Non-success HTTP status, with the API's message when one was readable.
    #[error("{}", render_http(*status, message.as_deref()))]
    Http {
        status: u16,
        message: Option<String>,
        documentation_url: Option<String>,
    },

    /// HTTP transport-layer request failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Response body could not be decoded into the target type.
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status code for [`ClientError::Http`] failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the call was rejected by the connectivity gate.
    pub fn is_offline(&self) -> bool {
        matches!(self, Self::Offline)
    }
}

fn render_http(status: u16, message: Option<&str>) -> String {
    match message {
        Some(message) if !message.is_empty() => format!("HTTP {status}: {message}"),
        _ => format!("HTTP {status}"),
    }
}

/// Error payload returned by the GitHub REST API on non-success responses.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct GitHubApiError {
    /// Human-readable description of the failure.
    pub message: String,
    /// Link to the GitHub documentation for the failing endpoint.
    #[serde(default)]
    pub documentation_url: Option<String>,
}

impl GitHubApiError {
    /// Reads the payload from a response body, if it has the expected shape.
    pub(crate) fn from_body(body: &[u8]) -> Option<Self> {
        serde_json::from_slice(body).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::{ClientError, GitHubApiError, RouterError};

    #[test]
    fn http_error_renders_message_when_present() {
        let error = ClientError::Http {
            status: 404,
            message: Some("Not Found".to_owned()),
            documentation_url: None,
        };
        assert_eq!(error.to_string(), "HTTP 404: Not Found");
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn http_error_omits_missing_or_empty_message() {
        let missing = ClientError::Http {
            status: 500,
            message: None,
            documentation_url: None,
        };
        let empty = ClientError::Http {
            status: 502,
            message: Some(String::new()),
            documentation_url: None,
        };
        assert_eq!(missing.to_string(), "HTTP 500");
        assert_eq!(empty.to_string(), "HTTP 502");
    }

    #[test]
    fn router_errors_render_configuration_guidance() {
        let error = ClientError::from(RouterError::InvalidBaseUrl);
        assert!(error.to_string().contains("base URL is invalid"));
        assert!(
            RouterError::InvalidComponents
                .to_string()
                .contains("path or query parameters")
        );
        assert!(!error.is_offline());
        assert!(ClientError::Offline.is_offline());
    }

    #[test]
    fn only_http_failures_report_a_status() {
        assert_eq!(ClientError::Offline.status(), None);
        assert_eq!(ClientError::InvalidResponse.status(), None);
        assert_eq!(ClientError::from(RouterError::InvalidComponents).status(), None);
    }

    #[test]
    fn api_error_payload_is_parsed_best_effort() {
        let payload = GitHubApiError::from_body(
            br#"{"message":"Bad credentials","documentation_url":"https://docs.github.com/rest"}"#,
        )
        .expect("payload parses");
        assert_eq!(payload.message, "Bad credentials");
        assert_eq!(
            payload.documentation_url.as_deref(),
            Some("https://docs.github.com/rest")
        );

        assert!(GitHubApiError::from_body(b"<html>oops</html>").is_none());
        assert!(GitHubApiError::from_body(br#"{"documentation_url":"x"}"#).is_none());
    }
}
