//! Error types for the AWX client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `HttpError` with the raw
//! status code and body, which carries AWX's per-field error details.

/// Errors returned by `AwxClient` operations and the `parse_*` methods.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// One or more mandatory input fields were absent. Raised before any
    /// request is sent.
    #[error("mandatory input arguments are absent: {}", .missing.join(", "))]
    Validation { missing: Vec<String> },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The query parameters could not be URL-encoded.
    #[error("query encoding failed: {0}")]
    QueryEncoding(#[source] serde_urlencoded::ser::Error),

    /// The transport could not complete the round trip.
    #[error("transport failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_lists_missing_fields() {
        let err = ApiError::Validation {
            missing: vec!["name".to_string(), "image".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "mandatory input arguments are absent: name, image"
        );
    }

    #[test]
    fn http_error_message_includes_status_and_body() {
        let err = ApiError::HttpError {
            status: 400,
            body: r#"{"image":["This field is required."]}"#.to_string(),
        };
        assert_eq!(
            err.to_string(),
            r#"HTTP 400: {"image":["This field is required."]}"#
        );
    }
}
