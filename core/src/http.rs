//! HTTP request/response types and the transport seam.
//!
//! # Design
//! Requests and responses are plain data. Service methods build an
//! `HttpRequest`, hand it to a `Transport`, and parse the returned
//! `HttpResponse`. The transport is the only place that touches the network,
//! so the build and parse halves stay deterministic and can be driven by a
//! caller that prefers to perform the I/O itself.

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
///
/// `url` is absolute and excludes the query string; `query` holds the
/// caller's parameters verbatim, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// `url` with the URL-encoded query string appended, if any.
    pub fn full_url(&self) -> Result<String, ApiError> {
        if self.query.is_empty() {
            return Ok(self.url.clone());
        }
        let qs = serde_urlencoded::to_string(&self.query).map_err(ApiError::QueryEncoding)?;
        Ok(format!("{}?{qs}", self.url))
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes one HTTP round trip.
///
/// Implementations return non-2xx responses as `Ok(HttpResponse)`; only a
/// failure to complete the exchange is an `Err`, reported as
/// `ApiError::Transport`.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
///
/// Every operation passes its response through here before decoding, so a
/// failed status is an error even when the body would deserialize.
pub fn check_response(status: u16, body: &str) -> Result<(), ApiError> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    if status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status,
        body: body.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(query: Vec<(String, String)>) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: "http://awx.local/api/v2/execution_environments/".to_string(),
            query,
            headers: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn full_url_without_query_is_unchanged() {
        assert_eq!(
            request(Vec::new()).full_url().unwrap(),
            "http://awx.local/api/v2/execution_environments/"
        );
    }

    #[test]
    fn full_url_encodes_query_in_order() {
        let req = request(vec![
            ("page".to_string(), "2".to_string()),
            ("name".to_string(), "my ee".to_string()),
        ]);
        assert_eq!(
            req.full_url().unwrap(),
            "http://awx.local/api/v2/execution_environments/?page=2&name=my+ee"
        );
    }

    #[test]
    fn full_url_escapes_reserved_characters() {
        let req = request(vec![("name".to_string(), "a&b=c/d".to_string())]);
        assert_eq!(
            req.full_url().unwrap(),
            "http://awx.local/api/v2/execution_environments/?name=a%26b%3Dc%2Fd"
        );
    }

    #[test]
    fn check_response_accepts_any_2xx() {
        for status in [200, 201, 202, 204] {
            assert!(check_response(status, "").is_ok(), "status {status}");
        }
    }

    #[test]
    fn check_response_maps_404_to_not_found() {
        let err = check_response(404, r#"{"detail":"Not found."}"#).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn check_response_keeps_status_and_body() {
        let err = check_response(403, "forbidden").unwrap_err();
        match err {
            ApiError::HttpError { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "forbidden");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn check_response_rejects_redirects() {
        assert!(matches!(
            check_response(302, ""),
            Err(ApiError::HttpError { status: 302, .. })
        ));
    }

    #[test]
    fn method_display_is_uppercase() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
    }
}
