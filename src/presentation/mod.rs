//! Presentation layer: HTML templates and HTTP response values.
//!
//! Handlers return an [`EndpointResponse`] instead of writing to the session
//! directly, which keeps response generation testable. The server converts
//! it into an `http::Response` at the boundary.

pub mod template;

pub use template::{HtmlTemplate, TemplateError};

use http::header::{HeaderValue, ALLOW, CONTENT_LENGTH, CONTENT_TYPE};
use http::{Response, StatusCode};

/// Content type of rendered pages
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Content type of error bodies
pub const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Body sent when the page template cannot be read or parsed
pub const TEMPLATE_LOAD_ERROR_BODY: &str = "Error loading template";

/// Body sent when the page template cannot be filled in
pub const TEMPLATE_EXECUTE_ERROR_BODY: &str = "Error executing template";

/// Body sent when an image pipeline fails
pub const RENDER_ERROR_BODY: &str = "Error rendering images";

/// Response from an endpoint handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointResponse {
    /// HTTP status code
    pub status: u16,
    /// Content-Type header value
    pub content_type: &'static str,
    /// Response body
    pub body: String,
    /// Allow header value, for 405 responses
    pub allow: Option<&'static str>,
}

impl EndpointResponse {
    /// Create a 200 HTML response.
    pub fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: HTML_CONTENT_TYPE,
            body,
            allow: None,
        }
    }

    /// Create a plain text response with the given status.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: TEXT_CONTENT_TYPE,
            body: body.into(),
            allow: None,
        }
    }

    /// Create a 500 response with a static body.
    pub fn internal_error(body: &'static str) -> Self {
        Self::text(500, body)
    }

    pub fn not_found() -> Self {
        Self::text(404, "Not Found")
    }

    /// Create a 405 response advertising the allowed methods.
    pub fn method_not_allowed(allow: &'static str) -> Self {
        Self {
            allow: Some(allow),
            ..Self::text(405, "Method Not Allowed")
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Convert into an `http::Response` with Content-Type and
    /// Content-Length set.
    pub fn into_http_response(self) -> Response<Vec<u8>> {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = self.body.into_bytes();
        let length = body.len();

        let mut response = Response::new(body);
        *response.status_mut() = status;

        let headers = response.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(self.content_type));
        headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
        if let Some(allow) = self.allow {
            headers.insert(ALLOW, HeaderValue::from_static(allow));
        }

        response
    }
}
