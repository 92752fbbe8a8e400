use std::time::SystemTime;

use crate::http::mime;

/// HTTP status codes this engine can put on the wire.
///
/// The set is closed: every request cycle resolves to exactly one of
/// these five codes.
/// - `Ok` (200): Request successful
/// - `NotModified` (304): Conditional GET satisfied, resource unchanged
/// - `BadRequest` (400): Protocol fault (Host, method, conditional misuse)
/// - `NotFound` (404): Target path unreadable
/// - `ServerError` (500): Transport or storage fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 304 Not Modified
    NotModified,
    /// 400 Bad Request
    BadRequest,
    /// 404 Not Found
    NotFound,
    /// 500 Server Error
    ServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use hearth::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotModified.as_u16(), 304);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotModified => 304,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::ServerError => 500,
        }
    }

    /// Returns the reason phrase this server sends for the status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use hearth::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::ServerError.reason_phrase(), "Server Error");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotModified => "Not Modified",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::ServerError => "Server Error",
        }
    }
}

/// Represents a complete HTTP response ready to be serialized.
///
/// Headers are an ordered list: the wire order (Content-type,
/// Content-Length, Date) is part of this server's contract.
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Minor version digit echoed into the status line
    pub version: u8,
    /// HTTP headers in wire order
    pub headers: Vec<(String, String)>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use hearth::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok, 1)
///     .header("Content-type", "text/html")
///     .body(b"<p>hi</p>".to_vec())
///     .build();
/// assert_eq!(response.headers[0].0, "Content-type");
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    version: u8,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the given status and version.
    pub fn new(status: StatusCode, version: u8) -> Self {
        Self {
            status,
            version,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Appends a header. Order of calls is the order on the wire.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the final Response.
    pub fn build(self) -> Response {
        Response {
            status: self.status,
            version: self.version,
            headers: self.headers,
            body: self.body,
        }
    }
}

impl Response {
    /// Assembles the response for one request cycle.
    ///
    /// Fixed header order: `Content-type` (inferred from the target's
    /// extension, whatever the status), `Content-Length` (only when the
    /// status is 200; non-200 responses carry no length and an empty
    /// body), `Date` (current wall clock, RFC 1123).
    pub fn assemble(status: StatusCode, version: u8, target: &str, body: Vec<u8>) -> Response {
        let body = if status == StatusCode::Ok {
            body
        } else {
            Vec::new()
        };

        let mut builder = ResponseBuilder::new(status, version)
            .header("Content-type", mime::content_type(target));

        if status == StatusCode::Ok {
            builder = builder.header("Content-Length", body.len().to_string());
        }

        builder
            .header("Date", httpdate::fmt_http_date(SystemTime::now()))
            .body(body)
            .build()
    }

    /// Retrieves a header value by name, for inspection in tests and logs.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
