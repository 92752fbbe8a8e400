use std::collections::HashMap;

/// HTTP request methods.
///
/// The engine serves GET, HEAD, PUT and POST. Every other request-line
/// token parses as `OTHER`, which the dispatcher answers with 400: an
/// unrecognized method is a protocol fault, not a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET - Read a file from the store
    GET,
    /// HEAD - Like GET but without the response body on the wire
    HEAD,
    /// PUT - Write a file, overwriting existing content
    PUT,
    /// POST - Append to a file, creating it if absent
    POST,
    /// Anything else
    OTHER,
}

/// Represents a parsed HTTP request from a client.
///
/// Built once per request cycle from the raw byte buffer and immutable
/// thereafter. Header lookup is case-sensitive on exact names as received.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, HEAD, PUT, POST or OTHER)
    pub method: Method,
    /// The target path, with `index.html` appended when it ended in `/`
    pub target: String,
    /// Minor protocol version digit: 0 for HTTP/1.0, 1 for HTTP/1.1
    pub version: u8,
    /// Request headers as key-value pairs
    pub headers: HashMap<String, String>,
    /// Declared Content-Length, 0 when the header is absent
    pub content_length: usize,
    /// Request body for PUT/POST requests, clamped to the bytes that
    /// arrived within the per-cycle read cap
    pub body: Vec<u8>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Method,
    target: String,
    version: u8,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl Method {
    /// Resolves an HTTP method from a request-line token.
    ///
    /// Matching is exact and case-sensitive; unknown tokens resolve to
    /// `OTHER` rather than failing the parse.
    ///
    /// # Example
    ///
    /// ```
    /// # use hearth::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::GET);
    /// assert_eq!(Method::from_token("get"), Method::OTHER);
    /// ```
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            "PUT" => Method::PUT,
            "POST" => Method::POST,
            _ => Method::OTHER,
        }
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: Method::GET,
            target: "/index.html".to_string(),
            version: 1,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn build(self) -> Request {
        let content_length = self.body.len();
        Request {
            method: self.method,
            target: self.target,
            version: self.version,
            headers: self.headers,
            content_length,
            body: self.body,
        }
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Request {
    /// Retrieves a header value by name (exact, case-sensitive match).
    ///
    /// # Example
    ///
    /// ```
    /// # use hearth::http::request::RequestBuilder;
    /// let req = RequestBuilder::new().header("Host", "localhost:9999").build();
    /// assert_eq!(req.header("Host"), Some("localhost:9999"));
    /// assert_eq!(req.header("host"), None);
    /// ```
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(key)
            .map(|v| v.as_str())
    }

    /// Retrieves the If-Modified-Since header value, if present.
    pub fn if_modified_since(&self) -> Option<&str> {
        self.header("If-Modified-Since")
    }

    /// Determines whether the connection should serve another cycle after
    /// this request. HTTP/1.1 persists; HTTP/1.0 closes after one exchange.
    pub fn persistent(&self) -> bool {
        self.version == 1
    }
}
