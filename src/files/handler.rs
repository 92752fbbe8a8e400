//! Method dispatch and status resolution
//!
//! Maps a parsed request onto the file store and resolves the final
//! status code. Stages run in a fixed order and each returns a `Result`;
//! the first fault short-circuits the stages behind it, so the first
//! fault detected in a cycle is the one reported.

use std::time::{Duration, SystemTime};

use crate::files::store::FileStore;
use crate::http::request::{Method, Request};
use crate::http::response::{Response, StatusCode};

/// Terminal fault raised by a pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fault {
    /// Protocol fault: Host, method, or conditional-header misuse
    BadRequest,
    /// Resource fault: target path unreadable
    NotFound,
    /// Transport or storage fault
    ServerError,
}

impl Fault {
    fn status(self) -> StatusCode {
        match self {
            Fault::BadRequest => StatusCode::BadRequest,
            Fault::NotFound => StatusCode::NotFound,
            Fault::ServerError => StatusCode::ServerError,
        }
    }
}

/// What a faultless cycle resolved to.
enum Outcome {
    /// 200, with the body GET/HEAD computed (empty for PUT/POST)
    Complete(Vec<u8>),
    /// 304, conditional GET satisfied
    NotModified,
}

/// Handles one parsed request against the file store.
///
/// Holds the only cross-request state there is: the host identity this
/// server answers to and the storage root, both injected at construction
/// and read-only thereafter.
#[derive(Clone, Debug)]
pub struct RequestHandler {
    host: String,
    store: FileStore,
}

impl RequestHandler {
    pub fn new(host: impl Into<String>, store: FileStore) -> Self {
        Self {
            host: host.into(),
            store,
        }
    }

    /// Resolves a request cycle to its response.
    ///
    /// Whatever the outcome, a well-formed response comes back: non-200
    /// statuses carry an empty body and no Content-Length.
    pub async fn handle(&self, req: &Request) -> Response {
        let (status, body) = match self.dispatch(req).await {
            Ok(Outcome::Complete(body)) => (StatusCode::Ok, body),
            Ok(Outcome::NotModified) => (StatusCode::NotModified, Vec::new()),
            Err(fault) => (fault.status(), Vec::new()),
        };

        tracing::info!(
            method = ?req.method,
            path = %req.target,
            status = status.as_u16(),
            "Request served"
        );

        Response::assemble(status, req.version, &req.target, body)
    }

    async fn dispatch(&self, req: &Request) -> Result<Outcome, Fault> {
        self.check_host(req)?;

        match req.method {
            Method::GET | Method::HEAD => self.fetch(req).await,
            Method::PUT => {
                self.store
                    .write(&req.target, &req.body)
                    .await
                    .map_err(|e| {
                        tracing::warn!(path = %req.target, error = %e, "PUT failed");
                        Fault::ServerError
                    })?;
                self.reject_conditional(req)?;
                Ok(Outcome::Complete(Vec::new()))
            }
            Method::POST => {
                self.store
                    .append(&req.target, &req.body)
                    .await
                    .map_err(|e| {
                        tracing::warn!(path = %req.target, error = %e, "POST failed");
                        Fault::ServerError
                    })?;
                self.reject_conditional(req)?;
                Ok(Outcome::Complete(Vec::new()))
            }
            Method::OTHER => Err(Fault::BadRequest),
        }
    }

    /// Every request must name this server's identity in its Host header.
    fn check_host(&self, req: &Request) -> Result<(), Fault> {
        match req.header("Host") {
            Some(host) if host == self.host => Ok(()),
            _ => Err(Fault::BadRequest),
        }
    }

    /// If-Modified-Since only qualifies GET/HEAD. The check runs after the
    /// file operation, so a PUT/POST that misuses it has already written.
    fn reject_conditional(&self, req: &Request) -> Result<(), Fault> {
        if req.if_modified_since().is_some() {
            return Err(Fault::BadRequest);
        }
        Ok(())
    }

    /// GET/HEAD: read the target, then evaluate the conditional.
    async fn fetch(&self, req: &Request) -> Result<Outcome, Fault> {
        let body = self
            .store
            .read(&req.target)
            .await
            .map_err(|_| Fault::NotFound)?;

        if let Some(raw) = req.if_modified_since() {
            let since = httpdate::parse_http_date(raw).map_err(|_| Fault::ServerError)?;
            let modified = self
                .store
                .modified(&req.target)
                .await
                .map_err(|_| Fault::ServerError)?;

            // HTTP dates carry second precision; compare at that grain.
            if truncate_to_seconds(modified) <= since {
                return Ok(Outcome::NotModified);
            }
        }

        Ok(Outcome::Complete(body))
    }
}

fn truncate_to_seconds(time: SystemTime) -> SystemTime {
    let since_epoch = time
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO);
    SystemTime::UNIX_EPOCH + Duration::from_secs(since_epoch.as_secs())
}
