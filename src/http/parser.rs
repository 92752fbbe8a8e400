use crate::http::request::{Method, Request};
use std::collections::HashMap;

/// Upper bound on the bytes read from the stream for a single request
/// cycle. Bodies whose declared length extends past this cap are silently
/// truncated to what arrived; a known limitation, kept.
pub const MAX_REQUEST_BYTES: usize = 1_000_000;

#[derive(Debug)]
pub enum ParseError {
    InvalidRequest,
    InvalidVersion,
    InvalidHeader,
    InvalidContentLength,
    Incomplete,
}

/// Parses one HTTP request from the front of `buf`.
///
/// Returns the request and the number of bytes consumed. `Incomplete` is
/// returned until the `\r\n\r\n` header terminator has arrived; the body is
/// clamped to the bytes available after it, so the caller decides whether
/// to keep reading toward the declared Content-Length or accept the
/// truncation at the read cap.
pub fn parse_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {

    // Look for header/body separator
    let headers_end = find_headers_end(buf).ok_or(ParseError::Incomplete)?;
    let header_bytes = &buf[..headers_end];
    let body_bytes = &buf[headers_end + 4..];

    let headers_str = std::str::from_utf8(header_bytes)
        .map_err(|_| ParseError::InvalidRequest)?;

    let mut lines = headers_str.split("\r\n");

    // Request line
    let request_line = lines.next().ok_or(ParseError::InvalidRequest)?;
    let mut parts = request_line.split_whitespace();

    let method_token = parts.next().ok_or(ParseError::InvalidRequest)?;
    let target_token = parts.next().ok_or(ParseError::InvalidRequest)?;
    let version_token = parts.next().ok_or(ParseError::InvalidRequest)?;

    let method = Method::from_token(method_token);
    let target = resolve_target(target_token);
    let version = parse_version(version_token)?;

    // Headers
    let mut headers = HashMap::new();

    for line in lines {
        if line.is_empty() {
            continue;
        }

        let (key, value) = line
            .split_once(':')
            .ok_or(ParseError::InvalidHeader)?;

        headers.insert(
            key.trim().to_string(),
            value.trim().to_string(),
        );
    }

    // Body, clamped to what has arrived
    let content_length = headers
        .get("Content-Length")
        .map(|v| v.parse::<usize>().map_err(|_| ParseError::InvalidContentLength))
        .transpose()?
        .unwrap_or(0);

    let available = body_bytes.len().min(content_length);
    let body = body_bytes[..available].to_vec();

    let request = Request {
        method,
        target,
        version,
        headers,
        content_length,
        body,
    };

    let total_consumed = headers_end + 4 + available;
    Ok((request, total_consumed))
}

/// A target ending in `/` resolves to the directory's `index.html`.
fn resolve_target(token: &str) -> String {
    let mut target = token.trim().to_string();
    if target.ends_with('/') {
        target.push_str("index.html");
    }
    target
}

/// The version is the single digit following `HTTP/1.`.
fn parse_version(token: &str) -> Result<u8, ParseError> {
    let digit = token
        .strip_prefix("HTTP/1.")
        .ok_or(ParseError::InvalidVersion)?;

    match digit {
        "0" => Ok(0),
        "1" => Ok(1),
        _ => Err(ParseError::InvalidVersion),
    }
}

fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4)
        .position(|w| w == b"\r\n\r\n")
}
