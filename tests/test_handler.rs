use std::path::Path;
use std::time::{Duration, SystemTime};

use hearth::files::{FileStore, RequestHandler};
use hearth::http::request::{Method, Request, RequestBuilder};
use hearth::http::response::StatusCode;

const HOST: &str = "localhost:9999";

fn handler(root: &Path) -> RequestHandler {
    RequestHandler::new(HOST, FileStore::new(root))
}

fn request(method: Method, target: &str) -> RequestBuilder {
    RequestBuilder::new()
        .method(method)
        .target(target)
        .header("Host", HOST)
}

fn in_one_hour() -> String {
    httpdate::fmt_http_date(SystemTime::now() + Duration::from_secs(3600))
}

#[tokio::test]
async fn test_get_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("page.html"), b"<p>hello</p>").unwrap();

    let req = request(Method::GET, "/page.html").build();
    let resp = handler(dir.path()).handle(&req).await;

    assert_eq!(resp.status, StatusCode::Ok);
    assert_eq!(resp.body, b"<p>hello</p>".to_vec());
    assert_eq!(resp.header("Content-Length"), Some("12"));
}

#[tokio::test]
async fn test_get_missing_file_is_404_without_content_length() {
    let dir = tempfile::tempdir().unwrap();

    let req = request(Method::GET, "/missing.html").build();
    let resp = handler(dir.path()).handle(&req).await;

    assert_eq!(resp.status, StatusCode::NotFound);
    assert!(resp.body.is_empty());
    assert_eq!(resp.header("Content-Length"), None);
}

#[tokio::test]
async fn test_missing_host_header_is_400() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("page.html"), b"content").unwrap();

    let req = RequestBuilder::new()
        .method(Method::GET)
        .target("/page.html")
        .build();
    let resp = handler(dir.path()).handle(&req).await;

    assert_eq!(resp.status, StatusCode::BadRequest);
}

#[tokio::test]
async fn test_mismatched_host_is_400() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("page.html"), b"content").unwrap();

    let req = RequestBuilder::new()
        .method(Method::GET)
        .target("/page.html")
        .header("Host", "elsewhere:8080")
        .build();
    let resp = handler(dir.path()).handle(&req).await;

    assert_eq!(resp.status, StatusCode::BadRequest);
}

#[tokio::test]
async fn test_host_check_precedes_missing_file() {
    // First fault wins: a bad Host on a missing target reports 400, not 404.
    let dir = tempfile::tempdir().unwrap();

    let req = RequestBuilder::new()
        .method(Method::GET)
        .target("/missing.html")
        .build();
    let resp = handler(dir.path()).handle(&req).await;

    assert_eq!(resp.status, StatusCode::BadRequest);
}

#[tokio::test]
async fn test_unrecognized_method_is_400() {
    let dir = tempfile::tempdir().unwrap();

    let req = request(Method::OTHER, "/page.html").build();
    let resp = handler(dir.path()).handle(&req).await;

    assert_eq!(resp.status, StatusCode::BadRequest);
}

#[tokio::test]
async fn test_put_creates_and_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let h = handler(dir.path());

    let put = request(Method::PUT, "/notes.txt").body(b"abc".to_vec()).build();
    let resp = h.handle(&put).await;
    assert_eq!(resp.status, StatusCode::Ok);
    assert!(resp.body.is_empty());

    let put = request(Method::PUT, "/notes.txt").body(b"xyz".to_vec()).build();
    assert_eq!(h.handle(&put).await.status, StatusCode::Ok);

    let get = request(Method::GET, "/notes.txt").build();
    let resp = h.handle(&get).await;
    assert_eq!(resp.status, StatusCode::Ok);
    assert_eq!(resp.body, b"xyz".to_vec());
}

#[tokio::test]
async fn test_post_appends() {
    let dir = tempfile::tempdir().unwrap();
    let h = handler(dir.path());

    let post = request(Method::POST, "/log.txt").body(b"a".to_vec()).build();
    assert_eq!(h.handle(&post).await.status, StatusCode::Ok);

    let post = request(Method::POST, "/log.txt").body(b"b".to_vec()).build();
    assert_eq!(h.handle(&post).await.status, StatusCode::Ok);

    let get = request(Method::GET, "/log.txt").build();
    let resp = h.handle(&get).await;
    assert_eq!(resp.body, b"ab".to_vec());
}

#[tokio::test]
async fn test_put_into_missing_directory_is_500() {
    let dir = tempfile::tempdir().unwrap();

    let put = request(Method::PUT, "/no/such/dir/notes.txt")
        .body(b"abc".to_vec())
        .build();
    let resp = handler(dir.path()).handle(&put).await;

    assert_eq!(resp.status, StatusCode::ServerError);
}

#[tokio::test]
async fn test_head_computes_body_for_length() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("page.html"), b"0123456789").unwrap();

    let req = request(Method::HEAD, "/page.html").build();
    let resp = handler(dir.path()).handle(&req).await;

    // The connection layer keeps the body off the wire; the handler still
    // resolves it so the advertised length is exact.
    assert_eq!(resp.status, StatusCode::Ok);
    assert_eq!(resp.header("Content-Length"), Some("10"));
    assert_eq!(resp.body, b"0123456789".to_vec());
}

#[tokio::test]
async fn test_if_modified_since_in_future_is_304() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("page.html"), b"content").unwrap();

    let req = request(Method::GET, "/page.html")
        .header("If-Modified-Since", in_one_hour())
        .build();
    let resp = handler(dir.path()).handle(&req).await;

    assert_eq!(resp.status, StatusCode::NotModified);
    assert!(resp.body.is_empty());
    assert_eq!(resp.header("Content-Length"), None);
}

#[tokio::test]
async fn test_if_modified_since_in_past_serves_the_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("page.html"), b"content").unwrap();

    let req = request(Method::GET, "/page.html")
        .header("If-Modified-Since", "Sun, 06 Nov 1994 08:49:37 GMT")
        .build();
    let resp = handler(dir.path()).handle(&req).await;

    assert_eq!(resp.status, StatusCode::Ok);
    assert_eq!(resp.body, b"content".to_vec());
}

#[tokio::test]
async fn test_malformed_if_modified_since_is_500() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("page.html"), b"content").unwrap();

    let req = request(Method::GET, "/page.html")
        .header("If-Modified-Since", "yesterday-ish")
        .build();
    let resp = handler(dir.path()).handle(&req).await;

    assert_eq!(resp.status, StatusCode::ServerError);
}

#[tokio::test]
async fn test_if_modified_since_on_put_is_400_but_still_writes() {
    let dir = tempfile::tempdir().unwrap();

    let put = request(Method::PUT, "/notes.txt")
        .header("If-Modified-Since", in_one_hour())
        .body(b"abc".to_vec())
        .build();
    let resp = handler(dir.path()).handle(&put).await;

    // The conditional check runs after the write, so the fault does not
    // undo the side effect.
    assert_eq!(resp.status, StatusCode::BadRequest);
    assert_eq!(std::fs::read(dir.path().join("notes.txt")).unwrap(), b"abc");
}

#[tokio::test]
async fn test_missing_file_wins_over_conditional() {
    let dir = tempfile::tempdir().unwrap();

    let req = request(Method::GET, "/missing.html")
        .header("If-Modified-Since", in_one_hour())
        .build();
    let resp = handler(dir.path()).handle(&req).await;

    assert_eq!(resp.status, StatusCode::NotFound);
}

#[tokio::test]
async fn test_response_echoes_request_version() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("page.html"), b"content").unwrap();

    let req = request(Method::GET, "/page.html").version(0).build();
    let resp = handler(dir.path()).handle(&req).await;

    assert_eq!(resp.version, 0);
}

#[tokio::test]
async fn test_empty_body_put_creates_empty_file() {
    let dir = tempfile::tempdir().unwrap();

    let put: Request = request(Method::PUT, "/empty.txt").build();
    let resp = handler(dir.path()).handle(&put).await;

    assert_eq!(resp.status, StatusCode::Ok);
    assert_eq!(std::fs::read(dir.path().join("empty.txt")).unwrap(), b"");
}
