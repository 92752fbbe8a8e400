//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.x request-response engine: one request
//! parsed, dispatched and answered at a time over a persistent connection.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: The main connection handler implementing the request-response state machine
//! - **`parser`**: Parses incoming HTTP requests from byte buffers
//! - **`request`**: HTTP request representation and accessors
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: Content-type inference based on file extensions
//!
//! # Connection State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Liveness probe, then bulk read of one request
//!        └──────┬──────┘
//!               │ Request received (EOF on the probe → Closed)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Dispatch to GET/HEAD/PUT/POST, resolve status
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ HTTP/1.1 → Reading (same connection)
//!               └─ HTTP/1.0 → Closed
//! ```
//!
//! A request that resolves to a non-200 status is still answered with a
//! well-formed (empty-bodied) response; only a clean EOF or an I/O fault
//! tears the connection down without one.

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
