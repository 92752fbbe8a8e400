//! File serving and storage
//!
//! This module implements the method dispatcher that maps parsed requests
//! onto the path-addressable file store, and resolves the response status
//! under first-error-wins precedence.

pub mod handler;
pub mod store;

pub use handler::RequestHandler;
pub use store::FileStore;
