//! Shopmate - client library for the storefront assistant chat service
//!
//! The centerpiece is the streaming send path: a chunked HTTP response body is
//! decoded into wire frames, parsed into typed events, and reduced onto a live
//! assistant message while the response is still arriving.

pub mod adapters;
pub mod api;
pub mod error;
pub mod models;
pub mod prelude;
pub mod sse;
pub mod store;
pub mod stream;
pub mod traits;
