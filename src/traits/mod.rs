//! Trait abstractions at the crate's seams.
//!
//! The transport and the token source are injected behind traits so the core
//! can be driven by the production reqwest adapter or by scripted mocks in
//! tests.

mod credentials;
mod http;

pub use credentials::{TokenError, TokenProvider};
pub use http::{ByteStream, Headers, HttpClient, HttpError, Response};
