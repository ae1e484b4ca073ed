//! Test doubles for the trait seams.

mod credentials;
mod http;

pub use credentials::StaticTokenProvider;
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
