//! Error taxonomy for the send path.
//!
//! Only transport-level problems fail a send. Malformed frames are absorbed in
//! the event parser and post-stream reconciliation failures in the store; both
//! are logged where they occur and never surface here.

use thiserror::Error;

use crate::api::ApiError;
use crate::traits::HttpError;

/// Failure of a streaming send operation.
#[derive(Debug, Error)]
pub enum SendError {
    /// A second send was attempted while one was streaming on this store.
    #[error("a streaming send is already in flight")]
    Busy,

    /// The streaming endpoint rejected the request before any frame was read,
    /// or a collaborator call returned an error status.
    #[error("stream request rejected ({status}): {message}")]
    Transport { status: u16, message: String },

    /// Network failure before or while reading the response body.
    #[error("stream transport failed: {0}")]
    Http(HttpError),

    /// A collaborator REST call failed for a non-status reason.
    #[error(transparent)]
    Api(ApiError),
}

impl From<HttpError> for SendError {
    fn from(err: HttpError) -> Self {
        match err {
            HttpError::ServerError { status, message } => SendError::Transport { status, message },
            other => SendError::Http(other),
        }
    }
}

impl From<ApiError> for SendError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status { status, message } => SendError::Transport { status, message },
            ApiError::Http(http) => SendError::from(http),
            other => SendError::Api(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_maps_to_transport() {
        let err = SendError::from(HttpError::ServerError {
            status: 401,
            message: "Unauthorized".to_string(),
        });
        assert!(matches!(err, SendError::Transport { status: 401, .. }));
    }

    #[test]
    fn test_api_status_maps_to_transport() {
        let err = SendError::from(ApiError::Status {
            status: 503,
            message: "unavailable".to_string(),
        });
        assert!(matches!(err, SendError::Transport { status: 503, .. }));
    }

    #[test]
    fn test_read_error_stays_http() {
        let err = SendError::from(HttpError::Io("reset".to_string()));
        assert!(matches!(err, SendError::Http(HttpError::Io(_))));
    }

    #[test]
    fn test_display() {
        let err = SendError::Transport {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "stream request rejected (500): boom");
        assert_eq!(
            SendError::Busy.to_string(),
            "a streaming send is already in flight"
        );
    }
}
