use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Message shown in place of a listing when the store cannot be reached
pub const UNAVAILABLE_MESSAGE: &str = "Storage unavailable.";

/// Errors surfaced by navigation and storage operations
#[derive(Debug, Error)]
pub enum BrowseError {
    /// Any failure talking to the backing store. The reason is for logs only.
    #[error("storage unavailable: {reason}")]
    StoreUnavailable { reason: String },

    /// A drill-down target that does not live under the current prefix
    #[error("cannot navigate from {prefix:?} to {target:?}: target is not under the current prefix")]
    InvalidNavigation { prefix: String, target: String },

    #[error("invalid upload: {0}")]
    InvalidUpload(String),

    #[error("unknown bucket: {0}")]
    UnknownBucket(String),
}

impl BrowseError {
    /// Wrap any displayable failure as `StoreUnavailable`
    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        BrowseError::StoreUnavailable {
            reason: err.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            BrowseError::StoreUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            BrowseError::InvalidNavigation { .. } | BrowseError::InvalidUpload(_) => {
                StatusCode::BAD_REQUEST
            }
            BrowseError::UnknownBucket(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Text safe to show to a user
    pub fn public_message(&self) -> String {
        match self {
            BrowseError::StoreUnavailable { .. } => UNAVAILABLE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for BrowseError {
    fn into_response(self) -> Response {
        if let BrowseError::StoreUnavailable { reason } = &self {
            tracing::warn!(%reason, "store unavailable");
        }
        (
            self.status(),
            Json(json!({
                "success": false,
                "error": self.public_message(),
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_hides_reason() {
        let err = BrowseError::unavailable("NoCredentialsError: secret detail");
        assert_eq!(err.public_message(), UNAVAILABLE_MESSAGE);
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(err.to_string().contains("secret detail"));
    }

    #[test]
    fn test_invalid_navigation_is_bad_request() {
        let err = BrowseError::InvalidNavigation {
            prefix: "a/".to_string(),
            target: "b/".to_string(),
        };
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.public_message().contains("\"b/\""));
    }
}
