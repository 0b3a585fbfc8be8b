//! Error types for the prettify service.
//!
//! Invalid URLs and upstream 404s are not errors: they render the form with no
//! result. Only failures that prevent a response from being produced at all
//! end up here, and they are rendered as simple HTML error pages.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::render::components::error_page;

/// Prettify service error type.
#[derive(Debug, thiserror::Error)]
pub enum PrettifyError {
    /// The archive could not be reached or its body could not be read.
    #[error("upstream error: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Internal server error (client construction, rendering, etc.).
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for PrettifyError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            Self::Upstream(err) => {
                tracing::warn!(error = %err, "upstream fetch failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "Archive Unavailable",
                    "The mailing list archive could not be reached. Please try again later.",
                )
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Error",
                    "An internal error occurred. Please try again later.",
                )
            }
        };

        (status, error_page(title, message)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_internal() {
        let err = PrettifyError::Internal(anyhow::anyhow!("something broke"));
        assert_eq!(err.to_string(), "internal error: something broke");
    }

    #[test]
    fn error_into_response_internal() {
        let err = PrettifyError::Internal(anyhow::anyhow!("boom"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn error_into_response_upstream() {
        // Nothing listens on port 1, so the connection is refused.
        let err = reqwest::get("http://127.0.0.1:1/").await.unwrap_err();
        let err = PrettifyError::from(err);
        assert!(err.to_string().starts_with("upstream error:"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
