use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Missing prompt in request")]
    MissingPrompt,
    #[error("Prompt cannot be empty")]
    EmptyPrompt,
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
    #[error("route not found")]
    RouteNotFound,
    #[error("{var} not found in environment variables")]
    MissingApiKey { var: &'static str },
    /// The model reported `finish_reason == "error"`; carries the vendor message verbatim.
    #[error("{message}")]
    Upstream { message: String },
    #[error("Cohere request timed out after {0} ms")]
    Timeout(u64),
    #[error("failed to reach Cohere: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Cohere request failed ({status}): {body}")]
    UpstreamStatus { status: StatusCode, body: String },
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingPrompt
            | Self::EmptyPrompt
            | Self::InvalidBody(_)
            | Self::MissingApiKey { .. }
            | Self::Upstream { .. } => StatusCode::BAD_REQUEST,
            Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::Timeout(_) | Self::Transport(_) | Self::UpstreamStatus { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = if status.is_server_error() {
            tracing::error!(error = %self, "chat request failed");
            format!("Server error: {self}")
        } else {
            tracing::warn!(error = %self, "chat request rejected");
            self.to_string()
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_and_upstream_errors_are_client_errors() {
        assert_eq!(RelayError::MissingPrompt.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(RelayError::EmptyPrompt.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            RelayError::Upstream {
                message: "quota exceeded".to_string()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn upstream_error_displays_vendor_message_only() {
        let err = RelayError::Upstream {
            message: "quota exceeded".to_string(),
        };
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[test]
    fn missing_key_names_the_variable() {
        let err = RelayError::MissingApiKey {
            var: "COHERE_API_KEY",
        };
        assert_eq!(
            err.to_string(),
            "COHERE_API_KEY not found in environment variables"
        );
    }

    #[test]
    fn unknown_route_is_not_found() {
        let err = RelayError::RouteNotFound;
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "route not found");
    }

    #[test]
    fn timeouts_are_server_errors() {
        assert_eq!(
            RelayError::Timeout(5_000).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
