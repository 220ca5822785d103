use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{domain::error::DomainError, presentation::handlers::user_handler::MessageResponse};

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        match self {
            DomainError::MissingFields(rules) => {
                tracing::debug!(?rules, "registration rejected");
                (
                    StatusCode::BAD_REQUEST,
                    Json(MessageResponse::new("Missing fields")),
                )
                    .into_response()
            }
            DomainError::InvalidFields(rules) => {
                tracing::debug!(?rules, "registration rejected");
                (
                    StatusCode::BAD_REQUEST,
                    Json(MessageResponse::with_violations("Invalid fields", rules)),
                )
                    .into_response()
            }
            // detail goes to the log only
            err @ (DomainError::Hashing(_) | DomainError::Repository(_)) => {
                tracing::error!(error = %err, "registration failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(MessageResponse::new("Internal server error")),
                )
                    .into_response()
            }
        }
    }
}
