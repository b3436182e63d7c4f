use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

/// Failures a reservation operation can surface to the endpoint layer.
///
/// Each variant maps to exactly one HTTP status, so handlers never have to
/// inspect the error beyond letting it render itself.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("no reservation found with id: {0}")]
    NotFound(i64),

    #[error("invalid reservation request: {0}")]
    Validation(String),

    #[error("reservation storage failed: {0}")]
    Dependency(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::NotFound(reservation_id) => (
                StatusCode::NOT_FOUND,
                format!("No reservation found with id: {}", reservation_id),
            )
                .into_response(),
            ServiceError::Validation(reason) => {
                warn!("Rejected malformed reservation request due to: {}", reason);
                (StatusCode::BAD_REQUEST, reason).into_response()
            }
            ServiceError::Dependency(e) => {
                error!("Something went wrong talking to reservation storage due to: {}", e);
                // The cause stays in the logs, never in the response body.
                (
                    StatusCode::BAD_GATEWAY,
                    "Reservation storage is unavailable, please try again.",
                )
                    .into_response()
            }
        }
    }
}
