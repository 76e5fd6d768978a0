use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use teller_core::DomainError;
use teller_infra::service::ServiceError;

/// Map a service failure onto the wire status model.
///
/// The four domain kinds mean "fix your request"; lock timeouts and store
/// failures mean "try again later" and get a 503.
pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(DomainError::InvalidArgument(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_argument", msg)
        }
        ServiceError::Domain(DomainError::NotFound) => json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "Account not found. Please check the account ID.",
        ),
        ServiceError::Domain(DomainError::AlreadyExists) => {
            json_error(StatusCode::CONFLICT, "already_exists", "Account already exists")
        }
        ServiceError::Domain(DomainError::FailedPrecondition(msg)) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "failed_precondition", msg)
        }
        ServiceError::LockTimeout(account_id) => json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "lock_timeout",
            format!("operation on account '{account_id}' timed out; try again later"),
        ),
        ServiceError::Store(e) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "store_error", e.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
