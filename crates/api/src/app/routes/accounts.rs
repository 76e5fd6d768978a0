use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_account))
        .route("/:id/balance", get(get_balance))
        .route("/:id/deposit", post(deposit))
        .route("/:id/withdraw", post(withdraw))
        .route("/:id/interest", post(apply_interest))
}

pub async fn create_account(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateAccountRequest>,
) -> axum::response::Response {
    let kind = match dto::parse_account_kind(&body.account_type) {
        Ok(kind) => kind,
        Err(resp) => return resp,
    };

    match services.create_account(&body.account_id, kind) {
        Ok(()) => (
            StatusCode::CREATED,
            Json(dto::created_response(&body.account_id)),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn get_balance(
    Extension(services): Extension<Arc<AppServices>>,
    Path(account_id): Path<String>,
) -> axum::response::Response {
    match services.balance(&account_id) {
        Ok(balance) => (
            StatusCode::OK,
            Json(dto::balance_response(&account_id, balance)),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn deposit(
    Extension(services): Extension<Arc<AppServices>>,
    Path(account_id): Path<String>,
    Json(body): Json<dto::AmountRequest>,
) -> axum::response::Response {
    let amount = match dto::parse_amount(body.amount) {
        Ok(amount) => amount,
        Err(resp) => return resp,
    };

    match services.deposit(&account_id, amount) {
        Ok(balance) => (
            StatusCode::OK,
            Json(dto::transaction_response(
                &account_id,
                format!("Successfully deposited ${amount}"),
                balance,
            )),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn withdraw(
    Extension(services): Extension<Arc<AppServices>>,
    Path(account_id): Path<String>,
    Json(body): Json<dto::AmountRequest>,
) -> axum::response::Response {
    let amount = match dto::parse_amount(body.amount) {
        Ok(amount) => amount,
        Err(resp) => return resp,
    };

    match services.withdraw(&account_id, amount) {
        Ok(balance) => (
            StatusCode::OK,
            Json(dto::transaction_response(
                &account_id,
                format!("Successfully withdrew ${amount}"),
                balance,
            )),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn apply_interest(
    Extension(services): Extension<Arc<AppServices>>,
    Path(account_id): Path<String>,
    Json(body): Json<dto::InterestRequest>,
) -> axum::response::Response {
    let rate = body.annual_interest_rate;

    match services.apply_interest(&account_id, rate) {
        Ok(balance) => (
            StatusCode::OK,
            Json(dto::transaction_response(
                &account_id,
                format!("Successfully applied {rate}% interest"),
                balance,
            )),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
