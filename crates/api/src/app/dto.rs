use axum::http::StatusCode;
use serde::Deserialize;

use teller_accounts::AccountKind;
use teller_core::Money;

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub account_id: String,
    pub account_type: String,
}

#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
pub struct InterestRequest {
    pub annual_interest_rate: f64,
}

// -------------------------
// Response payloads
// -------------------------

pub fn created_response(account_id: &str) -> serde_json::Value {
    serde_json::json!({
        "account_id": account_id,
        "message": format!("Account {account_id} created successfully"),
    })
}

pub fn balance_response(account_id: &str, balance: Money) -> serde_json::Value {
    serde_json::json!({
        "account_id": account_id,
        "balance": balance.to_major(),
        "message": "Balance retrieved successfully",
    })
}

pub fn transaction_response(account_id: &str, message: String, balance: Money) -> serde_json::Value {
    serde_json::json!({
        "account_id": account_id,
        "message": message,
        "balance": balance.to_major(),
    })
}

// -------------------------
// Wire parsing helpers
// -------------------------

pub fn parse_account_kind(s: &str) -> Result<AccountKind, axum::response::Response> {
    s.to_lowercase().parse::<AccountKind>().map_err(|_| {
        errors::json_error(
            StatusCode::BAD_REQUEST,
            "invalid_account_type",
            "account type must be 'savings' or 'checking'",
        )
    })
}

/// Convert a wire amount (major units) into cents, rejecting non-finite or
/// out-of-range values before they reach the service.
pub fn parse_amount(value: f64) -> Result<Money, axum::response::Response> {
    Money::from_major(value)
        .map_err(|e| errors::json_error(StatusCode::BAD_REQUEST, "invalid_amount", e.to_string()))
}
