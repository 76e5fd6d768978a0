//! Account domain: kinds, state, and balance rules.

pub mod account;

pub use account::{Account, AccountKind, validate_amount, validate_rate};
