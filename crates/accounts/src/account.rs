use std::str::FromStr;

use serde::{Deserialize, Serialize};

use teller_core::{DomainError, DomainResult, Money};

/// Account kind. Fixed at creation, never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Savings,
    Checking,
}

impl AccountKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            AccountKind::Savings => "savings",
            AccountKind::Checking => "checking",
        }
    }
}

impl FromStr for AccountKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "savings" => Ok(AccountKind::Savings),
            "checking" => Ok(AccountKind::Checking),
            _ => Err(DomainError::invalid_argument(
                "account type must be 'savings' or 'checking'",
            )),
        }
    }
}

impl core::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single ledger account.
///
/// The account's identity (its id) lives in the store key, not here. State
/// transitions go through the methods below; they validate preconditions and
/// either apply fully or leave the account untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub kind: AccountKind,
    pub balance: Money,
}

impl Account {
    /// A freshly opened account starts at a zero balance.
    pub fn open(kind: AccountKind) -> Self {
        Self {
            kind,
            balance: Money::ZERO,
        }
    }

    pub fn deposit(&mut self, amount: Money) -> DomainResult<()> {
        validate_amount(amount)?;
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or_else(|| DomainError::failed_precondition("balance out of representable range"))?;
        Ok(())
    }

    pub fn withdraw(&mut self, amount: Money) -> DomainResult<()> {
        validate_amount(amount)?;
        if self.balance < amount {
            return Err(DomainError::failed_precondition(
                "insufficient funds for the requested withdrawal",
            ));
        }
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| DomainError::failed_precondition("balance out of representable range"))?;
        Ok(())
    }

    /// Apply `rate` percent of the current balance as interest, rounded to
    /// the nearest cent.
    pub fn accrue_interest(&mut self, rate: f64) -> DomainResult<()> {
        validate_rate(rate)?;
        let interest = self
            .balance
            .interest_at(rate)
            .ok_or_else(|| DomainError::failed_precondition("interest out of representable range"))?;
        self.balance = self
            .balance
            .checked_add(interest)
            .ok_or_else(|| DomainError::failed_precondition("balance out of representable range"))?;
        Ok(())
    }
}

/// Transaction amounts must be strictly positive.
pub fn validate_amount(amount: Money) -> DomainResult<()> {
    if !amount.is_positive() {
        return Err(DomainError::invalid_argument(
            "transaction amount must be positive",
        ));
    }
    Ok(())
}

/// Annual interest rates are percentages and must be finite and strictly positive.
pub fn validate_rate(rate: f64) -> DomainResult<()> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(DomainError::invalid_argument(
            "annual interest rate must be a positive value",
        ));
    }
    Ok(())
}
