//! Monetary values as scaled-integer cents.
//!
//! Balances and transaction amounts are held in the smallest currency unit
//! to avoid floating-point drift. Floats only appear at the wire boundary,
//! where they are rounded to the nearest cent on the way in.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

const CENTS_PER_MAJOR: f64 = 100.0;

/// A signed monetary amount in cents.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Convert a major-unit amount (e.g. dollars) into cents.
    ///
    /// Rejects non-finite values and values whose cent representation does
    /// not fit in `i64`. Fractional cents round to the nearest cent, ties
    /// away from zero.
    pub fn from_major(value: f64) -> DomainResult<Self> {
        if !value.is_finite() {
            return Err(DomainError::invalid_argument("amount must be a finite number"));
        }
        let cents = (value * CENTS_PER_MAJOR).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return Err(DomainError::invalid_argument("amount out of representable range"));
        }
        Ok(Self(cents as i64))
    }

    /// Major-unit view for wire responses. Lossless for balances below 2^53 cents.
    pub fn to_major(self) -> f64 {
        self.0 as f64 / CENTS_PER_MAJOR
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }

    /// Interest accrued on this amount at `rate` percent, rounded to the
    /// nearest cent (ties away from zero). `None` if the result does not
    /// fit the cent representation.
    pub fn interest_at(self, rate: f64) -> Option<Money> {
        let raw = (self.0 as f64 * rate / 100.0).round();
        if !raw.is_finite() || raw < i64::MIN as f64 || raw > i64::MAX as f64 {
            return None;
        }
        Some(Money(raw as i64))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}
