//! Account operation pipeline (application-level orchestration).
//!
//! Every balance-mutating operation runs the same frame:
//!
//! ```text
//! Request
//!   ↓
//! 1. Validate request shape (fail fast, no lock taken)
//!   ↓
//! 2. Acquire the account's lock
//!   ↓
//! 3. Read the current record inside the lock (existence re-checked here)
//!   ↓
//! 4. Compute the new state (pure domain code)
//!   ↓
//! 5. Persist through the store adapter
//!   ↓
//! 6. Release the lock (guard drop) and return the new balance
//! ```
//!
//! Holding the account lock across the store round-trips is intentional:
//! it is the mechanism that prevents two concurrent mutations from reading
//! the same pre-update balance. Operations on distinct accounts share no
//! lock and proceed fully in parallel.
//!
//! Mutual exclusion holds within one service instance only. Running several
//! instances against the same store would reintroduce lost updates; that
//! deployment needs a distributed lock or a compare-and-set on the balance
//! before it is sound.

use std::time::Duration;

use thiserror::Error;
use tracing::instrument;

use teller_accounts::{Account, AccountKind, validate_amount, validate_rate};
use teller_core::{DomainError, Money};

use crate::account_store::{AccountStore, StoreError};
use crate::lock_table::{AccountLockGuard, LockTable};

/// Consistency level for balance reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadConsistency {
    /// Read without taking the account lock. A read may trail a concurrent
    /// mutation by one operation; this trades strictness for read
    /// throughput and never affects the mutating operations themselves.
    #[default]
    Relaxed,
    /// Take the account lock for the read, linearizing it with mutations.
    Strict,
}

#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    pub read_consistency: ReadConsistency,
    /// Upper bound on waiting for an account lock. Exceeding it surfaces
    /// [`ServiceError::LockTimeout`] instead of blocking on a stuck holder.
    pub lock_timeout: Duration,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            read_consistency: ReadConsistency::Relaxed,
            lock_timeout: Duration::from_secs(30),
        }
    }
}

/// Account service operation error.
///
/// `Domain` failures are terminal: the caller must change the request.
/// `LockTimeout` and `Store` are transient infrastructure failures and are
/// safe to retry later.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("timed out waiting for the lock on account '{0}'")]
    LockTimeout(String),

    #[error("account store unavailable: {0}")]
    Store(#[from] StoreError),
}

/// The orchestrator for all account operations.
///
/// Generic over the store so tests compose it with
/// [`InMemoryAccountStore`](crate::account_store::InMemoryAccountStore)
/// while production wires the Redis-backed store.
#[derive(Debug)]
pub struct AccountService<S> {
    store: S,
    locks: LockTable,
    config: AccountServiceConfig,
}

impl<S> AccountService<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, AccountServiceConfig::default())
    }

    pub fn with_config(store: S, config: AccountServiceConfig) -> Self {
        Self {
            store,
            locks: LockTable::new(),
            config,
        }
    }
}

impl<S: AccountStore> AccountService<S> {
    /// Open a new account with a zero balance.
    ///
    /// The existence check runs inside the account's lock, so two
    /// concurrent creates of the same id resolve to one success and one
    /// `AlreadyExists`.
    #[instrument(skip(self), err)]
    pub fn create_account(&self, account_id: &str, kind: AccountKind) -> Result<(), ServiceError> {
        validate_account_id(account_id)?;

        let _held = self.lock(account_id)?;
        if self.store.exists(account_id)? {
            return Err(DomainError::AlreadyExists.into());
        }
        self.store.write(account_id, &Account::open(kind))?;
        Ok(())
    }

    /// Current balance of the account.
    ///
    /// Lock-free under [`ReadConsistency::Relaxed`] (the default);
    /// lock-protected under [`ReadConsistency::Strict`].
    pub fn balance(&self, account_id: &str) -> Result<Money, ServiceError> {
        validate_account_id(account_id)?;

        let _held = match self.config.read_consistency {
            ReadConsistency::Relaxed => None,
            ReadConsistency::Strict => Some(self.lock(account_id)?),
        };
        let account = self.read_existing(account_id)?;
        Ok(account.balance)
    }

    #[instrument(skip(self), err)]
    pub fn deposit(&self, account_id: &str, amount: Money) -> Result<Money, ServiceError> {
        validate_account_id(account_id)?;
        validate_amount(amount)?;

        let _held = self.lock(account_id)?;
        let mut account = self.read_existing(account_id)?;
        account.deposit(amount)?;
        self.store.write(account_id, &account)?;
        Ok(account.balance)
    }

    #[instrument(skip(self), err)]
    pub fn withdraw(&self, account_id: &str, amount: Money) -> Result<Money, ServiceError> {
        validate_account_id(account_id)?;
        validate_amount(amount)?;

        let _held = self.lock(account_id)?;
        let mut account = self.read_existing(account_id)?;
        account.withdraw(amount)?;
        self.store.write(account_id, &account)?;
        Ok(account.balance)
    }

    /// Apply `rate` percent of the current balance as interest.
    #[instrument(skip(self), err)]
    pub fn apply_interest(&self, account_id: &str, rate: f64) -> Result<Money, ServiceError> {
        validate_account_id(account_id)?;
        validate_rate(rate)?;

        let _held = self.lock(account_id)?;
        let mut account = self.read_existing(account_id)?;
        account.accrue_interest(rate)?;
        self.store.write(account_id, &account)?;
        Ok(account.balance)
    }

    fn lock(&self, account_id: &str) -> Result<AccountLockGuard, ServiceError> {
        self.locks
            .acquire_for(account_id, self.config.lock_timeout)
            .ok_or_else(|| ServiceError::LockTimeout(account_id.to_owned()))
    }

    fn read_existing(&self, account_id: &str) -> Result<Account, ServiceError> {
        self.store
            .read(account_id)?
            .ok_or_else(|| DomainError::NotFound.into())
    }
}

fn validate_account_id(account_id: &str) -> Result<(), DomainError> {
    if account_id.is_empty() {
        return Err(DomainError::invalid_argument("account id must not be empty"));
    }
    Ok(())
}
