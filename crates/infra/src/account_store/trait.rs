use std::sync::Arc;

use thiserror::Error;

use teller_accounts::Account;

/// Account store operation error.
///
/// These are **infrastructure errors** (connectivity, command execution,
/// corrupt persisted state) as opposed to domain errors (validation,
/// missing accounts). Callers treat them as transient: the request was
/// fine, the backing store was not.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),

    #[error("store command error: {0}")]
    Command(String),

    #[error("corrupt account record: {0}")]
    Corrupt(String),
}

/// Key-value boundary holding one record per account id.
///
/// Implementations must guarantee that a `read` issued after the caller
/// acquired the account's lock in this process observes the latest write
/// made under that lock. No cross-process consistency is promised; all
/// mutation paths for an id funnel through this process's lock table.
pub trait AccountStore: Send + Sync {
    /// True iff a record for the id is present.
    fn exists(&self, account_id: &str) -> Result<bool, StoreError>;

    /// Load the record for the id. Absent accounts are `Ok(None)`; the
    /// caller owns the domain-level not-found classification.
    fn read(&self, account_id: &str) -> Result<Option<Account>, StoreError>;

    /// Upsert the full record. Field-level last write wins.
    fn write(&self, account_id: &str, account: &Account) -> Result<(), StoreError>;
}

impl<S> AccountStore for Arc<S>
where
    S: AccountStore + ?Sized,
{
    fn exists(&self, account_id: &str) -> Result<bool, StoreError> {
        (**self).exists(account_id)
    }

    fn read(&self, account_id: &str) -> Result<Option<Account>, StoreError> {
        (**self).read(account_id)
    }

    fn write(&self, account_id: &str, account: &Account) -> Result<(), StoreError> {
        (**self).write(account_id, account)
    }
}
