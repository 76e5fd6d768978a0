use std::collections::HashMap;
use std::sync::RwLock;

use teller_accounts::Account;

use super::r#trait::{AccountStore, StoreError};

/// In-memory account store.
///
/// Intended for tests/dev. Field reads and writes are atomic per record,
/// matching what a hash-field store provides.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    records: RwLock<HashMap<String, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn exists(&self, account_id: &str) -> Result<bool, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Command("lock poisoned".to_string()))?;
        Ok(records.contains_key(account_id))
    }

    fn read(&self, account_id: &str) -> Result<Option<Account>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Command("lock poisoned".to_string()))?;
        Ok(records.get(account_id).cloned())
    }

    fn write(&self, account_id: &str, account: &Account) -> Result<(), StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Command("lock poisoned".to_string()))?;
        records.insert(account_id.to_owned(), account.clone());
        Ok(())
    }
}
