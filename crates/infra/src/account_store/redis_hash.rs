//! Redis-backed account store (one hash per account).
//!
//! Record layout: `HSET <prefix><account_id> account_type <kind> balance <cents>`.
//! The balance field holds integer cents, never a float. Reads issued on a
//! fresh connection to the same server observe all previously acknowledged
//! writes, which satisfies the read-after-lock freshness requirement.

use std::sync::Arc;

use teller_accounts::{Account, AccountKind};
use teller_core::Money;

use super::r#trait::{AccountStore, StoreError};

/// Default key namespace for account hashes
const DEFAULT_KEY_PREFIX: &str = "teller:account:";

const FIELD_ACCOUNT_TYPE: &str = "account_type";
const FIELD_BALANCE: &str = "balance";

#[derive(Debug, Clone)]
pub struct RedisAccountStore {
    client: Arc<redis::Client>,
    key_prefix: String,
}

impl RedisAccountStore {
    /// Create a new Redis account store.
    ///
    /// # Arguments
    ///
    /// * `redis_url` - Redis connection URL (e.g., "redis://localhost:6379")
    /// * `key_prefix` - key namespace (default: "teller:account:")
    pub fn new(redis_url: impl AsRef<str>, key_prefix: Option<String>) -> Result<Self, StoreError> {
        let client = redis::Client::open(redis_url.as_ref())
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self {
            client: Arc::new(client),
            key_prefix: key_prefix.unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string()),
        })
    }

    fn key(&self, account_id: &str) -> String {
        format!("{}{}", self.key_prefix, account_id)
    }

    fn connection(&self) -> Result<redis::Connection, StoreError> {
        self.client
            .get_connection()
            .map_err(|e| StoreError::Connection(e.to_string()))
    }
}

impl AccountStore for RedisAccountStore {
    fn exists(&self, account_id: &str) -> Result<bool, StoreError> {
        let mut conn = self.connection()?;

        let present: bool = redis::cmd("EXISTS")
            .arg(self.key(account_id))
            .query(&mut conn)
            .map_err(|e| StoreError::Command(format!("EXISTS failed: {e}")))?;

        Ok(present)
    }

    fn read(&self, account_id: &str) -> Result<Option<Account>, StoreError> {
        let mut conn = self.connection()?;

        let (kind_raw, balance_raw): (Option<String>, Option<String>) = redis::cmd("HMGET")
            .arg(self.key(account_id))
            .arg(FIELD_ACCOUNT_TYPE)
            .arg(FIELD_BALANCE)
            .query(&mut conn)
            .map_err(|e| StoreError::Command(format!("HMGET failed: {e}")))?;

        let (Some(kind_raw), Some(balance_raw)) = (kind_raw, balance_raw) else {
            return Ok(None);
        };

        let kind: AccountKind = kind_raw
            .parse()
            .map_err(|_| StoreError::Corrupt(format!("unknown account type '{kind_raw}'")))?;
        let cents: i64 = balance_raw
            .parse()
            .map_err(|_| StoreError::Corrupt(format!("non-integer balance '{balance_raw}'")))?;

        Ok(Some(Account {
            kind,
            balance: Money::from_cents(cents),
        }))
    }

    fn write(&self, account_id: &str, account: &Account) -> Result<(), StoreError> {
        let mut conn = self.connection()?;

        let _: i64 = redis::cmd("HSET")
            .arg(self.key(account_id))
            .arg(FIELD_ACCOUNT_TYPE)
            .arg(account.kind.as_str())
            .arg(FIELD_BALANCE)
            .arg(account.balance.cents())
            .query(&mut conn)
            .map_err(|e| StoreError::Command(format!("HSET failed: {e}")))?;

        Ok(())
    }
}
