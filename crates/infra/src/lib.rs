//! Infrastructure layer: the account store boundary, per-account locking,
//! and the account service orchestrator.

pub mod account_store;
pub mod lock_table;
pub mod service;

#[cfg(feature = "redis")]
pub use account_store::RedisAccountStore;
pub use account_store::{AccountStore, InMemoryAccountStore, StoreError};
pub use lock_table::{AccountLockGuard, LockTable};
pub use service::{AccountService, AccountServiceConfig, ReadConsistency, ServiceError};
