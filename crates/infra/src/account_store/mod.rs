//! Account store boundary.
//!
//! This module defines the key-value contract the service performs its
//! read-modify-write sequence against, without making storage assumptions.

pub mod in_memory;
#[cfg(feature = "redis")]
pub mod redis_hash;
pub mod r#trait;

pub use in_memory::InMemoryAccountStore;
#[cfg(feature = "redis")]
pub use redis_hash::RedisAccountStore;
pub use r#trait::{AccountStore, StoreError};
