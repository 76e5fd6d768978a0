use std::sync::Arc;

use teller_accounts::AccountKind;
use teller_core::Money;
use teller_infra::account_store::InMemoryAccountStore;
use teller_infra::service::{
    AccountService, AccountServiceConfig, ReadConsistency, ServiceError,
};

#[cfg(feature = "redis")]
use teller_infra::account_store::RedisAccountStore;

/// Service wiring selected at startup: in-memory by default, Redis-backed
/// when `USE_PERSISTENT_STORES=true` and the `redis` feature is compiled in.
pub enum AppServices {
    InMemory {
        service: AccountService<Arc<InMemoryAccountStore>>,
    },
    #[cfg(feature = "redis")]
    Persistent {
        service: AccountService<Arc<RedisAccountStore>>,
    },
}

impl AppServices {
    pub fn create_account(&self, account_id: &str, kind: AccountKind) -> Result<(), ServiceError> {
        match self {
            AppServices::InMemory { service } => service.create_account(account_id, kind),
            #[cfg(feature = "redis")]
            AppServices::Persistent { service } => service.create_account(account_id, kind),
        }
    }

    pub fn balance(&self, account_id: &str) -> Result<Money, ServiceError> {
        match self {
            AppServices::InMemory { service } => service.balance(account_id),
            #[cfg(feature = "redis")]
            AppServices::Persistent { service } => service.balance(account_id),
        }
    }

    pub fn deposit(&self, account_id: &str, amount: Money) -> Result<Money, ServiceError> {
        match self {
            AppServices::InMemory { service } => service.deposit(account_id, amount),
            #[cfg(feature = "redis")]
            AppServices::Persistent { service } => service.deposit(account_id, amount),
        }
    }

    pub fn withdraw(&self, account_id: &str, amount: Money) -> Result<Money, ServiceError> {
        match self {
            AppServices::InMemory { service } => service.withdraw(account_id, amount),
            #[cfg(feature = "redis")]
            AppServices::Persistent { service } => service.withdraw(account_id, amount),
        }
    }

    pub fn apply_interest(&self, account_id: &str, rate: f64) -> Result<Money, ServiceError> {
        match self {
            AppServices::InMemory { service } => service.apply_interest(account_id, rate),
            #[cfg(feature = "redis")]
            AppServices::Persistent { service } => service.apply_interest(account_id, rate),
        }
    }
}

pub fn build_services() -> AppServices {
    let use_persistent = std::env::var("USE_PERSISTENT_STORES")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    if use_persistent {
        #[cfg(feature = "redis")]
        {
            return build_persistent_services();
        }
        #[cfg(not(feature = "redis"))]
        {
            tracing::warn!(
                "USE_PERSISTENT_STORES=true but redis feature not enabled, falling back to in-memory"
            );
        }
    }

    build_in_memory_services()
}

fn service_config() -> AccountServiceConfig {
    let strict_reads = std::env::var("STRICT_BALANCE_READS")
        .unwrap_or_else(|_| "false".to_string())
        .parse::<bool>()
        .unwrap_or(false);

    AccountServiceConfig {
        read_consistency: if strict_reads {
            ReadConsistency::Strict
        } else {
            ReadConsistency::Relaxed
        },
        ..AccountServiceConfig::default()
    }
}

fn build_in_memory_services() -> AppServices {
    tracing::info!("using in-memory account store");
    AppServices::InMemory {
        service: AccountService::with_config(
            Arc::new(InMemoryAccountStore::new()),
            service_config(),
        ),
    }
}

#[cfg(feature = "redis")]
fn build_persistent_services() -> AppServices {
    let redis_url =
        std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    let store =
        RedisAccountStore::new(&redis_url, None).expect("failed to open redis client");

    tracing::info!(%redis_url, "using redis account store");
    AppServices::Persistent {
        service: AccountService::with_config(Arc::new(store), service_config()),
    }
}
