//! Shared application state.

use std::sync::Arc;

use ampere_common::auth::JwtContext;

use crate::store::{CommandMediator, ConfigStore, StatusRegistry};

/// Credentials for the operator account, loaded once at startup.
pub struct OperatorAccount {
    pub username: String,
    /// Argon2id PHC string.
    pub password_hash: String,
}

/// State shared across all request handlers.
///
/// Constructed once in `main` and injected into every handler, so the
/// stores' lifecycle (process-scoped, no persistence) and locking discipline
/// stay explicit and testable without the transport layer.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    jwt: JwtContext,
    operator: OperatorAccount,
    token_ttl_secs: i64,
    status: StatusRegistry,
    commands: CommandMediator,
    configs: ConfigStore,
}

impl AppState {
    pub fn new(jwt: JwtContext, operator: OperatorAccount, token_ttl_secs: i64) -> Self {
        Self {
            inner: Arc::new(Inner {
                jwt,
                operator,
                token_ttl_secs,
                status: StatusRegistry::default(),
                commands: CommandMediator::default(),
                configs: ConfigStore::default(),
            }),
        }
    }

    pub fn jwt(&self) -> &JwtContext {
        &self.inner.jwt
    }

    pub fn operator(&self) -> &OperatorAccount {
        &self.inner.operator
    }

    /// Lifetime of issued operator tokens, in seconds.
    pub fn token_ttl_secs(&self) -> i64 {
        self.inner.token_ttl_secs
    }

    /// Latest reported status per device.
    pub fn status(&self) -> &StatusRegistry {
        &self.inner.status
    }

    /// Single-slot pending command per device.
    pub fn commands(&self) -> &CommandMediator {
        &self.inner.commands
    }

    /// Last-saved configuration per device.
    pub fn configs(&self) -> &ConfigStore {
        &self.inner.configs
    }
}
