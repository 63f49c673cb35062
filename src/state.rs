use std::sync::Arc;

use crate::auth::{AccessGate, TokenService};
use crate::config::Config;
use crate::error::AppError;
use crate::store::{MemoryStore, PgStore, RevocationStore, TaskStore, UserStore};

/// Everything a request handler needs, built once at startup and shared
/// through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub tasks: Arc<dyn TaskStore>,
    pub revocations: Arc<dyn RevocationStore>,
    pub tokens: TokenService,
}

impl AppState {
    /// Uses one store for all three collections.
    pub fn with_store<S>(store: Arc<S>, tokens: TokenService) -> Self
    where
        S: UserStore + TaskStore + RevocationStore + 'static,
    {
        Self {
            users: store.clone(),
            tasks: store.clone(),
            revocations: store,
            tokens,
        }
    }

    /// Connects to PostgreSQL when a database URL is configured, otherwise
    /// falls back to an in-memory store.
    pub async fn from_config(config: &Config) -> Result<Self, AppError> {
        let tokens = TokenService::new(&config.jwt_secret);
        match &config.database_url {
            Some(url) => {
                let store = PgStore::connect(url).await?;
                log::info!("using PostgreSQL store");
                Ok(Self::with_store(Arc::new(store), tokens))
            }
            None => {
                log::warn!("DATABASE_URL not set, data will be kept in memory only");
                Ok(Self::with_store(Arc::new(MemoryStore::new()), tokens))
            }
        }
    }

    /// Builds the access gate protecting the task routes.
    pub fn gate(&self) -> AccessGate {
        AccessGate::new(self.tokens.clone(), self.revocations.clone())
    }
}
