use log::info;
use std::sync::Arc;

use crate::auth::TokenService;
use crate::config::{Config, JwtConfig, StorageBackend};
use crate::models::{TodoItem, User};
use crate::services::{AuthService, TodoService};
use crate::store::{
    postgres, MemoryRepository, PgTodoRepository, PgUserRepository, StoreError, TodoRepository,
    UserRepository,
};

/// Everything the HTTP layer needs, built once at startup and shared by all workers.
#[derive(Clone)]
pub struct AppState {
    pub todos: Arc<TodoService>,
    pub auth: Arc<AuthService>,
    pub tokens: Arc<TokenService>,
    pub require_auth: bool,
}

impl AppState {
    pub fn new(
        jwt: &JwtConfig,
        require_auth: bool,
        items: Arc<TodoRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        let tokens = Arc::new(TokenService::new(jwt));
        Self {
            todos: Arc::new(TodoService::new(items)),
            auth: Arc::new(AuthService::new(users, tokens.clone())),
            tokens,
            require_auth,
        }
    }

    /// State backed by empty in-process stores.
    pub fn in_memory(jwt: &JwtConfig, require_auth: bool) -> Self {
        Self::new(
            jwt,
            require_auth,
            Arc::new(MemoryRepository::<TodoItem>::new()),
            Arc::new(MemoryRepository::<User>::new()),
        )
    }

    /// Connects to the configured backend and, for Postgres, ensures the schema exists.
    pub async fn from_config(config: &Config) -> Result<Self, StoreError> {
        match config.storage_backend {
            StorageBackend::Memory => {
                info!("using in-memory storage; data is lost on shutdown");
                Ok(Self::in_memory(&config.jwt, config.require_auth))
            }
            StorageBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| StoreError::Backend("DATABASE_URL is not set".into()))?;
                let pool = postgres::connect(url, config.database_max_connections).await?;
                postgres::init_schema(&pool).await?;
                info!("connected to postgres");
                Ok(Self::new(
                    &config.jwt,
                    config.require_auth,
                    Arc::new(PgTodoRepository::new(pool.clone())),
                    Arc::new(PgUserRepository::new(pool)),
                ))
            }
        }
    }
}
