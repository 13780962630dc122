//! Persistence abstraction shared by the todo and credential stores.
//!
//! Both stores expose the same five operations through [`Repository`]; the credential
//! store adds a lookup by username. Implementations live in [`postgres`] (sqlx) and
//! [`memory`] (in-process, used for local runs and tests).

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use std::fmt;

use crate::models::{TodoItem, User};

pub use memory::MemoryRepository;
pub use postgres::{PgTodoRepository, PgUserRepository};

/// Failure reported by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint was violated; carries the entity label.
    Duplicate(String),
    /// `update` targeted an id with no row.
    NotFound,
    /// Any other backend fault.
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StoreError::Duplicate(what) => write!(f, "duplicate {}", what),
            StoreError::NotFound => write!(f, "row not found"),
            StoreError::Backend(msg) => write!(f, "storage backend error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// CRUD contract over one entity type.
///
/// Every call is its own unit of work and is committed before it returns.
#[async_trait]
pub trait Repository<T: Send + Sync + 'static>: Send + Sync {
    /// All entities ordered by id.
    async fn get_all(&self) -> Result<Vec<T>, StoreError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<T>, StoreError>;

    /// Persists `entity`, ignoring its id, and returns it with the id the store assigned.
    async fn add(&self, entity: T) -> Result<T, StoreError>;

    /// Overwrites the mutable fields of the row with `entity`'s id.
    ///
    /// Returns [`StoreError::NotFound`] when no such row exists.
    async fn update(&self, entity: &T) -> Result<(), StoreError>;

    /// Removes the row if present. Returns whether anything was removed.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait UserRepository: Repository<User> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

pub type TodoRepository = dyn Repository<TodoItem>;
