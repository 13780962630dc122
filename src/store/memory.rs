//! In-process store backed by a `BTreeMap`.
//!
//! Selected with `STORAGE_BACKEND=memory`; also what the test suite runs against.
//! Ids are assigned from 1 upward and never reused, like a `SERIAL` column.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{Repository, StoreError, UserRepository};
use crate::models::{TodoItem, User};

/// An entity the memory store can hold.
pub trait Record: Clone + Send + Sync + 'static {
    /// Label used in duplicate-key errors.
    const LABEL: &'static str;

    fn id(&self) -> i32;
    fn set_id(&mut self, id: i32);

    /// Value that must be unique across all records, if any.
    fn unique_key(&self) -> Option<&str> {
        None
    }
}

impl Record for TodoItem {
    const LABEL: &'static str = "Todo item";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }
}

impl Record for User {
    const LABEL: &'static str = "User";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.username)
    }
}

struct Table<T> {
    rows: BTreeMap<i32, T>,
    last_id: i32,
}

impl<T: Record> Table<T> {
    fn key_taken(&self, candidate: &T) -> bool {
        match candidate.unique_key() {
            Some(key) => self
                .rows
                .values()
                .any(|row| row.id() != candidate.id() && row.unique_key() == Some(key)),
            None => false,
        }
    }
}

pub struct MemoryRepository<T> {
    table: RwLock<Table<T>>,
}

impl<T> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table {
                rows: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Repository<T> for MemoryRepository<T> {
    async fn get_all(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<T>, StoreError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn add(&self, mut entity: T) -> Result<T, StoreError> {
        let mut table = self.table.write().await;
        entity.set_id(0);
        if table.key_taken(&entity) {
            return Err(StoreError::Duplicate(T::LABEL.to_string()));
        }
        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Backend(format!("{} ids exhausted", T::LABEL)))?;
        table.last_id = id;
        entity.set_id(id);
        table.rows.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: &T) -> Result<(), StoreError> {
        let mut table = self.table.write().await;
        if !table.rows.contains_key(&entity.id()) {
            return Err(StoreError::NotFound);
        }
        if table.key_taken(entity) {
            return Err(StoreError::Duplicate(T::LABEL.to_string()));
        }
        table.rows.insert(entity.id(), entity.clone());
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl UserRepository for MemoryRepository<User> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .find(|user| user.username == username)
            .cloned())
    }
}
