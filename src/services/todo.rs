use log::info;
use std::sync::Arc;
use validator::Validate;

use crate::error::AppError;
use crate::models::{TodoItem, TodoItemDto};
use crate::store::{StoreError, TodoRepository};

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Todo item {} not found", id))
}

/// CRUD over todo items, mapping between `TodoItemDto` and the stored `TodoItem`.
pub struct TodoService {
    items: Arc<TodoRepository>,
}

impl TodoService {
    pub fn new(items: Arc<TodoRepository>) -> Self {
        Self { items }
    }

    /// All items in store order.
    pub async fn list(&self) -> Result<Vec<TodoItemDto>, AppError> {
        let items = self.items.get_all().await?;
        Ok(items.into_iter().map(TodoItemDto::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<TodoItemDto, AppError> {
        match self.items.get_by_id(id).await? {
            Some(item) => Ok(item.into()),
            None => Err(not_found(id)),
        }
    }

    /// Validates `input`, stamps the creation time and persists it.
    /// Returns the stored item with its assigned id.
    pub async fn create(&self, input: TodoItemDto) -> Result<TodoItemDto, AppError> {
        input.validate()?;
        let created = self.items.add(TodoItem::new(input)).await?;
        info!("created todo item {}", created.id);
        Ok(created.into())
    }

    /// Overwrites title, description and completion of item `id`.
    ///
    /// `input.id` must equal `id`. The stored id and creation date are never changed.
    pub async fn update(&self, id: i32, input: TodoItemDto) -> Result<(), AppError> {
        if input.id != id {
            return Err(AppError::BadRequest(format!(
                "Id in body ({}) does not match id in path ({})",
                input.id, id
            )));
        }
        input.validate()?;

        let mut existing = self.items.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
        existing.apply(input);

        // The row may have been deleted since the read above.
        self.items.update(&existing).await.map_err(|e| match e {
            StoreError::NotFound => not_found(id),
            other => other.into(),
        })?;
        info!("updated todo item {}", id);
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !self.items.delete(id).await? {
            return Err(not_found(id));
        }
        info!("deleted todo item {}", id);
        Ok(())
    }
}
