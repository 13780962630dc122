use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

use super::{check_max_length, check_required, into_result};

pub const TITLE_MAX_LEN: u64 = 100;
pub const DESCRIPTION_MAX_LEN: u64 = 500;

/// A todo item as stored in the `todo_items` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TodoItem {
    /// Assigned by the store on insert.
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    /// Set once at creation, never overwritten afterwards.
    pub create_date: DateTime<Utc>,
}

/// External representation of a todo item, used for both requests and responses.
///
/// On requests `id` is ignored for creation and must match the path for updates,
/// and `createDate` is always ignored: the server owns both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItemDto {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_date: Option<DateTime<Utc>>,
}

impl Validate for TodoItemDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if check_required(&mut errors, "title", &self.title, "Title cannot be empty") {
            check_max_length(
                &mut errors,
                "title",
                &self.title,
                TITLE_MAX_LEN,
                "Title cannot exceed 100 characters",
            );
        }
        if let Some(description) = &self.description {
            check_max_length(
                &mut errors,
                "description",
                description,
                DESCRIPTION_MAX_LEN,
                "Description cannot exceed 500 characters",
            );
        }

        into_result(errors)
    }
}

impl TodoItem {
    /// Builds a new, not yet persisted item from client input.
    /// The client's `id` and `createDate` are discarded; `create_date` is now.
    pub fn new(input: TodoItemDto) -> Self {
        Self {
            id: 0,
            title: input.title,
            description: input.description,
            is_completed: input.is_completed,
            create_date: Utc::now(),
        }
    }

    /// Overwrites the client-editable fields. `id` and `create_date` are kept.
    pub fn apply(&mut self, input: TodoItemDto) {
        self.title = input.title;
        self.description = input.description;
        self.is_completed = input.is_completed;
    }
}

impl From<TodoItem> for TodoItemDto {
    fn from(item: TodoItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            is_completed: item.is_completed,
            create_date: Some(item.create_date),
        }
    }
}
