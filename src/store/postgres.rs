//! Postgres-backed stores built on a shared `sqlx::PgPool`.

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use super::{Repository, StoreError, UserRepository};
use crate::models::{TodoItem, User};

const TODO_COLUMNS: &str = "id, title, description, is_completed, create_date";
const USER_COLUMNS: &str = "id, username, password_hash, password_salt, created_at, updated_at";

/// Converts `sqlx::Error` into `StoreError`.
///
/// Unique-constraint violations are reported as a generic `Duplicate`; callers that
/// know the entity relabel it.
impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> StoreError {
        match &error {
            sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
                StoreError::Duplicate("Record".into())
            }
            sqlx::Error::RowNotFound => StoreError::NotFound,
            _ => StoreError::Backend(error.to_string()),
        }
    }
}

pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Creates the tables if they do not exist yet.
pub async fn init_schema(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS todo_items (
            id SERIAL PRIMARY KEY,
            title VARCHAR(100) NOT NULL,
            description VARCHAR(500),
            is_completed BOOLEAN NOT NULL DEFAULT FALSE,
            create_date TIMESTAMPTZ NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            username VARCHAR(50) NOT NULL UNIQUE,
            password_hash BYTEA NOT NULL,
            password_salt BYTEA NOT NULL,
            created_at TIMESTAMPTZ NOT NULL,
            updated_at TIMESTAMPTZ NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[derive(Clone)]
pub struct PgTodoRepository {
    pool: PgPool,
}

impl PgTodoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<TodoItem> for PgTodoRepository {
    async fn get_all(&self) -> Result<Vec<TodoItem>, StoreError> {
        let items = sqlx::query_as::<_, TodoItem>(&format!(
            "SELECT {} FROM todo_items ORDER BY id",
            TODO_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<TodoItem>, StoreError> {
        let item = sqlx::query_as::<_, TodoItem>(&format!(
            "SELECT {} FROM todo_items WHERE id = $1",
            TODO_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    async fn add(&self, entity: TodoItem) -> Result<TodoItem, StoreError> {
        let item = sqlx::query_as::<_, TodoItem>(&format!(
            "INSERT INTO todo_items (title, description, is_completed, create_date)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            TODO_COLUMNS
        ))
        .bind(entity.title)
        .bind(entity.description)
        .bind(entity.is_completed)
        .bind(entity.create_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }

    async fn update(&self, entity: &TodoItem) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE todo_items SET title = $1, description = $2, is_completed = $3 WHERE id = $4",
        )
        .bind(&entity.title)
        .bind(&entity.description)
        .bind(entity.is_completed)
        .bind(entity.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM todo_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn relabel_duplicate(error: sqlx::Error) -> StoreError {
    match StoreError::from(error) {
        StoreError::Duplicate(_) => StoreError::Duplicate("User".into()),
        other => other,
    }
}

#[async_trait]
impl Repository<User> for PgUserRepository {
    async fn get_all(&self) -> Result<Vec<User>, StoreError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY id",
            USER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn add(&self, entity: User) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, password_hash, password_salt, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            USER_COLUMNS
        ))
        .bind(entity.username)
        .bind(entity.password_hash)
        .bind(entity.password_salt)
        .bind(entity.created_at)
        .bind(entity.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(relabel_duplicate)
    }

    async fn update(&self, entity: &User) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE users
             SET username = $1, password_hash = $2, password_salt = $3, updated_at = NOW()
             WHERE id = $4",
        )
        .bind(&entity.username)
        .bind(&entity.password_hash)
        .bind(&entity.password_salt)
        .bind(entity.id)
        .execute(&self.pool)
        .await
        .map_err(relabel_duplicate)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }
}
