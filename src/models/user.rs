use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const USERNAME_MAX_LEN: u64 = 50;

/// A registered user as stored in the `users` table.
///
/// `password_hash` is the keyed hash of the password under `password_salt`;
/// neither ever leaves the server.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub password_hash: Vec<u8>,
    pub password_salt: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Builds a new, not yet persisted user from a computed salt and hash.
    pub fn new(username: String, password_hash: Vec<u8>, password_salt: Vec<u8>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            username,
            password_hash,
            password_salt,
            created_at: now,
            updated_at: now,
        }
    }
}
