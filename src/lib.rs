#![doc = "The `todo_api` library crate."]
#![doc = ""]
#![doc = "A todo-list web service: CRUD over todo items plus username/password"]
#![doc = "registration and login that issues signed bearer tokens. The binary"]
#![doc = "(`main.rs`) loads configuration, builds an [`state::AppState`] and serves"]
#![doc = "[`routes::configure`] with actix-web."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use crate::error::AppError;
pub use crate::state::AppState;
