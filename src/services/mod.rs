pub mod auth;
pub mod todo;

pub use auth::AuthService;
pub use todo::TodoService;
