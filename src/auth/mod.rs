pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::models::{check_max_length, check_required, into_result, user::USERNAME_MAX_LEN};

// Re-export necessary items
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password, PasswordDigest};
pub use token::{Claims, TokenService};

/// Represents the payload for a new user registration request.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Desired username. Required, at most 50 characters, unique across users.
    #[serde(default)]
    pub username: String,
    /// Required, any non-blank value.
    #[serde(default)]
    pub password: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if check_required(&mut errors, "username", &self.username, "Username is required") {
            check_max_length(
                &mut errors,
                "username",
                &self.username,
                USERNAME_MAX_LEN,
                "Username cannot exceed 50 characters",
            );
        }
        check_required(&mut errors, "password", &self.password, "Password is required");
        into_result(errors)
    }
}

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_required(&mut errors, "username", &self.username, "Username is required");
        check_required(&mut errors, "password", &self.password, "Password is required");
        into_result(errors)
    }
}

/// Response structure after a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// The JWT (JSON Web Token) to present as `Authorization: Bearer <token>`.
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_register_request_validation() {
        assert!(register("alice", "secret").validate().is_ok());
        assert!(register(&"a".repeat(50), "secret").validate().is_ok());

        let errors = register("", "secret").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));

        let errors = register(&"a".repeat(51), "secret").validate().unwrap_err();
        assert_eq!(errors.field_errors()["username"][0].code, "length");

        let errors = register("alice", "").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
        assert!(!errors.field_errors().contains_key("username"));
    }

    #[test]
    fn test_login_request_validation() {
        let valid = LoginRequest {
            username: "alice".to_string(),
            password: "secret".to_string(),
        };
        assert!(valid.validate().is_ok());

        let missing: LoginRequest = serde_json::from_str(r#"{"username": "alice"}"#).unwrap();
        let errors = missing.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("password"));
    }
}
