//! Authentication utilities library
//!
//! Leaf crate with no knowledge of users or storage:
//! - Password hashing (Argon2id, salted, PHC strings)
//! - JWT issuance and validation (HMAC family, fixed per deployment)
//! - Authentication coordination (verify password, then issue a token)
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("other_password", &hash));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler.issue(42, "user", Duration::minutes(30)).unwrap();
//! let claims = handler.decode(&token).unwrap();
//! assert_eq!(claims.user_id, 42);
//! assert_eq!(claims.role, "user");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, JwtHandler};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::with_algorithm(b"secret_key_at_least_32_bytes_long!", "HS256").unwrap();
//! let auth = Authenticator::new(handler, Duration::minutes(30));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, 42, "user").unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.user_id, 42);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
