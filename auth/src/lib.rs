//! Authentication utilities library
//!
//! Provides the credential and token primitives used by the account service:
//! - Password hashing (Argon2id)
//! - Signed, time-bounded JWT access tokens (HS256)
//! - An `Authenticator` that binds the token codec to a configured secret and lifetime
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let authenticator = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24));
//!
//! let token = authenticator.issue_token(42, "alice@example.com", false).unwrap();
//! let claims = authenticator.parse_token(&token).unwrap();
//! assert_eq!(claims.user_id, 42);
//! assert!(!claims.is_admin);
//!
//! // Reissue with a fresh expiry, identity preserved
//! let refreshed = authenticator.refresh_token(&token).unwrap();
//! assert_eq!(authenticator.parse_token(&refreshed).unwrap().email, "alice@example.com");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
