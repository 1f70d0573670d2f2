//! # Authentication Primitives
//!
//! Credential and session building blocks for portfolio accounts:
//! - Argon2id password hashing and verification
//! - Password policy checks
//! - Signed session tokens carried in the session cookie

pub mod password;
pub mod session;

// Re-export commonly used types
pub use password::{
    hash_password,
    verify_password,
    PasswordConfig,
    PasswordError,
    PasswordPolicy,
    PasswordValidationError,
};
pub use session::{create_session_token, generate_secret, validate_token, Claims, SessionConfig, SessionError};
pub use secrecy;
