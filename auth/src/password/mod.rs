//! Credential hashing.
//!
//! Digests are Argon2id in PHC string format, so algorithm parameters and
//! salt travel with the stored value.

mod argon2;
mod errors;

pub use self::argon2::PasswordHasher;
pub use errors::PasswordError;
