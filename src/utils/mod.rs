//! Helpers shared by the API, services and the admin CLI.
//!
//! - [`password`] - Argon2 password hashing and verification
//! - [`token_generator`] - random bearer token generation

pub mod password;
pub mod token_generator;
