//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence` (PostgreSQL) and
//! `crate::infrastructure::memory` (in-process). Mocks for the user and token
//! repositories are generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`CrudRepository`] - generic single-table CRUD for every resource
//! - [`UserRepository`] - user accounts
//! - [`TokenRepository`] - bearer token storage and revocation

pub mod crud_repository;
pub mod token_repository;
pub mod user_repository;

pub use crud_repository::CrudRepository;
pub use token_repository::{ApiToken, TokenRepository};
pub use user_repository::UserRepository;

#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
