//! PostgreSQL repository implementations.
//!
//! Queries are plain SQLx runtime queries mapped through `FromRow`; resource
//! tables share one generic implementation.
//!
//! # Repositories
//!
//! - [`PgCrudRepository`] - any [`crate::domain::resource::Resource`]
//! - [`PgUserRepository`] - user accounts
//! - [`PgTokenRepository`] - bearer token storage and revocation

pub mod pg_crud_repository;
pub mod pg_token_repository;
pub mod pg_user_repository;

pub use pg_crud_repository::PgCrudRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_user_repository::PgUserRepository;
