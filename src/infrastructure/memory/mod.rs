//! In-process repository implementations.
//!
//! Used by the `memory` storage backend for local development without
//! PostgreSQL, and by the HTTP integration tests. State is lost on restart.

mod memory_crud_repository;
mod memory_token_repository;
mod memory_user_repository;

pub use memory_crud_repository::MemoryCrudRepository;
pub use memory_token_repository::MemoryTokenRepository;
pub use memory_user_repository::MemoryUserRepository;
