//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod crud;
pub mod health;

pub use auth::{login_handler, logout_handler, user_handler};
pub use crud::{create_handler, destroy_handler, list_handler, show_handler, update_handler};
pub use health::health_handler;
