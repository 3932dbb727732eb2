//! Business logic services for the application layer.

pub mod auth_service;
pub mod crud_service;

pub use auth_service::{AuthContext, AuthService, IssuedToken};
pub use crud_service::CrudService;
