//! Application layer services.
//!
//! Services consume repository traits and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::crud_service::CrudService`] - validate/persist orchestration, generic over resources
//! - [`services::auth_service::AuthService`] - login, bearer token authentication, logout

pub mod services;
