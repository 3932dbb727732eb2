//! Core domain entities.
//!
//! - [`Member`], [`Country`], [`Project`], [`Service`] - CRUD resources, each
//!   implementing [`crate::domain::resource::Resource`]
//! - [`User`] - account that logs in and owns API tokens
//!
//! Each resource has a matching `*Fields` struct holding the validated field
//! set written on create and update.

pub mod country;
pub mod member;
pub mod project;
pub mod service;
pub mod user;

pub use country::{Country, CountryFields};
pub use member::{Member, MemberFields};
pub use project::{Project, ProjectFields};
pub use service::{Service, ServiceFields};
pub use user::{NewUser, User};
