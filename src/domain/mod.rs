//! Domain layer: entities, validation rules and repository contracts.
//!
//! - [`entities`] - resource records and user accounts
//! - [`resource`] - the [`resource::Resource`] trait every CRUD entity implements
//! - [`validation`] - raw field reading and error-map construction
//! - [`repositories`] - storage trait definitions
//!
//! The domain layer has no dependency on the HTTP or infrastructure layers.

pub mod entities;
pub mod repositories;
pub mod resource;
pub mod validation;
