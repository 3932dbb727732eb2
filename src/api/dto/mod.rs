//! Data Transfer Objects for API requests and responses.
//!
//! Success responses share the [`envelope::Envelope`] wrapper; errors are
//! rendered by [`crate::error::AppError`] in the same shape.

pub mod auth;
pub mod envelope;
pub mod health;
