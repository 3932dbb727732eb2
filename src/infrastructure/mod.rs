//! Infrastructure layer: concrete storage backends.
//!
//! - [`persistence`] - PostgreSQL repositories (SQLx)
//! - [`memory`] - in-process repositories
//!
//! [`Storage`] bundles one implementation of every repository trait so the
//! rest of the application only sees trait objects.

pub mod memory;
pub mod persistence;

use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Country, Member, Project, Service};
use crate::domain::repositories::{CrudRepository, TokenRepository, UserRepository};
use memory::{MemoryCrudRepository, MemoryTokenRepository, MemoryUserRepository};
use persistence::{PgCrudRepository, PgTokenRepository, PgUserRepository};

/// One repository per aggregate, selected by storage backend.
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenRepository>,
    pub members: Arc<dyn CrudRepository<Member>>,
    pub countries: Arc<dyn CrudRepository<Country>>,
    pub projects: Arc<dyn CrudRepository<Project>>,
    pub services: Arc<dyn CrudRepository<Service>>,
}

impl Storage {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            tokens: Arc::new(PgTokenRepository::new(pool.clone())),
            members: Arc::new(PgCrudRepository::<Member>::new(pool.clone())),
            countries: Arc::new(PgCrudRepository::<Country>::new(pool.clone())),
            projects: Arc::new(PgCrudRepository::<Project>::new(pool.clone())),
            services: Arc::new(PgCrudRepository::<Service>::new(pool)),
        }
    }

    /// Fresh, empty in-memory repositories.
    pub fn memory() -> Self {
        Self {
            users: Arc::new(MemoryUserRepository::new()),
            tokens: Arc::new(MemoryTokenRepository::new()),
            members: Arc::new(MemoryCrudRepository::<Member>::new()),
            countries: Arc::new(MemoryCrudRepository::<Country>::new()),
            projects: Arc::new(MemoryCrudRepository::<Project>::new()),
            services: Arc::new(MemoryCrudRepository::<Service>::new()),
        }
    }
}
