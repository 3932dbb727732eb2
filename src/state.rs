//! Shared application state injected into every handler.

use axum::extract::FromRef;
use std::sync::Arc;

use crate::application::services::{AuthService, CrudService};
use crate::domain::entities::{Country, Member, Project, Service};
use crate::infrastructure::Storage;

/// Services behind the HTTP surface.
///
/// Cheap to clone: every field is an `Arc`. Generic CRUD handlers pull their
/// own resource service out of it through [`FromRef`].
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub members: Arc<CrudService<Member>>,
    pub countries: Arc<CrudService<Country>>,
    pub projects: Arc<CrudService<Project>>,
    pub services: Arc<CrudService<Service>>,
}

impl AppState {
    /// Wires services over the given repositories.
    ///
    /// `signing_secret` keys the HMAC used for token hashes; it must be the
    /// same across restarts or every issued token becomes invalid.
    pub fn from_storage(storage: Storage, signing_secret: String) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(
                storage.users,
                storage.tokens,
                signing_secret,
            )),
            members: Arc::new(CrudService::new(storage.members)),
            countries: Arc::new(CrudService::new(storage.countries)),
            projects: Arc::new(CrudService::new(storage.projects)),
            services: Arc::new(CrudService::new(storage.services)),
        }
    }
}

impl FromRef<AppState> for Arc<CrudService<Member>> {
    fn from_ref(state: &AppState) -> Self {
        state.members.clone()
    }
}

impl FromRef<AppState> for Arc<CrudService<Country>> {
    fn from_ref(state: &AppState) -> Self {
        state.countries.clone()
    }
}

impl FromRef<AppState> for Arc<CrudService<Project>> {
    fn from_ref(state: &AppState) -> Self {
        state.projects.clone()
    }
}

impl FromRef<AppState> for Arc<CrudService<Service>> {
    fn from_ref(state: &AppState) -> Self {
        state.services.clone()
    }
}
