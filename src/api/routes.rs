//! API route configuration.
//!
//! Everything here except [`public_routes`] requires Bearer token
//! authentication via [`crate::api::middleware::auth`].

use crate::api::handlers::{
    create_handler, destroy_handler, list_handler, login_handler, logout_handler, show_handler,
    update_handler, user_handler,
};
use crate::application::services::CrudService;
use crate::domain::entities::{Country, Member, Project, Service};
use crate::domain::resource::Resource;
use crate::state::AppState;
use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use std::sync::Arc;

/// Routes reachable without a token.
///
/// - `POST /auth/login` - Exchange credentials for a bearer token
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login_handler))
}

/// Routes protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `POST /auth/logout`           - Revoke the presented token
/// - `GET  /user`                  - Authenticated user
/// - `/crud/membres[/{id}]`        - Members
/// - `/crud/pays[/{id}]`           - Countries
/// - `/crud/projects[/{id}]`       - Projects
/// - `/crud/services[/{id}]`       - Services
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/logout", post(logout_handler))
        .route("/user", get(user_handler))
        .merge(crud_routes::<Member>("/crud/membres"))
        .merge(crud_routes::<Country>("/crud/pays"))
        .merge(crud_routes::<Project>("/crud/projects"))
        .merge(crud_routes::<Service>("/crud/services"))
}

/// The five CRUD endpoints of one resource under `prefix`.
///
/// - `GET    {prefix}`       - List
/// - `POST   {prefix}`       - Create
/// - `GET    {prefix}/{id}`  - Read
/// - `PUT    {prefix}/{id}`  - Overwrite
/// - `DELETE {prefix}/{id}`  - Delete
fn crud_routes<R>(prefix: &str) -> Router<AppState>
where
    R: Resource,
    Arc<CrudService<R>>: FromRef<AppState>,
{
    Router::new()
        .route(prefix, get(list_handler::<R>).post(create_handler::<R>))
        .route(
            &format!("{prefix}/{{id}}"),
            get(show_handler::<R>)
                .put(update_handler::<R>)
                .delete(destroy_handler::<R>),
        )
}
