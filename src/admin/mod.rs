//! Password-protected admin portal.

pub mod auth;
pub mod handlers;

use axum::{middleware, routing::get, Router};

use self::auth::admin_auth_middleware;
use self::handlers::welcome;

pub use self::auth::{AdminState, Credentials, ADMIN_USERNAME};

/// Router for `/admin`, guarded by basic auth.
///
/// The guard is a route layer, so it runs before method dispatch and any
/// unauthenticated request to `/admin` gets 401.
pub fn setup_admin_router(state: AdminState) -> Router {
    Router::new()
        .route("/admin", get(welcome))
        .route_layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}
