use axum::Router;

pub mod authz;
pub mod session;
pub mod system;

pub fn router() -> Router {
    Router::new().merge(session::router()).merge(authz::router())
}
