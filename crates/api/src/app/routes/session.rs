//! Session lifecycle endpoints.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use buildcrm_auth::AuthService;

use crate::app::dto::{BypassRequest, LoginRequest, SessionView};
use crate::app::errors;

pub fn router() -> Router {
    Router::new()
        .route("/session", get(current_session))
        .route("/session/login", post(login))
        .route("/session/logout", post(logout))
        .route("/session/bypass", post(set_bypass))
}

/// GET /session — current authentication state.
pub async fn current_session(
    Extension(service): Extension<Arc<AuthService>>,
) -> impl IntoResponse {
    Json(session_view(&service))
}

/// POST /session/login — authenticate and return the derived identity.
pub async fn login(
    Extension(service): Extension<Arc<AuthService>>,
    Json(req): Json<LoginRequest>,
) -> axum::response::Response {
    match service.login_with_role(&req.email, &req.password, req.role) {
        Ok(identity) => (StatusCode::OK, Json(identity)).into_response(),
        Err(err) => errors::session_error_to_response(err),
    }
}

/// POST /session/logout — clear the current identity.
pub async fn logout(Extension(service): Extension<Arc<AuthService>>) -> StatusCode {
    service.logout();
    StatusCode::NO_CONTENT
}

/// POST /session/bypass — enable/disable developer bypass mode.
pub async fn set_bypass(
    Extension(service): Extension<Arc<AuthService>>,
    Json(req): Json<BypassRequest>,
) -> impl IntoResponse {
    service.set_bypass(req.enabled);
    Json(session_view(&service))
}

fn session_view(service: &AuthService) -> SessionView {
    SessionView {
        authenticated: service.is_authenticated(),
        bypass_enabled: service.bypass_enabled(),
        identity: service.current_identity(),
    }
}
