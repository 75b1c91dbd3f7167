//! Permission query endpoints.
//!
//! Denials are ordinary `allowed: false` responses, never errors — the UI
//! interprets them as "hide or disable", not as a failure.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    response::IntoResponse,
    routing::get,
};

use buildcrm_auth::AuthService;

use crate::app::dto::{AuthzQuery, RoleView};

pub fn router() -> Router {
    Router::new()
        .route("/authz", get(check))
        .route("/authz/roles", get(roles))
}

/// GET /authz?module=&action= — permission check for the current actor.
///
/// With `action` absent this answers module visibility (`CanAccess`).
pub async fn check(
    Extension(service): Extension<Arc<AuthService>>,
    Query(query): Query<AuthzQuery>,
) -> impl IntoResponse {
    let allowed = match &query.action {
        Some(action) => service.has_permission(&query.module, action),
        None => service.can_access(&query.module),
    };

    Json(serde_json::json!({
        "module": query.module,
        "action": query.action,
        "allowed": allowed,
        "role": service.current_role(),
        "authenticated": service.is_authenticated(),
    }))
}

/// GET /authz/roles — the fixed role catalogue with grants.
pub async fn roles(Extension(service): Extension<Arc<AuthService>>) -> impl IntoResponse {
    let roles: Vec<RoleView> = service
        .all_roles()
        .iter()
        .map(|role| RoleView::for_role(*role))
        .collect();

    Json(serde_json::json!({ "roles": roles }))
}
