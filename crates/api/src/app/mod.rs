//! HTTP application wiring (Axum router).
//!
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use buildcrm_auth::AuthService;

pub mod dto;
pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(service))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use buildcrm_auth::{InMemorySessionStore, SessionStore};
    use tower::ServiceExt;

    fn app() -> Router {
        let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
        build_app(Arc::new(AuthService::new(store)))
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_is_ok() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn login_returns_the_derived_identity() {
        let response = app()
            .oneshot(post_json(
                "/session/login",
                serde_json::json!({"email": "jane@acme.com", "password": "x"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["display_name"], "jane");
        assert_eq!(json["role"], "admin");
    }

    #[tokio::test]
    async fn login_with_empty_email_is_a_validation_error() {
        let response = app()
            .oneshot(post_json(
                "/session/login",
                serde_json::json!({"email": "", "password": "x"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "validation_error");
    }

    #[tokio::test]
    async fn session_view_reflects_bypass() {
        let app = app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/session/bypass",
                serde_json::json!({"enabled": true}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::get("/session").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["authenticated"], true);
        assert_eq!(json["bypass_enabled"], true);
        assert_eq!(json["identity"]["display_name"], "Dev User");
    }

    #[tokio::test]
    async fn logout_ends_the_session() {
        let app = app();

        app.clone()
            .oneshot(post_json(
                "/session/login",
                serde_json::json!({"email": "jane@acme.com", "password": "x"}),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::post("/session/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(Request::get("/session").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let json = body_json(response).await;
        assert_eq!(json["authenticated"], false);
        assert!(json["identity"].is_null());
    }

    #[tokio::test]
    async fn authz_check_denies_before_login_and_allows_after() {
        let app = app();

        let response = app
            .clone()
            .oneshot(
                Request::get("/authz?module=dashboard&action=view")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_json(response).await["allowed"], false);

        app.clone()
            .oneshot(post_json(
                "/session/login",
                serde_json::json!({"email": "jane@acme.com", "password": "x"}),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::get("/authz?module=dashboard&action=view")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_json(response).await["allowed"], true);

        // Admin lacks financial.approve; module access alone still holds.
        let response = app
            .clone()
            .oneshot(
                Request::get("/authz?module=financial&action=approve")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_json(response).await["allowed"], false);

        let response = app
            .oneshot(
                Request::get("/authz?module=financial")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(body_json(response).await["allowed"], true);
    }

    #[tokio::test]
    async fn role_catalogue_lists_all_six_roles() {
        let response = app()
            .oneshot(Request::get("/authz/roles").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let roles = json["roles"].as_array().unwrap();
        assert_eq!(roles.len(), 6);
        assert_eq!(roles[0]["name"], "owner");
        assert_eq!(roles[3]["display_name"], "Field Worker");
        assert!(roles[0]["grants"]["financial"]
            .as_array()
            .unwrap()
            .iter()
            .any(|a| a == "approve"));
    }
}
