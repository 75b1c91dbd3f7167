use std::sync::Arc;

use buildcrm_auth::{AuthService, SessionStore};
use buildcrm_infra::JsonFileSessionStore;

#[tokio::main]
async fn main() {
    buildcrm_observability::init();

    let session_file = std::env::var("BUILDCRM_SESSION_FILE")
        .unwrap_or_else(|_| "buildcrm-session.json".to_string());

    let store: Arc<dyn SessionStore> = Arc::new(JsonFileSessionStore::open(&session_file));
    let service = Arc::new(AuthService::new(store));

    let app = buildcrm_api::app::build_app(service);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("failed to bind 0.0.0.0:8080");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
