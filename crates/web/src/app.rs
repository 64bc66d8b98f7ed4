use std::time::Duration;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};
use utoipa_swagger_ui::SwaggerUi;

use crate::features::{matches, players, reports, teams};
use crate::middleware::auth::ApiKeys;
use crate::state::AppState;

/// Builds the full application. Swagger UI is mounted only when `docs` is
/// given.
pub fn build_router(
    state: AppState,
    api_keys: ApiKeys,
    docs: Option<utoipa::openapi::OpenApi>,
) -> Router {
    let api = Router::new()
        .nest("/teams", teams::routes::routes(api_keys.clone()))
        .nest("/players", players::routes::routes(api_keys.clone()))
        .nest("/matches", matches::routes::routes(api_keys.clone()))
        .nest("/reports", reports::routes::routes(api_keys));

    let mut router = Router::new()
        .route("/health", get(health))
        .nest("/api", api);

    if let Some(openapi) = docs {
        router = router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi));
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    router.layer(cors).with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
