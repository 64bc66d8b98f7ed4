use axum::{Router, middleware, routing::get};

use super::handlers::{get_match_report, list_match_reports};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route("/matches", get(list_match_reports))
        .route("/matches/:match_id", get(get_match_report))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
