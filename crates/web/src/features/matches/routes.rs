use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{
    create_match, delete_match, get_match, list_matches, submit_result, update_match,
    update_result,
};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route("/", get(list_matches).post(create_match))
        .route(
            "/:match_id",
            get(get_match).put(update_match).delete(delete_match),
        )
        .route("/:match_id/result", post(submit_result).put(update_result))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
