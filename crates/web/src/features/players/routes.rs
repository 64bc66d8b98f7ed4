use axum::{Router, middleware, routing::get};

use super::handlers::{delete_player, get_player, update_player};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

/// Player routes addressed by id; listing and signing live under `/teams`.
pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route(
            "/:player_id",
            get(get_player).put(update_player).delete(delete_player),
        )
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
