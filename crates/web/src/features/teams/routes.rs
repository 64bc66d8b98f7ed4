use axum::{Router, middleware, routing::get};

use super::handlers::{create_team, delete_team, get_team, list_teams, update_team};
use crate::features::players::handlers::{create_player, list_players};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    Router::new()
        .route("/", get(list_teams).post(create_team))
        .route("/:team_id", get(get_team).put(update_team).delete(delete_team))
        .route("/:team_id/players", get(list_players).post(create_player))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
