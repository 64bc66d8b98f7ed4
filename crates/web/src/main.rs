use anyhow::Context;
use storage::Database;
use utoipa::OpenApi;

mod app;
mod config;
mod error;
mod features;
mod middleware;
mod state;

use config::Config;
use features::{matches, players, reports, teams};
use middleware::auth::ApiKeys;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        teams::handlers::list_teams,
        teams::handlers::get_team,
        teams::handlers::create_team,
        teams::handlers::update_team,
        teams::handlers::delete_team,
        players::handlers::list_players,
        players::handlers::create_player,
        players::handlers::get_player,
        players::handlers::update_player,
        players::handlers::delete_player,
        matches::handlers::list_matches,
        matches::handlers::get_match,
        matches::handlers::create_match,
        matches::handlers::update_match,
        matches::handlers::delete_match,
        matches::handlers::submit_result,
        matches::handlers::update_result,
        reports::handlers::list_match_reports,
        reports::handlers::get_match_report,
    ),
    components(
        schemas(
            storage::dto::team::CreateTeamRequest,
            storage::dto::team::UpdateTeamRequest,
            storage::dto::team::TeamResponse,
            storage::dto::team::TeamSummary,
            storage::dto::player::CreatePlayerRequest,
            storage::dto::player::UpdatePlayerRequest,
            storage::dto::player::PlayerResponse,
            storage::dto::matches::CreateMatchRequest,
            storage::dto::matches::MatchResultRequest,
            storage::dto::matches::GoalInput,
            storage::dto::matches::GoalResponse,
            storage::dto::matches::MatchResponse,
            storage::dto::report::MatchReportResponse,
            storage::dto::report::MatchReportGoal,
            storage::dto::report::MatchReportListItem,
            storage::dto::report::TopScorer,
            storage::dto::common::PaginationMeta,
            storage::dto::common::SortOrder,
            storage::models::Position,
            storage::models::MatchStatus,
            storage::models::MatchOutcome,
        )
    ),
    tags(
        (name = "teams", description = "Team management"),
        (name = "players", description = "Player management"),
        (name = "matches", description = "Match scheduling and results"),
        (name = "reports", description = "Reports of completed matches"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting football admin API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!(app_env = %config.app_env, "Configuration loaded successfully");

    tracing::info!("Connecting to database at: {}", config.database_host());
    let db = Database::new(&config.database_url, config.db_max_connections)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("No API keys configured, every /api request will be rejected");
    } else {
        tracing::info!(count = api_keys.len(), "API keys loaded");
    }

    let docs = (!config.is_production()).then(ApiDoc::openapi);
    let router = app::build_router(AppState::new(db), api_keys, docs);

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;
    tracing::info!("Starting server at http://{}", bind_address);

    if !config.is_production() {
        tracing::info!(
            "Swagger UI available at http://{}/swagger-ui/",
            bind_address
        );
    }

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_documents_every_route() {
        let doc = ApiDoc::openapi();

        for path in [
            "/api/teams",
            "/api/teams/{team_id}",
            "/api/teams/{team_id}/players",
            "/api/players/{player_id}",
            "/api/matches",
            "/api/matches/{match_id}",
            "/api/matches/{match_id}/result",
            "/api/reports/matches",
            "/api/reports/matches/{match_id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_openapi_declares_bearer_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();

        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
