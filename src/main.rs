use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use teamboard_api::api::handlers::{admin, board};
use teamboard_api::api::AppState;
use teamboard_api::config::Settings;
use teamboard_api::domain::repositories::{RosterRepository, StoreError};
use teamboard_api::domain::roster::RosterRow;
use teamboard_api::infrastructure::repositories::PostgresRosterRepository;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            tracing::error!("Invalid configuration: {}", err);
            std::process::exit(1);
        }
    };

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&settings.database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Database connected successfully");

    let repo = PostgresRosterRepository::new(pool, settings.sheet.clone());
    repo.ensure_schema()
        .await
        .expect("Failed to prepare sheet schema");

    // Startup read with bounded retry; the store may be briefly unavailable
    let rows = match load_with_retry(
        &repo,
        settings.load_retry_attempts,
        settings.load_retry_delay,
    )
    .await
    {
        Ok(rows) => rows,
        Err(err) => {
            tracing::error!("Roster store unavailable: {}", err);
            std::process::exit(1);
        }
    };

    seed_if_empty(&repo, &settings, &rows).await;

    let state = AppState {
        repo: Arc::new(repo),
        settings: Arc::new(settings.clone()),
    };

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health check
        .route("/health", get(board::health_check))
        // Board routes
        .route("/api/board", get(board::get_board))
        .route("/api/board/status", post(board::update_status))
        .route("/api/board/reset", post(admin::reset_board))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        // Shared state
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}

/// Reads the sheet, retrying a bounded number of times with a fixed delay
async fn load_with_retry(
    repo: &dyn RosterRepository,
    attempts: u32,
    delay: Duration,
) -> Result<Vec<RosterRow>, StoreError> {
    let mut attempt = 1;
    loop {
        match repo.load().await {
            Ok(rows) => return Ok(rows),
            Err(err) if attempt < attempts => {
                tracing::warn!(
                    "Startup read failed (attempt {}/{}): {}",
                    attempt,
                    attempts,
                    err
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Provisions the configured member list into a sheet with no valid members
///
/// A non-empty sheet is never re-seeded.
async fn seed_if_empty(repo: &PostgresRosterRepository, settings: &Settings, rows: &[RosterRow]) {
    if rows.iter().any(RosterRow::is_valid_member) || settings.seed_members.is_empty() {
        return;
    }

    tracing::info!(
        "Seeding {} members into empty sheet '{}'",
        settings.seed_members.len(),
        settings.sheet
    );
    let seeded: Vec<RosterRow> = settings.seed_members.iter().map(RosterRow::new).collect();
    repo.save(&seeded).await.expect("Failed to seed sheet");
}
