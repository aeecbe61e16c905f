use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::AppState;
use crate::auth::verify_admin_secret;
use crate::domain::roster::{Board, ResetScope, RosterEvent};

/// Request body for the manager reset
#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    pub secret: String,
    /// Optional team filter; absent resets the whole board
    pub team: Option<String>,
}

/// Response from the manager reset
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    /// False when the secret did not match and nothing was done
    pub applied: bool,
    pub cleared: usize,
}

/// Reset the board for a new day
///
/// POST /api/board/reset
///
/// A wrong secret is refused silently: `applied: false`, no error status,
/// no rows touched. A full (unfiltered) reset also advances the daily
/// checkpoint so the automatic reset does not immediately repeat it.
pub async fn reset_board(
    State(state): State<AppState>,
    Json(req): Json<ResetRequest>,
) -> Result<Json<ResetResponse>, ApiError> {
    if !verify_admin_secret(&req.secret, &state.settings.admin_secret) {
        tracing::debug!("manager reset refused: secret mismatch");
        return Ok(Json(ResetResponse {
            applied: false,
            cleared: 0,
        }));
    }

    let mut board = Board::new(state.repo.load().await?);
    let event = board.reset(req.team.as_deref());
    state.repo.save(board.rows()).await?;

    let (scope, cleared) = match event {
        RosterEvent::BoardReset { scope, cleared } => (scope, cleared),
        _ => (ResetScope::All, 0),
    };

    if scope == ResetScope::All {
        let today = Utc::now().with_timezone(&state.settings.timezone).date_naive();
        state.repo.set_last_reset_date(today).await?;
    }

    tracing::info!("manager reset cleared {} rows", cleared);
    Ok(Json(ResetResponse {
        applied: true,
        cleared,
    }))
}
