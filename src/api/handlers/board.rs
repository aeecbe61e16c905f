use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::api::AppState;
use crate::domain::roster::reset::daily_reset_due;
use crate::domain::roster::{Board, RosterEvent, RosterRow, Status, StatusUpdate};

/// Query parameters for the board view
#[derive(Debug, Deserialize)]
pub struct BoardQuery {
    /// Optional team filter; absent means the whole board
    pub team: Option<String>,
}

/// One row as the dashboard renders it
#[derive(Debug, Serialize)]
pub struct RowResponse {
    pub name: String,
    pub team: String,
    pub status: Status,
    /// Fixed status background color; null for unstyled rows
    pub color: Option<&'static str>,
    pub comment: String,
    pub last_updated: String,
    pub is_long_term: bool,
}

impl From<&RosterRow> for RowResponse {
    fn from(row: &RosterRow) -> Self {
        Self {
            name: row.name.clone(),
            team: row.team.clone(),
            status: row.status,
            color: row.status.color(),
            comment: row.comment.clone(),
            last_updated: row.last_updated.clone(),
            is_long_term: row.is_long_term,
        }
    }
}

/// The full board view
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    /// Today's date in the board time zone (the dashboard title)
    pub date: String,
    pub rows: Vec<RowResponse>,
    /// Distinct team labels in store order; empty when no teams exist
    pub teams: Vec<String>,
    /// True when this read applied the automatic daily reset; clients drop
    /// any cached board state
    pub reset_occurred: bool,
}

/// Request body for a member's status submission
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub name: String,
    pub status: Status,
    pub comment: Option<String>,
    pub team: Option<String>,
    #[serde(default)]
    pub is_long_term: bool,
}

/// Read the board
///
/// GET /api/board?team=<label>
///
/// Every read starts by evaluating the automatic daily reset before the
/// view is built.
pub async fn get_board(
    State(state): State<AppState>,
    Query(query): Query<BoardQuery>,
) -> Result<Json<BoardResponse>, ApiError> {
    let mut board = Board::new(state.repo.load().await?);
    let now = Utc::now().with_timezone(&state.settings.timezone);

    let mut reset_occurred = false;
    let last_reset = state.repo.last_reset_date().await?;
    if daily_reset_due(last_reset, now, state.settings.reset_cutoff, board.is_empty()) {
        let event = board.reset(None);
        state.repo.save(board.rows()).await?;
        state.repo.set_last_reset_date(now.date_naive()).await?;
        if let RosterEvent::BoardReset { cleared, .. } = event {
            tracing::info!("automatic daily reset cleared {} rows", cleared);
        }
        reset_occurred = true;
    }

    let rows = match query.team.as_deref() {
        Some(team) => board
            .rows_for_team(team)
            .into_iter()
            .map(RowResponse::from)
            .collect(),
        None => board.rows().iter().map(RowResponse::from).collect(),
    };

    Ok(Json(BoardResponse {
        date: now.format("%Y-%m-%d").to_string(),
        rows,
        teams: board.teams(),
        reset_occurred,
    }))
}

/// Submit a member's status for today
///
/// POST /api/board/status
pub async fn update_status(
    State(state): State<AppState>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<RowResponse>, ApiError> {
    let mut board = Board::new(state.repo.load().await?);
    let now = Utc::now().with_timezone(&state.settings.timezone);

    let event = board.update_status(
        StatusUpdate {
            name: req.name.clone(),
            status: req.status,
            comment: req.comment,
            team: req.team,
            is_long_term: req.is_long_term,
        },
        now,
    )?;

    state.repo.save(board.rows()).await?;

    if let RosterEvent::StatusUpdated { name, status } = &event {
        tracing::info!("{} set status to {}", name, status);
    }

    let row = board
        .find(&req.name)
        .ok_or_else(|| ApiError::internal_server_error("updated row missing from board"))?;
    Ok(Json(RowResponse::from(row)))
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
