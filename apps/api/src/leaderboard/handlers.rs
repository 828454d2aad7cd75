use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::leaderboard::{record_score, top_scores, NewScore};
use crate::models::leaderboard::LeaderboardRow;
use crate::state::AppState;

/// GET /api/leaderboard
pub async fn handle_get_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardRow>>, AppError> {
    Ok(Json(top_scores(&state.db).await?))
}

/// POST /api/leaderboard
pub async fn handle_post_score(
    State(state): State<AppState>,
    Json(request): Json<NewScore>,
) -> Result<Json<Value>, AppError> {
    let entry = request.validated()?;
    record_score(&state.db, &entry).await?;
    Ok(Json(json!({ "success": true })))
}
