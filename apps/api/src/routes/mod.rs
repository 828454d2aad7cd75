pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::career::handlers as career;
use crate::career::resume::MAX_RESUME_BYTES;
use crate::leaderboard::handlers as leaderboard;
use crate::state::AppState;

/// Multipart framing on top of the file itself.
const UPLOAD_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        // AI features
        .route("/api/ai/mentor", post(career::handle_mentor))
        .route("/api/ai/roadmap", post(career::handle_roadmap))
        .route("/api/ai/resume", post(career::handle_resume_feedback))
        .route(
            "/api/resume-analyze",
            post(career::handle_resume_analyze)
                .layer(DefaultBodyLimit::max(MAX_RESUME_BYTES + UPLOAD_OVERHEAD_BYTES)),
        )
        // Quiz leaderboard
        .route(
            "/api/leaderboard",
            get(leaderboard::handle_get_leaderboard).post(leaderboard::handle_post_score),
        )
        .with_state(state)
}
