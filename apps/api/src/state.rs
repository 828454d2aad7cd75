use sqlx::PgPool;

use crate::ai_gateway::AiGateway;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Configured once at startup; every AI route goes through it.
    pub ai: AiGateway,
}
