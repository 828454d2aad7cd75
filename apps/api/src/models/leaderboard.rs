use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LeaderboardRow {
    pub id: i32,
    pub name: String,
    pub score: i32,
    pub date: DateTime<Utc>,
}
