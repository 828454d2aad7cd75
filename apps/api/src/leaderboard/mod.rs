// Quiz leaderboard: append-only scores, read back as a top-N list.

pub mod handlers;

use serde::Deserialize;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::leaderboard::LeaderboardRow;

pub const TOP_N: i64 = 10;
pub const MAX_NAME_CHARS: usize = 100;

#[derive(Debug, Deserialize)]
pub struct NewScore {
    pub name: String,
    pub score: i32,
}

impl NewScore {
    /// Trims the name and rejects entries the leaderboard cannot show.
    pub fn validated(self) -> Result<Self, AppError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(AppError::Validation(format!(
                "name must be at most {MAX_NAME_CHARS} characters"
            )));
        }
        if self.score < 0 {
            return Err(AppError::Validation("score cannot be negative".to_string()));
        }
        Ok(Self {
            name,
            score: self.score,
        })
    }
}

/// Highest scores first; ties go to the most recent attempt.
pub async fn top_scores(pool: &PgPool) -> Result<Vec<LeaderboardRow>, AppError> {
    let rows = sqlx::query_as::<_, LeaderboardRow>(
        "SELECT id, name, score, date FROM leaderboard ORDER BY score DESC, date DESC LIMIT $1",
    )
    .bind(TOP_N)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn record_score(pool: &PgPool, entry: &NewScore) -> Result<(), AppError> {
    sqlx::query("INSERT INTO leaderboard (name, score) VALUES ($1, $2)")
        .bind(&entry.name)
        .bind(entry.score)
        .execute(pool)
        .await?;
    tracing::info!("Leaderboard score recorded: name={}, score={}", entry.name, entry.score);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(name: &str, score: i32) -> NewScore {
        NewScore {
            name: name.to_string(),
            score,
        }
    }

    #[test]
    fn test_validated_trims_name() {
        let entry = score("  Asha ", 8).validated().unwrap();
        assert_eq!(entry.name, "Asha");
        assert_eq!(entry.score, 8);
    }

    #[test]
    fn test_validated_rejects_blank_or_long_names() {
        assert!(score("   ", 3).validated().is_err());
        assert!(score(&"x".repeat(MAX_NAME_CHARS + 1), 3).validated().is_err());
        assert!(score(&"x".repeat(MAX_NAME_CHARS), 3).validated().is_ok());
    }

    #[test]
    fn test_validated_rejects_negative_scores() {
        assert!(score("Ravi", -1).validated().is_err());
        assert!(score("Ravi", 0).validated().is_ok());
    }
}
