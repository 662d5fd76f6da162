use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One stored leaderboard row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LeaderboardEntry {
    pub id: i64,
    pub game: String,
    pub position: i64,
    pub name: String,
    pub score: i64,
    pub date: String,
    /// Timestamp of the submission batch this row arrived in
    pub timestamp: String,
    pub created_at: DateTime<Utc>,
}

/// Row to insert, already flattened out of its submission
#[derive(Debug, Clone)]
pub struct NewLeaderboardEntry {
    pub game: String,
    pub position: i64,
    pub name: String,
    pub score: i64,
    pub date: String,
    pub timestamp: String,
}

/// Entry as it appears inside a submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmittedEntry {
    pub position: i64,
    pub name: String,
    pub score: i64,
    pub date: String,
}

/// Batch envelope posted by the game client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardSubmission {
    pub game: String,
    pub timestamp: String,
    pub leaderboard: Vec<SubmittedEntry>,
}

impl LeaderboardSubmission {
    /// Validate the whole batch before anything is written
    pub fn validate(&self) -> Result<(), String> {
        if self.game.trim().is_empty() {
            return Err("game cannot be empty".to_string());
        }
        if self.timestamp.trim().is_empty() {
            return Err("timestamp cannot be empty".to_string());
        }
        for (i, entry) in self.leaderboard.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(format!("leaderboard[{}].name cannot be empty", i));
            }
            if entry.date.trim().is_empty() {
                return Err(format!("leaderboard[{}].date cannot be empty", i));
            }
        }
        Ok(())
    }

    /// Flatten into insertable rows, keeping submission order
    pub fn rows(&self) -> impl Iterator<Item = NewLeaderboardEntry> + '_ {
        self.leaderboard.iter().map(|entry| NewLeaderboardEntry {
            game: self.game.clone(),
            position: entry.position,
            name: entry.name.clone(),
            score: entry.score,
            date: entry.date.clone(),
            timestamp: self.timestamp.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> LeaderboardSubmission {
        LeaderboardSubmission {
            game: "Elixir de Zambo".to_string(),
            timestamp: "2025-10-30T20:00:00Z".to_string(),
            leaderboard: vec![
                SubmittedEntry {
                    position: 1,
                    name: "Juan".to_string(),
                    score: 1250,
                    date: "2025-10-30T19:55:00Z".to_string(),
                },
                SubmittedEntry {
                    position: 2,
                    name: "Lucia".to_string(),
                    score: 980,
                    date: "2025-10-30T19:56:00Z".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_validate_accepts_batch() {
        assert!(submission().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_entry_name() {
        let mut batch = submission();
        batch.leaderboard[1].name = " ".to_string();
        assert_eq!(
            batch.validate(),
            Err("leaderboard[1].name cannot be empty".to_string())
        );
    }

    #[test]
    fn test_validate_rejects_blank_game() {
        let mut batch = submission();
        batch.game = String::new();
        assert_eq!(batch.validate(), Err("game cannot be empty".to_string()));
    }

    #[test]
    fn test_rows_carry_envelope_fields() {
        let batch = submission();
        let rows: Vec<_> = batch.rows().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.game == "Elixir de Zambo"));
        assert!(rows.iter().all(|r| r.timestamp == "2025-10-30T20:00:00Z"));
        assert_eq!(rows[1].name, "Lucia");
        assert_eq!(rows[1].score, 980);
    }
}
