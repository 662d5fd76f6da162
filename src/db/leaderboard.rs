use chrono::Utc;

use super::Store;
use crate::error::Result;
use crate::models::{LeaderboardEntry, NewLeaderboardEntry, Page, PageRequest};

impl Store {
    /// Append one leaderboard row and return its id
    pub async fn insert_leaderboard_entry(&self, entry: &NewLeaderboardEntry) -> Result<i64> {
        let id = sqlx::query(
            "INSERT INTO leaderboard (game, position, name, score, date, timestamp, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&entry.game)
        .bind(entry.position)
        .bind(&entry.name)
        .bind(entry.score)
        .bind(&entry.date)
        .bind(&entry.timestamp)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(id)
    }

    /// Highest score first, ties broken by most recent date
    ///
    /// `game` restricts both the page and the total to one game.
    pub async fn list_leaderboard(
        &self,
        game: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<LeaderboardEntry>> {
        let mut tx = self.pool.begin().await?;

        let records = sqlx::query_as::<_, LeaderboardEntry>(
            "SELECT id, game, position, name, score, date, timestamp, created_at FROM leaderboard \
             WHERE (?1 IS NULL OR game = ?1) \
             ORDER BY score DESC, date DESC, id ASC LIMIT ?2 OFFSET ?3",
        )
        .bind(game)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&mut *tx)
        .await?;

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM leaderboard WHERE (?1 IS NULL OR game = ?1)")
                .bind(game)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok(Page { records, total })
    }
}
