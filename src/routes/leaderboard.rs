use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::RecordKind;
use crate::error::{AppError, Result};
use crate::models::{
    DatabaseStats, LeaderboardEntry, LeaderboardSubmission, PageParams, Pagination,
};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SavedEntry {
    pub id: i64,
    pub position: i64,
    pub name: String,
    pub score: i64,
}

#[derive(Debug, Serialize)]
pub struct SubmitLeaderboardResponse {
    pub success: bool,
    pub message: String,
    pub game: String,
    pub timestamp: String,
    pub entries_saved: usize,
    pub saved_entries: Vec<SavedEntry>,
}

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub game: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl LeaderboardQuery {
    /// Game filter, with an empty value meaning no filter
    fn game(&self) -> Option<&str> {
        self.game.as_deref().map(str::trim).filter(|g| !g.is_empty())
    }

    fn page(&self) -> PageParams {
        PageParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LeaderboardFilter {
    pub game: String,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardListResponse {
    pub success: bool,
    pub data: Vec<LeaderboardEntry>,
    pub pagination: Pagination,
    pub filter: LeaderboardFilter,
}

#[derive(Debug, Serialize)]
pub struct ClearLeaderboardResponse {
    pub success: bool,
    pub message: String,
    pub entries_deleted: u64,
    pub stats_before: DatabaseStats,
    pub stats_after: DatabaseStats,
}

/// Save a batch of leaderboard entries for one game
///
/// The whole batch is validated up front. Inserts then run one by one, so a storage
/// failure partway through leaves the earlier entries in place.
pub async fn submit_leaderboard(
    State(state): State<AppState>,
    Json(submission): Json<LeaderboardSubmission>,
) -> Result<Json<SubmitLeaderboardResponse>> {
    submission.validate().map_err(AppError::InvalidInput)?;

    let mut saved_entries = Vec::with_capacity(submission.leaderboard.len());
    for row in submission.rows() {
        let id = state.store.insert_leaderboard_entry(&row).await?;
        saved_entries.push(SavedEntry {
            id,
            position: row.position,
            name: row.name,
            score: row.score,
        });
    }

    tracing::info!(
        "Saved {} leaderboard entries for game {}",
        saved_entries.len(),
        submission.game
    );

    Ok(Json(SubmitLeaderboardResponse {
        success: true,
        message: format!(
            "Leaderboard data saved successfully for game: {}",
            submission.game
        ),
        entries_saved: saved_entries.len(),
        game: submission.game,
        timestamp: submission.timestamp,
        saved_entries,
    }))
}

/// List leaderboard entries, highest score first
///
/// GET /cocteles/leaderboard?game=<name>&limit=<1..100>&offset=<n>
pub async fn list_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardListResponse>> {
    let request = query.page().clamp();
    let game = query.game();
    let page = state.store.list_leaderboard(game, request).await?;
    let pagination = Pagination::new(request, page.records.len(), page.total);

    Ok(Json(LeaderboardListResponse {
        success: true,
        data: page.records,
        pagination,
        filter: LeaderboardFilter {
            game: game.unwrap_or("all").to_string(),
        },
    }))
}

/// Delete every leaderboard entry and restart the id counter
pub async fn clear_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<ClearLeaderboardResponse>> {
    let stats_before = state.store.stats().await?;
    let entries_deleted = state.store.clear(RecordKind::Leaderboard).await?;
    let stats_after = state.store.stats().await?;

    Ok(Json(ClearLeaderboardResponse {
        success: true,
        message: format!(
            "All {} leaderboard entries deleted successfully",
            entries_deleted
        ),
        entries_deleted,
        stats_before,
        stats_after,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_game_means_all() {
        let query = LeaderboardQuery {
            game: Some("  ".to_string()),
            limit: None,
            offset: None,
        };
        assert_eq!(query.game(), None);

        let query = LeaderboardQuery {
            game: Some("Elixir de Zambo".to_string()),
            limit: Some(500),
            offset: Some(-1),
        };
        assert_eq!(query.game(), Some("Elixir de Zambo"));
        let page = query.page().clamp();
        assert_eq!((page.limit, page.offset), (100, 0));
    }
}
