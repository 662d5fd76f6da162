use axum::{extract::State, Json};
use serde::Serialize;

use crate::db::RecordKind;
use crate::error::Result;
use crate::models::DatabaseStats;
use crate::AppState;

const DATA_LOSS_WARNING: &str = "All data has been permanently deleted";

/// Database statistics response
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub success: bool,
    pub message: String,
    pub data: DatabaseStats,
}

/// Response for operations that wipe every table
#[derive(Debug, Serialize)]
pub struct WipeResponse {
    pub success: bool,
    pub message: String,
    pub warning: String,
    pub stats_before: DatabaseStats,
    pub stats_after: DatabaseStats,
}

#[derive(Debug, Serialize)]
pub struct ClearImagesResponse {
    pub success: bool,
    pub message: String,
    pub images_deleted: u64,
    pub stats_before: DatabaseStats,
    pub stats_after: DatabaseStats,
}

#[derive(Debug, Serialize)]
pub struct ClearUsersResponse {
    pub success: bool,
    pub message: String,
    pub users_deleted: u64,
    pub stats_before: DatabaseStats,
    pub stats_after: DatabaseStats,
}

/// Database statistics endpoint
///
/// GET /database/stats
pub async fn database_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let data = state.store.stats().await?;

    tracing::info!(
        "Stats requested: {} images, {} users, {} leaderboard entries, {} database",
        data.images_count,
        data.users_count,
        data.leaderboard_count,
        data.database_size_human
    );

    Ok(Json(StatsResponse {
        success: true,
        message: "Database statistics retrieved successfully".to_string(),
        data,
    }))
}

/// Drop and recreate every table
///
/// POST /database/reset
pub async fn reset_database(State(state): State<AppState>) -> Result<Json<WipeResponse>> {
    let stats_before = state.store.stats().await?;
    state.store.reset_all().await?;
    let stats_after = state.store.stats().await?;

    Ok(Json(WipeResponse {
        success: true,
        message: "Database reset successfully".to_string(),
        warning: DATA_LOSS_WARNING.to_string(),
        stats_before,
        stats_after,
    }))
}

/// Delete every row while keeping the schema
///
/// POST /database/clear
pub async fn clear_database(State(state): State<AppState>) -> Result<Json<WipeResponse>> {
    let stats_before = state.store.stats().await?;
    state.store.clear_all().await?;
    let stats_after = state.store.stats().await?;

    Ok(Json(WipeResponse {
        success: true,
        message: "Database cleared successfully".to_string(),
        warning: DATA_LOSS_WARNING.to_string(),
        stats_before,
        stats_after,
    }))
}

/// DELETE /database/images
pub async fn clear_images(State(state): State<AppState>) -> Result<Json<ClearImagesResponse>> {
    let stats_before = state.store.stats().await?;
    let images_deleted = state.store.clear(RecordKind::Images).await?;
    let stats_after = state.store.stats().await?;

    Ok(Json(ClearImagesResponse {
        success: true,
        message: format!("All {} images deleted successfully", images_deleted),
        images_deleted,
        stats_before,
        stats_after,
    }))
}

/// DELETE /database/users
pub async fn clear_users(State(state): State<AppState>) -> Result<Json<ClearUsersResponse>> {
    let stats_before = state.store.stats().await?;
    let users_deleted = state.store.clear(RecordKind::Users).await?;
    let stats_after = state.store.stats().await?;

    Ok(Json(ClearUsersResponse {
        success: true,
        message: format!("All {} users deleted successfully", users_deleted),
        users_deleted,
        stats_before,
        stats_after,
    }))
}
