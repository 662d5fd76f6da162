use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::models::{NewUser, PageParams, Pagination, User};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    pub status: &'static str,
    pub message: String,
    pub user_id: i64,
    pub data: NewUser,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub success: bool,
    pub data: Vec<User>,
    pub pagination: Pagination,
}

/// Register a user record
///
/// Returns 400 naming the first empty field.
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> Result<Json<CreateUserResponse>> {
    payload.validate().map_err(AppError::InvalidInput)?;

    let user_id = state.store.insert_user(&payload).await?;
    tracing::info!("Created user {}", user_id);

    Ok(Json(CreateUserResponse {
        status: "success",
        message: "User created successfully".to_string(),
        user_id,
        data: payload,
    }))
}

pub async fn get_user(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<User>> {
    state
        .store
        .get_user(id)
        .await?
        .map(Json)
        .ok_or(AppError::UserNotFound)
}

/// List users, newest first
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<UserListResponse>> {
    let request = params.clamp();
    let page = state.store.list_users(request).await?;
    let pagination = Pagination::new(request, page.records.len(), page.total);

    Ok(Json(UserListResponse {
        success: true,
        data: page.records,
        pagination,
    }))
}
