use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::models::{Image, ImageEnvelope, ImageFormat, PageParams, Pagination};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct UploadImageResponse {
    pub id: i64,
    pub message: String,
    pub size_bytes: usize,
}

#[derive(Debug, Serialize)]
pub struct RichContentUploadResponse {
    pub id: i64,
    pub message: String,
    pub mime_type: Option<String>,
    pub size_bytes: usize,
    pub original_format: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SaveImageResponse {
    pub success: bool,
    pub id: i64,
    pub message: String,
    pub mime_type: String,
    pub size_bytes: usize,
    pub style: String,
    pub timestamp: Value,
    pub user_id: String,
}

/// Upload response, shaped for the caller of each format
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UploadReceipt {
    Flat(UploadImageResponse),
    RichContent(RichContentUploadResponse),
    Frontend(SaveImageResponse),
}

impl UploadReceipt {
    fn new(envelope: ImageEnvelope, id: i64, size_bytes: usize) -> Self {
        let format = envelope.format();
        match envelope {
            ImageEnvelope::Flat { .. } => UploadReceipt::Flat(UploadImageResponse {
                id,
                message: "Image uploaded successfully".to_string(),
                size_bytes,
            }),
            ImageEnvelope::RichContent { mime_type, .. } => {
                UploadReceipt::RichContent(RichContentUploadResponse {
                    id,
                    message: "Image uploaded successfully".to_string(),
                    mime_type,
                    size_bytes,
                    original_format: format.label(),
                })
            }
            ImageEnvelope::Frontend {
                mime_type,
                style,
                timestamp,
                user_id,
                ..
            } => UploadReceipt::Frontend(SaveImageResponse {
                success: true,
                id,
                message: "Image saved successfully".to_string(),
                mime_type,
                size_bytes,
                style,
                timestamp,
                user_id,
            }),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImageListResponse {
    pub success: bool,
    pub data: Vec<Image>,
    pub pagination: Pagination,
}

/// Parse a body of the expected format, validate its payload, then persist it
///
/// Nothing is written when parsing or validation fails.
async fn ingest(state: &AppState, body: Value, format: ImageFormat) -> Result<Json<UploadReceipt>> {
    let envelope = ImageEnvelope::parse_as(body, format).map_err(AppError::InvalidInput)?;
    let decoded = Image::decode_payload(envelope.data()).map_err(AppError::InvalidInput)?;
    let id = state.store.insert_image(envelope.data()).await?;

    tracing::info!(
        "Stored image {} ({} bytes, {} format)",
        id,
        decoded.len(),
        format.label()
    );

    Ok(Json(UploadReceipt::new(envelope, id, decoded.len())))
}

/// Upload an image in the flat format
///
/// POST /images/ with `{"image_data": "<base64>"}`
pub async fn upload_image(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<UploadReceipt>> {
    ingest(&state, body, ImageFormat::Flat).await
}

/// Upload an image wrapped in a rich-content request
///
/// The first part carrying `inlineData` is taken as the image; text parts are ignored.
pub async fn upload_rich_content_image(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<UploadReceipt>> {
    ingest(&state, body, ImageFormat::RichContent).await
}

/// Save an image sent by the web frontend, echoing its metadata back
pub async fn save_frontend_image(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<UploadReceipt>> {
    ingest(&state, body, ImageFormat::Frontend).await
}

/// Fetch a single image by id
pub async fn get_image(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Image>> {
    state
        .store
        .get_image(id)
        .await?
        .map(Json)
        .ok_or(AppError::ImageNotFound)
}

/// List images, newest first
///
/// GET /images/?limit=<1..100>&offset=<n>
pub async fn list_images(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<ImageListResponse>> {
    let request = params.clamp();
    let page = state.store.list_images(request).await?;
    let pagination = Pagination::new(request, page.records.len(), page.total);

    Ok(Json(ImageListResponse {
        success: true,
        data: page.records,
        pagination,
    }))
}
