use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{ERR_IMAGE_EMPTY, ERR_IMAGE_TOO_SMALL, MIN_IMAGE_BYTES};

/// Stored image, returned as-is by the image endpoints
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Image {
    pub id: i64,
    /// Base64 payload exactly as the client sent it
    pub image_data: String,
    pub created_at: DateTime<Utc>,
}

impl Image {
    /// Decode and size-check a base64 image payload
    ///
    /// Returns the decoded bytes on success, or the message to report to the caller.
    pub fn decode_payload(data: &str) -> Result<Vec<u8>, String> {
        if data.trim().is_empty() {
            return Err(ERR_IMAGE_EMPTY.to_string());
        }

        let decoded = STANDARD
            .decode(data)
            .map_err(|e| format!("Invalid base64 format: {}", e))?;

        if decoded.len() < MIN_IMAGE_BYTES {
            return Err(ERR_IMAGE_TOO_SMALL.to_string());
        }

        Ok(decoded)
    }
}
