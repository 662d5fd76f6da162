use serde_json::{Map, Value};

use crate::constants::{
    DEFAULT_MIME_TYPE, ERR_FRONTEND_IMAGE_REQUIRED, ERR_NO_CONTENTS, ERR_NO_INLINE_IMAGE,
};

/// Body shapes an image upload can arrive in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// `{"image_data": "<base64>"}`
    Flat,
    /// `{"contents": [{"parts": [{"inlineData": {"mimeType", "data"}}]}]}`
    RichContent,
    /// `{"image_data_base64", "mime_type", "style", "timestamp", "user_id"}`
    Frontend,
}

impl ImageFormat {
    /// Key whose presence marks a body as this format
    pub fn required_key(self) -> &'static str {
        match self {
            ImageFormat::Flat => "image_data",
            ImageFormat::RichContent => "contents",
            ImageFormat::Frontend => "image_data_base64",
        }
    }

    /// Label echoed back to rich-content callers
    pub fn label(self) -> &'static str {
        match self {
            ImageFormat::Flat => "flat",
            ImageFormat::RichContent => "gemini_api",
            ImageFormat::Frontend => "frontend",
        }
    }

    fn missing_field_message(self) -> &'static str {
        match self {
            ImageFormat::Flat => "image_data is required",
            ImageFormat::RichContent => ERR_NO_CONTENTS,
            ImageFormat::Frontend => ERR_FRONTEND_IMAGE_REQUIRED,
        }
    }
}

/// An image upload, normalized out of whichever body shape carried it
#[derive(Debug, Clone, PartialEq)]
pub enum ImageEnvelope {
    Flat {
        data: String,
    },
    RichContent {
        data: String,
        mime_type: Option<String>,
    },
    Frontend {
        data: String,
        mime_type: String,
        style: String,
        timestamp: Value,
        user_id: String,
    },
}

impl ImageEnvelope {
    /// Parse a body that must be of the given shape
    ///
    /// Only the expected format's key decides; unrelated extra keys are ignored. A body
    /// without that key is rejected with the message naming it.
    pub fn parse_as(body: Value, expected: ImageFormat) -> Result<Self, String> {
        match body {
            Value::Object(object) if object.contains_key(expected.required_key()) => {
                Self::from_object(object, expected)
            }
            _ => Err(expected.missing_field_message().to_string()),
        }
    }

    pub fn format(&self) -> ImageFormat {
        match self {
            ImageEnvelope::Flat { .. } => ImageFormat::Flat,
            ImageEnvelope::RichContent { .. } => ImageFormat::RichContent,
            ImageEnvelope::Frontend { .. } => ImageFormat::Frontend,
        }
    }

    /// The base64 payload
    pub fn data(&self) -> &str {
        match self {
            ImageEnvelope::Flat { data }
            | ImageEnvelope::RichContent { data, .. }
            | ImageEnvelope::Frontend { data, .. } => data,
        }
    }

    fn from_object(object: Map<String, Value>, format: ImageFormat) -> Result<Self, String> {
        match format {
            ImageFormat::Flat => Ok(ImageEnvelope::Flat {
                data: string_field(&object, "image_data")?.unwrap_or_default(),
            }),
            ImageFormat::RichContent => parse_rich_content(&object),
            ImageFormat::Frontend => {
                let data = string_field(&object, "image_data_base64")?
                    .filter(|d| !d.is_empty())
                    .ok_or_else(|| ERR_FRONTEND_IMAGE_REQUIRED.to_string())?;

                Ok(ImageEnvelope::Frontend {
                    data,
                    mime_type: string_field(&object, "mime_type")?
                        .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
                    style: string_field(&object, "style")?.unwrap_or_default(),
                    timestamp: object.get("timestamp").cloned().unwrap_or(Value::Null),
                    user_id: string_field(&object, "user_id")?.unwrap_or_default(),
                })
            }
        }
    }
}

/// Read an optional string field; `null` counts as absent
fn string_field(object: &Map<String, Value>, key: &str) -> Result<Option<String>, String> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(format!("{} must be a string", key)),
    }
}

/// Find the first inline-data part across all contents
fn parse_rich_content(object: &Map<String, Value>) -> Result<ImageEnvelope, String> {
    let contents = object
        .get("contents")
        .and_then(Value::as_array)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| ERR_NO_CONTENTS.to_string())?;

    contents
        .iter()
        .filter_map(|content| content.get("parts").and_then(Value::as_array))
        .flatten()
        .filter_map(|part| part.get("inlineData"))
        .find_map(|inline| {
            let data = inline.get("data").and_then(Value::as_str)?;
            Some(ImageEnvelope::RichContent {
                data: data.to_string(),
                mime_type: inline
                    .get("mimeType")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
        })
        .ok_or_else(|| ERR_NO_INLINE_IMAGE.to_string())
}
