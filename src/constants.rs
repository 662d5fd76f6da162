/// Smallest decoded image payload accepted, in bytes
pub const MIN_IMAGE_BYTES: usize = 10;

/// Maximum request body size (20MB)
/// Base64 inflates images by ~4/3, so this admits ~15MB of binary
pub const MAX_REQUEST_BODY_BYTES: usize = 20 * 1024 * 1024;

/// Page size used when the caller does not pass `limit`
pub const DEFAULT_PAGE_LIMIT: i64 = 50;

/// Largest page size a caller may request
pub const MAX_PAGE_LIMIT: i64 = 100;

/// MIME type assumed for frontend uploads that omit one
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

// =============================================================================
// Error Messages
// =============================================================================

pub const ERR_IMAGE_EMPTY: &str = "image_data cannot be empty";

pub const ERR_IMAGE_TOO_SMALL: &str = "Image data too small";

pub const ERR_NO_CONTENTS: &str = "No contents found";

pub const ERR_NO_INLINE_IMAGE: &str = "No image data found in request";

pub const ERR_FRONTEND_IMAGE_REQUIRED: &str = "image_data_base64 is required";
