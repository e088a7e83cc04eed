use bytes::Bytes;

/// An image upload as received at the boundary.
#[derive(Debug, Clone)]
pub struct MealUpload {
    pub file_bytes: Bytes,
    pub content_type: String,
    pub filename: Option<String>,
}
