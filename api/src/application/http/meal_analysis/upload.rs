use axum::extract::{Multipart, multipart::MultipartRejection};
use diasense_core::domain::meal_analysis::value_objects::MealUpload;
use utoipa::ToSchema;

use crate::application::http::server::api_entities::api_error::ApiError;

pub const FILE_FIELD: &str = "file";

/// Multipart body accepted by the image endpoints.
#[derive(Debug, ToSchema)]
pub struct ImageUploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Reads the `file` field of a multipart body. Other fields are ignored.
///
/// The declared content type is passed through untouched; ingestion decides
/// whether it is acceptable.
pub async fn read_image_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<MealUpload, ApiError> {
    let mut multipart = multipart
        .map_err(|e| ApiError::BadRequest(format!("Expected a multipart form body: {}", e)))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);
        let file_bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;

        return Ok(MealUpload {
            file_bytes,
            content_type,
            filename,
        });
    }

    Err(ApiError::BadRequest("Missing file field".to_string()))
}
