use axum::extract::{Multipart, State, multipart::MultipartRejection};
use diasense_core::domain::{
    detection::entities::AggregatedDetection, meal_analysis::ports::MealAnalysisService,
};

use crate::application::http::{
    meal_analysis::upload::{ImageUploadForm, read_image_upload},
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/detect-food/",
    tag = "meal-analysis",
    summary = "Detect foods in a photo",
    description = "Runs the local food detector and returns one entry per distinct food, most confident first",
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = Vec<AggregatedDetection>),
        (status = 400, description = "Not an image, undecodable or too large", body = ApiErrorResponse),
        (status = 500, description = "Detector failure or unknown label", body = ApiErrorResponse),
    ),
)]
pub async fn detect_food(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response<Vec<AggregatedDetection>>, ApiError> {
    let upload = read_image_upload(multipart).await?;

    let detections = state
        .service
        .detect_food(upload)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(detections))
}
