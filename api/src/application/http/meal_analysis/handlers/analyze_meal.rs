use axum::extract::{Multipart, State, multipart::MultipartRejection};
use diasense_core::domain::meal_analysis::{entities::MealAnalysis, ports::MealAnalysisService};

use crate::application::{
    auth::RequiredIdentity,
    http::{
        meal_analysis::upload::{ImageUploadForm, read_image_upload},
        server::{
            api_entities::{
                api_error::{ApiError, ApiErrorResponse},
                response::Response,
            },
            app_state::AppState,
        },
    },
};

#[utoipa::path(
    post,
    path = "/analyze-meal/",
    tag = "meal-analysis",
    summary = "Analyze a meal photo",
    description = "Estimates carbohydrates, glycemic impact and a bolus strategy for the meal in the uploaded image using a vision model",
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = MealAnalysis),
        (status = 400, description = "Not an image, undecodable or too large", body = ApiErrorResponse),
        (status = 401, description = "Missing or rejected bearer token", body = ApiErrorResponse),
        (status = 500, description = "Vision model failure or invalid reply", body = ApiErrorResponse),
    ),
    security(("bearer" = [])),
)]
pub async fn analyze_meal(
    State(state): State<AppState>,
    RequiredIdentity(identity): RequiredIdentity,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response<MealAnalysis>, ApiError> {
    let upload = read_image_upload(multipart).await?;

    let analysis = state
        .service
        .analyze_meal(identity, upload)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(analysis))
}
