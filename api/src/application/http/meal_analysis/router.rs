use axum::{Router, routing::post};
use utoipa::OpenApi;

use super::handlers::{
    analyze_meal::{__path_analyze_meal, analyze_meal},
    detect_food::{__path_detect_food, detect_food},
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(analyze_meal, detect_food))]
pub struct MealAnalysisApiDoc;

pub fn meal_analysis_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    let router = Router::new().route(&format!("{}/analyze-meal/", root_path), post(analyze_meal));

    if !state.service.capabilities().detector {
        return router;
    }

    router.route(&format!("{}/detect-food/", root_path), post(detect_food))
}
