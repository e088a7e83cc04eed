use axum::{Router, routing::get};
use utoipa::OpenApi;

use super::handlers::get_me::{__path_get_me, get_me};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(get_me))]
pub struct UserApiDoc;

pub fn user_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/users/me", state.args.server.root_path),
        get(get_me),
    )
}
