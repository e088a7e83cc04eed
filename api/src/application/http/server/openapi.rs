use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::application::http::{
    health::HealthApiDoc, meal_analysis::router::MealAnalysisApiDoc, user::router::UserApiDoc,
};

struct BearerSecurity;

impl Modify for BearerSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "DiaSense API",
        description = "Meal photo analysis for people managing diabetes"
    ),
    modifiers(&BearerSecurity),
    tags(
        (name = "meal-analysis", description = "Carbohydrate and glycemic impact estimation"),
        (name = "user", description = "Authenticated caller"),
        (name = "health", description = "Liveness and configuration"),
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Full document with every router's paths.
    pub fn build() -> utoipa::openapi::OpenApi {
        let mut openapi = ApiDoc::openapi();
        openapi.merge(HealthApiDoc::openapi());
        openapi.merge(MealAnalysisApiDoc::openapi());
        openapi.merge(UserApiDoc::openapi());
        openapi
    }
}
