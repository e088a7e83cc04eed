use std::{io::Cursor, sync::Arc};

use axum::http::{StatusCode, header::WWW_AUTHENTICATE};
use axum_test::{
    TestServer,
    multipart::{MultipartForm, Part},
};
use clap::Parser;
use diasense_api::{
    application::http::server::http_server::{router, state},
    args::Args,
};
use image::{ImageFormat, RgbImage};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

const GEMINI_PATH: &str = "/v1beta/models/gemini-test:generateContent";

const MEAL_REPLY: &str = r#"```json
{
  "scan_id": "auto_generated",
  "meal_summary": "Grilled chicken with white rice and salad",
  "total_carbs_est": 48,
  "components": [
    {"name": "White rice", "portion_est": "1 cup", "carbs_g": 45, "glycemic_index": "High", "impact": "Fast spike"},
    {"name": "Salad", "portion_est": "1 bowl", "carbs_g": 3, "glycemic_index": "Low", "impact": "Minimal"}
  ],
  "diasense_advice": {
    "risk_level": "Medium",
    "prediction": "Peak around 45 minutes",
    "suggested_bolus_strategy": "Pre-bolus 15 minutes before eating"
  }
}
```"#;

fn sample_png() -> Vec<u8> {
    let image = RgbImage::from_pixel(4, 3, image::Rgb([200, 120, 40]));
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png).unwrap();
    buffer.into_inner()
}

fn image_form() -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(sample_png())
            .file_name("lunch.png")
            .mime_type("image/png"),
    )
}

fn gemini_reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{ "content": { "parts": [{ "text": text }] } }]
    }))
}

async fn test_server(extra_args: &[&str]) -> TestServer {
    let mut argv = vec![
        "diasense-api",
        "--gemini-model",
        "gemini-test",
        "--vision-max-retries",
        "0",
    ];
    argv.extend_from_slice(extra_args);

    let args = Arc::new(Args::try_parse_from(argv).unwrap());
    let state = state(args).await.unwrap();
    TestServer::new(router(state).unwrap()).unwrap()
}

async fn dev_server(gemini: &MockServer) -> TestServer {
    let gemini_uri = gemini.uri();
    test_server(&[
        "--gemini-api-key",
        "test-key",
        "--gemini-base-url",
        &gemini_uri,
        "--insecure-dev-auth",
    ])
    .await
}

#[tokio::test]
async fn root_reports_running() {
    let server = test_server(&[]).await;

    let response = server.get("/").await;

    response.assert_status_ok();
    response.assert_json(&json!({ "status": "DiaSense AI Server is running" }));
}

#[tokio::test]
async fn health_lists_configured_capabilities() {
    let gemini = MockServer::start().await;
    let server = dev_server(&gemini).await;

    let body: Value = server.get("/health").await.json();

    assert_eq!(body["capabilities"]["vision"], true);
    assert_eq!(body["capabilities"]["auth_mode"], "insecure_development");
    assert_eq!(body["capabilities"]["detector"], false);
}

#[tokio::test]
async fn analyze_meal_without_authorization_is_rejected() {
    let gemini = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(gemini_reply(MEAL_REPLY))
        .expect(0)
        .mount(&gemini)
        .await;
    let server = dev_server(&gemini).await;

    let response = server.post("/analyze-meal/").multipart(image_form()).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.header(WWW_AUTHENTICATE), "Bearer");
    let body: Value = response.json();
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn analyze_meal_returns_stamped_analysis() {
    let gemini = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(gemini_reply(MEAL_REPLY))
        .expect(1)
        .mount(&gemini)
        .await;
    let server = dev_server(&gemini).await;

    let response = server
        .post("/analyze-meal/")
        .authorization_bearer("any-token")
        .multipart(image_form())
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["meal_summary"], "Grilled chicken with white rice and salad");
    assert_eq!(body["total_carbs_est"], 48);
    assert_eq!(body["components"][0]["glycemic_index"], "High");
    assert_eq!(body["diasense_advice"]["risk_level"], "Medium");
    assert_eq!(body["filename"], "lunch.png");
    assert_eq!(body["status"], "success");
    assert_ne!(body["scan_id"], "auto_generated");
}

#[tokio::test]
async fn analyze_meal_rejects_non_image_upload() {
    let gemini = MockServer::start().await;
    let server = dev_server(&gemini).await;

    let form = MultipartForm::new().add_part(
        "file",
        Part::text("not a picture")
            .file_name("notes.txt")
            .mime_type("text/plain"),
    );
    let response = server
        .post("/analyze-meal/")
        .authorization_bearer("any-token")
        .multipart(form)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn analyze_meal_surfaces_invalid_model_reply() {
    let gemini = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GEMINI_PATH))
        .respond_with(gemini_reply("I cannot see any food in this picture."))
        .mount(&gemini)
        .await;
    let server = dev_server(&gemini).await;

    let response = server
        .post("/analyze-meal/")
        .authorization_bearer("any-token")
        .multipart(image_form())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["raw_response"], "I cannot see any food in this picture.");
}

#[tokio::test]
async fn analyze_meal_without_vision_key_reports_configuration_error() {
    let server = test_server(&["--insecure-dev-auth"]).await;

    let response = server
        .post("/analyze-meal/")
        .authorization_bearer("any-token")
        .multipart(image_form())
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn users_me_echoes_verified_identity() {
    let identity = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:lookup"))
        .and(body_json(json!({ "idToken": "valid-token" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{ "localId": "uid-123" }]
        })))
        .mount(&identity)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/accounts:lookup"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&identity)
        .await;
    let identity_uri = identity.uri();
    let server = test_server(&[
        "--identity-api-key",
        "identity-key",
        "--identity-base-url",
        &identity_uri,
    ])
    .await;

    let response = server
        .get("/users/me")
        .authorization_bearer("valid-token")
        .await;
    response.assert_status_ok();
    response.assert_json(&json!({ "id": "uid-123" }));

    let response = server
        .get("/users/me")
        .authorization_bearer("forged-token")
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unconfigured_identity_rejects_every_token() {
    let server = test_server(&[]).await;

    let response = server
        .get("/users/me")
        .authorization_bearer("any-token")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn detect_food_is_not_mounted_without_detector() {
    let server = test_server(&[]).await;

    let response = server.post("/detect-food/").multipart(image_form()).await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn detect_food_returns_one_item_per_food() {
    let detector = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "boxes": [
                [0.0, 0.0, 2.0, 2.0, 0.8, 15],
                [1.0, 1.0, 3.0, 3.0, 0.4, 2],
                [0.0, 0.0, 2.0, 3.0, 0.95, 15]
            ]
        })))
        .mount(&detector)
        .await;
    let detector_uri = detector.uri();
    let server = test_server(&["--detector-url", &detector_uri]).await;

    let response = server.post("/detect-food/").multipart(image_form()).await;

    response.assert_status_ok();
    let body: Value = response.json();
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["item"], "Banana");
    assert_eq!(items[0]["calories"], 89);
    assert_eq!(items[1]["item"], "broccoli");
    assert_eq!(items[0]["carbs_g"], 27);
    assert_eq!(items[0]["glycemic_risk"], "Moderate");
    assert_eq!(items[1]["glycemic_risk"], "Safe");
}
