mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use calorie_serve::{build_router, AppState, PredictionHandler};
use common::Fixture;
use http_body_util::BodyExt;
use tower::ServiceExt;

fn app(fixture: &Fixture) -> Router {
    build_router(AppState::new(PredictionHandler::new(fixture.context())))
}

async fn get_html(app: Router, uri: &str) -> String {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn submit(app: Router, body: &str) -> String {
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/dashboard")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

const MALE_WORKOUT: &str =
    "Gender=Male&Age=25&Height=170&Weight=70&Duration=30&Heart_Rate=120&Body_Temp=37.0";

#[tokio::test]
async fn test_dashboard_renders_widgets_with_ranges() {
    let fixture = Fixture::new();
    let html = get_html(app(&fixture), "/dashboard").await;

    assert!(html.contains("<option value=\"Male\" selected>Male</option>"));
    assert!(html.contains("<option value=\"Female\">Female</option>"));
    assert!(html.contains("min=\"30\" max=\"42\" step=\"0.1\""));
    assert!(html.contains("min=\"1\" max=\"120\""));
    assert!(html.contains("min=\"30\" max=\"220\""));
    assert!(!html.contains("id=\"outcome\""));
}

#[tokio::test]
async fn test_dashboard_success_panel() {
    let fixture = Fixture::new();
    let html = submit(app(&fixture), MALE_WORKOUT).await;

    assert!(html.contains("panel success"));
    assert!(html.contains("Estimated calories burnt"));
}

#[tokio::test]
async fn test_dashboard_keeps_selected_gender() {
    let fixture = Fixture::new();
    let router = app(&fixture);
    let male = submit(router.clone(), MALE_WORKOUT).await;
    let female = submit(router, &MALE_WORKOUT.replace("Gender=Male", "Gender=Female")).await;

    assert!(female.contains("<option value=\"Female\" selected>Female</option>"));
    assert!(male.contains("panel success"));
    assert!(female.contains("panel success"));
}

#[tokio::test]
async fn test_dashboard_matches_plain_form() {
    let fixture = Fixture::new();
    let handler = PredictionHandler::new(fixture.context());
    let fields: &[(&str, &str)] = &[
        ("Age", "25"),
        ("Gender", "0"),
        ("Height", "170"),
        ("Weight", "70"),
        ("Duration", "30"),
        ("Heart_Rate", "120"),
        ("Body_Temp", "37.0"),
    ];
    let expected = handler.handle(fields).unwrap().to_string();

    let html = submit(app(&fixture), MALE_WORKOUT).await;
    assert!(html.contains(&format!("<p>{}</p>", expected)));
}

#[tokio::test]
async fn test_dashboard_non_numeric_is_invalid_input() {
    let fixture = Fixture::new();
    let html = submit(app(&fixture), &MALE_WORKOUT.replace("Weight=70", "Weight=heavy")).await;

    assert!(html.contains("panel warning"));
    assert!(html.contains("Invalid input"));
    assert!(html.contains("Weight"));
}

#[tokio::test]
async fn test_dashboard_unknown_gender_is_invalid_input() {
    let fixture = Fixture::new();
    let html = submit(app(&fixture), &MALE_WORKOUT.replace("Gender=Male", "Gender=Robot")).await;

    assert!(html.contains("panel warning"));
    assert!(html.contains("Robot"));
}

#[tokio::test]
async fn test_dashboard_model_failure_is_reported_separately() {
    // 模型輸入寬度與 scaler 輸出不一致，會在推論階段失敗
    let model = r#"{"input_dim": 6, "layers": [{"units": 1, "kernel": [[1],[1],[1],[1],[1],[1]], "bias": [0]}]}"#;
    let fixture = Fixture::with_contents(model, common::SCALER_JSON);
    let html = submit(app(&fixture), MALE_WORKOUT).await;

    assert!(html.contains("panel error"));
    assert!(html.contains("Prediction failed"));
    assert!(html.contains("Inference failed"));
}
