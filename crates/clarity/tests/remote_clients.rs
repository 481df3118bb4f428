//! Remote client behavior against throwaway local endpoints.

use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use clarity::pay::UserFormSubmission;
use clarity::remote::{
    build_http_client, FeedbackClient, FeedbackProvider, PredictionClient, PredictionProvider,
    RemoteError,
};
use serde_json::{json, Value};
use std::time::Duration;

async fn spawn_endpoint(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server runs");
    });
    format!("http://{addr}")
}

fn http() -> reqwest::Client {
    build_http_client(Duration::from_secs(5)).expect("client builds")
}

fn submission() -> UserFormSubmission {
    UserFormSubmission {
        job_role: "Manager".to_string(),
        salary: 58000.0,
        employment_type: "Full-time".to_string(),
        gender: "Female".to_string(),
        age: 44.0,
        experience: 14.0,
        children: 2,
        ethnicity: "Arab".to_string(),
        education: "Master's".to_string(),
    }
}

#[tokio::test]
async fn feedback_client_posts_submission_and_decodes_analysis() {
    let router = Router::new().route(
        "/salary-analysis",
        post(|Json(payload): Json<Value>| async move {
            Json(json!({
                "analysis": format!(
                    "{} earning {}",
                    payload["jobRole"].as_str().unwrap_or_default(),
                    payload["salary"]
                ),
                "payGapPercentage": -3.4,
                "status": "success",
                "factors": ["Experience"],
                "recommendations": ["Benchmark with peers"],
            }))
        }),
    );
    let base = spawn_endpoint(router).await;
    let client = FeedbackClient::new(http(), format!("{base}/salary-analysis"));

    let response = client
        .feedback(&submission())
        .await
        .expect("feedback succeeds");

    assert_eq!(response.analysis, "Manager earning 58000.0");
    assert_eq!(response.pay_gap_percentage, Some(-3.4));
    assert_eq!(response.factors, vec!["Experience".to_string()]);
    assert_eq!(
        response.recommendations,
        vec!["Benchmark with peers".to_string()]
    );
}

#[tokio::test]
async fn feedback_error_surfaces_body_message() {
    let router = Router::new().route(
        "/salary-analysis",
        post(|| async {
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "message": "Model is warming up" })),
            )
        }),
    );
    let base = spawn_endpoint(router).await;
    let client = FeedbackClient::new(http(), format!("{base}/salary-analysis"));

    let err = client
        .feedback(&submission())
        .await
        .expect_err("non-2xx is a failure");

    assert!(matches!(err, RemoteError::Status { status: 502, .. }));
    assert_eq!(err.to_string(), "Model is warming up");
}

#[tokio::test]
async fn feedback_error_without_message_reports_status() {
    let router = Router::new().route(
        "/salary-analysis",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = spawn_endpoint(router).await;
    let client = FeedbackClient::new(http(), format!("{base}/salary-analysis"));

    let err = client
        .feedback(&submission())
        .await
        .expect_err("non-2xx is a failure");
    assert_eq!(err.to_string(), "HTTP error! Status: 500");
}

#[tokio::test]
async fn prediction_client_accepts_direct_body() {
    let router = Router::new().route(
        "/get-salary-predict",
        post(|Json(payload): Json<Value>| async move {
            let years = payload["Years of Experience"].as_f64().unwrap_or_default();
            Json(json!({ "predicted_salary": 40000.0 + years * 1000.0 }))
        }),
    );
    let base = spawn_endpoint(router).await;
    let client = PredictionClient::new(http(), format!("{base}/get-salary-predict"));

    let predicted = client
        .predict(&submission())
        .await
        .expect("prediction succeeds");
    assert_eq!(predicted, 54000.0);
}

#[tokio::test]
async fn prediction_client_unwraps_lambda_envelope() {
    let router = Router::new().route(
        "/get-salary-predict",
        post(|Json(payload): Json<Value>| async move {
            let family = payload["JobFamily"].as_str().unwrap_or_default().to_string();
            let salary = if family == "Manager" { 61500.0 } else { 0.0 };
            Json(json!({
                "statusCode": 200,
                "body": json!({ "predicted_salary": salary }).to_string(),
            }))
        }),
    );
    let base = spawn_endpoint(router).await;
    let client = PredictionClient::new(http(), format!("{base}/get-salary-predict"));

    let predicted = client
        .predict(&submission())
        .await
        .expect("envelope decodes");
    assert_eq!(predicted, 61500.0);
}

#[tokio::test]
async fn prediction_client_rejects_unparsable_body() {
    let router = Router::new().route(
        "/get-salary-predict",
        post(|| async { "definitely not json" }),
    );
    let base = spawn_endpoint(router).await;
    let client = PredictionClient::new(http(), format!("{base}/get-salary-predict"));

    let err = client
        .predict(&submission())
        .await
        .expect_err("garbage body fails");
    assert!(matches!(err, RemoteError::Decode(_)));
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let client = PredictionClient::new(http(), format!("http://{addr}/get-salary-predict"));
    let err = client
        .predict(&submission())
        .await
        .expect_err("nothing is listening");
    assert!(matches!(err, RemoteError::Transport(_)));
}
