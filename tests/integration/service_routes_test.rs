// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{app_for, chat_payload, spawn_app};
use axum::{
    body::{Body, BodyDataStream},
    http::{Request, StatusCode},
    Router,
};
use futures::StreamExt;
use imgsearch::domain::models::match_mode::MatchMode;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::{json, Value};
use std::time::Duration;
use tower::util::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

/// 健康检查测试
///
/// 后端正常时返回 200 和后端状态
#[tokio::test]
async fn health_check_reports_backend_status() {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ok",
            "message": "API du moteur de recherche opérationnelle"
        })))
        .mount(&app.backend)
        .await;

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "ok");
}

#[tokio::test]
async fn health_check_is_degraded_when_backend_is_down() {
    let (router, _session) = app_for("http://127.0.0.1:9", None);
    let response = router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn version_endpoint_returns_package_version() {
    let app = spawn_app().await;
    let (status, body) = app.get("/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn metrics_endpoint_is_absent_when_disabled() {
    let app = spawn_app().await;
    let (status, _) = app.get("/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn metrics_endpoint_renders_prometheus_text() {
    let handle = PrometheusBuilder::new().build_recorder().handle();
    let (router, _session) = app_for("http://127.0.0.1:9", Some(handle));
    let response = router
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn events_stream_announces_each_new_generation() {
    let (router, session) = app_for("http://127.0.0.1:9", None);
    let response = router
        .oneshot(Request::builder().uri("/events").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["content-type"], "text/event-stream");

    let mut frames = response.into_body().into_data_stream();
    session.submit("   ", MatchMode::Any).await;

    let frame = tokio::time::timeout(Duration::from_secs(2), frames.next())
        .await
        .expect("no event received")
        .expect("stream ended")
        .unwrap();
    let text = String::from_utf8(frame.to_vec()).unwrap();
    assert!(text.contains("event: state"));
    assert!(text.contains("data: 1"));
}

async fn open_events(router: &Router, uri: &str) -> BodyDataStream {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    response.into_body().into_data_stream()
}

async fn next_frame(frames: &mut BodyDataStream, wait: Duration) -> Option<String> {
    let frame = tokio::time::timeout(wait, frames.next()).await.ok()??;
    Some(String::from_utf8(frame.unwrap().to_vec()).unwrap())
}

#[tokio::test]
async fn events_stream_reports_change_made_before_connecting() {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("q", "chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_payload())
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&app.backend)
        .await;

    app.get("/search?q=chat").await;
    let (_, html) = app.get("/").await;
    assert!(!html.contains(r#"class="site-section""#));
    let subscription = html
        .split("new EventSource('")
        .nth(1)
        .and_then(|rest| rest.split('\'').next())
        .unwrap()
        .to_string();
    assert!(subscription.starts_with("/events?since="));

    // 页面渲染之后、订阅之前搜索已经结束
    let settled = app.settled_after(0).await;
    let mut frames = open_events(&app.router, &subscription).await;

    let text = next_frame(&mut frames, Duration::from_secs(2))
        .await
        .expect("no event for the settled search");
    assert!(text.contains("event: state"));
    assert!(text.contains(&format!("data: {}", settled.generation)));
    assert!(!app.page_state().await["loading"].as_bool().unwrap());
}

#[tokio::test]
async fn events_stream_waits_when_page_is_current() {
    let (router, session) = app_for("http://127.0.0.1:9", None);
    session.submit("", MatchMode::Any).await;

    // 加载中渲染的页面在同一代次落定后也算过时
    let mut stale = open_events(&router, "/events?since=1&loading=true").await;
    let text = next_frame(&mut stale, Duration::from_secs(2)).await.unwrap();
    assert!(text.contains("data: 1"));

    let mut frames = open_events(&router, "/events?since=1&loading=false").await;
    assert!(next_frame(&mut frames, Duration::from_millis(200)).await.is_none());

    session.submit(" ", MatchMode::Any).await;
    let text = next_frame(&mut frames, Duration::from_secs(2)).await.unwrap();
    assert!(text.contains("data: 2"));
}
