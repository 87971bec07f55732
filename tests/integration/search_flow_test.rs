// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{app_for, chat_payload, single_site_payload, spawn_app, TestApp};
use axum::http::{header, Request, StatusCode};
use imgsearch::domain::models::match_mode::MatchMode;
use imgsearch::domain::search::backend::{EMPTY_QUERY_MESSAGE, TRANSPORT_MESSAGE};
use imgsearch::domain::services::search_session::SessionState;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

async fn mount_chat(app: &TestApp) {
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("q", "chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_payload()))
        .mount(&app.backend)
        .await;
}

#[tokio::test]
async fn test_index_shows_welcome_before_any_search() {
    let app = spawn_app().await;
    let (status, html) = app.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"class="welcome""#));
    assert!(html.contains(r#"href="/search?q=voiture%20rouge""#));

    let state = app.page_state().await;
    assert_eq!(state["generation"], 0);
    assert_eq!(state["loading"], false);
    assert_eq!(state["body"]["status"], "welcome");
    assert_eq!(state["body"]["suggestions"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn test_search_renders_grouped_results() {
    let app = spawn_app().await;
    mount_chat(&app).await;

    let (status, _) = app.get("/search?q=chat&mode=OR").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let snapshot = app.settled_after(0).await;
    assert!(matches!(snapshot.state, SessionState::Success { .. }));

    let state = app.page_state().await;
    let view = &state["body"]["view"];
    assert_eq!(state["body"]["status"], "loaded");
    assert_eq!(view["kind"], "results");
    assert_eq!(view["sites_label"], "2 sites");
    assert_eq!(view["images_label"], "5 images");
    assert_eq!(view["mode_label"], "OR");
    assert_eq!(view["query_words"], json!([]));

    let sites = view["sites"].as_array().unwrap();
    assert_eq!(sites.len(), 2);
    let images: usize = sites
        .iter()
        .map(|s| s["images"].as_array().unwrap().len())
        .sum();
    assert_eq!(images, 5);
    assert_eq!(sites[0]["badges"][0]["label"], "Title");
    assert_eq!(sites[0]["badges"][1]["label"], "Alt");
    assert_eq!(sites[0]["matched_summary"], "Found: chat");
    assert_eq!(sites[0]["images"][0]["caption"], "No description");

    let (_, html) = app.get("/").await;
    assert_eq!(html.matches(r#"class="site-section""#).count(), 2);
    assert_eq!(html.matches(r#"class="image-placeholder""#).count(), 5);
    assert!(html.contains("Animaux Sauvages"));
}

#[tokio::test]
async fn test_empty_result_offers_suggestions() {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("q", "xyzxyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "query": "xyzxyz",
            "query_words": ["xyzxyz"],
            "search_mode": "OR",
            "total_sites": 0,
            "total_images": 0,
            "results": [],
            "suggestions": ["chat", "cat"]
        })))
        .mount(&app.backend)
        .await;

    app.get("/search?q=xyzxyz").await;
    app.settled_after(0).await;

    let state = app.page_state().await;
    let view = &state["body"]["view"];
    assert_eq!(view["kind"], "empty");
    assert_eq!(view["suggestions"], json!([{"query": "chat"}, {"query": "cat"}]));

    let (_, html) = app.get("/").await;
    assert_eq!(html.matches(r#"class="suggestion-btn""#).count(), 2);
    assert!(html.contains(r#"href="/search?q=cat""#));
}

#[tokio::test]
async fn test_whitespace_query_fails_without_network_call() {
    let app = spawn_app().await;
    mount_chat(&app).await;

    let (status, _) = app.get("/search?q=%20%20").await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    // 空查询在响应前已经落定
    let snapshot = app.session.snapshot();
    assert_eq!(snapshot.generation, 1);
    match snapshot.state {
        SessionState::Error { query, error } => {
            assert_eq!(query, "  ");
            assert_eq!(error.user_message(), EMPTY_QUERY_MESSAGE);
        }
        other => panic!("expected validation error, got {:?}", other),
    }

    let state = app.page_state().await;
    assert_eq!(state["loading"], false);
    assert_eq!(state["body"]["status"], "failed");
    assert_eq!(state["body"]["message"], EMPTY_QUERY_MESSAGE);
    assert!(app.backend.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unreachable_backend_shows_connectivity_message() {
    let (router, session) = app_for("http://127.0.0.1:9", None);
    let app = TestApp {
        router,
        session,
        backend: wiremock::MockServer::start().await,
    };

    app.get("/search?q=chat").await;
    let snapshot = app.settled_after(0).await;
    assert!(!snapshot.state.is_loading());

    let state = app.page_state().await;
    assert_eq!(state["loading"], false);
    assert_eq!(state["body"]["message"], TRANSPORT_MESSAGE);

    let (_, html) = app.get("/").await;
    assert!(html.contains(TRANSPORT_MESSAGE));
    assert!(!html.contains("Searching..."));
}

#[tokio::test]
async fn test_server_error_message_is_shown_verbatim() {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": "Index en maintenance"})),
        )
        .mount(&app.backend)
        .await;

    app.get("/search?q=chat").await;
    app.settled_after(0).await;

    let state = app.page_state().await;
    assert_eq!(state["body"]["status"], "failed");
    assert_eq!(state["body"]["message"], "Index en maintenance");
}

#[tokio::test]
async fn test_slow_superseded_search_is_discarded() {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("q", "chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_payload())
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&app.backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("q", "chien"))
        .respond_with(ResponseTemplate::new(200).set_body_json(single_site_payload("chien")))
        .mount(&app.backend)
        .await;

    app.get("/search?q=chat").await;
    let mut updates = app.session.subscribe();
    updates.wait_for(|s| s.generation >= 1).await.unwrap();
    app.get("/search?q=chien").await;

    let snapshot = app.settled_after(1).await;
    assert_eq!(snapshot.generation, 2);
    assert_eq!(snapshot.state.query(), Some("chien"));

    // 等慢请求返回后，状态仍是第二次搜索
    tokio::time::sleep(Duration::from_millis(600)).await;
    let snapshot = app.session.snapshot();
    assert_eq!(snapshot.generation, 2);
    assert!(matches!(
        snapshot.state,
        SessionState::Success { ref query, .. } if query == "chien"
    ));
    assert_eq!(app.backend.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_mode_switch_applies_to_next_search_only() {
    let app = spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("mode", "AND"))
        .respond_with(ResponseTemplate::new(200).set_body_json(single_site_payload("chat")))
        .expect(1)
        .mount(&app.backend)
        .await;

    let (status, _) = app.post_form("/mode", "mode=AND").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(app.session.mode(), MatchMode::All);
    // 切换模式本身不发请求
    assert_eq!(app.session.snapshot().generation, 0);

    let state = app.page_state().await;
    assert_eq!(state["mode"], "AND");

    app.get("/search?q=chat").await;
    let snapshot = app.settled_after(0).await;
    assert!(matches!(
        snapshot.state,
        SessionState::Success { mode: MatchMode::All, .. }
    ));
}

#[tokio::test]
async fn test_invalid_mode_is_rejected() {
    let app = spawn_app().await;
    let (status, body) = app.get("/search?q=chat&mode=XOR").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("error"));

    let (status, _) = app.post_form("/mode", "mode=maybe").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(app.session.snapshot().generation, 0);
}

#[tokio::test]
async fn test_search_redirects_back_to_page() {
    let app = spawn_app().await;
    mount_chat(&app).await;
    let request = Request::builder()
        .uri("/search?q=chat")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::util::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
    app.settled_after(0).await;
}
