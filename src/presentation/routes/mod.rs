// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::presentation::handlers::{events_handler, image_handler, metrics_handler, page_handler};
use crate::presentation::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
        .route("/metrics", get(metrics_handler::metrics));

    let page_routes = Router::new()
        .route("/", get(page_handler::index))
        .route("/search", get(page_handler::search))
        .route("/mode", post(page_handler::set_mode))
        .route("/api/state", get(page_handler::page_state))
        .route("/events", get(events_handler::events))
        .route(
            "/images/{generation}/{site}/{image}/{event}",
            post(image_handler::report_image),
        );

    Router::new()
        .merge(public_routes)
        .merge(page_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 健康检查端点
///
/// 同时探测搜索后端；后端不可用时返回 503
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.session.backend().health().await {
        Ok(health) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "backend": health.status,
                "message": health.message,
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "backend": e.kind(),
                "message": e.user_message(),
            })),
        ),
    }
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
