// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Form, Query, State},
    response::{Html, Redirect},
    Json,
};
use serde::Deserialize;

use crate::domain::models::match_mode::MatchMode;
use crate::domain::services::result_view::PageModel;
use crate::presentation::errors::AppError;
use crate::presentation::state::AppState;
use crate::presentation::views::page::render_page;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
    pub mode: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ModeForm {
    pub mode: String,
}

/// 渲染当前会话状态对应的页面
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let (page, cells) = state.page();
    Html(render_page(&page, &cells))
}

/// 当前页面模型的 JSON 形式
pub async fn page_state(State(state): State<AppState>) -> Json<PageModel> {
    Json(state.page().0)
}

/// 提交搜索
///
/// 未指定 `mode` 时使用会话当前的模式。空查询在返回前就已进入错误状态；
/// 其余查询在后台执行，页面通过 `/events` 得知状态变化。
///
/// # 错误
///
/// `mode` 无法识别时返回 400
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Redirect, AppError> {
    let mode = match params.mode.as_deref() {
        Some(raw) => raw.parse::<MatchMode>()?,
        None => state.session.mode(),
    };

    let session = state.session.clone();
    if params.q.trim().is_empty() {
        session.submit(&params.q, mode).await;
    } else {
        tokio::spawn(async move {
            session.submit(&params.q, mode).await;
        });
    }
    Ok(Redirect::to("/"))
}

/// 切换匹配模式，不触发搜索
pub async fn set_mode(
    State(state): State<AppState>,
    Form(form): Form<ModeForm>,
) -> Result<Redirect, AppError> {
    let mode = form.mode.parse::<MatchMode>()?;
    state.session.set_mode(mode);
    Ok(Redirect::to("/"))
}
