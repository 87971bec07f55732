// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, Stream};
use serde::Deserialize;
use std::convert::Infallible;

use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct EventsParams {
    /// 页面已经渲染的代次
    pub since: Option<u64>,
    /// 页面渲染时该代次是否仍在加载
    #[serde(default)]
    pub loading: bool,
}

fn state_event(generation: u64) -> Event {
    Event::default().event("state").data(generation.to_string())
}

/// 会话状态变化的 SSE 流
///
/// 每次快照变化推送一个 `state` 事件，数据为新的代次。带 `since` 时，
/// 若页面渲染的状态已经过时，连接建立后立即推送一次。同一代次内只有
/// `Loading` 到终态一种变化，所以代次加加载标记就能判断页面是否过时。
pub async fn events(
    State(state): State<AppState>,
    Query(params): Query<EventsParams>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let updates = state.session.subscribe();
    let missed = {
        let current = updates.borrow();
        let stale = params.since.is_some_and(|since| {
            since != current.generation || params.loading != current.state.is_loading()
        });
        stale.then_some(current.generation)
    };

    let stream = stream::unfold((updates, missed), |(mut updates, missed)| async move {
        let generation = match missed {
            Some(generation) => generation,
            None => {
                updates.changed().await.ok()?;
                updates.borrow_and_update().generation
            }
        };
        Some((Ok(state_event(generation)), (updates, None)))
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}
