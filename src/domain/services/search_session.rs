// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::match_mode::MatchMode;
use crate::domain::models::search_result::SearchResult;
use crate::domain::search::backend::{SearchBackend, SearchError};
use metrics::counter;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// 搜索会话状态
///
/// 任意时刻只处于其中一个状态，每个状态都接受新的提交。
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// 初始状态
    Idle,
    /// 请求进行中
    Loading { query: String, mode: MatchMode },
    /// 最近一次搜索成功，空结果也在此列
    Success {
        query: String,
        mode: MatchMode,
        result: Arc<SearchResult>,
    },
    /// 最近一次搜索失败
    Error { query: String, error: SearchError },
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading { .. })
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            SessionState::Idle => None,
            SessionState::Loading { query, .. }
            | SessionState::Success { query, .. }
            | SessionState::Error { query, .. } => Some(query),
        }
    }
}

/// 会话快照
///
/// `generation` 是产生该状态的提交序号，`Idle` 为 0。
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub generation: u64,
    pub state: SessionState,
}

struct SessionInner {
    /// 最近一次发出的提交序号
    latest: Mutex<u64>,
    mode: Mutex<MatchMode>,
    state: watch::Sender<SessionSnapshot>,
}

impl SessionInner {
    /// 分配新序号并立即发布对应状态
    fn issue(&self, state: SessionState) -> u64 {
        let mut latest = self.latest.lock();
        *latest += 1;
        let generation = *latest;
        self.state.send_replace(SessionSnapshot { generation, state });
        generation
    }

    /// 只有序号仍是最新时才写入状态
    fn apply(&self, generation: u64, state: SessionState) -> bool {
        let latest = self.latest.lock();
        if *latest != generation {
            return false;
        }
        self.state.send_replace(SessionSnapshot { generation, state });
        true
    }
}

/// 进行中的请求
///
/// 每个请求恰好离开 `Loading` 一次：`complete` 写入结果，
/// 未完成就被丢弃时在 `Drop` 中写入 `Cancelled`。
struct PendingSearch<'a> {
    inner: &'a SessionInner,
    generation: u64,
    query: String,
    mode: MatchMode,
    settled: bool,
}

impl<'a> PendingSearch<'a> {
    fn begin(inner: &'a SessionInner, query: &str, mode: MatchMode) -> Self {
        let generation = inner.issue(SessionState::Loading {
            query: query.to_string(),
            mode,
        });
        Self {
            inner,
            generation,
            query: query.to_string(),
            mode,
            settled: false,
        }
    }

    fn complete(mut self, outcome: Result<SearchResult, SearchError>) {
        self.settled = true;
        let query = std::mem::take(&mut self.query);
        let state = match outcome {
            Ok(result) => SessionState::Success {
                query,
                mode: self.mode,
                result: Arc::new(result),
            },
            Err(error) => {
                counter!("search_failures_total", "kind" => error.kind()).increment(1);
                warn!(generation = self.generation, error = %error, "Search failed");
                SessionState::Error { query, error }
            }
        };
        self.settle(state);
    }

    fn settle(&self, state: SessionState) {
        if self.inner.apply(self.generation, state) {
            debug!(generation = self.generation, "Search outcome applied");
        } else {
            counter!("search_stale_responses_total").increment(1);
            debug!(
                generation = self.generation,
                "Discarding outcome of a superseded search"
            );
        }
    }
}

impl Drop for PendingSearch<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.settled = true;
            let state = SessionState::Error {
                query: std::mem::take(&mut self.query),
                error: SearchError::Cancelled,
            };
            self.settle(state);
        }
    }
}

/// 搜索会话
///
/// 持有唯一的会话状态，并且是它唯一的写入者。渲染层通过
/// [`SearchSession::subscribe`] 订阅快照变化，只读不写。
pub struct SearchSession {
    backend: Arc<dyn SearchBackend>,
    inner: SessionInner,
}

impl SearchSession {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self::with_mode(backend, MatchMode::default())
    }

    pub fn with_mode(backend: Arc<dyn SearchBackend>, mode: MatchMode) -> Self {
        let (state, _) = watch::channel(SessionSnapshot {
            generation: 0,
            state: SessionState::Idle,
        });
        Self {
            backend,
            inner: SessionInner {
                latest: Mutex::new(0),
                mode: Mutex::new(mode),
                state,
            },
        }
    }

    pub fn backend(&self) -> &Arc<dyn SearchBackend> {
        &self.backend
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.state.subscribe()
    }

    pub fn mode(&self) -> MatchMode {
        *self.inner.mode.lock()
    }

    /// 修改匹配模式，只影响下一次提交，不触发搜索
    pub fn set_mode(&self, mode: MatchMode) {
        *self.inner.mode.lock() = mode;
        debug!(mode = %mode, "Match mode changed");
    }

    /// 提交一次搜索
    ///
    /// 空白查询直接进入 `Error`，不访问后端。否则进入 `Loading`，
    /// 向后端发出一次请求，并在结果仍属于最新提交时写入终态。
    /// 失败的搜索不会自动重试。
    ///
    /// 返回调用结束时的会话快照；若本次结果已被更新的提交取代，
    /// 返回的是那个更新提交的状态。
    pub async fn submit(&self, raw_query: &str, mode: MatchMode) -> SessionSnapshot {
        let query = raw_query.trim();
        if query.is_empty() {
            counter!("search_failures_total", "kind" => SearchError::EmptyQuery.kind())
                .increment(1);
            let generation = self.inner.issue(SessionState::Error {
                query: raw_query.to_string(),
                error: SearchError::EmptyQuery,
            });
            debug!(generation, "Rejected empty query");
            return self.snapshot();
        }

        counter!("search_requests_total").increment(1);
        let pending = PendingSearch::begin(&self.inner, query, mode);
        info!(generation = pending.generation, query, mode = %mode, "Search started");

        let outcome = self.backend.search(query, mode).await;
        pending.complete(outcome);

        self.snapshot()
    }
}

#[cfg(test)]
#[path = "search_session_test.rs"]
mod tests;
