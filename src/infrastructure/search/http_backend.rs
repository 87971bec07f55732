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
use crate::domain::models::search_result::{BackendHealth, SearchResult};
use crate::domain::search::backend::{SearchBackend, SearchError};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// 后端客户端初始化错误
#[derive(Error, Debug)]
pub enum BackendInitError {
    #[error("Invalid backend URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("Unsupported backend URL scheme: {0}")]
    UnsupportedScheme(String),
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// 后端响应：显式错误字段或结果负载
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SearchResponse {
    Failure { error: String },
    Success(Box<SearchResult>),
}

/// 图片搜索后端的 HTTP 客户端
///
/// 请求 `GET {base}/api/search?q=..&mode=OR|AND`，查询文本做百分号编码。
pub struct HttpSearchBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSearchBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendInitError> {
        let parsed = Url::parse(base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(BackendInitError::UnsupportedScheme(
                parsed.scheme().to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("imgsearch/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn search_url(&self, query: &str, mode: MatchMode) -> String {
        format!(
            "{}/api/search?q={}&mode={}",
            self.base_url,
            urlencoding::encode(query),
            mode.wire_value()
        )
    }

    pub fn health_url(&self) -> String {
        format!("{}/api/health", self.base_url)
    }

    async fn fetch_text(&self, url: &str) -> Result<(reqwest::StatusCode, String), SearchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;
        Ok((status, body))
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search(&self, query: &str, mode: MatchMode) -> Result<SearchResult, SearchError> {
        let url = self.search_url(query, mode);
        let start = Instant::now();
        let (status, body) = self.fetch_text(&url).await?;
        debug!(
            %url,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Backend responded"
        );

        match serde_json::from_str::<SearchResponse>(&body) {
            Ok(SearchResponse::Failure { error }) => Err(SearchError::Server(error)),
            Ok(SearchResponse::Success(result)) if status.is_success() => {
                let issues = result.check_consistency();
                if !issues.is_empty() {
                    warn!(query, ?issues, "Backend returned inconsistent counts");
                }
                Ok(*result)
            }
            Ok(SearchResponse::Success(_)) => Err(SearchError::Transport(format!(
                "unexpected HTTP status {}",
                status
            ))),
            Err(e) => Err(SearchError::Transport(format!(
                "invalid response body (HTTP {}): {}",
                status, e
            ))),
        }
    }

    async fn health(&self) -> Result<BackendHealth, SearchError> {
        let (status, body) = self.fetch_text(&self.health_url()).await?;
        if !status.is_success() {
            return Err(SearchError::Transport(format!(
                "unexpected HTTP status {}",
                status
            )));
        }
        serde_json::from_str(&body)
            .map_err(|e| SearchError::Transport(format!("invalid health body: {}", e)))
    }
}

#[cfg(test)]
#[path = "http_backend_test.rs"]
mod tests;
