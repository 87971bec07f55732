// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::match_mode::MatchMode;
use crate::domain::models::search_result::{BackendHealth, SearchResult};
use async_trait::async_trait;
use thiserror::Error;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search term";
pub const TRANSPORT_MESSAGE: &str =
    "Cannot reach the search server. Check that the backend is running.";
pub const CANCELLED_MESSAGE: &str = "The search was interrupted";

/// 搜索错误分类
///
/// 空结果不是错误，单张图片加载失败也不会上升到这一层。
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// 查询为空或只含空白，本地检测，不发起请求
    #[error("Empty query")]
    EmptyQuery,
    /// 请求没有到达服务器，或响应无法解析
    #[error("Transport error: {0}")]
    Transport(String),
    /// 服务器返回了显式的错误字段
    #[error("Server error: {0}")]
    Server(String),
    /// 请求在完成前被放弃
    #[error("Search cancelled")]
    Cancelled,
}

impl SearchError {
    /// 展示给用户的文本
    ///
    /// 服务器消息原样展示，传输错误的细节只进日志。
    pub fn user_message(&self) -> &str {
        match self {
            SearchError::EmptyQuery => EMPTY_QUERY_MESSAGE,
            SearchError::Transport(_) => TRANSPORT_MESSAGE,
            SearchError::Server(message) => message,
            SearchError::Cancelled => CANCELLED_MESSAGE,
        }
    }

    /// 指标标签
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::EmptyQuery => "validation",
            SearchError::Transport(_) => "transport",
            SearchError::Server(_) => "server",
            SearchError::Cancelled => "cancelled",
        }
    }
}

/// 搜索后端接口
///
/// 会话只通过这个接口访问后端，测试中可以替换为 mock。
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// 执行一次搜索，`query` 已经去除首尾空白且非空
    async fn search(&self, query: &str, mode: MatchMode) -> Result<SearchResult, SearchError>;

    /// 检查后端是否在线
    async fn health(&self) -> Result<BackendHealth, SearchError>;
}
