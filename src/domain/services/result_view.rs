// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::match_mode::MatchMode;
use crate::domain::models::search_result::{SearchMethod, SearchResult, SiteResult};
use crate::domain::services::search_session::{SessionSnapshot, SessionState};
use serde::Serialize;

pub const NO_RESULTS_HINT: &str = "Try another search term";
pub const NO_DESCRIPTION: &str = "No description";

/// 空闲页面提供的起始查询
pub const STARTER_QUERIES: [&str; 9] = [
    "chat",
    "Ferrari",
    "voiture rouge",
    "chat noir",
    "pizza",
    "lion nature",
    "astronaut space",
    "surf",
    "piano musique",
];

/// 可点击的建议，激活时以 `query` 重新提交
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub method: SearchMethod,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageView {
    pub src: String,
    pub alt: String,
    /// alt 为空时显示占位描述
    pub caption: String,
    pub site_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteView {
    pub site_id: u64,
    pub name: String,
    pub emoji: String,
    pub url: String,
    pub badges: Vec<Badge>,
    pub matched_summary: Option<String>,
    pub image_count_label: String,
    pub images: Vec<ImageView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsView {
    pub query: String,
    pub sites_label: String,
    pub images_label: String,
    pub mode_label: &'static str,
    /// 只有多个关键词时才展示
    pub query_words: Vec<String>,
    pub sites: Vec<SiteView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyView {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
    /// 没有建议时的通用提示
    pub hint: Option<&'static str>,
}

/// 从结果负载派生出的渲染模型
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderModel {
    Empty(EmptyView),
    Results(ResultsView),
}

impl RenderModel {
    pub fn site_count(&self) -> usize {
        match self {
            RenderModel::Empty(_) => 0,
            RenderModel::Results(view) => view.sites.len(),
        }
    }

    pub fn image_count(&self) -> usize {
        match self {
            RenderModel::Empty(_) => 0,
            RenderModel::Results(view) => view.sites.iter().map(|s| s.images.len()).sum(),
        }
    }
}

pub fn pluralize<'a>(count: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if count > 1 {
        plural
    } else {
        singular
    }
}

/// "1 image"、"3 images" 形式的计数文本
pub fn count_label(count: usize, noun: &str) -> String {
    let plural = format!("{}s", noun);
    format!("{} {}", count, pluralize(count, noun, &plural))
}

pub fn badge_label(method: SearchMethod) -> Option<&'static str> {
    match method {
        SearchMethod::Title => Some("Title"),
        SearchMethod::Url => Some("URL"),
        SearchMethod::Alt => Some("Alt"),
        SearchMethod::Text => Some("Text"),
        SearchMethod::Other => None,
    }
}

fn site_view(site: &SiteResult) -> SiteView {
    let badges = site
        .methods
        .iter()
        .filter_map(|&method| badge_label(method).map(|label| Badge { method, label }))
        .collect();

    let matched_summary = if site.matched_words.is_empty() {
        None
    } else {
        Some(format!("Found: {}", site.matched_words.join(", ")))
    };

    let images = site
        .images
        .iter()
        .map(|image| ImageView {
            src: image.src.clone(),
            alt: image.alt.clone(),
            caption: if image.alt.is_empty() {
                NO_DESCRIPTION.to_string()
            } else {
                image.alt.clone()
            },
            site_url: site.site_url.clone(),
        })
        .collect();

    SiteView {
        site_id: site.site_id,
        name: site.site_name.clone(),
        emoji: site.site_emoji.clone(),
        url: site.site_url.clone(),
        badges,
        matched_summary,
        image_count_label: count_label(site.images.len(), "image"),
        images,
    }
}

/// 从结果负载派生渲染模型
///
/// 纯函数。保持站点和图片的输入顺序，不排序也不去重。
/// 模式标签取自提交时的 `mode`，不看负载里的 `search_mode`。
pub fn derive_view(result: &SearchResult, submitted_query: &str, mode: MatchMode) -> RenderModel {
    if result.total_images == 0 {
        let suggestions: Vec<Suggestion> = result
            .suggestions
            .iter()
            .map(|s| Suggestion { query: s.clone() })
            .collect();
        let hint = suggestions.is_empty().then_some(NO_RESULTS_HINT);
        return RenderModel::Empty(EmptyView {
            query: submitted_query.to_string(),
            suggestions,
            hint,
        });
    }

    let query_words = if result.query_words.len() > 1 {
        result.query_words.clone()
    } else {
        Vec::new()
    };

    RenderModel::Results(ResultsView {
        query: submitted_query.to_string(),
        sites_label: count_label(result.total_sites as usize, "site"),
        images_label: count_label(result.total_images as usize, "image"),
        mode_label: mode.short_label(),
        query_words,
        sites: result.sites.iter().map(site_view).collect(),
    })
}

pub fn welcome_suggestions() -> Vec<Suggestion> {
    STARTER_QUERIES
        .iter()
        .map(|q| Suggestion {
            query: q.to_string(),
        })
        .collect()
}

/// 整页内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageBody {
    Welcome { suggestions: Vec<Suggestion> },
    Loading { query: String },
    Failed { query: String, message: String },
    Loaded { view: RenderModel },
}

/// 会话任意状态对应的页面模型
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageModel {
    pub generation: u64,
    /// 会话当前选择的匹配模式
    pub mode: MatchMode,
    pub loading: bool,
    pub body: PageBody,
}

pub fn page_model(snapshot: &SessionSnapshot, mode: MatchMode) -> PageModel {
    let body = match &snapshot.state {
        SessionState::Idle => PageBody::Welcome {
            suggestions: welcome_suggestions(),
        },
        SessionState::Loading { query, .. } => PageBody::Loading {
            query: query.clone(),
        },
        SessionState::Error { query, error } => PageBody::Failed {
            query: query.clone(),
            message: error.user_message().to_string(),
        },
        SessionState::Success {
            query,
            mode: submitted,
            result,
        } => PageBody::Loaded {
            view: derive_view(result, query, *submitted),
        },
    };

    PageModel {
        generation: snapshot.generation,
        mode,
        loading: snapshot.state.is_loading(),
        body,
    }
}
