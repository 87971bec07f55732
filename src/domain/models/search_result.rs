// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::match_mode::MatchMode;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// 命中策略
///
/// 后端在某个站点上产生命中的匹配方式。声明顺序即徽章展示顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMethod {
    Title,
    Url,
    Alt,
    Text,
    /// 未知的策略名，展示时忽略
    #[serde(other)]
    Other,
}

/// 单张图片
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    pub src: String,
    #[serde(default)]
    pub alt: String,
}

/// 单个来源站点的分组结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteResult {
    pub site_id: u64,
    pub site_name: String,
    pub site_url: String,
    #[serde(default)]
    pub site_emoji: String,
    #[serde(default)]
    pub methods: BTreeSet<SearchMethod>,
    #[serde(default)]
    pub matched_words: Vec<String>,
    #[serde(default)]
    pub images: Vec<ImageResult>,
}

/// 一次搜索的完整响应
///
/// 只由成功的后端响应产生，下一次搜索的结果整体替换它，从不原地修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub query: Option<String>,
    pub total_sites: u32,
    pub total_images: u32,
    #[serde(default)]
    pub search_mode: MatchMode,
    #[serde(default)]
    pub query_words: Vec<String>,
    #[serde(rename = "results", alias = "sites", default)]
    pub sites: Vec<SiteResult>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub methods_count: BTreeMap<String, u32>,
}

/// 响应计数与内容不一致的情况
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyIssue {
    SiteCount { declared: u32, actual: usize },
    ImageCount { declared: u32, actual: usize },
    SitesWithoutImages { sites: usize },
}

impl SearchResult {
    /// 所有站点图片数之和
    pub fn image_count(&self) -> usize {
        self.sites.iter().map(|s| s.images.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_images == 0
    }

    /// 检查计数不变量
    ///
    /// `total_images` 等于各站点图片数之和，`total_sites` 等于站点数，
    /// 零图片时站点列表为空。
    pub fn check_consistency(&self) -> Vec<ConsistencyIssue> {
        let mut issues = Vec::new();
        if self.total_sites as usize != self.sites.len() {
            issues.push(ConsistencyIssue::SiteCount {
                declared: self.total_sites,
                actual: self.sites.len(),
            });
        }
        let images = self.image_count();
        if self.total_images as usize != images {
            issues.push(ConsistencyIssue::ImageCount {
                declared: self.total_images,
                actual: images,
            });
        }
        if self.total_images == 0 && !self.sites.is_empty() {
            issues.push(ConsistencyIssue::SitesWithoutImages {
                sites: self.sites.len(),
            });
        }
        issues
    }
}

/// 后端健康检查响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendHealth {
    pub status: String,
    #[serde(default)]
    pub message: String,
}
