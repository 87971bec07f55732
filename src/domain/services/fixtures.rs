// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 单元测试共用的搜索结果构造函数

use crate::domain::models::match_mode::MatchMode;
use crate::domain::models::search_result::{ImageResult, SearchMethod, SearchResult, SiteResult};
use std::collections::{BTreeMap, BTreeSet};

pub fn site(id: u64, name: &str, methods: &[SearchMethod], images: usize) -> SiteResult {
    SiteResult {
        site_id: id,
        site_name: name.to_string(),
        site_url: format!("http://localhost:8000/site{}/index.html", id),
        site_emoji: "🐱".to_string(),
        methods: methods.iter().copied().collect::<BTreeSet<_>>(),
        matched_words: vec![],
        images: (0..images)
            .map(|i| ImageResult {
                src: format!("http://localhost:8000/site{}/img{}.jpg", id, i),
                alt: format!("{} {}", name, i),
            })
            .collect(),
    }
}

pub fn result(query_words: &[&str], mode: MatchMode, sites: Vec<SiteResult>) -> SearchResult {
    let total_images = sites.iter().map(|s| s.images.len() as u32).sum();
    SearchResult {
        query: Some(query_words.join(" ")),
        total_sites: sites.len() as u32,
        total_images,
        search_mode: mode,
        query_words: query_words.iter().map(|w| w.to_string()).collect(),
        sites,
        suggestions: vec![],
        methods_count: BTreeMap::new(),
    }
}

pub fn empty(query_words: &[&str], suggestions: &[&str]) -> SearchResult {
    let mut empty = result(query_words, MatchMode::Any, vec![]);
    empty.suggestions = suggestions.iter().map(|s| s.to_string()).collect();
    empty
}

/// "chat" 查询：两个站点共 5 张图片
pub fn chat_result() -> SearchResult {
    result(
        &["chat"],
        MatchMode::Any,
        vec![
            site(1, "Chats", &[SearchMethod::Title, SearchMethod::Alt], 3),
            site(6, "Animaux Sauvages", &[SearchMethod::Text], 2),
        ],
    )
}
