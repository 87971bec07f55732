// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::result_view::RenderModel;
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

pub const IMAGE_UNAVAILABLE: &str = "Image unavailable";

/// 单张图片的加载状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageLoadState {
    #[default]
    Pending,
    Loaded,
    Failed,
}

/// 图片的展示方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImagePresentation {
    /// 加载中的占位
    Placeholder,
    /// 真实图片
    Image,
    /// 固定的"图片不可用"提示
    Unavailable,
}

/// 单张图片的加载状态机
///
/// `Pending` 到 `Loaded` 或 `Failed` 之后不再变化，失败的图片不会自动重试。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageLoadCell {
    state: ImageLoadState,
}

impl ImageLoadCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ImageLoadState {
        self.state
    }

    /// 返回是否发生了状态转换
    pub fn mark_loaded(&mut self) -> bool {
        self.transition(ImageLoadState::Loaded)
    }

    pub fn mark_failed(&mut self) -> bool {
        self.transition(ImageLoadState::Failed)
    }

    fn transition(&mut self, next: ImageLoadState) -> bool {
        if self.state != ImageLoadState::Pending {
            return false;
        }
        self.state = next;
        true
    }

    pub fn presentation(&self) -> ImagePresentation {
        match self.state {
            ImageLoadState::Pending => ImagePresentation::Placeholder,
            ImageLoadState::Loaded => ImagePresentation::Image,
            ImageLoadState::Failed => ImagePresentation::Unavailable,
        }
    }
}

/// 浏览器上报的图片事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEvent {
    Loaded,
    Failed,
}

impl ImageEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageEvent::Loaded => "loaded",
            ImageEvent::Failed => "failed",
        }
    }
}

impl FromStr for ImageEvent {
    type Err = ImageEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "loaded" => Ok(ImageEvent::Loaded),
            "failed" => Ok(ImageEvent::Failed),
            other => Err(ImageEventError::UnknownEvent(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ImageKey {
    /// 站点在渲染模型中的下标
    pub site: usize,
    /// 图片在站点内的下标
    pub image: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageEventError {
    #[error("Stale image event for generation {got}, current is {current}")]
    StaleGeneration { got: u64, current: u64 },
    #[error("Unknown image {site}/{image}")]
    UnknownImage { site: usize, image: usize },
    #[error("Unknown image event: {0}")]
    UnknownEvent(String),
}

/// 一个结果集中所有图片的加载状态
///
/// 每张图片一个独立的状态机，某张图片失败不影响其他图片或站点计数。
#[derive(Debug, Clone, Default)]
pub struct ImageCells {
    generation: u64,
    sites: Vec<Vec<ImageLoadCell>>,
}

impl ImageCells {
    /// 为渲染模型中的每张图片创建 `Pending` 状态
    pub fn for_view(generation: u64, view: &RenderModel) -> Self {
        let sites = match view {
            RenderModel::Empty(_) => Vec::new(),
            RenderModel::Results(results) => results
                .sites
                .iter()
                .map(|site| vec![ImageLoadCell::new(); site.images.len()])
                .collect(),
        };
        Self { generation, sites }
    }

    /// 没有任何图片的代次，用于非成功状态
    pub fn empty(generation: u64) -> Self {
        Self {
            generation,
            sites: Vec::new(),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.sites.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, key: ImageKey) -> Option<&ImageLoadCell> {
        self.sites.get(key.site)?.get(key.image)
    }

    pub fn state(&self, key: ImageKey) -> ImageLoadState {
        self.get(key).map(ImageLoadCell::state).unwrap_or_default()
    }

    pub fn presentation(&self, key: ImageKey) -> ImagePresentation {
        self.get(key)
            .map(ImageLoadCell::presentation)
            .unwrap_or(ImagePresentation::Placeholder)
    }

    /// 应用一次图片事件
    ///
    /// 返回是否发生了状态转换；已经到达终态的图片忽略后续事件。
    pub fn apply(
        &mut self,
        generation: u64,
        key: ImageKey,
        event: ImageEvent,
    ) -> Result<bool, ImageEventError> {
        if generation != self.generation {
            return Err(ImageEventError::StaleGeneration {
                got: generation,
                current: self.generation,
            });
        }
        let cell = self
            .sites
            .get_mut(key.site)
            .and_then(|site| site.get_mut(key.image))
            .ok_or(ImageEventError::UnknownImage {
                site: key.site,
                image: key.image,
            })?;
        Ok(match event {
            ImageEvent::Loaded => cell.mark_loaded(),
            ImageEvent::Failed => cell.mark_failed(),
        })
    }

    pub fn failed_count(&self) -> usize {
        self.sites
            .iter()
            .flatten()
            .filter(|cell| cell.state() == ImageLoadState::Failed)
            .count()
    }
}
