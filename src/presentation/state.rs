// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::image_load::{ImageCells, ImageEvent, ImageEventError, ImageKey};
use crate::domain::services::result_view::{page_model, PageBody, PageModel};
use crate::domain::services::search_session::SearchSession;
use metrics_exporter_prometheus::PrometheusHandle;
use parking_lot::Mutex;
use std::sync::Arc;

/// 当前结果集的图片状态
#[derive(Default)]
struct ImageBoard {
    cells: ImageCells,
    /// 是否已按成功结果建立
    loaded: bool,
}

/// 路由共享状态
///
/// 会话是唯一的状态写入者；图片状态按结果代次单独保存。
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SearchSession>,
    images: Arc<Mutex<ImageBoard>>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(session: Arc<SearchSession>, metrics: Option<PrometheusHandle>) -> Self {
        Self {
            session,
            images: Arc::new(Mutex::new(ImageBoard::default())),
            metrics,
        }
    }

    /// 当前会话的页面模型，以及与之同一代次的图片状态
    pub fn page(&self) -> (PageModel, ImageCells) {
        let snapshot = self.session.snapshot();
        let page = page_model(&snapshot, self.session.mode());

        let mut board = self.images.lock();
        let stale = board.cells.generation() != page.generation;
        match &page.body {
            PageBody::Loaded { view } if stale || !board.loaded => {
                board.cells = ImageCells::for_view(page.generation, view);
                board.loaded = true;
            }
            PageBody::Loaded { .. } => {}
            _ if stale || board.loaded => {
                board.cells = ImageCells::empty(page.generation);
                board.loaded = false;
            }
            _ => {}
        }
        (page, board.cells.clone())
    }

    /// 应用浏览器上报的图片事件
    pub fn report_image(
        &self,
        generation: u64,
        key: ImageKey,
        event: ImageEvent,
    ) -> Result<bool, ImageEventError> {
        // 先让图片状态跟上会话
        self.page();
        self.images.lock().cells.apply(generation, key, event)
    }
}
