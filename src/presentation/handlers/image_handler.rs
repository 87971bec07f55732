// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use metrics::counter;
use tracing::debug;

use crate::domain::services::image_load::{ImageEvent, ImageKey};
use crate::presentation::errors::AppError;
use crate::presentation::state::AppState;

/// 浏览器上报单张图片的加载结果
///
/// # 返回值
///
/// * `204` - 事件已处理（终态图片上的重复事件同样返回 204）
/// * `409` - 事件属于已被替换的结果集
/// * `404` - 图片不存在
/// * `400` - 未知事件
pub async fn report_image(
    State(state): State<AppState>,
    Path((generation, site, image, event)): Path<(u64, usize, usize, String)>,
) -> Result<StatusCode, AppError> {
    let event: ImageEvent = event.parse()?;
    let key = ImageKey { site, image };
    let changed = state.report_image(generation, key, event)?;
    if changed {
        counter!("image_load_events_total", "outcome" => event.as_str()).increment(1);
    }
    debug!(generation, site, image, event = event.as_str(), changed, "Image event");
    Ok(StatusCode::NO_CONTENT)
}
