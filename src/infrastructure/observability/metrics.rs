// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::warn;

/// 初始化指标系统
///
/// 安装全局 Prometheus 记录器并注册客户端指标，返回用于渲染
/// `/metrics` 的句柄。记录器已被安装时返回 `None`。
pub fn init_metrics() -> Option<PrometheusHandle> {
    let handle = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            warn!("Failed to install Prometheus recorder: {}", e);
            return None;
        }
    };

    describe_counter!(
        "search_requests_total",
        Unit::Count,
        "Total number of searches sent to the backend"
    );
    describe_counter!(
        "search_failures_total",
        Unit::Count,
        "Total number of searches that ended in an error, by kind"
    );
    describe_counter!(
        "search_stale_responses_total",
        Unit::Count,
        "Search outcomes discarded because a newer search was submitted"
    );
    describe_counter!(
        "image_load_events_total",
        Unit::Count,
        "Image load events reported by the browser, by outcome"
    );

    Some(handle)
}
