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

use imgsearch::config::settings::Settings;
use imgsearch::domain::search::backend::SearchBackend;
use imgsearch::domain::services::search_session::SearchSession;
use imgsearch::infrastructure::observability::metrics::init_metrics;
use imgsearch::infrastructure::search::HttpSearchBackend;
use imgsearch::presentation::routes;
use imgsearch::presentation::state::AppState;
use imgsearch::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// 主函数
///
/// 加载配置，连接搜索后端并启动页面服务。单线程运行时即可满足
/// 单个会话的需求。
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting imgsearch...");

    // 2. Load configuration
    let settings = Settings::new()?;
    let default_mode = settings.search.default_mode()?;
    info!("Configuration loaded");

    // 3. Metrics
    let metrics = if settings.metrics.enabled {
        init_metrics()
    } else {
        None
    };

    // 4. Search backend
    let backend = HttpSearchBackend::new(&settings.backend.base_url, settings.backend.timeout())?;
    info!(base_url = backend.base_url(), "Search backend configured");
    if let Err(e) = backend.health().await {
        warn!(error = %e, "Search backend is not reachable yet");
    }

    // 5. Session and routes
    let session = Arc::new(SearchSession::with_mode(Arc::new(backend), default_mode));
    let app = routes::routes(AppState::new(session, metrics));

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
