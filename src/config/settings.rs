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

use crate::domain::models::match_mode::{MatchMode, ParseMatchModeError};
use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含客户端服务器、搜索后端、默认搜索模式和指标等配置项
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 搜索后端配置
    pub backend: BackendSettings,
    /// 搜索配置
    pub search: SearchSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 搜索后端配置设置
#[derive(Debug, Deserialize)]
pub struct BackendSettings {
    /// 后端根地址，例如 http://localhost:5000
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl BackendSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// 搜索配置设置
#[derive(Debug, Deserialize)]
pub struct SearchSettings {
    /// 会话初始匹配模式（any / all）
    pub default_mode: String,
}

impl SearchSettings {
    pub fn default_mode(&self) -> Result<MatchMode, ConfigError> {
        self.default_mode
            .parse()
            .map_err(|e: ParseMatchModeError| ConfigError::Message(e.to_string()))
    }
}

/// 指标配置设置
#[derive(Debug, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 /metrics
    pub enabled: bool,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}` 和
    /// `IMGSEARCH__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        let builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("IMGSEARCH").separator("__"));

        Self::from_config(builder.build()?)
    }

    /// 带默认值的配置构建器
    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("backend.base_url", "http://localhost:5000")?
            .set_default("backend.timeout_secs", 10)?
            .set_default("search.default_mode", "any")?
            .set_default("metrics.enabled", true)
    }

    /// 从已构建的配置反序列化并校验
    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let settings: Settings = config.try_deserialize()?;
        settings.search.default_mode()?;
        if settings.backend.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "backend.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(settings)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
