// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含搜索结果模型、后端接口、搜索会话和结果视图
pub mod domain;

/// 基础设施模块
///
/// 提供搜索后端的 HTTP 客户端和指标
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和页面渲染
pub mod presentation;

/// 工具模块
///
/// 提供日志初始化
pub mod utils;
