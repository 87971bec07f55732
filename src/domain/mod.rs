// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含客户端的核心逻辑，包括：
/// - 领域模型（models）：搜索结果和匹配模式
/// - 搜索接口（search）：后端抽象和错误分类
/// - 服务（services）：搜索会话状态机、结果视图派生和图片加载状态
///
/// 领域层不依赖于任何外部实现，HTTP 和渲染细节都在外层。
pub mod models;
pub mod search;
pub mod services;
