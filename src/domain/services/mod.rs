// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 搜索会话（search_session）：请求生命周期状态机，带序号防护
/// - 结果视图（result_view）：从结果负载派生渲染模型的纯函数
/// - 图片加载（image_load）：每张图片独立的加载状态机
pub mod image_load;
pub mod result_view;
pub mod search_session;

#[cfg(test)]
pub(crate) mod fixtures;
