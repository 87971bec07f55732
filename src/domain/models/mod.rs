// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了客户端的核心数据结构，包括：
/// - 匹配模式（match_mode）：多关键词的 OR / AND 匹配方式
/// - 搜索结果（search_result）：后端返回的按站点分组的图片结果
///
/// 这些模型与后端的 JSON 约定一一对应，渲染层不直接依赖它们，
/// 而是通过结果视图派生出的渲染模型。
pub mod match_mode;
pub mod search_result;
