// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 页面视图模块
///
/// 把页面模型渲染为 HTML
pub mod page;
