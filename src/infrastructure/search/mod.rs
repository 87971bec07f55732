// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 搜索后端模块
///
/// 提供基于 reqwest 的图片搜索后端 HTTP 客户端
pub mod http_backend;

pub use http_backend::{BackendInitError, HttpSearchBackend};
