// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含与外部系统交互的技术实现：
/// - 可观测性（observability）：Prometheus 指标记录器
/// - 搜索后端（search）：领域搜索接口的 HTTP 实现
///
/// 基础设施层依赖于领域层的抽象接口，领域层不感知这些实现。
pub mod observability;
pub mod search;
