// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 多关键词匹配模式
///
/// `Any` 表示至少匹配一个关键词，`All` 表示必须匹配全部关键词。
/// 线上传输值为后端约定的 `OR` / `AND`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MatchMode {
    #[default]
    #[serde(rename = "OR")]
    Any,
    #[serde(rename = "AND")]
    All,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown match mode: {0}")]
pub struct ParseMatchModeError(pub String);

impl MatchMode {
    /// 后端查询参数使用的值
    pub fn wire_value(self) -> &'static str {
        match self {
            MatchMode::Any => "OR",
            MatchMode::All => "AND",
        }
    }

    /// 统计栏使用的短标签
    pub fn short_label(self) -> &'static str {
        match self {
            MatchMode::Any => "OR",
            MatchMode::All => "AND",
        }
    }

    /// 模式切换按钮使用的完整标签
    pub fn label(self) -> &'static str {
        match self {
            MatchMode::Any => "OR (any word)",
            MatchMode::All => "AND (all words)",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_value())
    }
}

impl FromStr for MatchMode {
    type Err = ParseMatchModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" | "or" | "ou" => Ok(MatchMode::Any),
            "all" | "and" | "et" => Ok(MatchMode::All),
            other => Err(ParseMatchModeError(other.to_string())),
        }
    }
}
