//! 分析結果哨兵值

use serde::{Deserialize, Serialize};

/// 分析結果：資料足夠時為 `Available`，否則回傳所需與實際的期間數
///
/// 資料不足是正常狀態而非錯誤，呼叫端據此顯示「歷史資料不足」。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Analysis<T> {
    Available(T),
    InsufficientData { required: usize, actual: usize },
}

impl<T> Analysis<T> {
    /// 依樣本數判斷資料是否足夠，足夠時才執行計算
    pub fn require(actual: usize, required: usize, compute: impl FnOnce() -> T) -> Self {
        if actual < required {
            Analysis::InsufficientData { required, actual }
        } else {
            Analysis::Available(compute())
        }
    }

    /// 是否有結果
    pub fn is_available(&self) -> bool {
        matches!(self, Analysis::Available(_))
    }

    /// 取得結果參照
    pub fn as_available(&self) -> Option<&T> {
        match self {
            Analysis::Available(value) => Some(value),
            Analysis::InsufficientData { .. } => None,
        }
    }

    /// 轉換結果
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Analysis<U> {
        match self {
            Analysis::Available(value) => Analysis::Available(f(value)),
            Analysis::InsufficientData { required, actual } => {
                Analysis::InsufficientData { required, actual }
            }
        }
    }
}
