//! # Planner Core
//!
//! 核心資料模型與類型定義

pub mod analysis;
pub mod config;
pub mod order;
pub mod period;

// Re-export 主要類型
pub use analysis::Analysis;
pub use config::{
    BatchConfig, ForecastConfig, MIN_ACCURACY_PERIODS, MIN_FORECAST_PERIODS, MIN_SEASONAL_PERIODS,
    MIN_TREND_PERIODS,
};
pub use order::{OrderFilter, OrderRecord, OrderStatus, UNKNOWN_MATERIAL};
pub use period::{PeriodKey, PeriodSummary};

/// 規劃引擎錯誤類型
///
/// 序列化後為 `{"error": "insufficient_data", "required": 6, "actual": 3}` 形式，供展示層直接使用。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum PlannerError {
    #[error("歷史資料不足: 需要 {required} 期，實際 {actual} 期")]
    InsufficientData { required: usize, actual: usize },

    #[error("無效的輸入: {reason}")]
    InvalidInput { reason: String },
}

pub type Result<T> = std::result::Result<T, PlannerError>;
