//! # Planner Forecast
//!
//! 需求預測引擎：按月彙總、趨勢、季節性、外推、信賴區間與準確度回測

pub mod accuracy;
pub mod aggregation;
pub mod confidence;
pub mod forecaster;
pub mod seasonality;
pub mod stats;
pub mod trend;

// Re-export 主要類型
pub use accuracy::{AccuracyAnalyzer, AccuracyLevel, AccuracyReport};
pub use aggregation::OrderAggregator;
pub use confidence::ConfidenceCalculator;
pub use forecaster::{ForecastEngine, ForecastPoint, ForecastResult};
pub use seasonality::{MonthIndex, SeasonalProfile, SeasonalStrength, SeasonalityAnalyzer};
pub use trend::{TrendAnalyzer, TrendDirection, TrendResult, TrendStrength};

use serde::{Deserialize, Serialize};

/// 預測警告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastWarning {
    /// 相關期間（整體性警告為 None）
    pub period: Option<planner_core::PeriodKey>,
    pub message: String,
    pub severity: WarningSeverity,
}

impl ForecastWarning {
    pub fn new(
        period: Option<planner_core::PeriodKey>,
        message: String,
        severity: WarningSeverity,
    ) -> Self {
        Self {
            period,
            message,
            severity,
        }
    }

    pub fn info(message: String) -> Self {
        Self::new(None, message, WarningSeverity::Info)
    }

    pub fn warning(period: Option<planner_core::PeriodKey>, message: String) -> Self {
        Self::new(period, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    Info,
    Warning,
}
