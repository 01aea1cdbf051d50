//! 預測準確度回測（樸素單步預測）

use planner_core::{Analysis, PeriodSummary, MIN_ACCURACY_PERIODS};
use serde::{Deserialize, Serialize};

use crate::stats;

/// 回測從此索引開始，確保至少有三期歷史
const FIRST_BACKTEST_INDEX: usize = 3;

/// 所有實際值皆為 0、無法計算比例誤差時回報的 MAPE
const UNDEFINED_MAPE: f64 = 100.0;

/// 準確度等級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyLevel {
    High,
    Medium,
    Low,
}

/// 回測報告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    /// 平均誤差（實際 - 預測）
    pub mean_error: f64,

    /// 平均絕對誤差
    pub mean_absolute_error: f64,

    /// 平均絕對百分比誤差（%）
    pub mape: f64,

    pub accuracy: AccuracyLevel,

    /// 參與回測的期數
    pub samples: usize,
}

/// 準確度分析器
pub struct AccuracyAnalyzer;

impl AccuracyAnalyzer {
    /// 以上一期實際值作為預測，回測尾段資料（需至少 4 期）
    pub fn evaluate(periods: &[PeriodSummary]) -> Analysis<AccuracyReport> {
        Analysis::require(periods.len(), MIN_ACCURACY_PERIODS, || Self::backtest(periods))
    }

    fn backtest(periods: &[PeriodSummary]) -> AccuracyReport {
        let mut errors = Vec::new();
        let mut percentage_errors = Vec::new();

        for i in FIRST_BACKTEST_INDEX..periods.len() {
            let actual = periods[i].total_weight;
            let predicted = periods[i - 1].total_weight;
            let error = actual - predicted;

            errors.push(error);
            if actual != 0.0 {
                percentage_errors.push(error.abs() / actual * 100.0);
            }
        }

        let absolute: Vec<f64> = errors.iter().map(|e| e.abs()).collect();
        let mape = if percentage_errors.is_empty() {
            UNDEFINED_MAPE
        } else {
            stats::mean(&percentage_errors)
        };

        AccuracyReport {
            mean_error: stats::mean(&errors),
            mean_absolute_error: stats::mean(&absolute),
            mape,
            accuracy: Self::classify(mape),
            samples: errors.len(),
        }
    }

    /// MAPE < 10 為高、< 20 為中，其餘為低
    pub fn classify(mape: f64) -> AccuracyLevel {
        if mape < 10.0 {
            AccuracyLevel::High
        } else if mape < 20.0 {
            AccuracyLevel::Medium
        } else {
            AccuracyLevel::Low
        }
    }
}
