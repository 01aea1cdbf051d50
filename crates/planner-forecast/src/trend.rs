//! 線性趨勢分析（最小平方法）

use planner_core::{Analysis, PeriodSummary, MIN_TREND_PERIODS};
use serde::{Deserialize, Serialize};

/// 斜率絕對值低於此值視為平穩
pub const STABLE_SLOPE: f64 = 0.1;

/// 趨勢方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

/// 趨勢強度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendStrength {
    Weak,
    Moderate,
    Strong,
}

/// 趨勢擬合結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub direction: TrendDirection,
    pub slope: f64,
    pub intercept: f64,
    /// 判定係數，範圍 [0, 1]
    pub r_squared: f64,
    pub strength: TrendStrength,
}

impl TrendResult {
    /// 用於外推的斜率（平穩時為 0）
    pub fn effective_slope(&self) -> f64 {
        match self.direction {
            TrendDirection::Stable => 0.0,
            _ => self.slope,
        }
    }
}

/// 趨勢分析器
pub struct TrendAnalyzer;

impl TrendAnalyzer {
    /// 以序號為 x、總重量為 y 擬合直線
    pub fn fit_trend(periods: &[PeriodSummary]) -> Analysis<TrendResult> {
        let values: Vec<f64> = periods.iter().map(|p| p.total_weight).collect();
        Self::fit_values(&values)
    }

    /// 對任意序列擬合直線
    pub fn fit_values(values: &[f64]) -> Analysis<TrendResult> {
        Analysis::require(values.len(), MIN_TREND_PERIODS, || Self::least_squares(values))
    }

    fn least_squares(values: &[f64]) -> TrendResult {
        let n = values.len() as f64;

        let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
        for (i, &y) in values.iter().enumerate() {
            let x = i as f64;
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_x2 += x * x;
        }

        // n >= 2 且 x 互不相同，分母恆正
        let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x);
        let intercept = (sum_y - slope * sum_x) / n;

        let mean_y = sum_y / n;
        let (mut ss_res, mut ss_tot) = (0.0, 0.0);
        for (i, &y) in values.iter().enumerate() {
            let predicted = slope * i as f64 + intercept;
            ss_res += (y - predicted).powi(2);
            ss_tot += (y - mean_y).powi(2);
        }

        let r_squared = if ss_tot > 0.0 {
            (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
        } else if ss_res <= f64::EPSILON {
            1.0
        } else {
            0.0
        };

        TrendResult {
            direction: Self::classify_direction(slope),
            slope,
            intercept,
            r_squared,
            strength: Self::classify_strength(slope),
        }
    }

    /// 判定趨勢方向
    pub fn classify_direction(slope: f64) -> TrendDirection {
        if slope.abs() < STABLE_SLOPE {
            TrendDirection::Stable
        } else if slope > 0.0 {
            TrendDirection::Increasing
        } else {
            TrendDirection::Decreasing
        }
    }

    /// 判定趨勢強度
    pub fn classify_strength(slope: f64) -> TrendStrength {
        let magnitude = slope.abs();
        if magnitude > 1.0 {
            TrendStrength::Strong
        } else if magnitude > 0.5 {
            TrendStrength::Moderate
        } else {
            TrendStrength::Weak
        }
    }
}
