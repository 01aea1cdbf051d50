//! 信賴區間

use planner_core::PeriodSummary;

use crate::forecaster::ForecastPoint;
use crate::stats;

/// 95% 常態近似倍數
pub const Z_95: f64 = 1.96;

/// 單步誤差從此索引開始計算
const FIRST_ERROR_INDEX: usize = 2;

/// 信賴區間計算器
pub struct ConfidenceCalculator;

impl ConfidenceCalculator {
    /// 以歷史單步樸素預測誤差為預測點加上 95% 區間
    pub fn confidence_intervals(
        points: &[ForecastPoint],
        periods: &[PeriodSummary],
    ) -> Vec<ForecastPoint> {
        let std_dev = Self::naive_error_std_dev(periods);
        Self::apply(points, std_dev, Z_95)
    }

    /// 樸素預測（上一期實際值）絕對誤差的標準差
    ///
    /// 誤差取 `|actual[i] - actual[i-1]|`，`i >= 2`；樣本不足時為 0。
    pub fn naive_error_std_dev(periods: &[PeriodSummary]) -> f64 {
        let errors: Vec<f64> = (FIRST_ERROR_INDEX..periods.len())
            .map(|i| (periods[i].total_weight - periods[i - 1].total_weight).abs())
            .collect();

        stats::population_std_dev(&errors)
    }

    /// 套用 `value ± z × std_dev`，下界不低於 0
    pub fn apply(points: &[ForecastPoint], std_dev: f64, z: f64) -> Vec<ForecastPoint> {
        let margin = z * std_dev;

        points
            .iter()
            .map(|point| ForecastPoint {
                lower_bound: (point.forecast_value - margin).max(0.0),
                upper_bound: point.forecast_value + margin,
                ..point.clone()
            })
            .collect()
    }
}
