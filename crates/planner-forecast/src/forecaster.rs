//! 預測主引擎

use planner_core::{Analysis, ForecastConfig, PeriodKey, PeriodSummary, PlannerError};
use serde::{Deserialize, Serialize};

use crate::accuracy::{AccuracyAnalyzer, AccuracyReport};
use crate::confidence::ConfidenceCalculator;
use crate::seasonality::{SeasonalProfile, SeasonalityAnalyzer};
use crate::stats;
use crate::trend::{TrendAnalyzer, TrendResult};
use crate::{AccuracyLevel, ForecastWarning};

/// 單一預測點
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// 預測期間
    pub period: PeriodKey,

    /// 預測值（不為負）
    pub forecast_value: f64,

    /// 95% 區間下界
    pub lower_bound: f64,

    /// 95% 區間上界
    pub upper_bound: f64,

    /// 趨勢分量
    pub trend_component: f64,

    /// 季節乘數
    pub seasonal_component: f64,
}

/// 完整預測結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// 歷史期間彙總
    pub history: Vec<PeriodSummary>,

    pub trend: Analysis<TrendResult>,

    pub seasonality: Analysis<SeasonalProfile>,

    /// 含信賴區間的預測點
    pub points: Vec<ForecastPoint>,

    pub accuracy: Analysis<AccuracyReport>,

    /// 單步預測誤差的標準差
    pub error_std_dev: f64,

    pub confidence_level: f64,

    pub horizon: u32,

    /// 離群期間、季節性不足等提示
    pub warnings: Vec<ForecastWarning>,
}

/// 預測引擎
pub struct ForecastEngine {
    config: ForecastConfig,
}

impl ForecastEngine {
    /// 創建預測引擎
    pub fn new(config: ForecastConfig) -> Self {
        Self { config }
    }

    /// 執行完整預測流程：趨勢 → 季節性 → 外推 → 信賴區間 → 回測
    ///
    /// 期間數不足 `min_periods` 時回傳 `InsufficientData`，不做任何計算。
    pub fn run(&self, periods: &[PeriodSummary], horizon: u32) -> planner_core::Result<ForecastResult> {
        if periods.len() < self.config.min_periods {
            tracing::info!(
                "歷史資料不足，無法預測：需要 {} 期，實際 {} 期",
                self.config.min_periods,
                periods.len()
            );
            return Err(PlannerError::InsufficientData {
                required: self.config.min_periods,
                actual: periods.len(),
            });
        }

        tracing::info!("開始預測：歷史 {} 期，預測 {} 期", periods.len(), horizon);
        let start_time = std::time::Instant::now();

        tracing::debug!("Step 1: 趨勢擬合");
        let trend = TrendAnalyzer::fit_trend(periods);

        tracing::debug!("Step 2: 季節性分析");
        let seasonality = SeasonalityAnalyzer::analyze_seasonality(periods);

        tracing::debug!("Step 3: 外推");
        let raw_points = Self::forecast(periods, horizon, &trend, &seasonality);

        tracing::debug!("Step 4: 信賴區間");
        let error_std_dev = ConfidenceCalculator::naive_error_std_dev(periods);
        let points =
            ConfidenceCalculator::apply(&raw_points, error_std_dev, self.config.confidence_z);

        tracing::debug!("Step 5: 準確度回測");
        let accuracy = AccuracyAnalyzer::evaluate(periods);

        let warnings = Self::collect_warnings(periods, &seasonality, &accuracy);

        tracing::info!("預測完成，耗時 {:?}", start_time.elapsed());
        tracing::info!("預測點數量: {}，警告 {} 筆", points.len(), warnings.len());

        Ok(ForecastResult {
            history: periods.to_vec(),
            trend,
            seasonality,
            points,
            accuracy,
            error_std_dev,
            confidence_level: 0.95,
            horizon,
            warnings,
        })
    }

    fn collect_warnings(
        periods: &[PeriodSummary],
        seasonality: &Analysis<SeasonalProfile>,
        accuracy: &Analysis<AccuracyReport>,
    ) -> Vec<ForecastWarning> {
        let mut warnings: Vec<ForecastWarning> = periods
            .iter()
            .filter(|p| p.is_outlier)
            .map(|p| {
                ForecastWarning::warning(
                    Some(p.period),
                    format!("期間 {} 為離群值 (z = {:.2})", p.period, p.z_score),
                )
            })
            .collect();

        if let Analysis::InsufficientData { required, actual } = seasonality {
            warnings.push(ForecastWarning::info(format!(
                "季節性未套用：需要 {} 期，實際 {} 期",
                required, actual
            )));
        }

        if let Some(report) = accuracy.as_available() {
            if report.accuracy == AccuracyLevel::Low {
                warnings.push(ForecastWarning::warning(
                    None,
                    format!("回測準確度偏低 (MAPE {:.1}%)", report.mape),
                ));
            }
        }

        warnings
    }

    /// 由趨勢與季節指數外推 `horizon` 期
    ///
    /// 產生的點上下界等於預測值，需再經 [`ConfidenceCalculator`] 套用區間。
    pub fn forecast(
        periods: &[PeriodSummary],
        horizon: u32,
        trend: &Analysis<TrendResult>,
        seasonality: &Analysis<SeasonalProfile>,
    ) -> Vec<ForecastPoint> {
        let Some(last) = periods.last() else {
            return Vec::new();
        };

        let weights: Vec<f64> = periods.iter().map(|p| p.total_weight).collect();
        let base = stats::mean(&weights);
        let slope = trend.as_available().map_or(0.0, TrendResult::effective_slope);
        let history_len = periods.len() as f64;

        (1..=horizon)
            .map(|i| {
                let period = last.period.advance(i);

                let trend_component = if slope != 0.0 {
                    base + slope * (history_len + i as f64 - 1.0)
                } else {
                    base
                };

                let seasonal_component = seasonality
                    .as_available()
                    .map_or(1.0, |profile| profile.index_for(period.month));

                let forecast_value = (trend_component * seasonal_component).max(0.0);

                ForecastPoint {
                    period,
                    forecast_value,
                    lower_bound: forecast_value,
                    upper_bound: forecast_value,
                    trend_component,
                    seasonal_component,
                }
            })
            .collect()
    }
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self::new(ForecastConfig::default())
    }
}
