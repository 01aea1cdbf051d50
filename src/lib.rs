//! # Planner
//!
//! 需求預測與生產批次優化引擎的對外介面。
//!
//! 所有函數皆為純函數：不修改輸入、不做 I/O，相同輸入得到相同結果。
//! 預測與批次兩條流程互不共享狀態，可並行執行（見 [`plan_concurrently`]）。

pub mod logging;

pub use planner_core::{
    Analysis, BatchConfig, ForecastConfig, OrderFilter, OrderRecord, OrderStatus, PeriodKey,
    PeriodSummary, PlannerError, Result,
};
pub use planner_forecast::{
    AccuracyLevel, AccuracyReport, ForecastPoint, ForecastResult, SeasonalProfile, TrendResult,
};
pub use planner_optimizer::{Batch, BatchPlan, PlanStatistics, Recommendation};

use planner_forecast::{AccuracyAnalyzer, ForecastEngine, OrderAggregator};
use planner_optimizer::BatchOptimizer;

/// 按月彙總訂單
pub fn aggregate_orders(orders: &[OrderRecord], filter: &OrderFilter) -> Vec<PeriodSummary> {
    OrderAggregator::aggregate_by_month(orders, filter)
}

/// 以預設配置建立需求預測
///
/// 歷史期間少於 6 期時回傳 [`PlannerError::InsufficientData`]。
pub fn build_forecast(orders: &[OrderRecord], horizon: u32, filter: &OrderFilter) -> Result<ForecastResult> {
    build_forecast_with(orders, horizon, filter, &ForecastConfig::default())
}

/// 以指定配置建立需求預測
pub fn build_forecast_with(
    orders: &[OrderRecord],
    horizon: u32,
    filter: &OrderFilter,
    config: &ForecastConfig,
) -> Result<ForecastResult> {
    let periods = OrderAggregator::aggregate_by_month_with(orders, filter, config.outlier_z_threshold);
    ForecastEngine::new(config.clone()).run(&periods, horizon)
}

/// 將待排產訂單組成生產批次；空輸入回傳空計劃
pub fn optimize_batches<'a>(orders: &'a [OrderRecord], config: &BatchConfig) -> Result<BatchPlan<'a>> {
    let optimizer = BatchOptimizer::new(config.clone())?;
    Ok(optimizer.optimize(orders))
}

/// 以樸素單步預測回測準確度（需至少 4 期）
pub fn evaluate_accuracy(periods: &[PeriodSummary]) -> Analysis<AccuracyReport> {
    AccuracyAnalyzer::evaluate(periods)
}

/// 並行執行兩條流程的結果
#[derive(Debug)]
pub struct PlanningOutcome<'a> {
    pub forecast: Result<ForecastResult>,
    pub batches: Result<BatchPlan<'a>>,
}

/// 在 rayon 執行緒池上同時執行預測與批次優化
pub fn plan_concurrently<'a>(
    orders: &'a [OrderRecord],
    horizon: u32,
    filter: &OrderFilter,
    batch_config: &BatchConfig,
) -> PlanningOutcome<'a> {
    tracing::info!("並行規劃開始：訂單 {} 筆，預測 {} 期", orders.len(), horizon);

    let (forecast, batches) = rayon::join(
        || build_forecast(orders, horizon, filter),
        || optimize_batches(orders, batch_config),
    );

    tracing::info!(
        "並行規劃完成：預測 {}，批次 {}",
        if forecast.is_ok() { "成功" } else { "失敗" },
        if batches.is_ok() { "成功" } else { "失敗" }
    );

    PlanningOutcome { forecast, batches }
}
