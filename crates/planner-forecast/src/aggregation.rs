//! 按月彙總訂單

use planner_core::{OrderFilter, OrderRecord, PeriodKey, PeriodSummary};
use std::collections::BTreeMap;

use crate::stats;

/// 預設離群值 z 分數閾值
pub const DEFAULT_OUTLIER_Z: f64 = 3.0;

/// 訂單聚合器
pub struct OrderAggregator;

impl OrderAggregator {
    /// 按下單月份彙總（使用預設離群值閾值）
    pub fn aggregate_by_month(orders: &[OrderRecord], filter: &OrderFilter) -> Vec<PeriodSummary> {
        Self::aggregate_by_month_with(orders, filter, DEFAULT_OUTLIER_Z)
    }

    /// 按下單月份彙總，並以 `outlier_z` 標註離群期間
    ///
    /// 輸出按期間升序排列；離群值只標註，不剔除。
    pub fn aggregate_by_month_with(
        orders: &[OrderRecord],
        filter: &OrderFilter,
        outlier_z: f64,
    ) -> Vec<PeriodSummary> {
        let mut buckets: BTreeMap<PeriodKey, (usize, f64, f64)> = BTreeMap::new();

        for order in orders.iter().filter(|o| filter.matches(o)) {
            let bucket = buckets
                .entry(PeriodKey::from_date(order.order_date))
                .or_insert((0, 0.0, 0.0));
            bucket.0 += 1;
            bucket.1 += order.effective_weight();
            bucket.2 += order.effective_quantity();
        }

        let mut summaries: Vec<PeriodSummary> = buckets
            .into_iter()
            .map(|(period, (count, weight, quantity))| {
                PeriodSummary::new(period, count, weight).with_total_quantity(quantity)
            })
            .collect();

        Self::annotate_outliers(&mut summaries, outlier_z);

        tracing::debug!("聚合完成：{} 筆訂單 → {} 個期間", orders.len(), summaries.len());
        summaries
    }

    /// 以母體平均與標準差計算各期 z 分數
    fn annotate_outliers(summaries: &mut [PeriodSummary], outlier_z: f64) {
        let weights: Vec<f64> = summaries.iter().map(|s| s.total_weight).collect();
        let avg = stats::mean(&weights);
        let std_dev = stats::population_std_dev(&weights);

        for summary in summaries.iter_mut() {
            summary.z_score = if std_dev > 0.0 {
                (summary.total_weight - avg) / std_dev
            } else {
                0.0
            };
            summary.is_outlier = summary.z_score.abs() > outlier_z;
        }
    }

    /// 取出各期總重量序列
    pub fn weights(periods: &[PeriodSummary]) -> Vec<f64> {
        periods.iter().map(|p| p.total_weight).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use planner_core::OrderStatus;

    fn order(material: &str, y: i32, m: u32, d: u32, weight: f64) -> OrderRecord {
        OrderRecord::new(
            material.to_string(),
            weight,
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        )
    }

    #[test]
    fn test_aggregate_by_month() {
        let orders = vec![
            order("Q235", 2025, 2, 10, 50.0),
            order("Q235", 2025, 1, 5, 100.0),
            order("Q235", 2025, 1, 20, 30.0).with_quantity(3.0),
            order("Q235", 2024, 12, 31, 10.0).with_status(OrderStatus::Cancelled),
        ];

        let periods = OrderAggregator::aggregate_by_month(&orders, &OrderFilter::none());

        assert_eq!(periods.len(), 3);
        assert_eq!(periods[0].period.to_string(), "2024-12");
        assert_eq!(periods[1].period.to_string(), "2025-01");
        assert_eq!(periods[1].order_count, 2);
        assert_eq!(periods[1].total_weight, 130.0);
        assert_eq!(periods[1].total_quantity, 4.0);
        assert_eq!(periods[1].average_weight, 65.0);
        assert_eq!(periods[2].period.to_string(), "2025-02");
    }

    #[test]
    fn test_filters_apply_before_bucketing() {
        let orders = vec![
            order("Q235", 2025, 1, 5, 100.0).with_customer("ACME".to_string()),
            order("Q235", 2025, 1, 6, 40.0),
            order("SUS304", 2025, 2, 6, 70.0).with_customer("ACME".to_string()),
        ];

        let filter = OrderFilter::none()
            .with_material("Q235".to_string())
            .with_customer("ACME".to_string());
        let periods = OrderAggregator::aggregate_by_month(&orders, &filter);

        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].total_weight, 100.0);
    }

    #[test]
    fn test_nan_weight_counts_as_zero() {
        let orders = vec![
            order("Q235", 2025, 1, 5, f64::NAN),
            order("Q235", 2025, 1, 6, 40.0),
        ];

        let periods = OrderAggregator::aggregate_by_month(&orders, &OrderFilter::none());

        assert_eq!(periods[0].order_count, 2);
        assert_eq!(periods[0].total_weight, 40.0);
    }

    #[test]
    fn test_outlier_is_flagged_not_dropped() {
        // 11 個平穩月份加 1 個尖峰
        let mut orders: Vec<OrderRecord> = (1..=11)
            .map(|m| order("Q235", 2024, m, 1, 100.0))
            .collect();
        orders.push(order("Q235", 2024, 12, 1, 5000.0));

        let periods = OrderAggregator::aggregate_by_month(&orders, &OrderFilter::none());

        assert_eq!(periods.len(), 12);
        assert!(periods[11].is_outlier);
        assert!(periods[11].z_score > 3.0);
        assert!(periods[..11].iter().all(|p| !p.is_outlier));
    }

    #[test]
    fn test_constant_series_has_zero_z_scores() {
        let orders: Vec<OrderRecord> = (1..=6).map(|m| order("Q235", 2024, m, 1, 80.0)).collect();
        let periods = OrderAggregator::aggregate_by_month(&orders, &OrderFilter::none());

        assert!(periods.iter().all(|p| p.z_score == 0.0 && !p.is_outlier));
    }

    #[test]
    fn test_empty_input() {
        let periods = OrderAggregator::aggregate_by_month(&[], &OrderFilter::none());
        assert!(periods.is_empty());
    }
}
