//! 貪婪批次組合

use planner_core::{BatchConfig, OrderRecord};
use rayon::prelude::*;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::batch::Batch;
use crate::recommendation::RecommendationEngine;
use crate::urgency::UrgencyScorer;
use crate::{BatchPlan, PlanStatistics};

/// 附帶緊急度與重量的待排訂單
struct ScoredOrder<'a> {
    order: &'a OrderRecord,
    urgency: u8,
    weight: Decimal,
}

/// 批次優化器
///
/// 單次掃描、不回溯：每筆訂單只決定「加入目前批次」或「開新批次」。
pub struct BatchOptimizer {
    config: BatchConfig,
}

impl BatchOptimizer {
    /// 創建批次優化器（驗證配置）
    pub fn new(config: BatchConfig) -> planner_core::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 將待排產訂單組成批次
    pub fn optimize<'a>(&self, orders: &'a [OrderRecord]) -> BatchPlan<'a> {
        tracing::info!(
            "開始批次優化：訂單 {} 筆，目標重量 {}，允許偏差 {}",
            orders.len(),
            self.config.target_weight,
            self.config.max_variance_fraction
        );
        let start_time = std::time::Instant::now();

        // Step 1 & 2: 篩選待排產訂單並按材質分組
        let partitions = Self::partition_pending(orders);
        tracing::debug!("材質分組數量: {}", partitions.len());

        if partitions.is_empty() {
            tracing::info!("沒有待排產訂單");
            return BatchPlan::empty();
        }

        // Step 3 - 6: 各材質獨立排序與填充，結果按材質順序合併
        let batches: Vec<Batch<'a>> = partitions
            .into_par_iter()
            .map(|(material, group)| {
                let sorted = self.sort_group(group);
                self.fill_batches(material, sorted)
            })
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect();

        // Step 7: 統計與建議
        let statistics = PlanStatistics::from_batches(&batches);
        let recommendations = RecommendationEngine::generate(&batches);

        tracing::info!("批次優化完成，耗時 {:?}", start_time.elapsed());
        tracing::info!(
            "批次數量: {}，平均效率 {}%，建議 {} 筆",
            statistics.total_batches,
            statistics.average_efficiency.round_dp(2),
            recommendations.len()
        );

        BatchPlan {
            batches,
            statistics,
            recommendations,
        }
    }

    /// 只保留待排產訂單，按材質分組（材質升序）
    fn partition_pending(orders: &[OrderRecord]) -> Vec<(&str, Vec<&OrderRecord>)> {
        let mut groups: BTreeMap<&str, Vec<&OrderRecord>> = BTreeMap::new();

        for order in orders.iter().filter(|o| o.is_pending()) {
            groups.entry(order.material_key()).or_default().push(order);
        }

        groups.into_iter().collect()
    }

    /// 緊急度降序，再按交貨日期升序（無日期排最後）；排序穩定
    fn sort_group<'a>(&self, group: Vec<&'a OrderRecord>) -> Vec<ScoredOrder<'a>> {
        let mut scored: Vec<ScoredOrder<'a>> = group
            .into_iter()
            .map(|order| ScoredOrder {
                order,
                urgency: UrgencyScorer::score(order, self.config.reference_date),
                weight: order_weight(order),
            })
            .collect();

        let prioritize_urgent = self.config.prioritize_urgent;
        let consider_delivery_dates = self.config.consider_delivery_dates;

        scored.sort_by(|a, b| {
            let mut ordering = Ordering::Equal;
            if prioritize_urgent {
                ordering = b.urgency.cmp(&a.urgency);
            }
            if consider_delivery_dates {
                ordering = ordering.then_with(|| {
                    match (a.order.delivery_date, b.order.delivery_date) {
                        (Some(x), Some(y)) => x.cmp(&y),
                        (Some(_), None) => Ordering::Less,
                        (None, Some(_)) => Ordering::Greater,
                        (None, None) => Ordering::Equal,
                    }
                });
            }
            ordering
        });

        scored
    }

    /// 依序填充：批次為空、或加入後超出目標不超過允許偏差時加入，否則結束目前批次
    fn fill_batches<'a>(&self, material: &str, sorted: Vec<ScoredOrder<'a>>) -> Vec<Batch<'a>> {
        let max_weight = self.config.max_batch_weight();

        let mut batches = Vec::new();
        let mut current: Vec<ScoredOrder<'a>> = Vec::new();
        let mut current_weight = Decimal::ZERO;

        for scored in sorted {
            let projected = current_weight.saturating_add(scored.weight);

            if !current.is_empty() && projected > max_weight {
                let closed = std::mem::take(&mut current);
                batches.push(self.close_batch(material, batches.len() + 1, closed, current_weight));
                current_weight = Decimal::ZERO;
            }

            current_weight = current_weight.saturating_add(scored.weight);
            current.push(scored);
        }

        if !current.is_empty() {
            batches.push(self.close_batch(material, batches.len() + 1, current, current_weight));
        }

        tracing::debug!("材質 {}: {} 個批次", material, batches.len());
        batches
    }

    fn close_batch<'a>(
        &self,
        material: &str,
        sequence: usize,
        members: Vec<ScoredOrder<'a>>,
        total_weight: Decimal,
    ) -> Batch<'a> {
        let urgency = members.iter().map(|m| m.urgency).max().unwrap_or_default();
        let orders = members.into_iter().map(|m| m.order).collect();

        Batch::new(
            format!("{}-{:03}", material, sequence),
            material.to_string(),
            orders,
            total_weight,
            self.config.target_weight,
            urgency,
        )
    }
}

/// 訂單重量轉為 Decimal；超出 Decimal 範圍的有限重量取 `Decimal::MAX`
fn order_weight(order: &OrderRecord) -> Decimal {
    let weight = order.effective_weight();
    Decimal::try_from(weight).unwrap_or(if weight > 0.0 { Decimal::MAX } else { Decimal::ZERO })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use planner_core::OrderStatus;
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn in_days(days: i64) -> NaiveDate {
        today() + chrono::Duration::days(days)
    }

    fn order(material: &str, weight: f64) -> OrderRecord {
        OrderRecord::new(material.to_string(), weight, today())
    }

    fn optimizer(target: i64, variance: Decimal) -> BatchOptimizer {
        BatchOptimizer::new(BatchConfig::new(Decimal::from(target), variance, today())).unwrap()
    }

    fn twenty_percent() -> Decimal {
        Decimal::new(2, 1)
    }

    #[test]
    fn test_reference_packing() {
        let orders: Vec<OrderRecord> =
            [100.0, 100.0, 100.0, 250.0].iter().map(|&w| order("Q235", w)).collect();

        let plan = optimizer(300, twenty_percent()).optimize(&orders);

        assert_eq!(plan.batches.len(), 2);
        assert_eq!(plan.batches[0].order_count(), 3);
        assert_eq!(plan.batches[0].total_weight, Decimal::from(300));
        assert_eq!(plan.batches[0].efficiency, Decimal::ONE_HUNDRED);
        assert_eq!(plan.batches[1].order_count(), 1);
        assert_eq!(plan.batches[1].total_weight, Decimal::from(250));
        assert_eq!(plan.batches[1].efficiency.round_dp(2), Decimal::new(8333, 2));
        assert_eq!(plan.batches[0].id, "Q235-001");
        assert_eq!(plan.batches[1].id, "Q235-002");
    }

    #[test]
    fn test_upper_variance_bound_is_inclusive() {
        // 300 + 60 = 360，剛好等於 300 × 1.2
        let orders = vec![order("Q235", 300.0), order("Q235", 60.0), order("Q235", 0.1)];
        let plan = optimizer(300, twenty_percent()).optimize(&orders);

        assert_eq!(plan.batches.len(), 2);
        assert_eq!(plan.batches[0].total_weight, Decimal::from(360));
    }

    #[test]
    fn test_oversized_order_gets_own_batch() {
        let orders = vec![order("Q235", 50.0), order("Q235", 1000.0), order("Q235", 40.0)];
        let plan = optimizer(300, twenty_percent()).optimize(&orders);

        assert_eq!(plan.batches.len(), 3);
        assert_eq!(plan.batches[1].total_weight, Decimal::from(1000));
        assert_eq!(plan.batches[1].efficiency, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_only_pending_orders_are_batched() {
        let orders = vec![
            order("Q235", 100.0),
            order("Q235", 100.0).with_status(OrderStatus::Completed),
            order("Q235", 100.0).with_status(OrderStatus::Cancelled),
            order("Q235", 100.0).with_status(OrderStatus::Processing),
        ];
        let plan = optimizer(300, twenty_percent()).optimize(&orders);

        assert_eq!(plan.statistics.total_orders, 1);
        assert_eq!(plan.batches[0].orders[0].id, orders[0].id);
    }

    #[test]
    fn test_partitions_by_material() {
        let orders = vec![
            order("SUS304", 100.0),
            order("Q235", 100.0),
            order("", 100.0),
            order("SUS304", 100.0),
        ];
        let plan = optimizer(300, twenty_percent()).optimize(&orders);

        let materials: Vec<&str> = plan.batches.iter().map(|b| b.material.as_str()).collect();
        assert_eq!(materials, vec!["Q235", "SUS304", "unknown"]);
        assert_eq!(plan.batches[1].order_count(), 2);
        assert_eq!(plan.batches[2].id, "unknown-001");
    }

    #[test]
    fn test_urgent_orders_go_first() {
        let relaxed = order("Q235", 200.0).with_delivery_date(in_days(30));
        let overdue = order("Q235", 200.0).with_delivery_date(in_days(-2));
        let soon = order("Q235", 200.0).with_delivery_date(in_days(5));
        let orders = vec![relaxed.clone(), soon.clone(), overdue.clone()];

        let plan = optimizer(200, Decimal::ZERO).optimize(&orders);

        let sequence: Vec<_> = plan.batches.iter().map(|b| b.orders[0].id).collect();
        assert_eq!(sequence, vec![overdue.id, soon.id, relaxed.id]);
        assert_eq!(plan.batches[0].urgency, 10);
        assert_eq!(plan.batches[1].urgency, 6);
        assert_eq!(plan.batches[2].urgency, 2);
    }

    #[test]
    fn test_delivery_date_breaks_ties() {
        // 兩筆同屬最低緊急度，按交貨日期排序；無日期者排最後
        let undated = order("Q235", 10.0);
        let later = order("Q235", 10.0).with_delivery_date(in_days(60));
        let earlier = order("Q235", 10.0).with_delivery_date(in_days(20));
        let orders = vec![undated.clone(), later.clone(), earlier.clone()];

        let plan = optimizer(300, twenty_percent()).optimize(&orders);

        assert_eq!(plan.batches[0].order_ids(), vec![earlier.id, later.id, undated.id]);
    }

    #[test]
    fn test_input_order_kept_without_sorting() {
        let a = order("Q235", 10.0).with_delivery_date(in_days(60));
        let b = order("Q235", 10.0).with_delivery_date(in_days(-1));
        let orders = vec![a.clone(), b.clone()];

        let config = BatchConfig::new(Decimal::from(300), twenty_percent(), today())
            .with_prioritize_urgent(false)
            .with_consider_delivery_dates(false);
        let plan = BatchOptimizer::new(config).unwrap().optimize(&orders);

        assert_eq!(plan.batches[0].order_ids(), vec![a.id, b.id]);
        // 緊急度仍取批次內最高值
        assert_eq!(plan.batches[0].urgency, 10);
    }

    #[rstest]
    // 只按交期：同為逾期的兩筆也按日期排
    #[case(false, true, vec![2, 1, 3, 0])]
    // 只按緊急度：同為逾期的兩筆保持輸入順序
    #[case(true, false, vec![1, 2, 3, 0])]
    fn test_partial_sort_modes(
        #[case] prioritize_urgent: bool,
        #[case] consider_delivery_dates: bool,
        #[case] expected: Vec<usize>,
    ) {
        let orders = vec![
            order("Q235", 10.0).with_delivery_date(in_days(20)),
            order("Q235", 10.0).with_delivery_date(in_days(-1)),
            order("Q235", 10.0).with_delivery_date(in_days(-5)),
            order("Q235", 10.0).with_delivery_date(in_days(2)),
        ];

        let config = BatchConfig::new(Decimal::from(300), twenty_percent(), today())
            .with_prioritize_urgent(prioritize_urgent)
            .with_consider_delivery_dates(consider_delivery_dates);
        let plan = BatchOptimizer::new(config).unwrap().optimize(&orders);

        let expected_ids: Vec<_> = expected.iter().map(|&i| orders[i].id).collect();
        assert_eq!(plan.batches[0].order_ids(), expected_ids);
    }

    #[test]
    fn test_huge_weights_saturate() {
        let orders = vec![order("Q235", 5e28), order("Q235", 5e28), order("Q235", 1e30)];
        let plan = optimizer(300, twenty_percent()).optimize(&orders);

        assert_eq!(plan.batches.len(), 3);
        assert!(plan.batches[0].total_weight > Decimal::from_i128_with_scale(10_i128.pow(28), 0));
        assert_eq!(plan.batches[2].total_weight, Decimal::MAX);
        assert!(plan.batches.iter().all(|b| b.efficiency == Decimal::ONE_HUNDRED));
        assert_eq!(plan.statistics.total_weight, Decimal::MAX);
        assert_eq!(plan.statistics.average_efficiency, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_nan_weight_is_zero() {
        let orders = vec![order("Q235", f64::NAN), order("Q235", 100.0)];
        let plan = optimizer(300, twenty_percent()).optimize(&orders);

        assert_eq!(plan.batches.len(), 1);
        assert_eq!(plan.batches[0].total_weight, Decimal::from(100));
        assert_eq!(plan.batches[0].order_count(), 2);
    }

    #[test]
    fn test_empty_input() {
        let plan = optimizer(300, twenty_percent()).optimize(&[]);

        assert!(plan.batches.is_empty());
        assert_eq!(plan.statistics.total_batches, 0);
        assert_eq!(plan.statistics.average_efficiency, Decimal::ZERO);
    }

    #[test]
    fn test_invalid_config() {
        let config = BatchConfig::new(Decimal::ZERO, twenty_percent(), today());
        assert!(BatchOptimizer::new(config).is_err());
    }
}
