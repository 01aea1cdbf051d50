//! # Planner Optimizer
//!
//! 生產批次優化（緊急度排序、貪婪填充、效率統計與建議）

pub mod batch;
pub mod batching;
pub mod recommendation;
pub mod urgency;

// Re-export 主要類型
pub use batch::{Batch, DeliveryWindow};
pub use batching::BatchOptimizer;
pub use recommendation::{Recommendation, RecommendationEngine, RecommendationKind};
pub use urgency::UrgencyScorer;

use rust_decimal::Decimal;
use serde::Serialize;

/// 批次計劃（借用輸入訂單）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchPlan<'a> {
    /// 按材質、序號排列的批次
    pub batches: Vec<Batch<'a>>,

    /// 計劃層級統計
    pub statistics: PlanStatistics,

    /// 效率與交期建議
    pub recommendations: Vec<Recommendation>,
}

impl<'a> BatchPlan<'a> {
    /// 創建空的批次計劃
    pub fn empty() -> Self {
        Self {
            batches: Vec::new(),
            statistics: PlanStatistics::default(),
            recommendations: Vec::new(),
        }
    }

    /// 取得某材質的批次
    pub fn batches_for(&self, material: &str) -> Vec<&Batch<'a>> {
        self.batches.iter().filter(|b| b.material == material).collect()
    }
}

/// 計劃統計
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlanStatistics {
    pub total_batches: usize,
    pub total_orders: usize,
    /// 各批次效率的平均（%）
    pub average_efficiency: Decimal,
    pub total_weight: Decimal,
}

impl PlanStatistics {
    /// 由批次列表彙總
    pub fn from_batches(batches: &[Batch<'_>]) -> Self {
        if batches.is_empty() {
            return Self::default();
        }

        let efficiency_sum = batches
            .iter()
            .fold(Decimal::ZERO, |sum, b| sum.saturating_add(b.efficiency));

        Self {
            total_batches: batches.len(),
            total_orders: batches.iter().map(|b| b.order_count()).sum(),
            average_efficiency: efficiency_sum / Decimal::from(batches.len()),
            total_weight: batches
                .iter()
                .fold(Decimal::ZERO, |sum, b| sum.saturating_add(b.total_weight)),
        }
    }
}
