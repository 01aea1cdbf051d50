//! 批次建議

use rust_decimal::Decimal;
use serde::Serialize;

use crate::batch::Batch;

/// 效率低於此值（%）需關注
pub const MIN_EFFICIENCY: u32 = 70;

/// 交貨期間跨度超過此天數需關注
pub const MAX_DELIVERY_SPAN_DAYS: i64 = 14;

/// 建議類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// 批次填充效率偏低
    LowEfficiency,
    /// 批次內交貨日期過於分散
    WideDeliveryWindow,
}

/// 對單一批次的建議
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub batch_id: String,
    pub material: String,
    pub message: String,
}

/// 建議產生器
pub struct RecommendationEngine;

impl RecommendationEngine {
    /// 檢查每個批次的效率與交貨跨度
    pub fn generate(batches: &[Batch<'_>]) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        let min_efficiency = Decimal::from(MIN_EFFICIENCY);

        for batch in batches {
            if batch.efficiency < min_efficiency {
                recommendations.push(Recommendation {
                    kind: RecommendationKind::LowEfficiency,
                    batch_id: batch.id.clone(),
                    material: batch.material.clone(),
                    message: format!(
                        "批次 {} 效率僅 {}%，建議合併後續訂單或調整目標重量",
                        batch.id,
                        batch.efficiency.round_dp(1)
                    ),
                });
            }

            if let Some(window) = batch.delivery_window {
                if window.span_days > MAX_DELIVERY_SPAN_DAYS {
                    recommendations.push(Recommendation {
                        kind: RecommendationKind::WideDeliveryWindow,
                        batch_id: batch.id.clone(),
                        material: batch.material.clone(),
                        message: format!(
                            "批次 {} 交貨跨度 {} 天（{} 至 {}），建議拆分",
                            batch.id, window.span_days, window.earliest, window.latest
                        ),
                    });
                }
            }
        }

        recommendations
    }
}
