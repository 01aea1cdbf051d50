//! 生產批次模型

use chrono::NaiveDate;
use planner_core::OrderRecord;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// 效率上限（%）
const MAX_EFFICIENCY: Decimal = Decimal::ONE_HUNDRED;

/// 批次內訂單的交貨期間
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeliveryWindow {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
    pub span_days: i64,
}

impl DeliveryWindow {
    /// 由交貨日期集合計算；沒有任何日期時為 None
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Option<Self> {
        let mut dates = dates.into_iter();
        let first = dates.next()?;
        let (earliest, latest) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));

        Some(Self {
            earliest,
            latest,
            span_days: (latest - earliest).num_days(),
        })
    }
}

/// 生產批次（只借用訂單，不複製）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Batch<'a> {
    /// 批次ID（`<材質>-<序號>`）
    pub id: String,

    /// 材質
    pub material: String,

    /// 依排產順序排列的訂單
    pub orders: Vec<&'a OrderRecord>,

    /// 總重量（kg）
    pub total_weight: Decimal,

    /// 填充效率（%），上限 100
    pub efficiency: Decimal,

    /// 交貨期間（無任何交貨日期時為 None）
    pub delivery_window: Option<DeliveryWindow>,

    /// 訂單中最高的緊急度
    pub urgency: u8,
}

impl<'a> Batch<'a> {
    /// 由已排序的訂單建立批次摘要
    pub fn new(
        id: String,
        material: String,
        orders: Vec<&'a OrderRecord>,
        total_weight: Decimal,
        target_weight: Decimal,
        urgency: u8,
    ) -> Self {
        let delivery_window = DeliveryWindow::from_dates(orders.iter().filter_map(|o| o.delivery_date));

        Self {
            id,
            material,
            orders,
            total_weight,
            efficiency: Self::efficiency_of(total_weight, target_weight),
            delivery_window,
            urgency,
        }
    }

    /// `min(100, total / target × 100)`；運算溢出時必然超過上限，取 100
    pub fn efficiency_of(total_weight: Decimal, target_weight: Decimal) -> Decimal {
        if target_weight <= Decimal::ZERO || total_weight <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        total_weight
            .checked_div(target_weight)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map_or(MAX_EFFICIENCY, |efficiency| efficiency.min(MAX_EFFICIENCY))
    }

    /// 訂單筆數
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// 訂單ID列表
    pub fn order_ids(&self) -> Vec<Uuid> {
        self.orders.iter().map(|o| o.id).collect()
    }
}
