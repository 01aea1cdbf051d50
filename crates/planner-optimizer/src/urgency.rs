//! 訂單緊急度評分

use chrono::NaiveDate;
use planner_core::OrderRecord;

/// 已逾期
pub const OVERDUE_SCORE: u8 = 10;
/// 3 天內交貨
pub const CRITICAL_SCORE: u8 = 8;
/// 7 天內交貨
pub const HIGH_SCORE: u8 = 6;
/// 14 天內交貨
pub const MEDIUM_SCORE: u8 = 4;
/// 其餘（含無交貨日期）
pub const LOW_SCORE: u8 = 2;

/// 緊急度評分器
pub struct UrgencyScorer;

impl UrgencyScorer {
    /// 依基準日計算訂單緊急度
    pub fn score(order: &OrderRecord, today: NaiveDate) -> u8 {
        Self::score_days(order.days_until_delivery(today))
    }

    /// 依距交貨日天數分級；無交貨日期視為最低等級
    pub fn score_days(days_until_delivery: Option<i64>) -> u8 {
        match days_until_delivery {
            Some(days) if days < 0 => OVERDUE_SCORE,
            Some(days) if days <= 3 => CRITICAL_SCORE,
            Some(days) if days <= 7 => HIGH_SCORE,
            Some(days) if days <= 14 => MEDIUM_SCORE,
            _ => LOW_SCORE,
        }
    }
}
