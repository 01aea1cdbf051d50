//! 期間（年-月）模型

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::PlannerError;

/// 年月期間鍵，以 `YYYY-MM` 表示
///
/// 欄位順序即時間順序，因此可直接比較大小。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeriodKey {
    pub year: i32,
    pub month: u32,
}

impl PeriodKey {
    /// 創建期間鍵，月份必須在 1..=12
    pub fn new(year: i32, month: u32) -> crate::Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(PlannerError::InvalidInput {
                reason: format!("月份超出範圍: {}", month),
            });
        }
        Ok(Self { year, month })
    }

    /// 取日期所在的期間
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// 向後推進 `months` 個月（處理跨年）
    pub fn advance(&self, months: u32) -> Self {
        let total = self.year as i64 * 12 + (self.month as i64 - 1) + months as i64;
        Self {
            year: total.div_euclid(12) as i32,
            month: total.rem_euclid(12) as u32 + 1,
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for PeriodKey {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PlannerError::InvalidInput {
            reason: format!("無效的期間: {}", s),
        };

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for PeriodKey {
    type Error = PlannerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PeriodKey> for String {
    fn from(key: PeriodKey) -> Self {
        key.to_string()
    }
}

/// 單一期間的訂單彙總（每次聚合重新產生）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// 期間
    pub period: PeriodKey,

    /// 訂單筆數
    pub order_count: usize,

    /// 總重量（kg）
    pub total_weight: f64,

    /// 總數量
    pub total_quantity: f64,

    /// 平均單筆重量
    pub average_weight: f64,

    /// 相對各期總重量的 z 分數
    pub z_score: f64,

    /// 是否為離群值（|z| > 閾值）
    pub is_outlier: bool,
}

impl PeriodSummary {
    /// 創建只含重量的彙總（z 分數待標註）
    pub fn new(period: PeriodKey, order_count: usize, total_weight: f64) -> Self {
        let average_weight = if order_count > 0 {
            total_weight / order_count as f64
        } else {
            0.0
        };

        Self {
            period,
            order_count,
            total_weight,
            total_quantity: 0.0,
            average_weight,
            z_score: 0.0,
            is_outlier: false,
        }
    }

    /// 建構器模式：設置總數量
    pub fn with_total_quantity(mut self, quantity: f64) -> Self {
        self.total_quantity = quantity;
        self
    }
}
