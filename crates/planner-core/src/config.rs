//! 預測與批次優化配置

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::PlannerError;

/// 預測所需的最少期間數
pub const MIN_FORECAST_PERIODS: usize = 6;

/// 趨勢擬合所需的最少期間數
pub const MIN_TREND_PERIODS: usize = 2;

/// 季節性分析所需的最少期間數（一個完整年度）
pub const MIN_SEASONAL_PERIODS: usize = 12;

/// 準確度回測所需的最少期間數
pub const MIN_ACCURACY_PERIODS: usize = 4;

/// 預測配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// 預測前的最少期間數（硬性門檻）
    pub min_periods: usize,

    /// 離群值 z 分數閾值
    pub outlier_z_threshold: f64,

    /// 信賴區間倍數（1.96 對應 95%）
    pub confidence_z: f64,
}

impl ForecastConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self {
            min_periods: MIN_FORECAST_PERIODS,
            outlier_z_threshold: 3.0,
            confidence_z: 1.96,
        }
    }

    /// 建構器模式：設置最少期間數
    pub fn with_min_periods(mut self, periods: usize) -> Self {
        self.min_periods = periods;
        self
    }

    /// 建構器模式：設置離群值閾值
    pub fn with_outlier_z_threshold(mut self, threshold: f64) -> Self {
        self.outlier_z_threshold = threshold;
        self
    }

    /// 建構器模式：設置信賴區間倍數
    pub fn with_confidence_z(mut self, z: f64) -> Self {
        self.confidence_z = z;
        self
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// 批次優化配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// 目標批次重量（kg）
    pub target_weight: Decimal,

    /// 允許超出目標重量的比例（0.2 = 20%）
    pub max_variance_fraction: Decimal,

    /// 是否按交貨日期排序
    pub consider_delivery_dates: bool,

    /// 是否優先處理緊急訂單
    pub prioritize_urgent: bool,

    /// 計算緊急度的基準日（通常為今天）
    pub reference_date: NaiveDate,
}

impl BatchConfig {
    /// 創建批次配置（預設按交期排序並優先緊急訂單）
    pub fn new(target_weight: Decimal, max_variance_fraction: Decimal, reference_date: NaiveDate) -> Self {
        Self {
            target_weight,
            max_variance_fraction,
            consider_delivery_dates: true,
            prioritize_urgent: true,
            reference_date,
        }
    }

    /// 建構器模式：設置是否按交貨日期排序
    pub fn with_consider_delivery_dates(mut self, consider: bool) -> Self {
        self.consider_delivery_dates = consider;
        self
    }

    /// 建構器模式：設置是否優先緊急訂單
    pub fn with_prioritize_urgent(mut self, prioritize: bool) -> Self {
        self.prioritize_urgent = prioritize;
        self
    }

    /// 允許的最大批次重量（溢出時取 `Decimal::MAX`）
    pub fn max_batch_weight(&self) -> Decimal {
        self.target_weight
            .saturating_mul(Decimal::ONE.saturating_add(self.max_variance_fraction))
    }

    /// 驗證配置
    pub fn validate(&self) -> crate::Result<()> {
        if self.target_weight <= Decimal::ZERO {
            return Err(PlannerError::InvalidInput {
                reason: format!("目標重量必須大於 0: {}", self.target_weight),
            });
        }

        if self.max_variance_fraction < Decimal::ZERO {
            return Err(PlannerError::InvalidInput {
                reason: format!("允許偏差不可為負: {}", self.max_variance_fraction),
            });
        }

        Ok(())
    }
}
