//! 訂單模型

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 未指定材質時使用的分組代碼
pub const UNKNOWN_MATERIAL: &str = "unknown";

/// 訂單狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// 待排產
    Pending,
    /// 生產中
    Processing,
    /// 已完成
    Completed,
    /// 已取消
    Cancelled,
}

/// 訂單記錄（由上層 CRUD 提供，本核心只讀）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// 訂單ID
    pub id: Uuid,

    /// 材質代碼
    pub material: String,

    /// 客戶
    pub customer: Option<String>,

    /// 數量（件）
    pub quantity: f64,

    /// 下單日期
    pub order_date: NaiveDate,

    /// 交貨日期（缺失或無效時為 None）
    pub delivery_date: Option<NaiveDate>,

    /// 總重量（kg）
    pub total_weight: f64,

    /// 狀態
    pub status: OrderStatus,
}

impl OrderRecord {
    /// 創建新的待排產訂單
    pub fn new(material: String, total_weight: f64, order_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            material,
            customer: None,
            quantity: 1.0,
            order_date,
            delivery_date: None,
            total_weight,
            status: OrderStatus::Pending,
        }
    }

    /// 建構器模式：設置訂單ID
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// 建構器模式：設置客戶
    pub fn with_customer(mut self, customer: String) -> Self {
        self.customer = Some(customer);
        self
    }

    /// 建構器模式：設置數量
    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    /// 建構器模式：設置交貨日期
    pub fn with_delivery_date(mut self, date: NaiveDate) -> Self {
        self.delivery_date = Some(date);
        self
    }

    /// 建構器模式：設置狀態
    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    /// 可用於計算的重量（NaN、無窮或負值一律視為 0）
    pub fn effective_weight(&self) -> f64 {
        sanitize(self.total_weight)
    }

    /// 可用於計算的數量
    pub fn effective_quantity(&self) -> f64 {
        sanitize(self.quantity)
    }

    /// 分組用材質代碼，空白材質歸入 `unknown`
    pub fn material_key(&self) -> &str {
        let trimmed = self.material.trim();
        if trimmed.is_empty() {
            UNKNOWN_MATERIAL
        } else {
            trimmed
        }
    }

    /// 檢查是否為待排產訂單
    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }

    /// 距交貨日的天數（負數表示已逾期）
    pub fn days_until_delivery(&self, today: NaiveDate) -> Option<i64> {
        self.delivery_date.map(|date| (date - today).num_days())
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// 聚合前的訂單篩選條件（兩者皆需完全相符，None 表示不篩選）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFilter {
    /// 材質
    pub material: Option<String>,

    /// 客戶
    pub customer: Option<String>,
}

impl OrderFilter {
    /// 不篩選
    pub fn none() -> Self {
        Self::default()
    }

    /// 建構器模式：按材質篩選
    pub fn with_material(mut self, material: String) -> Self {
        self.material = Some(material);
        self
    }

    /// 建構器模式：按客戶篩選
    pub fn with_customer(mut self, customer: String) -> Self {
        self.customer = Some(customer);
        self
    }

    /// 檢查訂單是否符合條件
    pub fn matches(&self, order: &OrderRecord) -> bool {
        if let Some(material) = &self.material {
            if &order.material != material {
                return false;
            }
        }

        if let Some(customer) = &self.customer {
            if order.customer.as_ref() != Some(customer) {
                return false;
            }
        }

        true
    }
}
