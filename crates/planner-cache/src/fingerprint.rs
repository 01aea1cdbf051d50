//! 輸入內容指紋

use planner_core::{OrderRecord, PlannerError};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fmt;

/// 訂單集合與參數的 SHA-256 指紋（十六進位）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// 對訂單列表（保留順序）與參數計算指紋
    ///
    /// 批次排序是穩定的，輸入順序會影響結果，因此順序不同視為不同輸入。
    pub fn of<P: Serialize>(orders: &[OrderRecord], params: &P) -> planner_core::Result<Self> {
        let mut hasher = Sha256::new();
        hasher.update(to_json(orders)?);
        hasher.update(b"\x00");
        hasher.update(to_json(params)?);
        Ok(Self(format!("{:x}", hasher.finalize())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> planner_core::Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| PlannerError::InvalidInput {
        reason: format!("無法序列化快取鍵: {}", e),
    })
}
