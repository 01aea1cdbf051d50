//! 髒標記追蹤（按材質）

use planner_core::OrderRecord;
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

/// 記錄自上次計算以來有變動的材質，供呼叫端判斷緩存的批次計劃是否過期
pub struct DirtyTracker {
    dirty_materials: BTreeSet<String>,
}

impl DirtyTracker {
    /// 創建新的追蹤器
    pub fn new() -> Self {
        Self {
            dirty_materials: BTreeSet::new(),
        }
    }

    /// 標記材質為髒
    pub fn mark_dirty(&mut self, material: &str) {
        self.dirty_materials.insert(material.to_string());
    }

    /// 比較前後兩份訂單快照，標記新增、刪除或內容變動的訂單所屬材質
    pub fn mark_changes(&mut self, previous: &[OrderRecord], current: &[OrderRecord]) {
        let before: HashMap<Uuid, &OrderRecord> = previous.iter().map(|o| (o.id, o)).collect();
        let after: HashMap<Uuid, &OrderRecord> = current.iter().map(|o| (o.id, o)).collect();

        for (id, order) in &after {
            match before.get(id) {
                Some(old) if *old == *order => {}
                Some(old) => {
                    // 材質本身被修改時，新舊兩組都受影響
                    self.mark_dirty(old.material_key());
                    self.mark_dirty(order.material_key());
                }
                None => self.mark_dirty(order.material_key()),
            }
        }

        for (id, order) in &before {
            if !after.contains_key(id) {
                self.mark_dirty(order.material_key());
            }
        }
    }

    /// 檢查材質是否為髒
    pub fn is_dirty(&self, material: &str) -> bool {
        self.dirty_materials.contains(material)
    }

    /// 清除所有髒標記
    pub fn clear(&mut self) {
        self.dirty_materials.clear();
    }

    /// 獲取所有髒材質（升序）
    pub fn dirty_materials(&self) -> Vec<String> {
        self.dirty_materials.iter().cloned().collect()
    }
}

impl Default for DirtyTracker {
    fn default() -> Self {
        Self::new()
    }
}
