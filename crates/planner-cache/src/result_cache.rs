//! 呼叫端結果緩存

use std::collections::HashMap;

use crate::fingerprint::Fingerprint;

/// 以內容指紋為鍵的結果緩存
///
/// 引擎本身無狀態；是否緩存、何時失效由呼叫端決定。
pub struct ResultCache<V> {
    entries: HashMap<Fingerprint, V>,
    hits: u64,
    misses: u64,
}

/// 命中統計
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

impl<V: Clone> ResultCache<V> {
    /// 創建空緩存
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// 查詢緩存
    pub fn get(&mut self, key: &Fingerprint) -> Option<V> {
        match self.entries.get(key) {
            Some(value) => {
                self.hits += 1;
                Some(value.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// 寫入緩存
    pub fn insert(&mut self, key: Fingerprint, value: V) {
        self.entries.insert(key, value);
    }

    /// 命中則回傳緩存，否則計算並寫入
    pub fn get_or_compute<E>(
        &mut self,
        key: Fingerprint,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(value) = self.get(&key) {
            tracing::debug!("緩存命中: {}", key);
            return Ok(value);
        }

        let value = compute()?;
        self.entries.insert(key, value.clone());
        Ok(value)
    }

    /// 移除單一項目
    pub fn invalidate(&mut self, key: &Fingerprint) -> bool {
        self.entries.remove(key).is_some()
    }

    /// 清空緩存（保留統計）
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}

impl<V: Clone> Default for ResultCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
