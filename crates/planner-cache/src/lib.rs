//! # Planner Cache
//!
//! 呼叫端緩存：內容指紋、結果緩存與材質髒標記

pub mod dirty_tracking;
pub mod fingerprint;
pub mod result_cache;

// Re-export 主要類型
pub use dirty_tracking::DirtyTracker;
pub use fingerprint::Fingerprint;
pub use result_cache::{CacheStats, ResultCache};
