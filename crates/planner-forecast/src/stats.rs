//! 統計輔助函數

/// 算術平均（空序列為 0）
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// 母體變異數（空序列為 0）
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64
}

/// 母體標準差
pub fn population_std_dev(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}
