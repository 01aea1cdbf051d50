//! 季節性分析

use planner_core::{Analysis, PeriodSummary, MIN_SEASONAL_PERIODS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::stats;

/// 旺季/淡季各列出的月份數
const EXTREME_MONTHS: usize = 3;

/// 季節性強度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonalStrength {
    Weak,
    Moderate,
    Strong,
}

/// 月份與其季節指數
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthIndex {
    pub month: u32,
    pub index: f64,
}

/// 季節性輪廓
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalProfile {
    /// 月份（1-12）→ 季節指數；歷史中沒有的月份不列出
    pub indices: BTreeMap<u32, f64>,

    pub strength: SeasonalStrength,

    /// 指數最高的三個月份（由高到低）
    pub peak_months: Vec<MonthIndex>,

    /// 指數最低的三個月份（由低到高）
    pub low_months: Vec<MonthIndex>,
}

impl SeasonalProfile {
    /// 取月份的季節指數，無資料時為 1.0
    pub fn index_for(&self, month: u32) -> f64 {
        self.indices.get(&month).copied().unwrap_or(1.0)
    }
}

/// 季節性分析器
pub struct SeasonalityAnalyzer;

impl SeasonalityAnalyzer {
    /// 計算每個日曆月的季節指數（需至少 12 期）
    pub fn analyze_seasonality(periods: &[PeriodSummary]) -> Analysis<SeasonalProfile> {
        Analysis::require(periods.len(), MIN_SEASONAL_PERIODS, || Self::profile(periods))
    }

    fn profile(periods: &[PeriodSummary]) -> SeasonalProfile {
        let weights: Vec<f64> = periods.iter().map(|p| p.total_weight).collect();
        let grand_mean = stats::mean(&weights);

        let mut by_month: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        for period in periods {
            by_month
                .entry(period.period.month)
                .or_default()
                .push(period.total_weight);
        }

        let indices: BTreeMap<u32, f64> = by_month
            .into_iter()
            .map(|(month, values)| {
                let index = if grand_mean > 0.0 {
                    stats::mean(&values) / grand_mean
                } else {
                    1.0
                };
                (month, index)
            })
            .collect();

        // 指數相對 1.0 的離散度
        let squared_deviations: Vec<f64> = indices.values().map(|index| (index - 1.0).powi(2)).collect();
        let strength = Self::classify_strength(stats::mean(&squared_deviations));

        let mut ranked: Vec<MonthIndex> = indices
            .iter()
            .map(|(&month, &index)| MonthIndex { month, index })
            .collect();
        ranked.sort_by(|a, b| b.index.total_cmp(&a.index).then(a.month.cmp(&b.month)));

        let peak_months = ranked.iter().take(EXTREME_MONTHS).copied().collect();
        let low_months = ranked.iter().rev().take(EXTREME_MONTHS).copied().collect();

        SeasonalProfile {
            indices,
            strength,
            peak_months,
            low_months,
        }
    }

    /// 依指數變異數判定季節性強度
    pub fn classify_strength(variance: f64) -> SeasonalStrength {
        if variance > 0.1 {
            SeasonalStrength::Strong
        } else if variance > 0.05 {
            SeasonalStrength::Moderate
        } else {
            SeasonalStrength::Weak
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_core::PeriodKey;
    use rstest::rstest;

    fn series(start_year: i32, weights: &[f64]) -> Vec<PeriodSummary> {
        let start = PeriodKey::new(start_year, 1).unwrap();
        weights
            .iter()
            .enumerate()
            .map(|(i, &w)| PeriodSummary::new(start.advance(i as u32), 1, w))
            .collect()
    }

    fn profile(periods: &[PeriodSummary]) -> SeasonalProfile {
        match SeasonalityAnalyzer::analyze_seasonality(periods) {
            Analysis::Available(profile) => profile,
            other => panic!("expected a seasonal profile, got {:?}", other),
        }
    }

    #[test]
    fn test_requires_full_year() {
        let periods = series(2024, &[100.0; 11]);
        assert_eq!(
            SeasonalityAnalyzer::analyze_seasonality(&periods),
            Analysis::InsufficientData { required: 12, actual: 11 }
        );
    }

    #[test]
    fn test_flat_year_has_unit_indices() {
        let result = profile(&series(2024, &[100.0; 12]));

        assert_eq!(result.indices.len(), 12);
        assert!(result.indices.values().all(|&i| (i - 1.0).abs() < 1e-12));
        assert_eq!(result.strength, SeasonalStrength::Weak);
    }

    #[test]
    fn test_indices_average_to_one() {
        let year = [80.0, 60.0, 90.0, 120.0, 150.0, 170.0, 160.0, 130.0, 110.0, 100.0, 70.0, 60.0];
        let mut two_years = year.to_vec();
        two_years.extend(year.iter().map(|w| w * 1.1));

        for periods in [series(2023, &year), series(2023, &two_years)] {
            let result = profile(&periods);
            let avg: f64 = result.indices.values().sum::<f64>() / 12.0;
            assert!((avg - 1.0).abs() < 1e-9, "average index {}", avg);
        }
    }

    #[test]
    fn test_peak_and_low_months() {
        let year = [80.0, 60.0, 90.0, 120.0, 150.0, 170.0, 160.0, 130.0, 110.0, 100.0, 70.0, 50.0];
        let result = profile(&series(2024, &year));

        let peaks: Vec<u32> = result.peak_months.iter().map(|m| m.month).collect();
        let lows: Vec<u32> = result.low_months.iter().map(|m| m.month).collect();

        assert_eq!(peaks, vec![6, 7, 5]);
        assert_eq!(lows, vec![12, 2, 11]);
        assert!(result.index_for(6) > 1.0);
        assert!(result.index_for(12) < 1.0);
    }

    #[test]
    fn test_strong_seasonality() {
        let year = [10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 200.0, 200.0, 200.0, 10.0, 10.0, 10.0];
        let result = profile(&series(2024, &year));

        assert_eq!(result.strength, SeasonalStrength::Strong);
    }

    #[test]
    fn test_strength_measures_spread_around_one() {
        // 15 期：1-3 月各出現兩次，指數平均不為 1
        let mut weights = vec![200.0, 200.0, 200.0];
        weights.extend([100.0; 9]);
        weights.extend([200.0, 200.0, 200.0]);
        let result = profile(&series(2023, &weights));

        // 1-3 月 200/140，其餘 100/140；平方偏差平均約 0.107，指數變異數僅約 0.096
        assert!((result.index_for(1) - 200.0 / 140.0).abs() < 1e-12);
        assert_eq!(result.strength, SeasonalStrength::Strong);
    }

    #[test]
    fn test_zero_history_yields_unit_indices() {
        let result = profile(&series(2024, &[0.0; 12]));
        assert!(result.indices.values().all(|&i| i == 1.0));
    }

    #[test]
    fn test_missing_month_defaults_to_one() {
        let mut periods = series(2023, &[100.0; 14]);
        periods.retain(|p| p.period.month != 3);
        let result = profile(&periods);

        assert!(!result.indices.contains_key(&3));
        assert_eq!(result.index_for(3), 1.0);
    }

    #[rstest]
    #[case(0.2, SeasonalStrength::Strong)]
    #[case(0.1, SeasonalStrength::Moderate)]
    #[case(0.06, SeasonalStrength::Moderate)]
    #[case(0.05, SeasonalStrength::Weak)]
    #[case(0.0, SeasonalStrength::Weak)]
    fn test_strength_thresholds(#[case] variance: f64, #[case] expected: SeasonalStrength) {
        assert_eq!(SeasonalityAnalyzer::classify_strength(variance), expected);
    }
}
