//! Donor-value estimation — acquisition cost, lifetime value, return
//! ratios, and period-over-period deltas.

use serde::{Deserialize, Serialize};

/// Total spend per acquired donor; 0 when nobody was acquired.
pub fn calculate_cac(total_spend: f64, total_customers: f64) -> f64 {
    if total_customers > 0.0 {
        total_spend / total_customers
    } else {
        0.0
    }
}

/// Projected donor lifetime value: average gift × gifts per period ×
/// retained periods.
pub fn calculate_ltv(avg_value: f64, frequency_per_period: f64, retention_periods: f64) -> f64 {
    avg_value * frequency_per_period * retention_periods
}

/// Period-over-period comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendDelta {
    pub current: f64,
    pub previous: f64,
    pub change_percent: f64,
}

/// Change versus the previous period. A previous value of 0 reports a 0%
/// change even when the current value is positive.
pub fn calculate_trend(current: f64, previous: f64) -> TrendDelta {
    let change_percent = if previous != 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    };

    TrendDelta {
        current,
        previous,
        change_percent,
    }
}

/// Return on investment as a percentage; 0 when nothing was spent.
pub fn roi(revenue: f64, spend: f64) -> f64 {
    if spend > 0.0 {
        (revenue - spend) / spend * 100.0
    } else {
        0.0
    }
}

/// Return on ad spend as a multiple; 0 when nothing was spent.
pub fn roas(revenue: f64, spend: f64) -> f64 {
    if spend > 0.0 {
        revenue / spend
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cac() {
        assert_eq!(calculate_cac(1000.0, 50.0), 20.0);
        assert_eq!(calculate_cac(1000.0, 0.0), 0.0);
    }

    #[test]
    fn test_ltv() {
        assert_eq!(calculate_ltv(50.0, 2.0, 12.0), 1200.0);
        assert_eq!(calculate_ltv(0.0, 2.0, 12.0), 0.0);
    }

    #[test]
    fn test_trend() {
        let delta = calculate_trend(150.0, 100.0);
        assert_eq!(delta.current, 150.0);
        assert_eq!(delta.previous, 100.0);
        assert_eq!(delta.change_percent, 50.0);

        let decline = calculate_trend(80.0, 100.0);
        assert_eq!(decline.change_percent, -20.0);
    }

    #[test]
    fn test_trend_zero_previous() {
        let delta = calculate_trend(500.0, 0.0);
        assert_eq!(delta.change_percent, 0.0);
    }

    #[test]
    fn test_roi_and_roas() {
        assert_eq!(roi(300.0, 100.0), 200.0);
        assert_eq!(roi(300.0, 0.0), 0.0);
        assert_eq!(roas(300.0, 100.0), 3.0);
        assert_eq!(roas(300.0, 0.0), 0.0);
    }
}
