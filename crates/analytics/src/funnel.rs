//! Funnel analysis — stage-to-stage conversion rates and drop-off volumes
//! for ordered donation journeys.

use serde::{Deserialize, Serialize};

/// One named stage of a conversion journey. Values are conventionally
/// non-increasing down the funnel but this is not enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunnelStage {
    pub name: String,
    pub value: f64,
}

/// Conversion between two consecutive stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConversion {
    pub from_stage: String,
    pub to_stage: String,
    /// Percentage of `from_stage` reaching `to_stage`.
    pub rate: f64,
    pub drop_off: f64,
}

/// Full funnel breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunnelReport {
    pub stages: Vec<FunnelStage>,
    pub overall_conversion_rate: f64,
    pub stage_conversion_rates: Vec<StageConversion>,
    pub total_drop_off: f64,
}

/// Compute overall and per-stage conversion rates, guarding every ratio
/// against a zero denominator. Funnels with fewer than two stages report
/// a rate of 0 and no drop-off.
pub fn analyze_funnel(stages: &[FunnelStage]) -> FunnelReport {
    let stage_conversion_rates: Vec<StageConversion> = stages
        .windows(2)
        .map(|pair| StageConversion {
            from_stage: pair[0].name.clone(),
            to_stage: pair[1].name.clone(),
            rate: if pair[0].value > 0.0 {
                pair[1].value / pair[0].value * 100.0
            } else {
                0.0
            },
            drop_off: pair[0].value - pair[1].value,
        })
        .collect();

    let (overall_conversion_rate, total_drop_off) = match (stages.first(), stages.last()) {
        (Some(first), Some(last)) if stages.len() >= 2 => {
            let rate = if first.value > 0.0 {
                last.value / first.value * 100.0
            } else {
                0.0
            };
            (rate, first.value - last.value)
        }
        _ => (0.0, 0.0),
    };

    FunnelReport {
        stages: stages.to_vec(),
        overall_conversion_rate,
        stage_conversion_rates,
        total_drop_off,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(name: &str, value: f64) -> FunnelStage {
        FunnelStage {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn test_typical_funnel() {
        let report = analyze_funnel(&[
            stage("Impressions", 10000.0),
            stage("Clicks", 800.0),
            stage("Donation Page", 400.0),
            stage("Donations", 100.0),
        ]);

        assert!((report.overall_conversion_rate - 1.0).abs() < 1e-9);
        assert_eq!(report.total_drop_off, 9900.0);
        assert_eq!(report.stage_conversion_rates.len(), 3);

        let first = &report.stage_conversion_rates[0];
        assert_eq!(first.from_stage, "Impressions");
        assert_eq!(first.to_stage, "Clicks");
        assert!((first.rate - 8.0).abs() < 1e-9);
        assert_eq!(first.drop_off, 9200.0);
    }

    #[test]
    fn test_empty_funnel() {
        let report = analyze_funnel(&[]);
        assert_eq!(report.overall_conversion_rate, 0.0);
        assert_eq!(report.total_drop_off, 0.0);
        assert!(report.stage_conversion_rates.is_empty());
    }

    #[test]
    fn test_single_stage() {
        let report = analyze_funnel(&[stage("A", 0.0)]);
        assert_eq!(report.overall_conversion_rate, 0.0);
        assert_eq!(report.total_drop_off, 0.0);
    }

    #[test]
    fn test_zero_top_of_funnel_never_nan() {
        let report = analyze_funnel(&[stage("A", 0.0), stage("B", 0.0)]);
        assert_eq!(report.overall_conversion_rate, 0.0);
        assert_eq!(report.stage_conversion_rates[0].rate, 0.0);
        assert!(!report.overall_conversion_rate.is_nan());
    }
}
