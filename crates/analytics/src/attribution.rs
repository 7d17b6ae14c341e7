//! Multi-touch attribution — splits each conversion's value across the
//! touchpoints that preceded it and rolls the credit up per
//! platform/campaign under five models.

use chrono::{DateTime, Utc};
use donorpulse_core::config::AttributionConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionModel {
    FirstTouch,
    LastTouch,
    Linear,
    PositionBased,
    TimeDecay,
}

const MODELS: [AttributionModel; 5] = [
    AttributionModel::FirstTouch,
    AttributionModel::LastTouch,
    AttributionModel::Linear,
    AttributionModel::PositionBased,
    AttributionModel::TimeDecay,
];

/// A single ad or message interaction preceding a conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Touchpoint {
    pub campaign_id: String,
    pub platform: String,
    pub occurred_at: DateTime<Utc>,
}

/// A conversion event with its touchpoint history in interaction order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversion {
    pub id: Uuid,
    pub value: f64,
    pub converted_at: DateTime<Utc>,
    pub touchpoints: Vec<Touchpoint>,
}

/// Credit totals for one (platform, campaign) pair under all five models.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributionTotals {
    pub platform: String,
    pub campaign_id: String,
    pub first_touch: f64,
    pub last_touch: f64,
    pub linear: f64,
    pub position_based: f64,
    pub time_decay: f64,
}

/// An attribution row already split by model upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresplitAttributionRow {
    pub platform: String,
    pub campaign_id: String,
    #[serde(default)]
    pub first_touch: f64,
    #[serde(default)]
    pub last_touch: f64,
    #[serde(default)]
    pub linear: f64,
    #[serde(default)]
    pub position_based: f64,
    #[serde(default)]
    pub time_decay: f64,
}

/// Allocates conversion credit to touchpoints. Holds only the time-decay
/// half-life; safe to share across threads.
pub struct AttributionAllocator {
    half_life_days: f64,
}

impl AttributionAllocator {
    pub fn new(config: &AttributionConfig) -> Self {
        Self {
            half_life_days: config.half_life_days,
        }
    }

    /// Compute per-(platform, campaign) totals under all five models.
    ///
    /// Each conversion's value is split per the model weights and summed
    /// by key. Conversions without touchpoints carry no credit. Output is
    /// sorted by (platform, campaign) for stable display.
    pub fn allocate(&self, conversions: &[Conversion]) -> Vec<AttributionTotals> {
        let mut totals: BTreeMap<(String, String), AttributionTotals> = BTreeMap::new();

        for conversion in conversions {
            for model in MODELS {
                let weights = self.model_weights(conversion, model);
                for (touchpoint, weight) in conversion.touchpoints.iter().zip(weights.iter()) {
                    let entry = totals
                        .entry((touchpoint.platform.clone(), touchpoint.campaign_id.clone()))
                        .or_insert_with(|| AttributionTotals {
                            platform: touchpoint.platform.clone(),
                            campaign_id: touchpoint.campaign_id.clone(),
                            ..Default::default()
                        });
                    let credit = conversion.value * weight;
                    match model {
                        AttributionModel::FirstTouch => entry.first_touch += credit,
                        AttributionModel::LastTouch => entry.last_touch += credit,
                        AttributionModel::Linear => entry.linear += credit,
                        AttributionModel::PositionBased => entry.position_based += credit,
                        AttributionModel::TimeDecay => entry.time_decay += credit,
                    }
                }
            }
        }

        totals.into_values().collect()
    }

    /// Per-touchpoint weight vector for one model. Sums to 1.0 whenever
    /// the conversion has at least one touchpoint.
    pub fn model_weights(&self, conversion: &Conversion, model: AttributionModel) -> Vec<f64> {
        let n = conversion.touchpoints.len();
        if n == 0 {
            return Vec::new();
        }

        match model {
            AttributionModel::FirstTouch => {
                let mut weights = vec![0.0; n];
                weights[0] = 1.0;
                weights
            }
            AttributionModel::LastTouch => {
                let mut weights = vec![0.0; n];
                weights[n - 1] = 1.0;
                weights
            }
            AttributionModel::Linear => vec![1.0 / n as f64; n],
            AttributionModel::PositionBased => position_weights(n),
            AttributionModel::TimeDecay => self.time_decay_weights(conversion),
        }
    }

    /// Exponential decay toward conversion time: a touchpoint `d` days
    /// before the conversion weighs `0.5^(d / half_life)`, normalized so
    /// the weights sum to 1.
    fn time_decay_weights(&self, conversion: &Conversion) -> Vec<f64> {
        let raw: Vec<f64> = conversion
            .touchpoints
            .iter()
            .map(|t| {
                let age_days = (conversion.converted_at - t.occurred_at)
                    .num_seconds()
                    .max(0) as f64
                    / 86_400.0;
                0.5_f64.powf(age_days / self.half_life_days)
            })
            .collect();

        let sum: f64 = raw.iter().sum();
        if sum > 0.0 {
            raw.iter().map(|w| w / sum).collect()
        } else {
            // All weights underflowed; fall back to an even split.
            vec![1.0 / raw.len() as f64; raw.len()]
        }
    }
}

/// 40% to the first touchpoint, 40% to the last, 20% split across the
/// interior. A single touchpoint takes full credit; exactly two split
/// 50/50.
fn position_weights(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![1.0],
        2 => vec![0.5, 0.5],
        _ => {
            let interior = 0.2 / (n - 2) as f64;
            let mut weights = vec![interior; n];
            weights[0] = 0.4;
            weights[n - 1] = 0.4;
            weights
        }
    }
}

/// Merge pre-aggregated attribution rows by (platform, campaign), summing
/// each model column independently. Sorted like
/// [`AttributionAllocator::allocate`].
pub fn merge_presplit(rows: &[PresplitAttributionRow]) -> Vec<AttributionTotals> {
    let mut totals: BTreeMap<(String, String), AttributionTotals> = BTreeMap::new();

    for row in rows {
        let entry = totals
            .entry((row.platform.clone(), row.campaign_id.clone()))
            .or_insert_with(|| AttributionTotals {
                platform: row.platform.clone(),
                campaign_id: row.campaign_id.clone(),
                ..Default::default()
            });
        entry.first_touch += row.first_touch;
        entry.last_touch += row.last_touch;
        entry.linear += row.linear;
        entry.position_based += row.position_based;
        entry.time_decay += row.time_decay;
    }

    totals.into_values().collect()
}
