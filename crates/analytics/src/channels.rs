//! Channel contribution scoring — each channel's share of total
//! conversions and its spend efficiency.

use serde::{Deserialize, Serialize};

/// Per-channel conversion and spend input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelInput {
    pub name: String,
    #[serde(default)]
    pub conversions: f64,
    #[serde(default)]
    pub spend: f64,
}

/// Contribution and efficiency scores for one channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelResult {
    pub name: String,
    /// Percentage of all conversions this channel produced.
    pub contribution: f64,
    /// Conversions per spend unit.
    pub efficiency: f64,
}

/// Score each channel's contribution to total conversions and its
/// efficiency. A zero conversion total or zero spend scores 0 rather than
/// dividing. Output order matches input order.
pub fn calculate_channel_contribution(channels: &[ChannelInput]) -> Vec<ChannelResult> {
    let total_conversions: f64 = channels.iter().map(|c| c.conversions).sum();

    channels
        .iter()
        .map(|channel| ChannelResult {
            name: channel.name.clone(),
            contribution: if total_conversions > 0.0 {
                channel.conversions / total_conversions * 100.0
            } else {
                0.0
            },
            efficiency: if channel.spend > 0.0 {
                channel.conversions / channel.spend
            } else {
                0.0
            },
        })
        .collect()
}
