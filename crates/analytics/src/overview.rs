//! Dashboard overview — headline KPIs folded from the three ingested
//! sources, with period-over-period trends.

use crate::value::{calculate_cac, calculate_trend, roas, roi, TrendDelta};
use donorpulse_core::types::{AdPerformanceRow, DonationRow, SmsCampaignRow};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Reduced totals for one reporting period.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SourceTotals {
    pub ad_spend: f64,
    pub sms_cost: f64,
    pub total_raised: f64,
    pub donation_count: u64,
    pub unique_donors: u64,
    pub ad_conversions: u64,
    pub sms_conversions: u64,
}

impl SourceTotals {
    /// Fold the raw source rows into period totals. Donations without a
    /// donor id count toward volume but not toward unique donors.
    pub fn from_rows(
        ads: &[AdPerformanceRow],
        sms: &[SmsCampaignRow],
        donations: &[DonationRow],
    ) -> Self {
        let donors: HashSet<&str> = donations
            .iter()
            .filter_map(|d| d.donor_id.as_deref())
            .collect();

        Self {
            ad_spend: ads.iter().map(|a| a.spend).sum(),
            sms_cost: sms.iter().map(|s| s.cost).sum(),
            total_raised: donations.iter().map(|d| d.amount).sum(),
            donation_count: donations.len() as u64,
            unique_donors: donors.len() as u64,
            ad_conversions: ads.iter().map(|a| a.conversions).sum(),
            sms_conversions: sms.iter().map(|s| s.conversions).sum(),
        }
    }

    pub fn total_spend(&self) -> f64 {
        self.ad_spend + self.sms_cost
    }
}

/// Headline KPIs for the dashboard header cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardOverview {
    pub total_raised: f64,
    pub total_spend: f64,
    pub donation_count: u64,
    pub unique_donors: u64,
    pub avg_donation: f64,
    pub roi: f64,
    pub roas: f64,
    pub cost_per_donor: f64,
    pub raised_trend: TrendDelta,
    pub spend_trend: TrendDelta,
    pub donation_count_trend: TrendDelta,
}

/// Compute the overview for the current period against the previous one.
/// Every ratio degrades to 0 on a zero denominator.
pub fn compute_overview(current: &SourceTotals, previous: &SourceTotals) -> DashboardOverview {
    let avg_donation = if current.donation_count > 0 {
        current.total_raised / current.donation_count as f64
    } else {
        0.0
    };

    DashboardOverview {
        total_raised: current.total_raised,
        total_spend: current.total_spend(),
        donation_count: current.donation_count,
        unique_donors: current.unique_donors,
        avg_donation,
        roi: roi(current.total_raised, current.total_spend()),
        roas: roas(current.total_raised, current.total_spend()),
        cost_per_donor: calculate_cac(current.total_spend(), current.unique_donors as f64),
        raised_trend: calculate_trend(current.total_raised, previous.total_raised),
        spend_trend: calculate_trend(current.total_spend(), previous.total_spend()),
        donation_count_trend: calculate_trend(
            current.donation_count as f64,
            previous.donation_count as f64,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn donation(donor: Option<&str>, amount: f64) -> DonationRow {
        DonationRow {
            date: "2024-05-01".into(),
            donor_id: donor.map(String::from),
            amount,
            campaign_id: None,
            platform: None,
            recurring: false,
        }
    }

    fn ad_row(spend: f64, conversions: u64) -> AdPerformanceRow {
        AdPerformanceRow {
            date: "2024-05-01".into(),
            platform: "meta".into(),
            campaign_id: "c1".into(),
            campaign_name: "Spring Appeal".into(),
            spend,
            impressions: 1000,
            clicks: 100,
            conversions,
        }
    }

    fn sms_row(cost: f64, conversions: u64) -> SmsCampaignRow {
        SmsCampaignRow {
            date: "2024-05-01".into(),
            campaign_id: "s1".into(),
            campaign_name: "Text Drive".into(),
            cost,
            sent: 500,
            delivered: 480,
            clicks: 60,
            conversions,
        }
    }

    #[test]
    fn test_source_totals_fold() {
        let totals = SourceTotals::from_rows(
            &[ad_row(300.0, 10), ad_row(200.0, 5)],
            &[sms_row(100.0, 4)],
            &[
                donation(Some("d1"), 50.0),
                donation(Some("d1"), 25.0),
                donation(Some("d2"), 125.0),
                donation(None, 10.0),
            ],
        );

        assert_eq!(totals.ad_spend, 500.0);
        assert_eq!(totals.sms_cost, 100.0);
        assert_eq!(totals.total_spend(), 600.0);
        assert_eq!(totals.total_raised, 210.0);
        assert_eq!(totals.donation_count, 4);
        assert_eq!(totals.unique_donors, 2);
        assert_eq!(totals.ad_conversions, 15);
        assert_eq!(totals.sms_conversions, 4);
    }

    #[test]
    fn test_overview_kpis() {
        let current = SourceTotals {
            ad_spend: 400.0,
            sms_cost: 100.0,
            total_raised: 1500.0,
            donation_count: 30,
            unique_donors: 25,
            ad_conversions: 20,
            sms_conversions: 10,
        };
        let previous = SourceTotals {
            ad_spend: 500.0,
            sms_cost: 0.0,
            total_raised: 1000.0,
            donation_count: 20,
            unique_donors: 18,
            ad_conversions: 15,
            sms_conversions: 5,
        };

        let overview = compute_overview(&current, &previous);
        assert_eq!(overview.total_spend, 500.0);
        assert_eq!(overview.avg_donation, 50.0);
        assert_eq!(overview.roi, 200.0);
        assert_eq!(overview.roas, 3.0);
        assert_eq!(overview.cost_per_donor, 20.0);
        assert_eq!(overview.raised_trend.change_percent, 50.0);
        assert_eq!(overview.donation_count_trend.change_percent, 50.0);
    }

    #[test]
    fn test_overview_empty_period() {
        let overview = compute_overview(&SourceTotals::default(), &SourceTotals::default());
        assert_eq!(overview.avg_donation, 0.0);
        assert_eq!(overview.roi, 0.0);
        assert_eq!(overview.cost_per_donor, 0.0);
        assert_eq!(overview.raised_trend.change_percent, 0.0);
    }
}
