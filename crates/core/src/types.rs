//! Shared record types and raw-row coercion helpers.
//!
//! Rows arrive from the data-fetching layer as JSON objects carrying a
//! resolvable date field plus arbitrary numeric fields. The helpers here
//! implement the tolerant coercion the computations rely on: missing or
//! malformed fields coerce to zero (or are skipped) instead of erroring.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Read a numeric field with `Number(field || 0)` semantics: missing,
/// null, and non-numeric values coerce to 0.0; numeric strings parse.
pub fn num_field(record: &Value, field: &str) -> f64 {
    match record.get(field) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Extract and parse a record's date field. Returns `None` for missing,
/// empty, or unparseable values.
pub fn date_field(record: &Value, field: &str) -> Option<NaiveDate> {
    record.get(field).and_then(Value::as_str).and_then(parse_date)
}

/// Parse `YYYY-MM-DD`, tolerating full ISO-8601 timestamps by taking the
/// date portion only.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// One day of paid-social performance for a single campaign, as delivered
/// by the ad-platform sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdPerformanceRow {
    pub date: String,
    pub platform: String,
    pub campaign_id: String,
    pub campaign_name: String,
    #[serde(default)]
    pub spend: f64,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub conversions: u64,
}

/// One SMS campaign send summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsCampaignRow {
    pub date: String,
    pub campaign_id: String,
    pub campaign_name: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub sent: u64,
    #[serde(default)]
    pub delivered: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub conversions: u64,
}

/// One donation transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationRow {
    pub date: String,
    #[serde(default)]
    pub donor_id: Option<String>,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub campaign_id: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub recurring: bool,
}
