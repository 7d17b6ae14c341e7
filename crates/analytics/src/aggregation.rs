//! Time-bucketed aggregation — groups timestamped rows into uniform
//! day/week/month periods and reduces each bucket with a caller-supplied
//! closure.

use chrono::{Datelike, NaiveDate, Weekday};
use donorpulse_core::error::DonorPulseError;
use donorpulse_core::types::date_field;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

/// Bucket width for time-series grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl FromStr for Granularity {
    type Err = DonorPulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(Self::Day),
            "week" | "weekly" => Ok(Self::Week),
            "month" | "monthly" => Ok(Self::Month),
            other => Err(DonorPulseError::Validation(format!(
                "unknown granularity: {other}"
            ))),
        }
    }
}

/// A time-aligned group of rows sharing a truncated date key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodBucket {
    pub period: String,
    pub records: Vec<Value>,
}

/// Truncate a date to its bucket boundary: the date itself for daily
/// buckets, the week's starting day for weekly, the first of the month
/// for monthly.
pub fn truncate_to_period(
    date: NaiveDate,
    granularity: Granularity,
    week_start: Weekday,
) -> NaiveDate {
    match granularity {
        Granularity::Day => date,
        Granularity::Week => date.week(week_start).first_day(),
        Granularity::Month => date.with_day(1).unwrap_or(date),
    }
}

/// Partition rows into period buckets keyed by the truncated date in
/// `%Y-%m-%d` form, so string order equals chronological order.
///
/// Rows with a missing, empty, or unparseable date field are dropped
/// rather than collected into an "unknown" bucket.
pub fn bucket_by_period(
    records: &[Value],
    date_field_name: &str,
    granularity: Granularity,
    week_start: Weekday,
) -> Vec<PeriodBucket> {
    let mut buckets: BTreeMap<String, Vec<Value>> = BTreeMap::new();
    let mut dropped = 0usize;

    for record in records {
        match date_field(record, date_field_name) {
            Some(date) => {
                let key = truncate_to_period(date, granularity, week_start)
                    .format("%Y-%m-%d")
                    .to_string();
                buckets.entry(key).or_default().push(record.clone());
            }
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(
            dropped,
            field = date_field_name,
            "Dropped rows without a parseable date"
        );
    }

    buckets
        .into_iter()
        .map(|(period, records)| PeriodBucket { period, records })
        .collect()
}

/// Group rows into periods and reduce each non-empty bucket with
/// `aggregate`, which receives the bucket key and that bucket's rows only.
///
/// Weekly buckets start on Monday; call [`bucket_by_period`] directly to
/// control the week start. Output is keyed by sortable period strings.
pub fn group_by_period<T, F>(
    records: &[Value],
    date_field_name: &str,
    granularity: Granularity,
    aggregate: F,
) -> Vec<T>
where
    F: Fn(&str, &[Value]) -> T,
{
    bucket_by_period(records, date_field_name, granularity, Weekday::Mon)
        .iter()
        .map(|bucket| aggregate(&bucket.period, &bucket.records))
        .collect()
}
