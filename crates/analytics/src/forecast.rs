//! Linear trend forecasting — ordinary least squares over a value series,
//! projected forward with a symmetric confidence band.

use chrono::Duration;
use donorpulse_core::config::ForecastConfig;
use donorpulse_core::types::parse_date;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One observed point of a historical series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: String,
    pub value: f64,
}

/// A point on the combined history + projection series. Historical points
/// carry `actual` only; projected points carry `forecast` and the band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
}

/// Projects a short-horizon forecast from a historical series. Holds only
/// the configured horizon and band z-score.
pub struct TrendForecaster {
    horizon: usize,
    confidence_z: f64,
}

impl TrendForecaster {
    pub fn new(config: &ForecastConfig) -> Self {
        Self {
            horizon: config.horizon,
            confidence_z: config.confidence_z,
        }
    }

    /// Forecast with the configured default horizon.
    pub fn forecast(&self, history: &[HistoryPoint]) -> Vec<ForecastPoint> {
        self.forecast_horizon(history, self.horizon)
    }

    /// Emit all historical points unchanged followed by `horizon`
    /// projected points with a `forecast ± z·se` band, where `se` is the
    /// standard error of the regression residuals (zero when fewer than
    /// three points constrain the fit).
    ///
    /// Projected dates continue the step between the last two historical
    /// dates (one day when the step cannot be inferred). An empty history
    /// yields an empty series; a single point flat-lines at its value.
    pub fn forecast_horizon(&self, history: &[HistoryPoint], horizon: usize) -> Vec<ForecastPoint> {
        let mut series: Vec<ForecastPoint> = history
            .iter()
            .map(|p| ForecastPoint {
                date: p.date.clone(),
                actual: Some(p.value),
                forecast: None,
                lower: None,
                upper: None,
            })
            .collect();

        if history.is_empty() {
            return series;
        }

        let Some(last_date) = history.last().and_then(|p| parse_date(&p.date)) else {
            warn!("Last historical date is unparseable; skipping projection");
            return series;
        };

        let n = history.len();
        let (slope, intercept) = linear_regression(history);
        let se = residual_std_error(history, slope, intercept);
        let band = self.confidence_z * se;
        let step_days = date_step_days(history);

        for k in 0..horizon {
            let projected = slope * (n + k) as f64 + intercept;
            let date = last_date + Duration::days(step_days * (k as i64 + 1));
            series.push(ForecastPoint {
                date: date.format("%Y-%m-%d").to_string(),
                actual: None,
                forecast: Some(projected),
                lower: Some(projected - band),
                upper: Some(projected + band),
            });
        }

        series
    }
}

/// Step between the last two historical dates, in days; 1 when the series
/// is too short or the dates do not parse.
fn date_step_days(history: &[HistoryPoint]) -> i64 {
    if history.len() < 2 {
        return 1;
    }
    let last = parse_date(&history[history.len() - 1].date);
    let prev = parse_date(&history[history.len() - 2].date);
    match (prev, last) {
        (Some(a), Some(b)) => (b - a).num_days().max(1),
        _ => 1,
    }
}

/// Ordinary least squares over the point index: returns (slope, intercept).
fn linear_regression(points: &[HistoryPoint]) -> (f64, f64) {
    let n = points.len() as f64;
    if n < 2.0 {
        return (0.0, points.first().map(|p| p.value).unwrap_or(0.0));
    }

    let sum_x: f64 = (0..points.len()).map(|i| i as f64).sum();
    let sum_y: f64 = points.iter().map(|p| p.value).sum();
    let sum_xy: f64 = points
        .iter()
        .enumerate()
        .map(|(i, p)| i as f64 * p.value)
        .sum();
    let sum_x2: f64 = (0..points.len()).map(|i| (i * i) as f64).sum();

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator.abs() < f64::EPSILON {
        return (0.0, sum_y / n);
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    (slope, intercept)
}

/// Standard error of the regression residuals, `sqrt(Σr² / (n − 2))`;
/// zero when the fit is exact or under-determined.
fn residual_std_error(points: &[HistoryPoint], slope: f64, intercept: f64) -> f64 {
    let n = points.len();
    if n <= 2 {
        return 0.0;
    }

    let sum_sq: f64 = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let residual = p.value - (slope * i as f64 + intercept);
            residual * residual
        })
        .sum();

    (sum_sq / (n - 2) as f64).sqrt()
}
