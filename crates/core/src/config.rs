use chrono::Weekday;
use serde::Deserialize;

/// Root analytics configuration. Loaded from environment variables
/// with the prefix `DONOR_PULSE__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default)]
    pub bucketing: BucketingConfig,
    #[serde(default)]
    pub attribution: AttributionConfig,
    #[serde(default)]
    pub forecast: ForecastConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BucketingConfig {
    /// Day weekly buckets start on: "monday" or "sunday".
    #[serde(default = "default_week_start")]
    pub week_start: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttributionConfig {
    /// Half-life of the time-decay model, in days.
    #[serde(default = "default_half_life_days")]
    pub half_life_days: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastConfig {
    /// Number of future periods projected when no horizon is given.
    #[serde(default = "default_horizon")]
    pub horizon: usize,
    /// z-score of the confidence band (1.96 ≈ 95%).
    #[serde(default = "default_confidence_z")]
    pub confidence_z: f64,
}

// Default functions
fn default_week_start() -> String {
    "monday".to_string()
}
fn default_half_life_days() -> f64 {
    7.0
}
fn default_horizon() -> usize {
    7
}
fn default_confidence_z() -> f64 {
    1.96
}

impl Default for BucketingConfig {
    fn default() -> Self {
        Self {
            week_start: default_week_start(),
        }
    }
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            half_life_days: default_half_life_days(),
        }
    }
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: default_horizon(),
            confidence_z: default_confidence_z(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            bucketing: BucketingConfig::default(),
            attribution: AttributionConfig::default(),
            forecast: ForecastConfig::default(),
        }
    }
}

impl BucketingConfig {
    /// Resolve the configured week start. Unrecognized values fall back
    /// to Monday.
    pub fn week_start_day(&self) -> Weekday {
        match self.week_start.to_ascii_lowercase().as_str() {
            "sunday" | "sun" => Weekday::Sun,
            _ => Weekday::Mon,
        }
    }
}

impl AnalyticsConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("DONOR_PULSE")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
