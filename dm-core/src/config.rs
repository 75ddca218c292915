//! Product configuration.
//!
//! Variable, crop list and temporal resolution are data rather than code, so
//! a monthly drought product and a biweekly one share every component.

use crate::error::{DmError, Result};
use crate::periods::PeriodGranularity;
use crate::time_selector::Coverage;
use crate::viewport::{Viewport, DEFAULT_CENTER, DEFAULT_ZOOM};
use serde::{Deserialize, Serialize};

/// Crops with a published growing-area mask.
pub const DEFAULT_CROPS: [&str; 6] = ["cocoa", "coffee", "cotton", "maize", "sugar", "wheat"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    /// Raster variable name, also the zarr store name.
    pub variable: String,
    pub granularity: PeriodGranularity,
    /// First date covered by the archive (YYYY-MM-DD).
    pub min_date: String,
    /// Last date covered by the archive (YYYY-MM-DD).
    pub max_date: String,
    /// Last date with published data; defaults to `max_date`.
    pub max_available_date: Option<String>,
    pub crops: Vec<String>,
    /// Number of histogram bins over `domain`.
    pub bins: usize,
    pub domain: [f64; 2],
    pub raster_base_url: String,
    pub vector_base_url: String,
    /// Landing page cited in exported files.
    pub site_url: String,
    pub default_viewport: Viewport,
    pub max_zoom: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            variable: "drought".to_string(),
            granularity: PeriodGranularity::Monthly,
            min_date: "2001-01-01".to_string(),
            max_date: "2024-06-18".to_string(),
            max_available_date: None,
            crops: DEFAULT_CROPS.iter().map(|c| c.to_string()).collect(),
            bins: 10,
            domain: [0.0, 1.0],
            raster_base_url: "https://storage.googleapis.com/drought-monitor/zarr".to_string(),
            vector_base_url: "https://storage.googleapis.com/drought-monitor/vector".to_string(),
            site_url: "https://woodwellrisk.github.io/drought-monitor/".to_string(),
            default_viewport: Viewport {
                zoom: DEFAULT_ZOOM,
                center: DEFAULT_CENTER,
            },
            max_zoom: 8.0,
        }
    }
}

impl DashboardConfig {
    /// Parse a JSON config; missing keys take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: DashboardConfig = serde_json::from_str(json)
            .map_err(|e| DmError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.variable.is_empty() {
            return Err(DmError::InvalidConfig("variable is empty".to_string()));
        }
        if self.bins == 0 {
            return Err(DmError::InvalidConfig("bins must be at least 1".to_string()));
        }
        let [lo, hi] = self.domain;
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(DmError::InvalidConfig(format!("bad domain [{lo}, {hi}]")));
        }
        self.coverage().map(|_| ())
    }

    /// Dated coverage used by the time selector.
    pub fn coverage(&self) -> Result<Coverage> {
        Coverage::parse(
            &self.min_date,
            &self.max_date,
            self.max_available_date.as_deref(),
        )
    }

    /// Scale applied to bin edges and means for display; percentiles in
    /// `[0,1]` are shown as 0-100.
    pub fn display_scale(&self) -> f64 {
        if self.domain == [0.0, 1.0] {
            100.0
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.crops.len(), 6);
        assert_eq!(config.display_scale(), 100.0);
    }

    #[test]
    fn partial_json_takes_defaults() {
        let config =
            DashboardConfig::from_json(r#"{"granularity": "biweekly", "bins": 20}"#).unwrap();
        assert_eq!(config.granularity, PeriodGranularity::Biweekly);
        assert_eq!(config.bins, 20);
        assert_eq!(config.variable, "drought");
    }

    #[test]
    fn rejects_zero_bins_and_bad_dates() {
        assert!(DashboardConfig::from_json(r#"{"bins": 0}"#).is_err());
        assert!(DashboardConfig::from_json(r#"{"minDate": "2001-13-01"}"#).is_err());
        assert!(DashboardConfig::from_json(r#"{"domain": [1.0, 0.0]}"#).is_err());
    }
}
