//! Fixed intra-year period catalogs.
//!
//! The raster archive is published at a fixed temporal resolution, so the
//! catalogs are hardcoded rather than generated from a calendar.

use serde::{Deserialize, Serialize};

/// Monthly product: first of each month.
pub const MONTHLY_PERIODS: [&str; 12] = [
    "01-01", "02-01", "03-01", "04-01", "05-01", "06-01", "07-01", "08-01", "09-01", "10-01",
    "11-01", "12-01",
];

/// Biweekly product: 26 composites, 14 days apart starting January 1st.
pub const BIWEEKLY_PERIODS: [&str; 26] = [
    "01-01", "01-15", "01-29", "02-12", "02-26", "03-12", "03-26", "04-09", "04-23", "05-07",
    "05-21", "06-04", "06-18", "07-02", "07-16", "07-30", "08-13", "08-27", "09-10", "09-24",
    "10-08", "10-22", "11-05", "11-19", "12-03", "12-17",
];

/// Temporal resolution of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PeriodGranularity {
    #[default]
    Monthly,
    Biweekly,
}

impl PeriodGranularity {
    /// The "MM-DD" catalog for this granularity.
    pub fn values(&self) -> &'static [&'static str] {
        match self {
            PeriodGranularity::Monthly => &MONTHLY_PERIODS,
            PeriodGranularity::Biweekly => &BIWEEKLY_PERIODS,
        }
    }

    /// Short label for a slider tick: "06" for monthly, "06-18" for biweekly.
    pub fn label(&self, index: usize) -> Option<&'static str> {
        let value = self.values().get(index)?;
        match self {
            PeriodGranularity::Monthly => value.get(0..2),
            PeriodGranularity::Biweekly => Some(value),
        }
    }

    /// Slider heading.
    pub fn title(&self) -> &'static str {
        match self {
            PeriodGranularity::Monthly => "Month",
            PeriodGranularity::Biweekly => "Period",
        }
    }
}
