//! Downloadable JSON snapshot of the chart currently on screen.

use crate::error::Result;
use crate::region::Extent;
use chrono::{DateTime, Datelike, Utc};
use dm_utils::dates::gmt_timestamp;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDocument {
    pub attribution: String,
    pub accessed: String,
    pub time: String,
    pub extent: Extent,
    pub data: Value,
}

impl ExportDocument {
    pub fn new(site_url: &str, now: DateTime<Utc>, time: &str, extent: Extent, data: Value) -> Self {
        Self {
            attribution: format!(
                "Woodwell Risk ({}). Drought Monitor [data download]. {}",
                now.year(),
                site_url
            ),
            accessed: gmt_timestamp(&now),
            time: time.to_string(),
            extent,
            data,
        }
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn file_name(&self) -> String {
        format!("bar-chart-{}.json", self.time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn document_has_expected_keys() {
        let now = Utc.with_ymd_and_hms(2024, 7, 2, 14, 5, 9).unwrap();
        let extent = Extent {
            lat: [10.0, 12.5],
            lon: [-3.0, -1.0],
        };
        let doc = ExportDocument::new(
            "https://woodwellrisk.github.io/drought-monitor/",
            now,
            "2024-06-01",
            extent,
            json!([[0.0, 50], [10.0, 50]]),
        );
        assert_eq!(doc.file_name(), "bar-chart-2024-06-01.json");
        assert_eq!(doc.accessed, "Tue, 02 Jul 2024 14:05:09 GMT");
        assert!(doc.attribution.starts_with("Woodwell Risk (2024). Drought Monitor"));

        let text = doc.to_pretty_json().unwrap();
        assert!(text.contains('\n'));
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["time"], "2024-06-01");
        assert_eq!(parsed["extent"]["lat"], json!([10.0, 12.5]));
        assert_eq!(parsed["data"][1][1], 50);
    }
}
