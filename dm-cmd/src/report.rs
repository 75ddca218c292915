//! Region statistics reports: per-time averages, histograms and exports.

use anyhow::Context;
use chrono::{DateTime, Utc};
use dm_core::config::DashboardConfig;
use dm_core::export::ExportDocument;
use dm_core::region::RegionDataset;
use dm_stats::binning::BinSpec;
use dm_stats::summary::{histogram_at, summarize as summarize_dataset};
use log::info;
use std::io::Write;

/// Write `time,mean` rows in time-axis order. Times without valid samples
/// get an empty mean.
pub fn summarize<W: Write>(dataset: &RegionDataset, variable: &str, out: &mut W) -> anyhow::Result<()> {
    let summary = summarize_dataset(dataset, variable)?;
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["time", "mean"])?;
    let mut empty = 0;
    for time in dataset.times() {
        let mean = summary.get(time).copied().unwrap_or(f64::NAN);
        let field = if mean.is_nan() {
            empty += 1;
            String::new()
        } else {
            mean.to_string()
        };
        wtr.write_record([time.as_str(), field.as_str()])?;
    }
    wtr.flush()?;
    info!(
        "Summarized {} timestamps ({} without data)",
        dataset.times().len(),
        empty
    );
    Ok(())
}

/// Write `edge,percent` rows for the histogram at `time`.
pub fn histogram<W: Write>(
    config: &DashboardConfig,
    dataset: &RegionDataset,
    time: &str,
    out: &mut W,
) -> anyhow::Result<()> {
    let spec = BinSpec::from_config(config)?;
    if dataset.samples_at(time).is_none() {
        log::warn!("{} has no samples at {}", dataset.variable(), time);
    }
    let hist = histogram_at(dataset, time, &spec);
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(["edge", "percent"])?;
    for bin in &hist.bins {
        wtr.write_record([bin.edge.to_string(), bin.percent.to_string()])?;
    }
    wtr.flush()?;
    info!(
        "{} valid samples at {}, {}% binned",
        hist.valid_count,
        time,
        hist.total_percent()
    );
    Ok(())
}

/// The document the dashboard's download button saves for `time`.
pub fn export_document(
    config: &DashboardConfig,
    dataset: &RegionDataset,
    time: &str,
    now: DateTime<Utc>,
) -> anyhow::Result<ExportDocument> {
    let spec = BinSpec::from_config(config)?;
    let extent = dataset
        .extent()
        .context("region has no coordinates to export")?;
    let data = histogram_at(dataset, time, &spec).to_pairs_json();
    Ok(ExportDocument::new(&config.site_url, now, time, extent, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const PAYLOAD: &str = r#"{
        "drought": {
            "2020-01-01": [9.969209968386869e36, 9.969209968386869e36],
            "2020-02-01": [0.25, 0.75]
        },
        "coordinates": {
            "lat": [10.0, 11.0],
            "lon": [20.0, 22.0],
            "time": ["2020-01-01", "2020-02-01"]
        }
    }"#;

    fn dataset() -> RegionDataset {
        RegionDataset::from_json(PAYLOAD, "drought").unwrap()
    }

    #[test]
    fn summary_csv_leaves_no_data_blank() {
        let mut out = Vec::new();
        summarize(&dataset(), "drought", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "time,mean\n2020-01-01,\n2020-02-01,0.5\n");
    }

    #[test]
    fn histogram_csv_has_one_row_per_bucket() {
        let mut out = Vec::new();
        histogram(&DashboardConfig::default(), &dataset(), "2020-02-01", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 12);
        assert_eq!(rows[1], "0,0");
        assert_eq!(rows[3], "20,50");
        assert_eq!(rows[8], "70,50");
        assert_eq!(rows[11], "100,0");
    }

    #[test]
    fn export_uses_dataset_extent() {
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
        let doc = export_document(&DashboardConfig::default(), &dataset(), "2020-02-01", now).unwrap();
        assert_eq!(doc.extent.lat, [10.0, 11.0]);
        assert_eq!(doc.extent.lon, [20.0, 22.0]);
        assert_eq!(doc.file_name(), "bar-chart-2020-02-01.json");
        assert!(doc.attribution.starts_with("Woodwell Risk (2024)."));
    }
}
