//! Per-timestamp averages over a region dataset.

use crate::binning::{bin, BinSpec, Histogram};
use dm_core::region::{is_fill, RegionDataset};
use dm_core::{DmError, Result};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Shown instead of a number when the region has no valid samples.
pub const NO_DATA_LABEL: &str = "no data in region";

/// Mean per timestamp; `NaN` where the region had no valid samples.
pub type Summary = BTreeMap<String, f64>;

/// Arithmetic mean of the non-fill samples, `NaN` when there are none.
pub fn mean(samples: &[f64]) -> f64 {
    let (sum, count) = samples
        .iter()
        .filter(|v| !is_fill(**v))
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// Average every timestamp on the dataset's time axis.
pub fn summarize(dataset: &RegionDataset, variable: &str) -> Result<Summary> {
    if dataset.variable() != variable {
        return Err(DmError::UnknownVariable(variable.to_string()));
    }
    Ok(dataset
        .times()
        .iter()
        .map(|t| (t.clone(), dataset.samples_at(t).map_or(f64::NAN, mean)))
        .collect())
}

/// Histogram of the samples at one timestamp. A timestamp the dataset does
/// not carry bins like an empty region.
pub fn histogram_at(dataset: &RegionDataset, time: &str, spec: &BinSpec) -> Histogram {
    bin(dataset.samples_at(time).unwrap_or_default(), spec)
}

/// Sidebar text for the mean at the selected time. `scale` converts the
/// stored value into display units (100 for percentiles).
pub fn mean_label(mean: Option<f64>, scale: f64) -> String {
    match mean {
        Some(m) if !m.is_nan() => {
            let noun = if scale == 100.0 { "Average percentile" } else { "Average" };
            format!("{}: {:.0}", noun, m * scale)
        }
        _ => NO_DATA_LABEL.to_string(),
    }
}

/// Recomputes the summary only when a different dataset (by identity) or
/// variable comes in. Re-rendering with the same `Rc` is free.
#[derive(Debug, Default)]
pub struct SummaryCache {
    key: Option<(Rc<RegionDataset>, String)>,
    value: Rc<Summary>,
    computations: usize,
}

impl SummaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, dataset: &Rc<RegionDataset>, variable: &str) -> Result<Rc<Summary>> {
        if let Some((cached, cached_variable)) = &self.key {
            if Rc::ptr_eq(cached, dataset) && cached_variable == variable {
                return Ok(Rc::clone(&self.value));
            }
        }
        let summary = Rc::new(summarize(dataset, variable)?);
        log::debug!(
            "summarized {} timestamps for {}",
            summary.len(),
            variable
        );
        self.key = Some((Rc::clone(dataset), variable.to_string()));
        self.value = Rc::clone(&summary);
        self.computations += 1;
        Ok(summary)
    }

    /// How many times the summary was actually computed.
    pub fn computations(&self) -> usize {
        self.computations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dm_core::region::{Coordinates, FILL_VALUE};

    fn dataset() -> RegionDataset {
        let samples = BTreeMap::from([
            ("2020-01-01".to_string(), vec![FILL_VALUE, FILL_VALUE]),
            ("2020-02-01".to_string(), vec![0.2, FILL_VALUE, 0.6]),
        ]);
        let coordinates = Coordinates {
            lat: vec![1.0, 2.0, 3.0],
            lon: vec![4.0, 5.0, 6.0],
            time: vec![
                "2020-01-01".to_string(),
                "2020-02-01".to_string(),
                "2020-03-01".to_string(),
            ],
        };
        RegionDataset::new("drought", samples, coordinates)
    }

    #[test]
    fn fill_only_timestamp_is_nan() {
        let summary = summarize(&dataset(), "drought").unwrap();
        assert!(summary["2020-01-01"].is_nan());
        assert!((summary["2020-02-01"] - 0.4).abs() < 1e-12);
        // on the time axis but absent from the payload
        assert!(summary["2020-03-01"].is_nan());
        assert_eq!(
            mean_label(summary.get("2020-01-01").copied(), 100.0),
            NO_DATA_LABEL
        );
    }

    #[test]
    fn label_formats_percentile() {
        assert_eq!(mean_label(Some(0.4), 100.0), "Average percentile: 40");
        assert_eq!(mean_label(Some(0.456), 100.0), "Average percentile: 46");
        assert_eq!(mean_label(Some(12.4), 1.0), "Average: 12");
        assert_eq!(mean_label(None, 100.0), NO_DATA_LABEL);
    }

    #[test]
    fn wrong_variable_is_rejected() {
        assert!(summarize(&dataset(), "soil_moisture").is_err());
    }

    #[test]
    fn cache_recomputes_only_on_new_dataset() {
        let mut cache = SummaryCache::new();
        let first = Rc::new(dataset());
        cache.get(&first, "drought").unwrap();
        cache.get(&first, "drought").unwrap();
        assert_eq!(cache.computations(), 1);

        // equal contents, different identity
        let second = Rc::new(dataset());
        cache.get(&second, "drought").unwrap();
        assert_eq!(cache.computations(), 2);
    }

    #[test]
    fn histogram_for_missing_time_is_empty() {
        let spec = BinSpec::percentile(10).unwrap();
        let hist = histogram_at(&dataset(), "1999-01-01", &spec);
        assert_eq!(hist.valid_count, 0);
        let hist = histogram_at(&dataset(), "2020-02-01", &spec);
        assert_eq!(hist.valid_count, 2);
        assert_eq!(hist.bins[2].percent, 50);
        assert_eq!(hist.bins[6].percent, 50);
    }
}
