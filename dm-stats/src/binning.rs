//! Percentage-per-bin histograms over a fixed value domain.

use dm_core::config::DashboardConfig;
use dm_core::region::is_fill;
use dm_core::{DmError, Result};
use serde::Serialize;
use serde_json::Value;

/// Domain, bin count and the factor applied to edges for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinSpec {
    domain: [f64; 2],
    bins: usize,
    scale: f64,
}

impl BinSpec {
    pub fn new(domain: [f64; 2], bins: usize, scale: f64) -> Result<Self> {
        let [min, max] = domain;
        if bins == 0 {
            return Err(DmError::InvalidBins("bin count must be at least 1".to_string()));
        }
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(DmError::InvalidBins(format!("bad domain [{min}, {max}]")));
        }
        Ok(Self {
            domain,
            bins,
            scale,
        })
    }

    /// Percentile variables: `[0,1]` shown as 0-100.
    pub fn percentile(bins: usize) -> Result<Self> {
        Self::new([0.0, 1.0], bins, 100.0)
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        Self::new(config.domain, config.bins, config.display_scale())
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn width(&self) -> f64 {
        (self.domain[1] - self.domain[0]) / self.bins as f64
    }

    /// `bins + 1` edges spaced evenly over the domain, rounded to 2 decimals.
    pub fn edges(&self) -> Vec<f64> {
        let width = self.width();
        (0..=self.bins)
            .map(|i| round2(self.domain[0] + i as f64 * width))
            .collect()
    }

    /// Chart x-range: the domain padded by one bin on each side.
    pub fn display_range(&self) -> [f64; 2] {
        let width = self.width();
        [
            round2((self.domain[0] - width) * self.scale),
            round2((self.domain[1] + width) * self.scale),
        ]
    }

    fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.domain[0], self.domain[1])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    /// Left edge in display units.
    pub edge: f64,
    /// Share of valid samples, rounded to a whole percent.
    pub percent: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    /// Samples left after dropping fill values.
    pub valid_count: usize,
}

impl Histogram {
    pub fn total_percent(&self) -> u32 {
        self.bins.iter().map(|b| b.percent).sum()
    }

    /// `[[edge, percent], ...]`, the shape the bar chart and export use.
    pub fn to_pairs_json(&self) -> Value {
        Value::Array(
            self.bins
                .iter()
                .map(|b| serde_json::json!([b.edge, b.percent]))
                .collect(),
        )
    }
}

/// Bin `samples` into `spec.bins() + 1` buckets.
///
/// Fill values are dropped. Everything else saturates into the domain, so a
/// reading below the minimum counts in the first bin and one above the
/// maximum in the last. Bucket `i < bins` is `[edge_i, edge_i+1)`; the final
/// bucket holds values equal to the upper edge.
pub fn bin(samples: &[f64], spec: &BinSpec) -> Histogram {
    let edges = spec.edges();
    let mut counts = vec![0usize; edges.len()];
    let mut valid = 0usize;

    for &value in samples.iter().filter(|v| !is_fill(**v) && !v.is_nan()) {
        let value = spec.clamp(value);
        let slot = edges.partition_point(|&e| e <= value).saturating_sub(1);
        counts[slot] += 1;
        valid += 1;
    }

    let bins = edges
        .iter()
        .zip(&counts)
        .map(|(&edge, &count)| HistogramBin {
            edge: round2(edge * spec.scale),
            percent: if valid == 0 {
                0
            } else {
                (count as f64 / valid as f64 * 100.0).round() as u32
            },
        })
        .collect();

    Histogram {
        bins,
        valid_count: valid,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use dm_core::region::FILL_VALUE;

    fn spec() -> BinSpec {
        BinSpec::percentile(10).unwrap()
    }

    #[test]
    fn edges_are_rounded_and_scaled() {
        let hist = bin(&[], &spec());
        let edges: Vec<f64> = hist.bins.iter().map(|b| b.edge).collect();
        assert_eq!(
            edges,
            vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0]
        );
        assert_eq!(spec().display_range(), [-10.0, 110.0]);
    }

    #[test]
    fn saturates_out_of_domain_values() {
        let low = bin(&[-5.0], &spec());
        assert_eq!(low.bins[0].percent, 100);
        let high = bin(&[5.0], &spec());
        assert_eq!(high.bins.last().unwrap().percent, 100);
        assert_eq!(high.total_percent(), 100);
    }

    #[test]
    fn fill_only_input_is_all_zero() {
        let hist = bin(&[FILL_VALUE, FILL_VALUE], &spec());
        assert_eq!(hist.valid_count, 0);
        assert!(hist.bins.iter().all(|b| b.percent == 0));
        assert_eq!(hist.bins.len(), 11);
    }

    #[test]
    fn half_open_buckets() {
        let hist = bin(&[0.0, 0.05, 0.1, 0.35, 0.999, 1.0, FILL_VALUE], &spec());
        assert_eq!(hist.valid_count, 6);
        let percents: Vec<u32> = hist.bins.iter().map(|b| b.percent).collect();
        // 2/6, 1/6, 1/6, 1/6, 1/6
        assert_eq!(percents, vec![33, 17, 0, 17, 0, 0, 0, 0, 0, 17, 17]);
    }

    #[test]
    fn percentages_sum_to_about_one_hundred() {
        let samples: Vec<f64> = (0..97).map(|i| (i as f64 * 0.37) % 1.0).collect();
        let hist = bin(&samples, &spec());
        let total = hist.total_percent() as i64;
        assert!((total - 100).abs() <= spec().bins() as i64, "total {total}");
    }

    #[test]
    fn rejects_bad_specs() {
        assert!(BinSpec::percentile(0).is_err());
        assert!(BinSpec::new([1.0, 0.0], 5, 1.0).is_err());
        assert!(BinSpec::new([0.0, f64::NAN], 5, 1.0).is_err());
    }

    #[test]
    fn pairs_json_shape() {
        let hist = bin(&[0.5], &BinSpec::percentile(2).unwrap());
        assert_eq!(hist.to_pairs_json(), serde_json::json!([[0.0, 0], [50.0, 100], [100.0, 0]]));
    }
}
