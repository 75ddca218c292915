//! Region query payloads and the generation guard for in-flight queries.

use crate::error::{DmError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::rc::Rc;

/// NetCDF/CF default fill value for f32 data. Marks cells with no observation.
pub const FILL_VALUE: f64 = 9.969209968386869e36;

pub fn is_fill(value: f64) -> bool {
    value == FILL_VALUE
}

/// Per-point coordinates and the time axis of a region query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(default)]
    pub lat: Vec<f64>,
    #[serde(default)]
    pub lon: Vec<f64>,
    #[serde(default)]
    pub time: Vec<String>,
}

/// Bounding box of the selected points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Extent {
    pub lat: [f64; 2],
    pub lon: [f64; 2],
}

/// Samples of one variable inside the selected region, keyed by timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionDataset {
    variable: String,
    samples: BTreeMap<String, Vec<f64>>,
    coordinates: Coordinates,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSamples {
    ByTime(BTreeMap<String, Vec<Option<f64>>>),
    Single(Vec<Option<f64>>),
}

// Nulls show up where a NaN went through JSON; treat them as missing.
fn fill_nulls(values: Vec<Option<f64>>) -> Vec<f64> {
    values.into_iter().map(|v| v.unwrap_or(FILL_VALUE)).collect()
}

impl RegionDataset {
    pub fn new(
        variable: &str,
        samples: BTreeMap<String, Vec<f64>>,
        coordinates: Coordinates,
    ) -> Self {
        let mut coordinates = coordinates;
        if coordinates.time.is_empty() {
            coordinates.time = samples.keys().cloned().collect();
        }
        Self {
            variable: variable.to_string(),
            samples,
            coordinates,
        }
    }

    /// Decode a payload shaped `{ <variable>: {time: [..]}, coordinates: {..} }`.
    pub fn from_value(value: &Value, variable: &str) -> Result<Self> {
        let raw = value
            .get(variable)
            .ok_or_else(|| DmError::UnknownVariable(variable.to_string()))?;
        let coordinates: Coordinates = match value.get("coordinates") {
            Some(c) => serde_json::from_value(c.clone())?,
            None => Coordinates::default(),
        };
        if coordinates.lat.len() != coordinates.lon.len() {
            return Err(DmError::InvalidRegion(format!(
                "{} latitudes but {} longitudes",
                coordinates.lat.len(),
                coordinates.lon.len()
            )));
        }

        let samples = match serde_json::from_value::<RawSamples>(raw.clone())? {
            RawSamples::ByTime(map) => map
                .into_iter()
                .map(|(t, values)| (t, fill_nulls(values)))
                .collect(),
            RawSamples::Single(values) => match coordinates.time.as_slice() {
                [only] => BTreeMap::from([(only.clone(), fill_nulls(values))]),
                axis => {
                    return Err(DmError::InvalidRegion(format!(
                        "flat sample array needs exactly one timestamp, found {}",
                        axis.len()
                    )))
                }
            },
        };
        Ok(Self::new(variable, samples, coordinates))
    }

    pub fn from_json(json: &str, variable: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value, variable)
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    /// Timestamps in time-axis order.
    pub fn times(&self) -> &[String] {
        &self.coordinates.time
    }

    pub fn samples_at(&self, time: &str) -> Option<&[f64]> {
        self.samples.get(time).map(Vec::as_slice)
    }

    pub fn extent(&self) -> Result<Extent> {
        let range = |values: &[f64]| {
            values
                .iter()
                .copied()
                .filter(|v| v.is_finite())
                .fold(None, |acc: Option<[f64; 2]>, v| match acc {
                    Some([lo, hi]) => Some([lo.min(v), hi.max(v)]),
                    None => Some([v, v]),
                })
        };
        match (range(&self.coordinates.lat), range(&self.coordinates.lon)) {
            (Some(lat), Some(lon)) => Ok(Extent { lat, lon }),
            _ => Err(DmError::EmptyExtent),
        }
    }
}

/// What the region picker delivered: nothing yet, or a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionResponse {
    Loading,
    Ready(Rc<RegionDataset>),
}

impl RegionResponse {
    /// `null` (or an empty body) means the query is still running.
    pub fn parse(json: &str, variable: &str) -> Result<Self> {
        let value: Value = if json.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(json)?
        };
        Self::from_value(&value, variable)
    }

    pub fn from_value(value: &Value, variable: &str) -> Result<Self> {
        if value.is_null() {
            return Ok(RegionResponse::Loading);
        }
        RegionDataset::from_value(value, variable).map(|d| RegionResponse::Ready(Rc::new(d)))
    }

    pub fn dataset(&self) -> Option<&Rc<RegionDataset>> {
        match self {
            RegionResponse::Ready(d) => Some(d),
            RegionResponse::Loading => None,
        }
    }
}

/// Token attached to one outgoing region query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(pub u64);

/// Issues increasing generations and rejects responses to superseded
/// queries, so the latest region selection always wins.
#[derive(Debug, Default)]
pub struct RegionQueryTracker {
    latest: u64,
}

impl RegionQueryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> Generation {
        self.latest += 1;
        Generation(self.latest)
    }

    pub fn latest(&self) -> Generation {
        Generation(self.latest)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.latest
    }

    /// Pass `response` through only if it answers the latest query.
    pub fn accept<T>(&self, generation: Generation, response: T) -> Option<T> {
        if self.is_current(generation) {
            Some(response)
        } else {
            log::debug!(
                "dropping region response for generation {} (latest {})",
                generation.0,
                self.latest
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "drought": {
            "2020-01-01": [0.25, 9.969209968386869e36, 0.75],
            "2020-02-01": [null, 0.5, 0.5]
        },
        "coordinates": {
            "lat": [10.0, 12.5, 11.0],
            "lon": [-3.0, -1.0, -2.5],
            "time": ["2020-01-01", "2020-02-01"]
        }
    }"#;

    #[test]
    fn parses_time_keyed_payload() {
        let dataset = RegionDataset::from_json(PAYLOAD, "drought").unwrap();
        assert_eq!(dataset.times(), ["2020-01-01", "2020-02-01"]);
        let jan = dataset.samples_at("2020-01-01").unwrap();
        assert!(is_fill(jan[1]));
        let feb = dataset.samples_at("2020-02-01").unwrap();
        assert!(is_fill(feb[0]));
    }

    #[test]
    fn missing_variable_is_an_error() {
        let err = RegionDataset::from_json(PAYLOAD, "soil_moisture").unwrap_err();
        assert!(matches!(err, DmError::UnknownVariable(v) if v == "soil_moisture"));
    }

    #[test]
    fn flat_array_uses_single_timestamp() {
        let json = r#"{"drought": [0.1, 0.2], "coordinates": {"lat": [1, 2], "lon": [3, 4], "time": ["2021-05-01"]}}"#;
        let dataset = RegionDataset::from_json(json, "drought").unwrap();
        assert_eq!(dataset.samples_at("2021-05-01"), Some(&[0.1, 0.2][..]));

        let ambiguous = r#"{"drought": [0.1], "coordinates": {"time": ["a", "b"]}}"#;
        assert!(RegionDataset::from_json(ambiguous, "drought").is_err());
    }

    #[test]
    fn extent_spans_points() {
        let dataset = RegionDataset::from_json(PAYLOAD, "drought").unwrap();
        let extent = dataset.extent().unwrap();
        assert_eq!(extent.lat, [10.0, 12.5]);
        assert_eq!(extent.lon, [-3.0, -1.0]);

        let empty = RegionDataset::new("drought", BTreeMap::new(), Coordinates::default());
        assert!(matches!(empty.extent(), Err(DmError::EmptyExtent)));
    }

    #[test]
    fn null_response_is_loading() {
        assert_eq!(RegionResponse::parse("null", "drought").unwrap(), RegionResponse::Loading);
        assert_eq!(RegionResponse::parse("", "drought").unwrap(), RegionResponse::Loading);
        let ready = RegionResponse::parse(PAYLOAD, "drought").unwrap();
        assert_eq!(ready.dataset().unwrap().variable(), "drought");
    }

    #[test]
    fn stale_generation_is_dropped() {
        let mut tracker = RegionQueryTracker::new();
        let first = tracker.issue();
        let second = tracker.issue();
        assert_eq!(tracker.accept(first, "old region"), None);
        assert_eq!(tracker.accept(second, "new region"), Some("new region"));
        assert!(second > first);
    }
}
