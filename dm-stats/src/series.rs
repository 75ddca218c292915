//! Change-over-time series for the region average.

use crate::summary::Summary;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Position on the time axis.
    pub index: usize,
    pub time: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    /// Points with data; timestamps averaging to `NaN` are left out.
    pub points: Vec<SeriesPoint>,
    /// Axis length, so gaps keep their horizontal position.
    pub axis_len: usize,
    /// Axis position of the selected time, if it is on the axis.
    pub current_index: Option<usize>,
    /// Value at the selected time, if it has data.
    pub current_value: Option<f64>,
}

pub fn time_series(summary: &Summary, axis: &[String], current_time: &str) -> TimeSeries {
    let points = axis
        .iter()
        .enumerate()
        .filter_map(|(index, time)| {
            let value = *summary.get(time)?;
            (!value.is_nan()).then(|| SeriesPoint {
                index,
                time: time.clone(),
                value,
            })
        })
        .collect::<Vec<_>>();
    let current_index = axis.iter().position(|t| t == current_time);
    let current_value = summary
        .get(current_time)
        .copied()
        .filter(|v| !v.is_nan());
    TimeSeries {
        points,
        axis_len: axis.len(),
        current_index,
        current_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_gaps_but_keeps_positions() {
        let axis: Vec<String> = ["2001-01-01", "2001-02-01", "2001-03-01", "2001-04-01"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let summary = Summary::from([
            (axis[0].clone(), f64::NAN),
            (axis[1].clone(), 0.3),
            (axis[2].clone(), f64::NAN),
            (axis[3].clone(), 0.7),
        ]);

        let series = time_series(&summary, &axis, "2001-04-01");
        let indices: Vec<usize> = series.points.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![1, 3]);
        assert_eq!(series.axis_len, 4);
        assert_eq!(series.current_index, Some(3));
        assert_eq!(series.current_value, Some(0.7));

        let series = time_series(&summary, &axis, "2001-03-01");
        assert_eq!(series.current_index, Some(2));
        assert_eq!(series.current_value, None);
    }
}
