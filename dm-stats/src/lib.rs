//! Histogram binning and region statistics.
//!
//! This crate turns region query results into the numbers the sidebar
//! shows: the bar chart histogram, the average for the selected time and
//! the change-over-time series.

pub mod binning;
pub mod series;
pub mod summary;
