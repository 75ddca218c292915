//! Reusable Dioxus RSX components for the drought monitor.

mod chart_container;
mod chart_header;
mod crop_tags;
mod download_button;
mod error_display;
mod layer_toggles;
mod loading_spinner;
mod region_charts;
mod region_controls;
mod time_sliders;
mod time_warning;
mod zoom_reset;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use crop_tags::CropTags;
pub use download_button::DownloadButton;
pub use error_display::ErrorDisplay;
pub use layer_toggles::LayerToggles;
pub use loading_spinner::LoadingSpinner;
pub use region_charts::{RegionCharts, BAR_CHART_ID, TIME_SERIES_ID};
pub use region_controls::RegionControls;
pub use time_sliders::TimeSliders;
pub use time_warning::TimeWarning;
pub use zoom_reset::ZoomReset;
