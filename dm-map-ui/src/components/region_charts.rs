//! Sidebar statistics for the selected region.
//!
//! Shows the region average at the current time, a histogram of the region's
//! samples and the change-over-time line. The per-timestamp summary is cached
//! on the dataset's identity, so moving the sliders only re-bins one
//! timestamp.

use super::{ChartContainer, ChartHeader, DownloadButton, ErrorDisplay, LoadingSpinner};
use crate::js_bridge;
use crate::state::AppState;
use dioxus::prelude::*;
use dm_stats::binning::BinSpec;
use dm_stats::series::time_series;
use dm_stats::summary::{histogram_at, mean_label, SummaryCache};
use std::cell::RefCell;
use std::rc::Rc;

/// DOM id for the histogram container.
pub const BAR_CHART_ID: &str = "dm-bar-chart";
/// DOM id for the change-over-time container.
pub const TIME_SERIES_ID: &str = "dm-time-series";


#[component]
pub fn RegionCharts() -> Element {
    let state = use_context::<AppState>();
    let cache = use_hook(|| Rc::new(RefCell::new(SummaryCache::new())));

    let effect_cache = cache.clone();
    use_effect(move || {
        let region = state.region.read().clone();
        let (current, sliding, coverage) = {
            let time = state.time.read();
            (time.canonical_time(), time.sliding(), *time.coverage())
        };
        let config = state.config.read().clone();

        let Some(dataset) = region.dataset() else {
            js_bridge::destroy_chart(BAR_CHART_ID);
            js_bridge::destroy_chart(TIME_SERIES_ID);
            return;
        };
        let spec = match BinSpec::from_config(&config) {
            Ok(spec) => spec,
            Err(e) => {
                log::error!("invalid bin configuration: {e}");
                return;
            }
        };

        let histogram = histogram_at(dataset, &current, &spec);
        let scale = config.display_scale();
        let unit = if scale == 100.0 { "Percentile" } else { config.variable.as_str() };
        let bar_config = serde_json::json!({
            "xRange": spec.display_range(),
            "binWidth": spec.width() * scale,
            "xLabel": unit,
            "yLabel": "Percent",
            "colors": js_bridge::DROUGHT_PALETTE,
        });
        js_bridge::render_bar_chart(
            BAR_CHART_ID,
            &histogram.to_pairs_json().to_string(),
            &bar_config.to_string(),
        );

        match effect_cache.borrow_mut().get(dataset, &config.variable) {
            Ok(summary) => {
                let series = time_series(&summary, dataset.times(), &current);
                let series_config = serde_json::json!({
                    "yDomain": config.domain,
                    "yLabel": unit,
                    "sliding": sliding,
                    "startLabel": coverage.min_year().to_string(),
                    "endLabel": coverage.max_year().to_string(),
                });
                let data_json = serde_json::to_string(&series).unwrap_or_default();
                js_bridge::render_time_series(TIME_SERIES_ID, &data_json, &series_config.to_string());
            }
            Err(e) => log::error!("region summary failed: {e}"),
        }
    });

    let region = state.region.read().clone();
    let Some(dataset) = region.dataset().cloned() else {
        return rsx! { LoadingSpinner {} };
    };
    let config = state.config.read().clone();
    let current = state.current_time();

    let summary = match cache.borrow_mut().get(&dataset, &config.variable) {
        Ok(summary) => summary,
        Err(e) => return rsx! { ErrorDisplay { message: e.to_string() } },
    };
    let label = mean_label(summary.get(&current).copied(), config.display_scale());

    let export = BinSpec::from_config(&config)
        .ok()
        .zip(dataset.extent().ok())
        .map(|(spec, extent)| (extent, histogram_at(&dataset, &current, &spec).to_pairs_json()));

    rsx! {
        div {
            style: "margin-top: 12px;",
            div {
                style: "font-family: monospace; text-transform: uppercase;",
                "{label}"
            }
            ChartContainer { id: BAR_CHART_ID.to_string() }
            if let Some((extent, data)) = export {
                DownloadButton { time: current.clone(), extent, data }
            }
            ChartHeader {
                title: "Change over time".to_string(),
                description: "Region average for every published period.".to_string(),
            }
            ChartContainer { id: TIME_SERIES_ID.to_string() }
        }
    }
}
