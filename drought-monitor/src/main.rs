//! Drought Monitor
//!
//! Interactive map of monthly water-balance percentiles with crop overlays,
//! a circular region picker and linked region statistics.
//!
//! Data flow:
//! 1. `assets/config.json` is embedded with `include_str!` and parsed once.
//! 2. On mount: the JS scripts load, the map is created and the viewport is
//!    seeded from the `zoom`/`center` URL parameters.
//! 3. Map and region-picker callbacks arrive as `MapEvent`s in a coroutine,
//!    which updates `AppState`.
//! 4. Effects push state changes (time, crops, layers, viewport) back out to
//!    the map and the address bar.

use anyhow::Context;
use dioxus::prelude::*;
use dm_core::config::DashboardConfig;
use dm_core::region::{Generation, RegionQueryTracker, RegionResponse};
use dm_core::sources::{BaseLayer, TileSources};
use dm_core::time_selector::Coverage;
use dm_core::viewport::{Viewport, ViewportSync};
use dm_map_ui::address_bar::BrowserAddressBar;
use dm_map_ui::components::{
    ChartHeader, CropTags, ErrorDisplay, LayerToggles, RegionCharts, RegionControls, TimeSliders,
    TimeWarning, ZoomReset,
};
use dm_map_ui::events::{MapEvent, MapEventSubscription};
use dm_map_ui::js_bridge::{self, JsMap, MapOptions, RasterConfig, VectorLayer};
use dm_map_ui::state::AppState;
use futures::StreamExt;
use std::cell::RefCell;
use std::rc::Rc;

const CONFIG_JSON: &str = include_str!("../assets/config.json");

/// DOM id for the map container div.
const MAP_CONTAINER_ID: &str = "dm-map";

/// South-west and north-east limits of the map.
const MAX_BOUNDS: [[f64; 2]; 2] = [[-360.0, -60.5], [360.0, 85.0]];

const BACKGROUND: &str = "#FFFFFF";
const PRIMARY: &str = "#1B1E23";
const CROP_FILL: &str = "#7EB36A";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("drought-monitor-root"))
        .launch(App);
}

fn load_config(json: &str) -> anyhow::Result<(DashboardConfig, Coverage)> {
    let config = DashboardConfig::from_json(json).context("invalid dashboard config")?;
    let coverage = config.coverage().context("invalid coverage dates")?;
    log::info!(
        "{} {:?} coverage {} .. {} (data through {})",
        config.variable,
        config.granularity,
        coverage.min_date,
        coverage.max_date,
        coverage.max_available
    );
    Ok((config, coverage))
}

fn tile_sources(config: &DashboardConfig) -> TileSources {
    TileSources::new(&config.raster_base_url, &config.vector_base_url)
}

fn map_options(config: &DashboardConfig, viewport: Viewport) -> MapOptions {
    let sources = tile_sources(config);
    MapOptions {
        zoom: viewport.zoom,
        center: viewport.center,
        max_zoom: config.max_zoom,
        max_bounds: MAX_BOUNDS,
        base_layers: vec![
            VectorLayer::fill(&sources.base(BaseLayer::Ocean), BACKGROUND, 1.0),
            VectorLayer::line(&sources.base(BaseLayer::States), PRIMARY, 1.0).hidden(),
            VectorLayer::line(&sources.base(BaseLayer::Countries), PRIMARY, 1.0).hidden(),
            VectorLayer::fill(&sources.base(BaseLayer::Lakes), BACKGROUND, 1.0),
            VectorLayer::line(&sources.base(BaseLayer::Lakes), PRIMARY, 1.0),
            VectorLayer::line(&sources.base(BaseLayer::Land), PRIMARY, 1.0),
        ],
    }
}

#[component]
fn App() -> Element {
    let loaded = use_hook(|| load_config(CONFIG_JSON).map_err(|e| format!("{e:#}")));

    match loaded {
        Ok((config, coverage)) => rsx! { Dashboard { config, coverage } },
        Err(message) => {
            log::error!("{message}");
            rsx! { ErrorDisplay { message } }
        }
    }
}

#[component]
fn Dashboard(config: DashboardConfig, coverage: Coverage) -> Element {
    let mut state = use_context_provider(move || AppState::new(config, coverage));
    let sync = use_hook(|| Rc::new(RefCell::new(ViewportSync::new())));
    let address_bar = use_hook(|| Rc::new(RefCell::new(BrowserAddressBar::new())));
    let tracker = use_hook(|| Rc::new(RefCell::new(RegionQueryTracker::new())));

    // ─── Map events: camera moves and region picker results ───
    let events = {
        let sync = sync.clone();
        let tracker = tracker.clone();
        use_coroutine(move |mut rx: UnboundedReceiver<MapEvent>| {
            let sync = sync.clone();
            let tracker = tracker.clone();
            async move {
                while let Some(event) = rx.next().await {
                    match event {
                        MapEvent::MoveEnd => {
                            let viewport = sync.borrow().on_move_end(&JsMap);
                            state.set_viewport(viewport);
                        }
                        MapEvent::RegionChanged => {
                            let generation = tracker.borrow_mut().issue();
                            let variable = state.config.peek().variable.clone();
                            js_bridge::query_region(generation.0, &variable);
                        }
                        MapEvent::RegionData {
                            generation,
                            payload,
                        } => {
                            let Some(payload) =
                                tracker.borrow().accept(Generation(generation), payload)
                            else {
                                continue;
                            };
                            let variable = state.config.peek().variable.clone();
                            match RegionResponse::from_value(&payload, &variable) {
                                Ok(response) => state.set_region(response),
                                Err(e) => {
                                    log::warn!("discarding region payload: {e}");
                                    state.set_error(Some(format!("Region data unreadable: {e}")));
                                }
                            }
                        }
                    }
                }
            }
        })
    };
    use_hook(|| Rc::new(MapEventSubscription::new(events.tx())));

    // ─── Effect 1: load scripts, create the map, seed the viewport from the URL ───
    {
        let sync = sync.clone();
        let address_bar = address_bar.clone();
        use_effect(move || {
            js_bridge::init_scripts();
            let config = state.config.peek().clone();
            let mut bar = address_bar.borrow_mut();
            let viewport = match bar.as_mut() {
                Some(bar) => sync.borrow_mut().load(bar, &mut JsMap),
                None => config.default_viewport,
            };
            js_bridge::init_map(MAP_CONTAINER_ID, &map_options(&config, viewport));
            state.set_viewport(viewport);
        });
    }

    // ─── Effect 2: mirror viewport changes into the URL ───
    {
        let sync = sync.clone();
        let address_bar = address_bar.clone();
        use_effect(move || {
            let viewport = (state.viewport)();
            if let Some(bar) = address_bar.borrow_mut().as_mut() {
                sync.borrow_mut().on_state_change(bar, &viewport);
            }
        });
    }

    // ─── Effect 3: raster layer follows time and visibility ───
    use_effect(move || {
        let config = state.config.read().clone();
        let time = state.current_time();
        // Nothing is drawn past the last published period.
        let visible = (state.show_raster)() && state.data_available();
        js_bridge::set_raster(&RasterConfig {
            source: tile_sources(&config).raster(&config.variable),
            variable: config.variable.clone(),
            time,
            clim: config.domain,
            colormap: &js_bridge::DROUGHT_PALETTE,
            visible,
        });
    });

    // ─── Effect 4: crop overlay ───
    use_effect(move || {
        let active = state.crops.read().active().map(str::to_string);
        let layers = match active {
            Some(crop) => {
                let (mask, outline) = tile_sources(&state.config.peek()).crop(&crop);
                vec![
                    VectorLayer::fill(&mask, CROP_FILL, 0.5),
                    VectorLayer::line(&outline, "black", 1.0),
                ]
            }
            None => Vec::new(),
        };
        js_bridge::set_crop_overlay(&layers);
    });

    // ─── Effect 5: state and country outlines ───
    use_effect(move || {
        js_bridge::set_layer_visible("states-line", (state.show_states)());
        js_bridge::set_layer_visible("countries-line", (state.show_countries)());
    });

    // ─── Effect 6: region picker on/off ───
    use_effect(move || {
        let enabled = (state.show_region_picker)();
        js_bridge::set_region_picker(enabled);
        if !enabled {
            // Anything still in flight belongs to the old region.
            tracker.borrow_mut().issue();
            state.set_region(RegionResponse::Loading);
        }
    });

    let updating = coverage.max_available < coverage.max_date;

    // ─── Render ───
    rsx! {
        div {
            style: "display: flex; height: 100vh; font-family: system-ui, -apple-system, sans-serif; color: {PRIMARY};",

            div {
                style: "position: relative; flex: 1;",
                div {
                    id: "{MAP_CONTAINER_ID}",
                    style: "position: absolute; inset: 0;",
                }
                TimeWarning {}
                RegionControls {}
                ZoomReset {}
            }

            div {
                style: "width: 360px; overflow-y: auto; padding: 16px; border-left: 1px solid #e0e0e0;",
                h1 {
                    style: "margin: 0 0 12px 0; font-size: 24px;",
                    "Drought Monitor"
                }

                if let Some(err) = state.error_msg.read().as_ref() {
                    ErrorDisplay { message: err.clone() }
                }

                CropTags {}

                ChartHeader {
                    title: "Water balance".to_string(),
                    description: "Moisture anomalies as percentiles relative to 1991-2020. Values near 50 are normal; lower is drier, higher is wetter.".to_string(),
                }
                if updating {
                    p {
                        style: "margin: 0 0 8px 0; color: red; font-style: italic; font-size: 13px;",
                        "The data for this site is currently being updated."
                    }
                }
                LayerToggles {}
                TimeSliders {}

                if (state.show_region_picker)() {
                    RegionCharts {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_loads() {
        let (config, coverage) = load_config(CONFIG_JSON).unwrap();
        assert_eq!(config.variable, "drought");
        assert_eq!(coverage.min_year(), 2001);
        assert_eq!(coverage.max_year(), 2024);
    }

    #[test]
    fn base_layers_include_hidden_outlines() {
        let options = map_options(&DashboardConfig::default(), Viewport::default());
        let states = options
            .base_layers
            .iter()
            .find(|l| l.id == "states-line")
            .unwrap();
        assert!(!states.visible);
        assert_eq!(options.base_layers.len(), 6);
        assert_eq!(options.max_bounds, MAX_BOUNDS);
    }
}
