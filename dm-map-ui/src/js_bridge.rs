//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! The map engine glue and the D3.js chart functions live in `assets/js/*.js`
//! and are loaded at runtime. They are evaluated as globals (no ES modules)
//! and exposed via `window.*`. This module provides Rust wrappers that
//! serialize arguments and call those globals.

use dm_core::sources::VectorSource;
use dm_core::viewport::{MapView, Viewport};
use serde::Serialize;

// Embed all JS files at compile time
static MAP_JS: &str = include_str!("../assets/js/map.js");
static BAR_CHART_JS: &str = include_str!("../assets/js/bar-chart.js");
static TIME_SERIES_JS: &str = include_str!("../assets/js/time-series.js");

/// Dry-to-wet palette shared by the raster and the histogram bars.
pub const DROUGHT_PALETTE: [&str; 11] = [
    "#B8473F", "#C96A5A", "#D88C78", "#E4AE99", "#EDCFBE", "#F2EEE9",
    "#C6E2E1", "#9BCFCD", "#6FBAB8", "#45A3A2", "#1E8A8B",
];

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('DM JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Quote a Rust string as a JS string literal.
fn js_literal(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "''".to_string())
}

/// Run `call` once `ready` is truthy on `window`, polling every 100ms.
fn call_when_ready(ready: &str, call: &str) {
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.{ready}) {{
                    clearInterval(poll);
                    try {{ {call} }} catch(e) {{ console.error('[DM] bridge call failed:', e); }}
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Initialize the map and chart scripts with a wait-for-libraries polling loop.
///
/// The JS files define functions via `function` declarations. To make them
/// globally accessible (not block-scoped inside the setInterval callback),
/// they are evaluated at global scope with an indirect `eval()` once D3 and
/// MapLibre are loaded, and each function is promoted to `window.*`.
pub fn init_scripts() {
    let all_js = [MAP_JS, BAR_CHART_JS, TIME_SERIES_JS].join("\n");

    let store_js = format!(
        "window.__dmScripts = {};",
        serde_json::to_string(&all_js).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    let init_js = r#"
        (function() {
            var waitForLibs = setInterval(function() {
                if (typeof d3 !== 'undefined' && typeof maplibregl !== 'undefined') {
                    clearInterval(waitForLibs);
                    (0, eval)(window.__dmScripts);
                    delete window.__dmScripts;
                    [
                        'dmInitMap', 'dmJumpTo', 'dmFlyToZoom', 'dmSetLayerVisible',
                        'dmSetCropOverlay', 'dmSetRaster', 'dmSetRegionPicker',
                        'dmQueryRegion', 'dmDownload', 'renderBarChart', 'renderTimeSeries'
                    ].forEach(function(name) {
                        if (typeof eval(name) !== 'undefined') window[name] = eval(name);
                    });
                    window.__dmScriptsReady = true;
                    console.log('DM scripts initialized');
                }
            }, 100);
        })();
    "#;
    let _ = js_sys::eval(init_js);
}

/// Options for creating the map.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    pub zoom: f64,
    pub center: [f64; 2],
    pub max_zoom: f64,
    /// South-west and north-east corners.
    pub max_bounds: [[f64; 2]; 2],
    /// Layers added once the style loads.
    pub base_layers: Vec<VectorLayer>,
}

/// A vector tile layer in the shape `dmInitMap` / `dmSetCropOverlay` expect.
#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VectorLayer {
    pub id: String,
    pub tiles: String,
    pub source_layer: String,
    /// "fill" or "line"
    pub kind: &'static str,
    pub color: &'static str,
    pub opacity: f64,
    pub width: f64,
    pub visible: bool,
}

impl VectorLayer {
    pub fn fill(source: &VectorSource, color: &'static str, opacity: f64) -> Self {
        Self {
            id: format!("{}-fill", source.layer),
            tiles: source.tiles.clone(),
            source_layer: source.layer.clone(),
            kind: "fill",
            color,
            opacity,
            width: 0.0,
            visible: true,
        }
    }

    pub fn line(source: &VectorSource, color: &'static str, width: f64) -> Self {
        Self {
            id: format!("{}-line", source.layer),
            tiles: source.tiles.clone(),
            source_layer: source.layer.clone(),
            kind: "line",
            color,
            opacity: 1.0,
            width,
            visible: true,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// Create the map in `container_id` once the scripts and the container exist.
pub fn init_map(container_id: &str, options: &MapOptions) {
    let options_json = serde_json::to_string(options).unwrap_or_default();
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__dmScriptsReady &&
                    typeof window.dmInitMap !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.dmInitMap('{container_id}', {options});
                    }} catch(e) {{ console.error('[DM] dmInitMap error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
        options = js_literal(&options_json),
    ));
}

/// Raster layer state for the current variable and time.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterConfig {
    pub source: String,
    pub variable: String,
    pub time: String,
    pub clim: [f64; 2],
    pub colormap: &'static [&'static str],
    pub visible: bool,
}

pub fn set_raster(config: &RasterConfig) {
    let json = serde_json::to_string(config).unwrap_or_default();
    call_when_ready("__dmMapReady", &format!("window.dmSetRaster({});", js_literal(&json)));
}

pub fn set_layer_visible(layer_id: &str, visible: bool) {
    call_when_ready(
        "__dmMapReady",
        &format!("window.dmSetLayerVisible({}, {});", js_literal(layer_id), visible),
    );
}

/// Replace the crop overlay; an empty slice removes it.
pub fn set_crop_overlay(layers: &[VectorLayer]) {
    let json = serde_json::to_string(layers).unwrap_or_default();
    call_when_ready("__dmMapReady", &format!("window.dmSetCropOverlay({});", js_literal(&json)));
}

pub fn set_region_picker(enabled: bool) {
    call_when_ready("__dmMapReady", &format!("window.dmSetRegionPicker({enabled});"));
}

/// Ask the region picker for the samples under the current region. The
/// answer comes back as a `regionData` event tagged with `generation`.
pub fn query_region(generation: u64, variable: &str) {
    call_when_ready(
        "__dmMapReady",
        &format!("window.dmQueryRegion({generation}, {});", js_literal(variable)),
    );
}

pub fn fly_to_zoom(zoom: f64) {
    call_when_ready("__dmMapReady", &format!("window.dmFlyToZoom({zoom});"));
}

/// Render the histogram bar chart.
pub fn render_bar_chart(container_id: &str, data_json: &str, config_json: &str) {
    render_chart("renderBarChart", container_id, data_json, config_json);
}

/// Render the change-over-time line chart.
pub fn render_time_series(container_id: &str, data_json: &str, config_json: &str) {
    render_chart("renderTimeSeries", container_id, data_json, config_json);
}

/// Uses a polling loop to wait for the scripts to initialize and the
/// container DOM element to exist before rendering.
fn render_chart(function: &str, container_id: &str, data_json: &str, config_json: &str) {
    call_js(&format!(
        r#"
        (function() {{
            var poll = setInterval(function() {{
                if (window.__dmScriptsReady &&
                    typeof window.{function} !== 'undefined' &&
                    document.getElementById('{container_id}')) {{
                    clearInterval(poll);
                    try {{
                        window.{function}('{container_id}', {data}, {config});
                    }} catch(e) {{ console.error('[DM] {function} error:', e); }}
                }}
            }}, 100);
        }})();
        "#,
        data = js_literal(data_json),
        config = js_literal(config_json),
    ));
}

/// Destroy/clean up a chart in the given container.
pub fn destroy_chart(container_id: &str) {
    call_js(&format!(
        "var el = document.getElementById('{}'); if (el) el.innerHTML = '';",
        container_id
    ));
}

/// Save `contents` as a JSON file download.
pub fn download_json(file_name: &str, contents: &str) {
    call_js(&format!(
        "window.dmDownload({}, {});",
        js_literal(file_name),
        js_literal(contents)
    ));
}

/// The live MapLibre camera behind `window.__dmMap`.
pub struct JsMap;

impl JsMap {
    fn eval_number(expr: &str) -> f64 {
        js_sys::eval(&format!("window.__dmMap ? {expr} : NaN"))
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(f64::NAN)
    }
}

impl MapView for JsMap {
    fn zoom(&self) -> f64 {
        Self::eval_number("window.__dmMap.getZoom()")
    }

    fn center(&self) -> [f64; 2] {
        [
            Self::eval_number("window.__dmMap.getCenter().lng"),
            Self::eval_number("window.__dmMap.getCenter().lat"),
        ]
    }

    fn jump_to(&mut self, viewport: &Viewport, duration_ms: u32) {
        call_when_ready(
            "__dmMapReady",
            &format!(
                "window.dmJumpTo({}, {}, {}, {});",
                viewport.zoom, viewport.center[0], viewport.center[1], duration_ms
            ),
        );
    }
}
