//! Map viewport <-> URL query synchronization.
//!
//! The address bar carries two parameters, `zoom` and `center`. On load they
//! are validated (falling back to defaults, never clamping), written back so
//! the URL always shows an explicit state, and applied to the map. After
//! that the map is the source of truth: move-end events update the shared
//! viewport and each viewport change replaces the URL parameters.

use dm_utils::numbers::{fixed2, round_to};
use serde::{Deserialize, Serialize};

pub const ZOOM_PARAM: &str = "zoom";
pub const CENTER_PARAM: &str = "center";

pub const DEFAULT_ZOOM: f64 = 1.3;
pub const DEFAULT_CENTER: [f64; 2] = [-40.0, 40.0];

const DEFAULT_ZOOM_PARAM: &str = "1.3";
const DEFAULT_CENTER_PARAM: &str = "-40,40";

/// Zoom and `[lon, lat]` center of the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub zoom: f64,
    pub center: [f64; 2],
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            center: DEFAULT_CENTER,
        }
    }
}

impl Viewport {
    /// Both axes and the zoom rounded to 2 decimals.
    pub fn rounded(&self) -> Self {
        Self {
            zoom: round_to(self.zoom, 2),
            center: [round_to(self.center[0], 2), round_to(self.center[1], 2)],
        }
    }

    pub fn zoom_param(&self) -> String {
        fixed2(self.zoom)
    }

    pub fn center_param(&self) -> String {
        format!("{},{}", fixed2(self.center[0]), fixed2(self.center[1]))
    }
}

/// Resolve the `zoom` parameter: any finite number above zero is kept
/// verbatim, everything else becomes the default.
pub fn resolve_zoom(raw: Option<&str>) -> (f64, String) {
    let raw = raw.map(str::trim);
    match raw.and_then(|s| s.parse::<f64>().ok().map(|z| (z, s))) {
        Some((zoom, s)) if zoom.is_finite() && zoom > 0.0 => (zoom, s.to_string()),
        _ => (DEFAULT_ZOOM, DEFAULT_ZOOM_PARAM.to_string()),
    }
}

/// Resolve the `center` parameter (`lon,lat`). An out-of-range coordinate
/// selects the default center rather than a clamped one.
pub fn resolve_center(raw: Option<&str>) -> ([f64; 2], String) {
    let parsed = raw.map(str::trim).and_then(|s| {
        let parts: Vec<f64> = s
            .split(',')
            .map(|p| p.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .ok()?;
        match parts.as_slice() {
            [lon, lat]
                if lon.is_finite()
                    && lat.is_finite()
                    && (-360.0..=360.0).contains(lon)
                    && (-90.0..=90.0).contains(lat) =>
            {
                Some(([*lon, *lat], s.to_string()))
            }
            _ => None,
        }
    });
    parsed.unwrap_or((DEFAULT_CENTER, DEFAULT_CENTER_PARAM.to_string()))
}

/// The browser address bar, seen as a two-key store.
pub trait AddressBar {
    fn param(&self, key: &str) -> Option<String>;

    /// Replace the current history entry's query with `params`.
    fn replace_params(&mut self, params: &[(&str, &str)]);

    /// Make back-navigation immediately re-advance to the current entry.
    fn pin_history(&mut self);
}

/// The map engine's camera.
pub trait MapView {
    fn zoom(&self) -> f64;

    fn center(&self) -> [f64; 2];

    fn jump_to(&mut self, viewport: &Viewport, duration_ms: u32);
}

/// Drives the load / move-end / state-change protocol and suppresses the
/// echo writes that each side would otherwise trigger on the other.
#[derive(Debug, Default)]
pub struct ViewportSync {
    last_synced: Option<Viewport>,
}

impl ViewportSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the viewport from the URL, rewrite the URL to the resolved
    /// values and move the map there without animation.
    pub fn load<A: AddressBar, M: MapView>(&mut self, bar: &mut A, map: &mut M) -> Viewport {
        let zoom_raw = bar.param(ZOOM_PARAM);
        let center_raw = bar.param(CENTER_PARAM);
        let (zoom, zoom_param) = resolve_zoom(zoom_raw.as_deref());
        let (center, center_param) = resolve_center(center_raw.as_deref());
        if zoom_raw.as_deref() != Some(zoom_param.as_str())
            || center_raw.as_deref() != Some(center_param.as_str())
        {
            log::debug!(
                "viewport params {:?}/{:?} resolved to {}/{}",
                zoom_raw,
                center_raw,
                zoom_param,
                center_param
            );
        }

        let viewport = Viewport { zoom, center };
        bar.replace_params(&[(ZOOM_PARAM, &zoom_param), (CENTER_PARAM, &center_param)]);
        map.jump_to(&viewport, 0);
        bar.pin_history();
        self.last_synced = Some(viewport.rounded());
        viewport
    }

    /// Whether `load` has seeded the viewport yet. State changes before
    /// that must not touch the URL.
    pub fn loaded(&self) -> bool {
        self.last_synced.is_some()
    }

    /// Live camera position after the user stops panning/zooming.
    pub fn on_move_end<M: MapView>(&self, map: &M) -> Viewport {
        Viewport {
            zoom: map.zoom(),
            center: map.center(),
        }
        .rounded()
    }

    /// Mirror a viewport change into the URL. Returns false when the URL
    /// already reflects it or nothing was loaded yet.
    pub fn on_state_change<A: AddressBar>(&mut self, bar: &mut A, viewport: &Viewport) -> bool {
        let viewport = viewport.rounded();
        if !self.loaded() || self.last_synced == Some(viewport) {
            return false;
        }
        bar.replace_params(&[
            (ZOOM_PARAM, &viewport.zoom_param()),
            (CENTER_PARAM, &viewport.center_param()),
        ]);
        self.last_synced = Some(viewport);
        true
    }
}

/// In-memory address bar, used by the CLI and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryAddressBar {
    params: Vec<(String, String)>,
    pub replacements: usize,
    pub pinned: bool,
}

impl MemoryAddressBar {
    /// Parse a query string such as `?zoom=3.00&center=10.00,20.00`.
    pub fn from_query(query: &str) -> Self {
        let params = query
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (percent_decode(key), percent_decode(value))
            })
            .collect();
        Self {
            params,
            ..Self::default()
        }
    }

    pub fn query_string(&self) -> String {
        self.params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl AddressBar for MemoryAddressBar {
    fn param(&self, key: &str) -> Option<String> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn replace_params(&mut self, params: &[(&str, &str)]) {
        for (key, value) in params {
            match self.params.iter_mut().find(|(k, _)| k == key) {
                Some(entry) => entry.1 = value.to_string(),
                None => self.params.push((key.to_string(), value.to_string())),
            }
        }
        self.replacements += 1;
    }

    fn pin_history(&mut self) {
        self.pinned = true;
    }
}

fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' if i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit() =>
            {
                out.push(hex_value(bytes[i + 1]) << 4 | hex_value(bytes[i + 2]));
                i += 3;
                continue;
            }
            b'+' => out.push(b' '),
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingMap {
        viewport: Viewport,
        jumps: Vec<(Viewport, u32)>,
    }

    impl MapView for RecordingMap {
        fn zoom(&self) -> f64 {
            self.viewport.zoom
        }

        fn center(&self) -> [f64; 2] {
            self.viewport.center
        }

        fn jump_to(&mut self, viewport: &Viewport, duration_ms: u32) {
            self.viewport = *viewport;
            self.jumps.push((*viewport, duration_ms));
        }
    }

    #[test]
    fn valid_params_round_trip_unchanged() {
        let mut bar = MemoryAddressBar::from_query("?zoom=3.00&center=10.00,20.00");
        let mut map = RecordingMap::default();
        let mut sync = ViewportSync::new();

        let viewport = sync.load(&mut bar, &mut map);
        assert_eq!(
            viewport,
            Viewport {
                zoom: 3.0,
                center: [10.0, 20.0]
            }
        );
        assert_eq!(bar.query_string(), "zoom=3.00&center=10.00,20.00");
        assert_eq!(map.jumps, vec![(viewport, 0)]);
        assert!(bar.pinned);

        // the map echoes the same camera back on move-end
        let echoed = sync.on_move_end(&map);
        assert!(!sync.on_state_change(&mut bar, &echoed));
        assert_eq!(bar.query_string(), "zoom=3.00&center=10.00,20.00");
    }

    #[test]
    fn out_of_range_latitude_falls_back_to_default_center() {
        let mut bar = MemoryAddressBar::from_query("zoom=2&center=10,200");
        let mut map = RecordingMap::default();
        let viewport = ViewportSync::new().load(&mut bar, &mut map);
        assert_eq!(viewport.center, DEFAULT_CENTER);
        assert_eq!(viewport.zoom, 2.0);
        assert_eq!(bar.param(CENTER_PARAM).as_deref(), Some("-40,40"));
    }

    #[test]
    fn missing_and_malformed_params_take_defaults() {
        let mut bar = MemoryAddressBar::from_query("");
        let viewport = ViewportSync::new().load(&mut bar, &mut RecordingMap::default());
        assert_eq!(viewport, Viewport::default());
        assert_eq!(bar.query_string(), "zoom=1.3&center=-40,40");

        for zoom in ["0", "-2", "abc", "NaN", "inf"] {
            assert_eq!(resolve_zoom(Some(zoom)).0, DEFAULT_ZOOM, "zoom={zoom}");
        }
        for center in ["10", "10,20,30", "a,b", "10,", "400,10", "10,-90.5"] {
            assert_eq!(resolve_center(Some(center)).0, DEFAULT_CENTER, "center={center}");
        }
        assert_eq!(resolve_center(Some("-360,-90")).0, [-360.0, -90.0]);
    }

    #[test]
    fn state_changes_before_load_leave_url_alone() {
        let mut bar = MemoryAddressBar::from_query("zoom=5.5&center=1,2");
        let mut sync = ViewportSync::new();
        assert!(!sync.on_state_change(&mut bar, &Viewport::default()));
        assert_eq!(bar.query_string(), "zoom=5.5&center=1,2");

        // unrounded URL values are not rewritten by the first echo
        let mut bar = MemoryAddressBar::from_query("zoom=3.456&center=1,2");
        let mut map = RecordingMap::default();
        let viewport = sync.load(&mut bar, &mut map);
        assert!(sync.loaded());
        assert!(!sync.on_state_change(&mut bar, &viewport));
        assert_eq!(bar.query_string(), "zoom=3.456&center=1,2");
    }

    #[test]
    fn encoded_comma_is_decoded() {
        let bar = MemoryAddressBar::from_query("center=12.5%2C-3.25");
        assert_eq!(resolve_center(bar.param(CENTER_PARAM).as_deref()).0, [12.5, -3.25]);
    }

    #[test]
    fn escapes_need_two_hex_digits() {
        let bar = MemoryAddressBar::from_query("center=10%+120&zoom=%4");
        assert_eq!(bar.param(CENTER_PARAM).as_deref(), Some("10% 120"));
        assert_eq!(bar.param(ZOOM_PARAM).as_deref(), Some("%4"));
        assert_eq!(resolve_center(bar.param(CENTER_PARAM).as_deref()).0, DEFAULT_CENTER);
        assert_eq!(MemoryAddressBar::from_query("zoom=%3a").param(ZOOM_PARAM).as_deref(), Some(":"));
    }

    #[test]
    fn padded_params_are_written_back_trimmed() {
        assert_eq!(resolve_zoom(Some(" 3")), (3.0, "3".to_string()));
        assert_eq!(resolve_center(Some(" 10,20 ")), ([10.0, 20.0], "10,20".to_string()));

        let mut bar = MemoryAddressBar::from_query("zoom=%203&center=10,20");
        ViewportSync::new().load(&mut bar, &mut RecordingMap::default());
        assert_eq!(bar.query_string(), "zoom=3&center=10,20");
    }

    #[test]
    fn move_end_rounds_and_state_change_replaces() {
        let mut bar = MemoryAddressBar::from_query("");
        let mut map = RecordingMap::default();
        let mut sync = ViewportSync::new();
        sync.load(&mut bar, &mut map);
        let writes_after_load = bar.replacements;

        map.viewport = Viewport {
            zoom: 4.56789,
            center: [12.3456, -7.891],
        };
        let moved = sync.on_move_end(&map);
        assert_eq!(
            moved,
            Viewport {
                zoom: 4.57,
                center: [12.35, -7.89]
            }
        );
        assert!(sync.on_state_change(&mut bar, &moved));
        assert_eq!(bar.query_string(), "zoom=4.57&center=12.35,-7.89");
        assert_eq!(bar.replacements, writes_after_load + 1);
        assert!(!sync.on_state_change(&mut bar, &moved));
    }
}
