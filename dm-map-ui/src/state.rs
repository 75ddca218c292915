//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.
//! Each field is written only through the methods below; components read the
//! signals directly.

use dm_core::config::DashboardConfig;
use dm_core::crops::CropSelection;
use dm_core::region::RegionResponse;
use dm_core::time_selector::{Coverage, TimeSelector};
use dm_core::viewport::Viewport;
use dioxus::prelude::*;

/// Shared application state for the dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Product configuration (fixed after startup)
    pub config: Signal<DashboardConfig>,
    /// Map zoom and center, mirrored into the URL
    pub viewport: Signal<Viewport>,
    /// Year / period cursor
    pub time: Signal<TimeSelector>,
    /// Active crop overlay
    pub crops: Signal<CropSelection>,
    /// Latest accepted region query result
    pub region: Signal<RegionResponse>,
    /// Whether the region picker is on the map
    pub show_region_picker: Signal<bool>,
    /// Whether the drought raster is drawn
    pub show_raster: Signal<bool>,
    pub show_states: Signal<bool>,
    pub show_countries: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new(config: DashboardConfig, coverage: Coverage) -> Self {
        let time = TimeSelector::new(config.granularity, coverage);
        let crops = CropSelection::new(config.crops.iter().cloned());
        let viewport = config.default_viewport;
        Self {
            config: Signal::new(config),
            viewport: Signal::new(viewport),
            time: Signal::new(time),
            crops: Signal::new(crops),
            region: Signal::new(RegionResponse::Loading),
            show_region_picker: Signal::new(false),
            show_raster: Signal::new(true),
            show_states: Signal::new(false),
            show_countries: Signal::new(false),
            error_msg: Signal::new(None),
        }
    }

    /// Canonical time string of the current cursor.
    pub fn current_time(&self) -> String {
        self.time.read().canonical_time()
    }

    pub fn data_available(&self) -> bool {
        self.time.read().data_available()
    }

    pub fn set_year(&mut self, year: i32) {
        self.time.write().set_year(year);
        self.after_time_change();
    }

    pub fn set_period_index(&mut self, index: usize) {
        self.time.write().set_period_index(index);
        self.after_time_change();
    }

    pub fn set_sliding(&mut self, sliding: bool) {
        self.time.write().set_sliding(sliding);
    }

    pub fn dismiss_warning(&mut self) {
        self.time.write().dismiss_warning();
    }

    pub fn toggle_crop(&mut self, crop: &str) {
        let active = self.crops.write().toggle(crop).map(str::to_string);
        log::debug!("crop overlay now {:?}", active);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        let current = *self.viewport.peek();
        if let Some(viewport) = changed(&current, viewport) {
            self.viewport.set(viewport);
        }
    }

    pub fn set_region(&mut self, region: RegionResponse) {
        self.region.set(region);
    }

    pub fn toggle_region_picker(&mut self) {
        let requested = !*self.show_region_picker.peek();
        let show = self.time.peek().region_picker_allowed(requested);
        self.show_region_picker.set(show);
    }

    pub fn toggle_raster(&mut self) {
        let show = !*self.show_raster.peek();
        self.show_raster.set(show);
    }

    pub fn toggle_states(&mut self) {
        let show = !*self.show_states.peek();
        self.show_states.set(show);
    }

    pub fn toggle_countries(&mut self) {
        let show = !*self.show_countries.peek();
        self.show_countries.set(show);
    }

    pub fn set_error(&mut self, message: Option<String>) {
        self.error_msg.set(message);
    }

    fn after_time_change(&mut self) {
        let shown = *self.show_region_picker.peek();
        let show = self.time.peek().region_picker_allowed(shown);
        if let Some(show) = changed(&shown, show) {
            self.show_region_picker.set(show);
        }
    }
}

/// `next`, unless it equals `current`.
fn changed<T: PartialEq>(current: &T, next: T) -> Option<T> {
    (*current != next).then_some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_viewport_is_not_written() {
        let current = Viewport::default();
        assert_eq!(changed(&current, Viewport::default()), None);

        let moved = Viewport {
            zoom: 4.0,
            ..Viewport::default()
        };
        assert_eq!(changed(&current, moved), Some(moved));
    }

    #[test]
    fn picker_switches_off_only_when_shown() {
        assert_eq!(changed(&true, false), Some(false));
        assert_eq!(changed(&false, false), None);
    }
}
