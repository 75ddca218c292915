//! Button that puts the circular region picker on the map.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn RegionControls() -> Element {
    let mut state = use_context::<AppState>();
    // Hidden while the warning is up or the time has no data.
    if state.time.read().show_warning() || !state.data_available() {
        return rsx! {};
    }
    let active = (state.show_region_picker)();
    let (background, color) = if active { ("#7EB36A", "#FFFFFF") } else { ("#FFFFFF", "#1B1E23") };

    rsx! {
        button {
            "aria-label": "Toggle region picker",
            title: "Select a region",
            style: "position: absolute; right: 12px; top: 12px; z-index: 5; width: 32px; height: 32px; border: 1px solid #1B1E23; border-radius: 50%; background: {background}; color: {color}; cursor: pointer;",
            onclick: move |_| state.toggle_region_picker(),
            "◯"
        }
    }
}
