//! Flies the map back to the initial zoom.

use crate::js_bridge;
use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn ZoomReset() -> Element {
    let state = use_context::<AppState>();
    let initial_zoom = state.config.read().default_viewport.zoom;
    let zoom = state.viewport.read().zoom;
    let at_initial = zoom == initial_zoom;
    let color = if at_initial { "#AAAAAA" } else { "#1B1E23" };

    rsx! {
        button {
            "aria-label": "Reset map extent",
            disabled: at_initial,
            style: "position: absolute; left: 12px; bottom: 20px; z-index: 5; background: none; border: none; font-size: 20px; cursor: pointer; color: {color};",
            // Only the zoom is reset; the center stays where it is.
            onclick: move |_| js_bridge::fly_to_zoom(initial_zoom),
            "⟲"
        }
    }
}
