//! Raster and outline layer switches.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn LayerToggles() -> Element {
    let mut state = use_context::<AppState>();
    let raster = (state.show_raster)();
    let states = (state.show_states)();
    let countries = (state.show_countries)();

    rsx! {
        div {
            style: "display: flex; flex-wrap: wrap; gap: 6px; margin: 8px 0;",
            Toggle { label: "Water balance", on: raster, color: "#C62828", onclick: move |_| state.toggle_raster() }
            Toggle { label: "States", on: states, color: "#1B1E23", onclick: move |_| state.toggle_states() }
            Toggle { label: "Countries", on: countries, color: "#1B1E23", onclick: move |_| state.toggle_countries() }
        }
    }
}

#[component]
fn Toggle(label: &'static str, on: bool, color: &'static str, onclick: EventHandler<MouseEvent>) -> Element {
    let (background, text) = if on { (color, "#FFFFFF") } else { ("transparent", color) };
    rsx! {
        button {
            style: "padding: 2px 8px; border: 1px solid {color}; border-radius: 2px; background: {background}; color: {text}; font-family: monospace; text-transform: uppercase; cursor: pointer;",
            onclick: move |evt| onclick.call(evt),
            "{label}"
        }
    }
}
