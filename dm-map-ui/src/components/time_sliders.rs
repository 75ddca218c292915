//! Year and period sliders.
//!
//! Both sliders flag `sliding` while the pointer is down so the time-series
//! chart can show its crosshair.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn TimeSliders() -> Element {
    let mut state = use_context::<AppState>();
    let (year, min_year, max_year, index, lo, hi) = {
        let time = state.time.read();
        let bounds = time.period_bounds(time.year());
        (
            time.year(),
            time.min_year(),
            time.max_year(),
            time.period_index(),
            *bounds.start(),
            *bounds.end(),
        )
    };
    let granularity = state.time.read().granularity();
    let title = granularity.title();
    let label = |i: usize| granularity.label(i).unwrap_or_default().to_string();

    let on_year = move |evt: Event<FormData>| match evt.value().parse::<i32>() {
        Ok(y) => state.set_year(y),
        Err(e) => log::warn!("bad year slider value {:?}: {e}", evt.value()),
    };
    let on_period = move |evt: Event<FormData>| match evt.value().parse::<usize>() {
        Ok(i) => state.set_period_index(i),
        Err(e) => log::warn!("bad period slider value {:?}: {e}", evt.value()),
    };

    rsx! {
        div {
            style: "margin: 12px 0;",
            label {
                style: "display: block; font-size: 14px; text-transform: uppercase;",
                "Year"
                input {
                    r#type: "range",
                    style: "width: 100%;",
                    min: "{min_year}",
                    max: "{max_year}",
                    step: "1",
                    value: "{year}",
                    oninput: on_year,
                    onmousedown: move |_| state.set_sliding(true),
                    onmouseup: move |_| state.set_sliding(false),
                }
            }
            SliderScale { low: min_year.to_string(), current: year.to_string(), high: max_year.to_string() }

            label {
                style: "display: block; margin-top: 12px; font-size: 14px; text-transform: uppercase;",
                "{title}"
                input {
                    r#type: "range",
                    style: "width: 100%;",
                    min: "{lo}",
                    max: "{hi}",
                    step: "1",
                    value: "{index}",
                    oninput: on_period,
                    onmousedown: move |_| state.set_sliding(true),
                    onmouseup: move |_| state.set_sliding(false),
                }
            }
            SliderScale { low: label(lo), current: label(index), high: label(hi) }
        }
    }
}

/// Min / current / max labels under a slider.
#[component]
fn SliderScale(low: String, current: String, high: String) -> Element {
    rsx! {
        div {
            style: "display: flex; justify-content: space-between; font-family: monospace; font-size: 12px;",
            span { "{low}" }
            span { style: "color: #7EB36A;", "{current}" }
            span { "{high}" }
        }
    }
}
