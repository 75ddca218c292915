//! Overlay shown when the selected time is past the published data.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn TimeWarning() -> Element {
    let mut state = use_context::<AppState>();
    if !state.time.read().show_warning() {
        return rsx! {};
    }
    let time = state.current_time();

    rsx! {
        div {
            style: "position: absolute; top: 40%; left: 40%; width: 250px; height: 150px; z-index: 10; background: #1B1E23; color: #FFFFFF; border: 3px solid red; border-radius: 10px;",
            button {
                "aria-label": "dismiss warning",
                style: "float: right; background: none; border: none; color: inherit; font-size: 18px; cursor: pointer;",
                onclick: move |_| state.dismiss_warning(),
                "×"
            }
            div {
                style: "text-align: center; padding-top: 48px;",
                "Data is not available for {time}"
            }
        }
    }
}
