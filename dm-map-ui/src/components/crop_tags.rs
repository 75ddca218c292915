//! Crop overlay tags. At most one crop is highlighted at a time.

use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn CropTags() -> Element {
    let state = use_context::<AppState>();
    let tags: Vec<(String, bool)> = {
        let crops = state.crops.read();
        crops
            .crops()
            .iter()
            .map(|c| (c.clone(), crops.is_visible(c)))
            .collect()
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            h4 {
                style: "margin: 0 0 4px 0; font-size: 14px; text-transform: uppercase;",
                "Crops"
            }
            p {
                style: "margin: 0 0 8px 0; font-size: 13px; color: #666;",
                "Select a crop to see an overlay of where it is grown."
            }
            div {
                style: "display: flex; flex-wrap: wrap; gap: 6px;",
                for (crop, active) in tags {
                    CropTag { key: "{crop}", name: crop.clone(), active }
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
struct CropTagProps {
    name: String,
    active: bool,
}

#[component]
fn CropTag(props: CropTagProps) -> Element {
    let mut state = use_context::<AppState>();
    let name = props.name.clone();
    let (background, color) = if props.active {
        ("#1B1E23", "#FFFFFF")
    } else {
        ("transparent", "#1B1E23")
    };

    rsx! {
        button {
            id: "tag-{props.name}",
            style: "padding: 2px 8px; border: 1px solid #1B1E23; border-radius: 2px; background: {background}; color: {color}; font-family: monospace; text-transform: uppercase; cursor: pointer;",
            onclick: move |_| state.toggle_crop(&name),
            "{props.name}"
        }
    }
}
