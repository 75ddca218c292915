//! Sidebar chart container.

use dioxus::prelude::*;

/// Props for ChartContainer
#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// The DOM id D3 renders into
    pub id: String,
    /// Chart height in pixels
    #[props(default = 200)]
    pub height: u32,
}

/// A fixed-height div for one of the region charts.
#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!("height: {}px; width: 100%; margin-top: 12px;", props.height);

    rsx! {
        div {
            class: "chart-container",
            style: "{style}",
            div {
                id: "{props.id}",
                style: "width: 100%; height: 100%;",
            }
        }
    }
}
