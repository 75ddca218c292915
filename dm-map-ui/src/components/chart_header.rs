//! Section heading for the sidebar.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    pub title: String,
    /// Short explanation shown under the title
    #[props(default = String::new())]
    pub description: String,
}

#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    rsx! {
        div {
            style: "margin: 16px 0 8px 0;",
            h4 {
                style: "margin: 0 0 4px 0; font-size: 14px; text-transform: uppercase; letter-spacing: 0.05em;",
                "{props.title}"
            }
            if !props.description.is_empty() {
                p {
                    style: "margin: 0; font-size: 13px; color: #666;",
                    "{props.description}"
                }
            }
        }
    }
}
