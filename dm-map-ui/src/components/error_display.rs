//! Inline notice for problems the dashboard can recover from.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
}

#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        p {
            role: "alert",
            style: "margin: 0 0 12px 0; padding-left: 8px; border-left: 2px solid #B8473F; color: #B8473F; font-size: 13px; font-style: italic;",
            "{props.message}"
        }
    }
}
