//! Shown in place of the region charts until the first sample arrives.

use dioxus::prelude::*;

#[component]
pub fn LoadingSpinner() -> Element {
    rsx! {
        p {
            style: "margin: 16px 0; color: #8A8F98; font-family: monospace; font-size: 12px; letter-spacing: 0.05em; text-transform: uppercase;",
            "Sampling region..."
        }
    }
}
