//! Saves the bar chart currently on screen as JSON.

use crate::js_bridge;
use crate::state::AppState;
use chrono::Utc;
use dioxus::prelude::*;
use dm_core::export::ExportDocument;
use dm_core::region::Extent;
use serde_json::Value;

#[derive(Props, Clone, PartialEq)]
pub struct DownloadButtonProps {
    /// Canonical time of the chart
    pub time: String,
    pub extent: Extent,
    /// Histogram as `[[edge, percent], ...]`
    pub data: Value,
}

#[component]
pub fn DownloadButton(props: DownloadButtonProps) -> Element {
    let mut state = use_context::<AppState>();

    let on_click = move |_: MouseEvent| {
        let site_url = state.config.read().site_url.clone();
        let doc = ExportDocument::new(
            &site_url,
            Utc::now(),
            &props.time,
            props.extent,
            props.data.clone(),
        );
        match doc.to_pretty_json() {
            Ok(json) => js_bridge::download_json(&doc.file_name(), &json),
            Err(e) => {
                log::error!("export failed: {e}");
                state.set_error(Some(format!("Could not export chart data: {e}")));
            }
        }
    };

    rsx! {
        button {
            "aria-label": "Download data",
            style: "margin-top: 8px; padding: 2px 8px; border: 1px solid #1B1E23; background: none; font-family: monospace; text-transform: uppercase; cursor: pointer;",
            onclick: on_click,
            "↓ Download"
        }
    }
}
