//! Shared Dioxus components and JS bridges for the drought monitor.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the map engine and D3.js charts via `js_sys::eval()`
//! - `address_bar`: the browser URL as a `zoom`/`center` store
//! - `events`: map and region-picker callbacks delivered into Rust
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (sidebar controls, charts, overlays)

pub mod address_bar;
pub mod components;
pub mod events;
pub mod js_bridge;
pub mod state;
