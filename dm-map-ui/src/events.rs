//! Map and region-picker callbacks delivered into Rust.
//!
//! `map.js` reports events by calling `window.__dmOnMapEvent(json)`. A
//! [`MapEventSubscription`] installs that global for as long as it lives and
//! forwards each decoded [`MapEvent`] into a channel, typically the sender
//! of a Dioxus coroutine.

use dm_core::region::Generation;
use futures::channel::mpsc::UnboundedSender;
use serde::Deserialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

const CALLBACK_NAME: &str = "__dmOnMapEvent";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MapEvent {
    /// The user stopped panning or zooming.
    MoveEnd,
    /// The region picker moved; a new query should be issued.
    RegionChanged,
    /// Answer to `dmQueryRegion`. A `null` payload means still loading.
    RegionData { generation: u64, payload: Value },
}

impl MapEvent {
    pub fn parse(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn generation(&self) -> Option<Generation> {
        match self {
            MapEvent::RegionData { generation, .. } => Some(Generation(*generation)),
            _ => None,
        }
    }
}

/// Owns the JS callback. Dropping it removes `window.__dmOnMapEvent`.
pub struct MapEventSubscription {
    _callback: Closure<dyn FnMut(String)>,
}

impl MapEventSubscription {
    pub fn new(tx: UnboundedSender<MapEvent>) -> Self {
        let callback = Closure::<dyn FnMut(String)>::new(move |json: String| {
            match MapEvent::parse(&json) {
                Ok(event) => {
                    if tx.unbounded_send(event).is_err() {
                        log::debug!("map event receiver gone");
                    }
                }
                Err(e) => log::warn!("unreadable map event {json}: {e}"),
            }
        });
        let global = js_sys::global();
        if let Err(e) = js_sys::Reflect::set(
            &global,
            &JsValue::from_str(CALLBACK_NAME),
            callback.as_ref(),
        ) {
            log::error!("failed to register map event callback: {:?}", e);
        }
        Self {
            _callback: callback,
        }
    }
}

impl Drop for MapEventSubscription {
    fn drop(&mut self) {
        let _ = js_sys::Reflect::delete_property(
            &js_sys::global(),
            &JsValue::from_str(CALLBACK_NAME),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_event_kinds() {
        assert_eq!(MapEvent::parse(r#"{"kind":"moveEnd"}"#).unwrap(), MapEvent::MoveEnd);
        assert_eq!(
            MapEvent::parse(r#"{"kind":"regionChanged"}"#).unwrap(),
            MapEvent::RegionChanged
        );
        let data = MapEvent::parse(r#"{"kind":"regionData","generation":4,"payload":null}"#).unwrap();
        assert_eq!(data.generation(), Some(Generation(4)));
        assert!(matches!(data, MapEvent::RegionData { payload: Value::Null, .. }));
        assert!(MapEvent::parse(r#"{"kind":"resize"}"#).is_err());
    }
}
