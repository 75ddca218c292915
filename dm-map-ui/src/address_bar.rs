//! The browser location as an [`AddressBar`].

use dm_core::viewport::AddressBar;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{History, Location, UrlSearchParams, Window};

/// Reads query parameters from `window.location` and rewrites them with
/// `history.replaceState`, so viewport updates never add history entries.
pub struct BrowserAddressBar {
    window: Window,
    on_popstate: Option<Closure<dyn FnMut()>>,
}

impl BrowserAddressBar {
    pub fn new() -> Option<Self> {
        Some(Self {
            window: web_sys::window()?,
            on_popstate: None,
        })
    }

    fn location(&self) -> Location {
        self.window.location()
    }

    fn history(&self) -> Option<History> {
        self.window.history().ok()
    }
}

impl AddressBar for BrowserAddressBar {
    fn param(&self, key: &str) -> Option<String> {
        let search = self.location().search().ok()?;
        UrlSearchParams::new_with_str(&search).ok()?.get(key)
    }

    fn replace_params(&mut self, params: &[(&str, &str)]) {
        let Some(history) = self.history() else {
            return;
        };
        let pathname = self.location().pathname().unwrap_or_default();
        // Written by hand so commas in `center` stay unescaped.
        let query = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        let url = format!("{pathname}?{query}");
        if let Err(e) = history.replace_state_with_url(&JsValue::NULL, "", Some(&url)) {
            log::warn!("replaceState failed: {:?}", e);
        }
    }

    fn pin_history(&mut self) {
        let Some(history) = self.history() else {
            return;
        };
        let href = self.location().href().unwrap_or_default();
        if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(&href)) {
            log::warn!("pushState failed: {:?}", e);
            return;
        }
        let on_popstate = Closure::<dyn FnMut()>::new(move || {
            let _ = history.go_with_delta(1);
        });
        self.window
            .set_onpopstate(Some(on_popstate.as_ref().unchecked_ref()));
        self.on_popstate = Some(on_popstate);
    }
}

impl Drop for BrowserAddressBar {
    fn drop(&mut self) {
        if let Some(on_popstate) = self.on_popstate.take() {
            self.window.set_onpopstate(None);
            drop(on_popstate);
        }
    }
}
