use tracing::warn;
use wasm_bindgen::JsValue;
use web_sys::Window;

use openerp_viewrouter::{History, DEFAULT_PATH};

/// [`History`] over `window.location` and `window.history`.
pub struct BrowserHistory {
    window: Window,
}

impl BrowserHistory {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl History for BrowserHistory {
    fn current_path(&self) -> String {
        self.window.location().pathname().unwrap_or_else(|e| {
            warn!("BrowserHistory: pathname unavailable: {:?}", e);
            DEFAULT_PATH.to_string()
        })
    }

    fn push(&mut self, path: &str) {
        let result = self
            .window
            .history()
            .and_then(|h| h.push_state_with_url(&JsValue::NULL, "", Some(path)));
        if let Err(e) = result {
            warn!("BrowserHistory: pushState {} failed: {:?}", path, e);
        }
    }
}
