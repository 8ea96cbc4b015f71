//! Browser binding for the view router.
//!
//! Wires `openerp-viewrouter` to the page: the DOM is the view surface,
//! `window.history` is the history, and `popstate` / route-trigger clicks are
//! forwarded as navigation events. Built for `wasm32-unknown-unknown`.
//!
//! ```js
//! import init, { WebRouter, initLogging } from "./openerp_viewrouter_web.js";
//!
//! await init();
//! initLogging("debug");
//! const router = new WebRouter();          // or new WebRouter(tomlConfig)
//! router.navigate("/about");
//! ```

pub mod dom;
pub mod history;
pub mod logging;

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, Window};

use openerp_viewrouter::{
    NavEvent, RouterBuilder, RouterConfig, RouterError, StaticContent, SubscriptionId, Transition,
    ViewRouter,
};

pub use dom::DomSurface;
pub use history::BrowserHistory;

/// Router driving the page DOM.
pub type DomRouter = ViewRouter<DomSurface, BrowserHistory, StaticContent>;
type Listener = Closure<dyn FnMut(Event)>;

/// Install console logging at `level` (default `info`).
///
/// Returns false if a subscriber was already installed.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: Option<String>) -> bool {
    logging::install(level.as_deref().unwrap_or("info"))
}

/// Router mounted on the current page.
///
/// Construction resolves the current URL and registers the `popstate` and
/// `click` listeners; dropping (or `free()` from JS) removes them.
#[wasm_bindgen]
pub struct WebRouter {
    router: Rc<RefCell<DomRouter>>,
    window: Window,
    document: Document,
    on_popstate: Listener,
    on_click: Listener,
}

#[wasm_bindgen]
impl WebRouter {
    /// Mount with the demo content, configured from optional TOML text.
    ///
    /// A given config also installs console logging at its `log_level`,
    /// unless a subscriber is already installed.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<WebRouter, JsValue> {
        let config = match config {
            Some(text) => {
                let config = RouterConfig::from_toml(&text).map_err(to_js)?;
                logging::install_from(&config);
                config
            }
            None => RouterConfig::default(),
        };
        Self::mount(config, StaticContent::demo())
    }

    /// Navigate to `path`, pushing a history entry.
    pub fn navigate(&self, path: &str) -> Result<(), JsValue> {
        self.router.borrow_mut().navigate(path).map_err(to_js)?;
        Ok(())
    }

    #[wasm_bindgen(getter, js_name = currentPath)]
    pub fn current_path(&self) -> String {
        self.router.borrow().current_path().to_string()
    }
}

impl WebRouter {
    /// Mount with explicit configuration and content.
    pub fn mount(config: RouterConfig, content: StaticContent) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let surface = DomSurface::new(document.clone(), config.dom.clone());
        let history = BrowserHistory::new(window.clone());
        let router = RouterBuilder::new(config.routes)
            .fallback(config.fallback)
            .start(surface, history, content);
        let router = Rc::new(RefCell::new(router));

        let on_popstate = {
            let router = Rc::clone(&router);
            Listener::new(move |_event: Event| {
                if let Err(e) = router.borrow_mut().handle(NavEvent::PopState) {
                    warn!("popstate: {}", e);
                }
            })
        };
        window.add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())?;

        let on_click = {
            let router = Rc::clone(&router);
            let attribute = config.dom.route_attribute.clone();
            Listener::new(move |event: Event| {
                let Some(name) = route_trigger(&event, &attribute) else {
                    return;
                };
                event.prevent_default();
                if let Err(e) = router.borrow_mut().handle(NavEvent::RouteClick(name)) {
                    warn!("Navigation rejected: {}", e);
                }
            })
        };
        document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;

        info!("WebRouter mounted at {}", router.borrow().current_path());
        Ok(Self {
            router,
            window,
            document,
            on_popstate,
            on_click,
        })
    }

    /// Register a callback invoked after every transition.
    ///
    /// Observers run while a listener holds the router; they receive the
    /// transition and must not call back into this `WebRouter`.
    pub fn on_transition<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&Transition) + 'static,
    {
        self.router.borrow_mut().on_transition(handler)
    }

    /// Remove an observer. Returns true if it was registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.router.borrow_mut().unsubscribe(id)
    }
}

impl Drop for WebRouter {
    fn drop(&mut self) {
        let _ = self.window.remove_event_listener_with_callback(
            "popstate",
            self.on_popstate.as_ref().unchecked_ref(),
        );
        let _ = self
            .document
            .remove_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref());
    }
}

/// Bare view name of the route trigger at or above the click target.
fn route_trigger(event: &Event, attribute: &str) -> Option<String> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let trigger = target.closest(&dom::trigger_selector(attribute)).ok()??;
    trigger.get_attribute(attribute)
}

fn to_js(err: RouterError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
