use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use openerp_viewrouter::{panel_state_of, Activation, DomConfig, PanelState, ViewId, ViewSurface};

/// [`ViewSurface`] over the page DOM.
///
/// - nav controls: every `nav_selector` element; the one for a view carries
///   `route_attribute="{view}"`
/// - panels: every `panel_selector` element; the one for a view has `id="{view}"`
///
/// DOM failures (bad selectors from config) are logged and skipped.
pub struct DomSurface {
    document: Document,
    dom: DomConfig,
}

impl DomSurface {
    pub fn new(document: Document, dom: DomConfig) -> Self {
        Self { document, dom }
    }

    fn clear_active(&self, selector: &str) {
        let nodes = match self.document.query_selector_all(selector) {
            Ok(nodes) => nodes,
            Err(e) => {
                warn!("DomSurface: query {:?} failed: {:?}", selector, e);
                return;
            }
        };
        for i in 0..nodes.length() {
            let Some(element) = nodes.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            if let Err(e) = element.class_list().remove_1(&self.dom.active_class) {
                warn!("DomSurface: failed to clear {:?}: {:?}", self.dom.active_class, e);
            }
        }
    }

    fn mark_active(&self, element: Option<Element>) -> bool {
        let Some(element) = element else {
            return false;
        };
        match element.class_list().add_1(&self.dom.active_class) {
            Ok(()) => true,
            Err(e) => {
                warn!("DomSurface: failed to set {:?}: {:?}", self.dom.active_class, e);
                false
            }
        }
    }

    fn nav_control(&self, view: &ViewId) -> Option<Element> {
        let selector = route_selector(&self.dom.route_attribute, view.as_str());
        self.document.query_selector(&selector).unwrap_or_else(|e| {
            warn!("DomSurface: query {:?} failed: {:?}", selector, e);
            None
        })
    }

    fn panel(&self, view: &ViewId) -> Option<Element> {
        self.document.get_element_by_id(view.as_str())
    }
}

impl ViewSurface for DomSurface {
    fn activate(&mut self, view: &ViewId) -> Activation {
        self.clear_active(&self.dom.nav_selector);
        let nav = self.mark_active(self.nav_control(view));

        self.clear_active(&self.dom.panel_selector);
        let panel = self.mark_active(self.panel(view));

        Activation { nav, panel }
    }

    fn panel_state(&self, view: &ViewId) -> PanelState {
        match self.panel(view) {
            None => PanelState::Missing,
            Some(panel) => element_panel_state(
                panel.has_child_nodes(),
                &panel.inner_html(),
                &self.dom.placeholder,
            ),
        }
    }

    fn render(&mut self, view: &ViewId, html: &str) {
        if let Some(panel) = self.panel(view) {
            panel.set_inner_html(html);
        }
    }
}

/// Panel state of an existing element: childless is pending, otherwise the
/// markup decides.
pub fn element_panel_state(has_children: bool, html: &str, placeholder: &str) -> PanelState {
    if !has_children {
        return PanelState::Pending;
    }
    panel_state_of(html, placeholder)
}

/// Selector matching any route trigger: `[data-route]`.
pub fn trigger_selector(attribute: &str) -> String {
    format!("[{}]", attribute)
}

/// Attribute selector for the nav control of `view`: `[data-route="about"]`.
pub fn route_selector(attribute: &str, view: &str) -> String {
    let escaped = view.replace('\\', "\\\\").replace('"', "\\\"");
    format!("[{}=\"{}\"]", attribute, escaped)
}
