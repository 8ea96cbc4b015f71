//! View surface: the side-effect boundary between the router and the UI.
//!
//! The router never touches a DOM. It asks a [`ViewSurface`] to mark a view
//! active, to report whether a panel still needs content, and to write content
//! into a panel. The browser binding implements this over `web_sys`; hosts
//! without a DOM (and the tests) use [`MemorySurface`].

use std::collections::BTreeMap;

use crate::route::ViewId;

/// Rendering condition of a view panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    /// No panel exists for the view.
    Missing,
    /// Panel is empty or still shows the placeholder marker.
    Pending,
    /// Panel holds real content.
    Rendered,
}

/// Which elements an activation found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Activation {
    pub nav: bool,
    pub panel: bool,
}

/// UI side of the router.
pub trait ViewSurface {
    /// Clear the active marking from every nav control and panel, then mark
    /// those matching `view`. Missing elements are skipped, not errors.
    fn activate(&mut self, view: &ViewId) -> Activation;

    /// Report the rendering condition of the panel for `view`.
    fn panel_state(&self, view: &ViewId) -> PanelState;

    /// Replace the panel content for `view`. No-op if the panel is missing.
    fn render(&mut self, view: &ViewId, html: &str);

    fn is_rendered(&self, view: &ViewId) -> bool {
        self.panel_state(view) == PanelState::Rendered
    }
}

/// Classify panel markup: blank or carrying `placeholder` is pending.
///
/// An empty `placeholder` only treats blank markup as pending.
pub fn panel_state_of(html: &str, placeholder: &str) -> PanelState {
    if html.trim().is_empty() || (!placeholder.is_empty() && html.contains(placeholder)) {
        PanelState::Pending
    } else {
        PanelState::Rendered
    }
}

#[derive(Debug, Clone, Default)]
struct Panel {
    html: String,
    active: bool,
    renders: usize,
}

/// In-memory [`ViewSurface`].
///
/// Nav controls and panels are registered up front, like the static markup of
/// a page. Tracks the active marking and how often each panel was rendered.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    placeholder: String,
    navs: BTreeMap<ViewId, bool>,
    panels: BTreeMap<ViewId, Panel>,
}

impl MemorySurface {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            navs: BTreeMap::new(),
            panels: BTreeMap::new(),
        }
    }

    /// Surface matching the demo page: nav tabs and panels for `home` and
    /// `about`, panels showing a loading placeholder.
    pub fn demo() -> Self {
        Self::new("Loading")
            .with_nav("home")
            .with_nav("about")
            .with_panel("home", "<div class=\"loading\">Loading...</div>")
            .with_panel("about", "<div class=\"loading\">Loading...</div>")
    }

    pub fn with_nav(mut self, view: impl Into<ViewId>) -> Self {
        self.navs.insert(view.into(), false);
        self
    }

    pub fn with_panel(mut self, view: impl Into<ViewId>, html: impl Into<String>) -> Self {
        let panel = Panel {
            html: html.into(),
            ..Panel::default()
        };
        self.panels.insert(view.into(), panel);
        self
    }

    /// Current markup of a panel.
    pub fn html(&self, view: &str) -> Option<&str> {
        self.panels.get(view).map(|p| p.html.as_str())
    }

    /// Number of times content was written into a panel.
    pub fn render_count(&self, view: &str) -> usize {
        self.panels.get(view).map_or(0, |p| p.renders)
    }

    /// Views whose nav control is marked active.
    pub fn active_navs(&self) -> Vec<&ViewId> {
        self.navs.iter().filter(|(_, a)| **a).map(|(v, _)| v).collect()
    }

    /// Views whose panel is marked active.
    pub fn active_panels(&self) -> Vec<&ViewId> {
        self.panels.iter().filter(|(_, p)| p.active).map(|(v, _)| v).collect()
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::demo()
    }
}

impl ViewSurface for MemorySurface {
    fn activate(&mut self, view: &ViewId) -> Activation {
        for active in self.navs.values_mut() {
            *active = false;
        }
        for panel in self.panels.values_mut() {
            panel.active = false;
        }

        let mut found = Activation::default();
        if let Some(active) = self.navs.get_mut(view) {
            *active = true;
            found.nav = true;
        }
        if let Some(panel) = self.panels.get_mut(view) {
            panel.active = true;
            found.panel = true;
        }
        found
    }

    fn panel_state(&self, view: &ViewId) -> PanelState {
        match self.panels.get(view) {
            Some(panel) => panel_state_of(&panel.html, &self.placeholder),
            None => PanelState::Missing,
        }
    }

    fn render(&mut self, view: &ViewId, html: &str) {
        if let Some(panel) = self.panels.get_mut(view) {
            panel.html = html.to_string();
            panel.renders += 1;
        }
    }
}
