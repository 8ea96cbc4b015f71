use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::route::ViewId;

/// Supplies the markup rendered into a view panel on first visit.
pub trait ContentProvider {
    /// Fragment for `view`, or `None` if this provider does not know it.
    fn content(&self, view: &ViewId) -> Option<Cow<'_, str>>;
}

/// Fixed HTML fragment per view.
#[derive(Debug, Clone, Default)]
pub struct StaticContent {
    pages: BTreeMap<ViewId, String>,
}

impl StaticContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the fragment for `view`.
    pub fn with(mut self, view: impl Into<ViewId>, html: impl Into<String>) -> Self {
        self.pages.insert(view.into(), html.into());
        self
    }

    /// Content of the demo site's `home` and `about` pages.
    pub fn demo() -> Self {
        Self::new().with("home", HOME_HTML).with("about", ABOUT_HTML)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl ContentProvider for StaticContent {
    fn content(&self, view: &ViewId) -> Option<Cow<'_, str>> {
        self.pages.get(view).map(|html| Cow::Borrowed(html.as_str()))
    }
}

const HOME_HTML: &str = r#"
<h2>Overview</h2>

<div class="content-section">
  <h3>Features</h3>
  <ul>
    <li>Tab-based navigation</li>
    <li>Minimal client code</li>
    <li>Clean interface</li>
    <li>Static file serving</li>
  </ul>
</div>

<div class="content-section">
  <h3>Technology</h3>
  <div class="tech-list">
    <span class="tech-item">Rust</span>
    <span class="tech-item">WebAssembly</span>
    <span class="tech-item">HTML</span>
    <span class="tech-item">CSS</span>
  </div>
</div>

<div class="content-section">
  <h3>Purpose</h3>
  <p>A simple single page application for exercising static file serving.</p>
</div>
"#;

const ABOUT_HTML: &str = r#"
<h2>Implementation</h2>

<div class="content-section">
  <h3>Structure</h3>
  <p>Tab-based navigation synced with the address bar. Content is rendered on first visit.</p>
</div>

<div class="content-section">
  <h3>Usage</h3>
  <p>Serve the web directory as static files. The application handles client-side navigation internally.</p>
</div>

<div class="content-section">
  <h3>Files</h3>
  <ul>
    <li>index.html - Main HTML structure</li>
    <li>openerp_viewrouter_web.wasm - Router and page logic</li>
  </ul>
</div>
"#;
