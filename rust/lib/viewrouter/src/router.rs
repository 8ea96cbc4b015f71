use tracing::{debug, info};

use crate::config::FallbackPolicy;
use crate::content::ContentProvider;
use crate::error::RouterError;
use crate::history::History;
use crate::route::{normalize_path, RouteTable, ViewId, DEFAULT_PATH};
use crate::surface::{Activation, PanelState, ViewSurface};

/// Record of one resolved navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Normalized path that was resolved.
    pub path: String,
    /// View that became active.
    pub view: ViewId,
    /// `path` was not in the route table and the default view was used.
    pub fallback: bool,
    /// Content was written into the panel during this transition.
    pub rendered: bool,
    /// Elements the surface found for `view`.
    pub activation: Activation,
}

/// Browser navigation events the router reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// Page finished loading.
    Load,
    /// Back/forward moved the history pointer.
    PopState,
    /// A route trigger carrying this bare view name was clicked.
    RouteClick(String),
}

/// Handle for a transition observer, returned by [`ViewRouter::on_transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Callback invoked after every transition.
pub type TransitionHandler = Box<dyn Fn(&Transition)>;

struct Observer {
    id: SubscriptionId,
    handler: TransitionHandler,
}

/// Path-to-view router with history sync.
///
/// Owns the current path and drives three collaborators:
/// - [`ViewSurface`]: marks the active view and holds panel content
/// - [`History`]: address bar and session history
/// - [`ContentProvider`]: markup rendered into a panel on first visit
///
/// All operations run to completion synchronously; there is nothing to lock.
///
/// # Examples
///
/// ```ignore
/// let mut router = ViewRouter::new(
///     RouteTable::demo(),
///     MemorySurface::demo(),
///     MemoryHistory::new("/about"),
///     StaticContent::demo(),
/// );
/// assert_eq!(router.current_path(), "/about");
///
/// router.handle(NavEvent::RouteClick("home".into()))?;
/// assert_eq!(router.history().current_path(), "/home");
/// ```
pub struct ViewRouter<S, H, C> {
    table: RouteTable,
    policy: FallbackPolicy,
    surface: S,
    history: H,
    content: C,
    current_path: String,
    observers: Vec<Observer>,
    next_id: u64,
}

impl<S, H, C> ViewRouter<S, H, C>
where
    S: ViewSurface,
    H: History,
    C: ContentProvider,
{
    /// Create a router with the default fallback policy and resolve the
    /// history's current path so the UI matches the URL.
    pub fn new(table: RouteTable, surface: S, history: H, content: C) -> Self {
        RouterBuilder::new(table).start(surface, history, content)
    }

    // ====================================================================
    // Navigation
    // ====================================================================

    /// Navigate to `path`, pushing a history entry.
    ///
    /// Returns `Ok(None)` when `path` is already current: no history entry,
    /// no render, no transition. Under [`FallbackPolicy::Strict`] an unknown
    /// path is rejected before history is touched.
    pub fn navigate(&mut self, path: &str) -> Result<Option<Transition>, RouterError> {
        let path = normalize_path(path);
        if path == self.current_path {
            debug!("Navigation to current path {} suppressed", path);
            return Ok(None);
        }
        if self.policy == FallbackPolicy::Strict && !self.table.contains(path) {
            return Err(RouterError::UnknownPath(path.to_string()));
        }

        self.history.push(path);
        Ok(Some(self.resolve(path)))
    }

    /// Resolve `path` to a view and activate it, without touching history.
    ///
    /// Unknown paths show the default view under every policy: by the time
    /// this runs for startup or back/forward, the address bar already shows
    /// the path.
    pub fn resolve(&mut self, path: &str) -> Transition {
        let path = normalize_path(path);
        let fallback = !self.table.contains(path);
        let view = self.table.resolve(path).clone();
        if fallback {
            debug!("No route for {}, falling back to {}", path, view);
        }

        self.current_path = path.to_string();
        self.activate(view, fallback)
    }

    /// Mark `view` active and render it if needed.
    pub fn activate_view(&mut self, view: &ViewId) -> Transition {
        self.activate(view.clone(), false)
    }

    /// Render content into the panel for `view` if it is still pending.
    ///
    /// Returns whether content was written. Once a panel holds content it is
    /// never rendered again.
    pub fn ensure_rendered(&mut self, view: &ViewId) -> bool {
        match self.surface.panel_state(view) {
            PanelState::Pending => {}
            PanelState::Rendered => return false,
            PanelState::Missing => {
                debug!("No panel for view {}, skipping render", view);
                return false;
            }
        }
        let Some(html) = self.content.content(view) else {
            debug!("No content for view {}", view);
            return false;
        };
        self.surface.render(view, &html);
        debug!("Rendered view {}", view);
        true
    }

    /// React to a browser navigation event.
    ///
    /// `Load` and `PopState` resolve the history's current path without
    /// pushing. `RouteClick` navigates to `/{name}`.
    pub fn handle(&mut self, event: NavEvent) -> Result<Option<Transition>, RouterError> {
        match event {
            NavEvent::Load | NavEvent::PopState => {
                let path = self.history.current_path();
                Ok(Some(self.resolve(&path)))
            }
            NavEvent::RouteClick(name) => {
                let path = format!("/{}", name.trim_start_matches('/'));
                self.navigate(&path)
            }
        }
    }

    fn activate(&mut self, view: ViewId, fallback: bool) -> Transition {
        let activation = self.surface.activate(&view);
        let rendered = self.ensure_rendered(&view);

        let transition = Transition {
            path: self.current_path.clone(),
            view,
            fallback,
            rendered,
            activation,
        };
        info!("Route changed to: {} -> {}", transition.path, transition.view);
        for observer in &self.observers {
            (observer.handler)(&transition);
        }
        transition
    }

    // ====================================================================
    // Observers
    // ====================================================================

    /// Register a callback invoked after every transition.
    pub fn on_transition<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: Fn(&Transition) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push(Observer {
            id,
            handler: Box::new(handler),
        });
        id
    }

    /// Remove an observer. Returns true if it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len = self.observers.len();
        self.observers.retain(|o| o.id != id);
        self.observers.len() < len
    }

    // ====================================================================
    // Accessors
    // ====================================================================

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// View for the current path, after fallback.
    pub fn current_view(&self) -> &ViewId {
        self.table.resolve(&self.current_path)
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    /// Mutable history, for hosts that move the pointer before delivering
    /// [`NavEvent::PopState`].
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    pub fn content(&self) -> &C {
        &self.content
    }
}

/// Builder for [`ViewRouter`], used when observers must see the startup
/// transition or a non-default policy is needed.
pub struct RouterBuilder {
    table: RouteTable,
    policy: FallbackPolicy,
    observers: Vec<TransitionHandler>,
}

impl RouterBuilder {
    pub fn new(table: RouteTable) -> Self {
        Self {
            table,
            policy: FallbackPolicy::default(),
            observers: Vec::new(),
        }
    }

    pub fn fallback(mut self, policy: FallbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn on_transition<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Transition) + 'static,
    {
        self.observers.push(Box::new(handler));
        self
    }

    /// Build the router and resolve the history's current path.
    pub fn start<S, H, C>(self, surface: S, history: H, content: C) -> ViewRouter<S, H, C>
    where
        S: ViewSurface,
        H: History,
        C: ContentProvider,
    {
        let mut router = ViewRouter {
            table: self.table,
            policy: self.policy,
            surface,
            history,
            content,
            current_path: DEFAULT_PATH.to_string(),
            observers: Vec::new(),
            next_id: 1,
        };
        for handler in self.observers {
            router.on_transition(handler);
        }
        let path = router.history.current_path();
        router.resolve(&path);
        router
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::content::StaticContent;
    use crate::history::MemoryHistory;
    use crate::surface::MemorySurface;

    type TestRouter = ViewRouter<MemorySurface, MemoryHistory, StaticContent>;

    fn demo_router(start: &str) -> TestRouter {
        ViewRouter::new(
            RouteTable::demo(),
            MemorySurface::demo(),
            MemoryHistory::new(start),
            StaticContent::demo(),
        )
    }

    // Router whose transitions are recorded into the returned log.
    fn traced_router(start: &str) -> (TestRouter, Rc<RefCell<Vec<Transition>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_c = log.clone();
        let router = RouterBuilder::new(RouteTable::demo())
            .on_transition(move |t| log_c.borrow_mut().push(t.clone()))
            .start(
                MemorySurface::demo(),
                MemoryHistory::new(start),
                StaticContent::demo(),
            );
        (router, log)
    }

    fn view(id: &str) -> ViewId {
        ViewId::from(id)
    }

    fn assert_single_active(router: &TestRouter, id: &str) {
        assert_eq!(router.surface().active_navs(), vec![&view(id)]);
        assert_eq!(router.surface().active_panels(), vec![&view(id)]);
    }

    // ========================================================================
    // Startup
    // ========================================================================

    #[test]
    fn startup_on_about_activates_about() {
        let router = demo_router("/about");

        assert_eq!(router.current_path(), "/about");
        assert_single_active(&router, "about");
        assert_eq!(router.surface().render_count("about"), 1);
        assert_eq!(router.surface().render_count("home"), 0);
        assert!(router
            .surface()
            .html("about")
            .unwrap()
            .contains("Implementation"));
        // Startup does not push.
        assert_eq!(router.history().len(), 1);
    }

    #[test]
    fn startup_on_root_shows_home() {
        let router = demo_router("/");
        assert_eq!(router.current_path(), "/");
        assert_eq!(router.current_view(), &view("home"));
        assert_single_active(&router, "home");
    }

    #[test]
    fn startup_is_traced() {
        let (_router, log) = traced_router("/home");
        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].path, "/home");
        assert_eq!(log[0].view, view("home"));
        assert!(log[0].rendered);
        assert!(!log[0].fallback);
    }

    #[test]
    fn startup_on_unknown_path_falls_back_even_when_strict() {
        let router = RouterBuilder::new(RouteTable::demo())
            .fallback(FallbackPolicy::Strict)
            .start(
                MemorySurface::demo(),
                MemoryHistory::new("/missing"),
                StaticContent::demo(),
            );
        assert_eq!(router.current_path(), "/missing");
        assert_single_active(&router, "home");
    }

    // ========================================================================
    // navigate
    // ========================================================================

    #[test]
    fn navigate_pushes_and_switches() {
        let mut router = demo_router("/home");
        let t = router.navigate("/about").unwrap().unwrap();

        assert_eq!(t.view, view("about"));
        assert!(t.rendered);
        assert_eq!(router.history().entries(), ["/home", "/about"]);
        assert_single_active(&router, "about");
    }

    #[test]
    fn navigate_to_current_path_is_noop() {
        let (mut router, log) = traced_router("/about");
        let before = log.borrow().len();

        assert_eq!(router.navigate("/about").unwrap(), None);
        assert_eq!(router.history().len(), 1);
        assert_eq!(log.borrow().len(), before);
        assert_eq!(router.surface().render_count("about"), 1);
    }

    #[test]
    fn navigate_empty_path_at_root_is_noop() {
        let (mut router, log) = traced_router("/");
        let before = log.borrow().len();

        assert_eq!(router.navigate("").unwrap(), None);
        assert_eq!(router.history().entries(), ["/"]);
        assert_eq!(log.borrow().len(), before);
    }

    #[test]
    fn navigate_empty_path_pushes_root() {
        let mut router = demo_router("/about");
        let t = router.navigate("").unwrap().unwrap();

        assert_eq!(t.path, "/");
        assert_eq!(router.history().entries(), ["/about", "/"]);
        assert_single_active(&router, "home");
    }

    #[test]
    fn navigate_unknown_falls_back_but_keeps_path() {
        let mut router = demo_router("/about");
        let t = router.navigate("/unknown").unwrap().unwrap();

        assert!(t.fallback);
        assert_eq!(t.view, view("home"));
        assert!(t.rendered);
        assert_eq!(router.current_path(), "/unknown");
        assert_eq!(router.history().current_path(), "/unknown");
        assert_single_active(&router, "home");
    }

    #[test]
    fn navigate_unknown_does_not_rerender_home() {
        let mut router = demo_router("/home");
        let t = router.navigate("/unknown").unwrap().unwrap();
        assert!(!t.rendered);
        assert_eq!(router.surface().render_count("home"), 1);
    }

    #[test]
    fn navigate_between_aliases_switches_path_only() {
        let mut router = demo_router("/");
        let t = router.navigate("/home").unwrap().unwrap();

        assert_eq!(t.view, view("home"));
        assert!(!t.rendered);
        assert_eq!(router.current_path(), "/home");
        assert_eq!(router.history().len(), 2);
    }

    #[test]
    fn strict_rejects_unknown_without_side_effects() {
        let (router, log) = {
            let log = Rc::new(RefCell::new(Vec::new()));
            let log_c = log.clone();
            let router = RouterBuilder::new(RouteTable::demo())
                .fallback(FallbackPolicy::Strict)
                .on_transition(move |t: &Transition| log_c.borrow_mut().push(t.clone()))
                .start(
                    MemorySurface::demo(),
                    MemoryHistory::new("/about"),
                    StaticContent::demo(),
                );
            (router, log)
        };
        let mut router = router;

        let err = router.navigate("/unknown").unwrap_err();
        assert!(matches!(err, RouterError::UnknownPath(ref p) if p == "/unknown"));
        assert_eq!(router.current_path(), "/about");
        assert_eq!(router.history().len(), 1);
        assert_eq!(log.borrow().len(), 1);
        assert_single_active(&router, "about");
    }

    #[test]
    fn strict_allows_known_paths() {
        let mut router = RouterBuilder::new(RouteTable::demo())
            .fallback(FallbackPolicy::Strict)
            .start(
                MemorySurface::demo(),
                MemoryHistory::new("/"),
                StaticContent::demo(),
            );
        assert_eq!(router.policy(), FallbackPolicy::Strict);
        assert!(router.navigate("/about").unwrap().is_some());
    }

    // ========================================================================
    // resolve
    // ========================================================================

    #[test]
    fn resolve_unknown_matches_root() {
        let mut router = demo_router("/");
        let root = router.resolve("/").view;
        for path in ["/nope", "/about/", "/home/deep", "/ABOUT"] {
            assert_eq!(router.resolve(path).view, root, "path {path}");
        }
    }

    #[test]
    fn resolve_never_pushes() {
        let mut router = demo_router("/");
        router.resolve("/about");
        router.resolve("/home");
        assert_eq!(router.history().len(), 1);
        assert_eq!(router.current_path(), "/home");
    }

    #[test]
    fn resolve_empty_path_is_root() {
        let mut router = demo_router("/about");
        let t = router.resolve("");
        assert_eq!(t.path, "/");
        assert!(!t.fallback);
        assert_eq!(router.current_path(), "/");
    }

    #[test]
    fn at_most_one_active_after_every_resolve() {
        let mut router = demo_router("/");
        for path in ["/about", "/", "/unknown", "/home", "/about", "/x/y"] {
            router.resolve(path);
            assert_eq!(router.surface().active_navs().len(), 1, "path {path}");
            assert_eq!(router.surface().active_panels().len(), 1, "path {path}");
        }
    }

    // ========================================================================
    // activate_view / ensure_rendered
    // ========================================================================

    #[test]
    fn ensure_rendered_is_idempotent() {
        let mut router = demo_router("/about");
        let home = view("home");

        assert!(router.ensure_rendered(&home));
        let first = router.surface().html("home").unwrap().to_string();

        assert!(!router.ensure_rendered(&home));
        assert_eq!(router.surface().html("home").unwrap(), first);
        assert_eq!(router.surface().render_count("home"), 1);
    }

    #[test]
    fn ensure_rendered_skips_missing_panel() {
        let mut router = demo_router("/");
        assert!(!router.ensure_rendered(&view("settings")));
    }

    #[test]
    fn ensure_rendered_skips_view_without_content() {
        let mut router = ViewRouter::new(
            RouteTable::new([("/", "home"), ("/blank", "blank")]).unwrap(),
            MemorySurface::demo().with_panel("blank", ""),
            MemoryHistory::new("/blank"),
            StaticContent::demo(),
        );
        assert!(!router.ensure_rendered(&view("blank")));
        assert_eq!(router.surface().html("blank"), Some(""));
    }

    #[test]
    fn prefilled_panel_is_not_overwritten() {
        let router = ViewRouter::new(
            RouteTable::demo(),
            MemorySurface::new("Loading").with_panel("home", "<p>server side</p>"),
            MemoryHistory::new("/"),
            StaticContent::demo(),
        );
        assert_eq!(router.surface().html("home"), Some("<p>server side</p>"));
        assert_eq!(router.surface().render_count("home"), 0);
    }

    #[test]
    fn activate_view_without_nav_control() {
        let mut router = ViewRouter::new(
            RouteTable::new([("/", "home"), ("/landing", "landing")]).unwrap(),
            MemorySurface::demo().with_panel("landing", "Loading"),
            MemoryHistory::new("/"),
            StaticContent::demo().with("landing", "<h2>Welcome</h2>"),
        );

        let t = router.activate_view(&view("landing"));
        assert_eq!(t.activation, Activation { nav: false, panel: true });
        assert!(t.rendered);
        assert!(router.surface().active_navs().is_empty());
        assert_eq!(router.surface().active_panels(), vec![&view("landing")]);
    }

    #[test]
    fn activate_view_without_any_element_is_tolerated() {
        let mut router = demo_router("/");
        let t = router.activate_view(&view("ghost"));
        assert_eq!(t.activation, Activation::default());
        assert!(!t.rendered);
    }

    // ========================================================================
    // Events
    // ========================================================================

    #[test]
    fn route_click_navigates() {
        let mut router = demo_router("/home");
        let t = router
            .handle(NavEvent::RouteClick("about".to_string()))
            .unwrap()
            .unwrap();

        assert_eq!(t.view, view("about"));
        assert_eq!(router.history().current_path(), "/about");
        assert_single_active(&router, "about");
        assert_eq!(router.surface().render_count("about"), 1);
    }

    #[test]
    fn route_click_tolerates_leading_slash() {
        let mut router = demo_router("/home");
        router
            .handle(NavEvent::RouteClick("/about".to_string()))
            .unwrap();
        assert_eq!(router.current_path(), "/about");
    }

    #[test]
    fn route_click_on_current_is_noop() {
        let mut router = demo_router("/home");
        let result = router.handle(NavEvent::RouteClick("home".to_string())).unwrap();
        assert!(result.is_none());
        assert_eq!(router.history().len(), 1);
    }

    #[test]
    fn popstate_resolves_without_push() {
        let mut router = demo_router("/home");
        router.navigate("/about").unwrap();
        assert_eq!(router.history().len(), 2);

        assert_eq!(router.history_mut().back(), Some("/home"));
        let t = router.handle(NavEvent::PopState).unwrap().unwrap();

        assert_eq!(t.view, view("home"));
        assert!(!t.rendered);
        assert_eq!(router.current_path(), "/home");
        assert_eq!(router.history().len(), 2);
        assert_single_active(&router, "home");

        router.history_mut().forward();
        router.handle(NavEvent::PopState).unwrap();
        assert_single_active(&router, "about");
        assert_eq!(router.history().len(), 2);
    }

    #[test]
    fn load_event_resolves_current_path() {
        let mut router = demo_router("/about");
        router.resolve("/home");
        router.handle(NavEvent::Load).unwrap();
        assert_eq!(router.current_path(), "/about");
    }

    // ========================================================================
    // Observers
    // ========================================================================

    #[test]
    fn observer_sees_every_transition() {
        let (mut router, log) = traced_router("/");
        router.navigate("/about").unwrap();
        router.navigate("/about").unwrap();
        router.navigate("/zzz").unwrap();

        let paths: Vec<String> = log.borrow().iter().map(|t| t.path.clone()).collect();
        assert_eq!(paths, vec!["/", "/about", "/zzz"]);
        assert!(log.borrow()[2].fallback);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut router = demo_router("/");
        let count = Rc::new(RefCell::new(0u32));
        let count_c = count.clone();
        let id = router.on_transition(move |_| *count_c.borrow_mut() += 1);

        router.navigate("/about").unwrap();
        assert_eq!(*count.borrow(), 1);

        assert!(router.unsubscribe(id));
        router.navigate("/home").unwrap();
        assert_eq!(*count.borrow(), 1);
        assert!(!router.unsubscribe(id));
    }

    #[test]
    fn subscription_ids_are_unique() {
        let mut router = demo_router("/");
        let a = router.on_transition(|_| {});
        let b = router.on_transition(|_| {});
        assert_ne!(a, b);
    }
}
