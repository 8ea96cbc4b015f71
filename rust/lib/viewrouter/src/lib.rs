//! View router: client-side path-to-view routing with history sync.
//!
//! Maps URL paths to named views ("tabs"), keeps the address bar and the
//! visible view in step, and renders a view's content the first time it is
//! shown. Rust owns the routing state and decisions; the platform only
//! performs the side effects.
//!
//! # Collaborators
//!
//! - [`ViewSurface`]: activates a view and holds panel content (DOM, or
//!   [`MemorySurface`] for headless use)
//! - [`History`]: address bar and session history ([`MemoryHistory`])
//! - [`ContentProvider`]: markup rendered on first visit ([`StaticContent`])
//!
//! # Events
//!
//! The host forwards browser events as [`NavEvent`]s:
//! - `Load`: resolve the current path
//! - `PopState`: back/forward already moved history; resolve, don't push
//! - `RouteClick(name)`: navigate to `/{name}`, pushing a history entry
//!
//! # Example
//!
//! ```ignore
//! use openerp_viewrouter::*;
//!
//! let config = RouterConfig::default();
//! let mut router = RouterBuilder::new(config.routes)
//!     .fallback(config.fallback)
//!     .on_transition(|t| println!("{} -> {}", t.path, t.view))
//!     .start(MemorySurface::demo(), MemoryHistory::new("/"), StaticContent::demo());
//!
//! router.handle(NavEvent::RouteClick("about".into()))?;
//! assert!(router.surface().is_rendered(&"about".into()));
//! ```

pub mod config;
pub mod content;
pub mod error;
pub mod history;
pub mod route;
pub mod router;
pub mod surface;

// Re-export primary types at crate root.
pub use config::{DomConfig, FallbackPolicy, RouterConfig};
pub use content::{ContentProvider, StaticContent};
pub use error::RouterError;
pub use history::{History, MemoryHistory};
pub use route::{normalize_path, RouteTable, ViewId, DEFAULT_PATH};
pub use router::{NavEvent, RouterBuilder, SubscriptionId, Transition, TransitionHandler, ViewRouter};
pub use surface::{panel_state_of, Activation, MemorySurface, PanelState, ViewSurface};
