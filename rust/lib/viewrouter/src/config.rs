//! Router configuration, read from TOML.
//!
//! ```toml
//! fallback = "default"
//! log_level = "info"
//!
//! [dom]
//! nav_selector = ".nav-tab"
//! panel_selector = ".page"
//! route_attribute = "data-route"
//! active_class = "active"
//! placeholder = "Loading"
//!
//! [routes]
//! "/" = "home"
//! "/home" = "home"
//! "/about" = "about"
//! ```
//!
//! Every key is optional; omitted keys take the demo site's values.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RouterError;
use crate::route::RouteTable;

/// What navigation does with a path the route table does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Show the view mapped to `/`.
    #[default]
    Default,
    /// Reject programmatic navigation with [`RouterError::UnknownPath`].
    /// Startup and back/forward still fall back.
    Strict,
}

/// DOM contract used by the browser binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomConfig {
    /// Selector matching every nav control.
    pub nav_selector: String,
    /// Selector matching every view panel. Panels are addressed by element id.
    pub panel_selector: String,
    /// Attribute holding the bare view name on route triggers.
    pub route_attribute: String,
    /// Class marking the active nav control and panel.
    pub active_class: String,
    /// Marker text of a panel still waiting for content.
    pub placeholder: String,
}

impl Default for DomConfig {
    fn default() -> Self {
        Self {
            nav_selector: ".nav-tab".to_string(),
            panel_selector: ".page".to_string(),
            route_attribute: "data-route".to_string(),
            active_class: "active".to_string(),
            placeholder: "Loading".to_string(),
        }
    }
}

/// Top-level router configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    pub fallback: FallbackPolicy,
    /// Maximum log level for hosts that install a subscriber.
    pub log_level: String,
    pub dom: DomConfig,
    pub routes: RouteTable,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            fallback: FallbackPolicy::default(),
            log_level: "info".to_string(),
            dom: DomConfig::default(),
            routes: RouteTable::demo(),
        }
    }
}

impl RouterConfig {
    pub fn from_toml(content: &str) -> Result<Self, RouterError> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from disk, or return the default if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, RouterError> {
        if !path.exists() {
            debug!("RouterConfig: {:?} does not exist, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| RouterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }
}
