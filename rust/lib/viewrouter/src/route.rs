use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RouterError;

/// Path every route table must map; unknown paths fall back to its view.
pub const DEFAULT_PATH: &str = "/";

/// Identifier naming a view panel and its matching nav control.
///
/// Opaque to the router: it is only compared, looked up and handed to the
/// view surface and content provider.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(String);

impl ViewId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ViewId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ViewId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ViewId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Normalize a browser path before lookup.
///
/// Identity for every non-empty path; an empty path is the root.
pub fn normalize_path(path: &str) -> &str {
    if path.is_empty() {
        DEFAULT_PATH
    } else {
        path
    }
}

/// Static mapping from URL path to [`ViewId`].
///
/// Immutable after construction. Always contains [`DEFAULT_PATH`], and every
/// key starts with `/`. Several paths may share one view (`/` and `/home`).
///
/// # Examples
///
/// ```ignore
/// let table = RouteTable::new([("/", "home"), ("/home", "home"), ("/about", "about")])?;
/// assert_eq!(table.resolve("/about").as_str(), "about");
/// assert_eq!(table.resolve("/nowhere").as_str(), "home");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, ViewId>",
    into = "BTreeMap<String, ViewId>"
)]
pub struct RouteTable {
    routes: BTreeMap<String, ViewId>,
}

impl RouteTable {
    /// Build a table from `(path, view)` pairs.
    ///
    /// Fails if a path does not start with `/` or if `/` is not mapped.
    /// A repeated path keeps its last view.
    pub fn new<I, P, V>(routes: I) -> Result<Self, RouterError>
    where
        I: IntoIterator<Item = (P, V)>,
        P: Into<String>,
        V: Into<ViewId>,
    {
        let mut map = BTreeMap::new();
        for (path, view) in routes {
            let path = path.into();
            if !path.starts_with('/') {
                return Err(RouterError::InvalidPath(path));
            }
            map.insert(path, view.into());
        }
        if !map.contains_key(DEFAULT_PATH) {
            return Err(RouterError::MissingDefaultRoute);
        }
        Ok(Self { routes: map })
    }

    /// The two-page demo site: `/` and `/home` show `home`, `/about` shows `about`.
    pub fn demo() -> Self {
        let routes = [("/", "home"), ("/home", "home"), ("/about", "about")]
            .into_iter()
            .map(|(p, v)| (p.to_string(), ViewId::from(v)))
            .collect();
        Self { routes }
    }

    /// Exact lookup, no fallback.
    pub fn lookup(&self, path: &str) -> Option<&ViewId> {
        self.routes.get(path)
    }

    /// Lookup with fallback to the default view.
    pub fn resolve(&self, path: &str) -> &ViewId {
        self.lookup(path).unwrap_or_else(|| self.default_view())
    }

    /// View mapped to `/`.
    pub fn default_view(&self) -> &ViewId {
        // Presence of "/" is checked by every constructor.
        &self.routes[DEFAULT_PATH]
    }

    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    /// Distinct views, ordered.
    pub fn views(&self) -> Vec<&ViewId> {
        let mut views: Vec<&ViewId> = self.routes.values().collect();
        views.sort();
        views.dedup();
        views
    }

    /// All `(path, view)` entries ordered by path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ViewId)> {
        self.routes.iter().map(|(p, v)| (p.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Always false for a constructed table; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::demo()
    }
}

impl TryFrom<BTreeMap<String, ViewId>> for RouteTable {
    type Error = RouterError;

    fn try_from(routes: BTreeMap<String, ViewId>) -> Result<Self, Self::Error> {
        Self::new(routes)
    }
}

impl From<RouteTable> for BTreeMap<String, ViewId> {
    fn from(table: RouteTable) -> Self {
        table.routes
    }
}
