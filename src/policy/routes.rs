//! Route registration: each page is paired with its access class.

use crate::policy::access::{GuardedRoute, RouteAccess};
use crate::RouteGateError;

/// The product's pages and their access classes.
pub const STANDARD_ROUTES: &[(&str, RouteAccess)] = &[
    ("/signin", RouteAccess::PublicOnly),
    ("/signup", RouteAccess::PublicOnly),
    ("/dashboard", RouteAccess::RequiresSession),
    ("/setup", RouteAccess::RequiresSession),
    ("/select-plan", RouteAccess::RequiresSession),
    ("/vendors", RouteAccess::RequiresSession),
    ("/vendors/new", RouteAccess::RequiresSession),
    ("/purchase-orders", RouteAccess::RequiresSession),
    ("/purchase-orders/new", RouteAccess::RequiresSession),
];

/// A registered route: the page component and how it is guarded.
#[derive(Debug, Clone)]
pub struct RouteEntry<P> {
    /// Path and access class.
    pub route: GuardedRoute,

    /// Page component mounted when the gate renders.
    pub page: P,
}

/// Ordered set of guarded routes, looked up by exact path.
#[derive(Debug, Clone)]
pub struct RouteTable<P> {
    entries: Vec<RouteEntry<P>>,
}

impl<P> Default for RouteTable<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> RouteTable<P> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a table from [`STANDARD_ROUTES`], asking `page_for` for each page.
    pub fn standard(mut page_for: impl FnMut(&str) -> P) -> Result<Self, RouteGateError> {
        let mut table = Self::new();
        for (path, access) in STANDARD_ROUTES {
            table.register(path, *access, page_for(path))?;
        }
        Ok(table)
    }

    /// Register a page at `path` with the given access class.
    ///
    /// # Errors
    /// - `ConfigError` - path does not start with '/'
    /// - `DuplicateRoute` - a page is already registered at `path`
    pub fn register(&mut self, path: &str, access: RouteAccess, page: P) -> Result<(), RouteGateError> {
        if !path.starts_with('/') {
            return Err(RouteGateError::ConfigError(format!(
                "route path must start with '/', got {:?}",
                path
            )));
        }
        if self.get(path).is_some() {
            return Err(RouteGateError::DuplicateRoute {
                path: path.to_string(),
            });
        }

        self.entries.push(RouteEntry {
            route: GuardedRoute::new(path, access),
            page,
        });
        Ok(())
    }

    /// Look up the entry registered at exactly `path`.
    pub fn get(&self, path: &str) -> Option<&RouteEntry<P>> {
        self.entries.iter().find(|e| e.route.path == path)
    }

    /// Access class of the route at `path`.
    pub fn access_of(&self, path: &str) -> Option<RouteAccess> {
        self.get(path).map(|e| e.route.access)
    }

    /// Registered routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry<P>> {
        self.entries.iter()
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
