//! Static route table

/// Identifies which view a route renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteId {
    Login,
    Dashboard,
    Register,
}

/// One entry of the route table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub id: RouteId,
    pub path: &'static str,
    pub name: &'static str,
    pub requires_auth: bool,
}

/// Routes known to the application, in match order
pub const ROUTES: &[RouteDescriptor] = &[
    RouteDescriptor {
        id: RouteId::Login,
        path: "/",
        name: "Login",
        requires_auth: false,
    },
    RouteDescriptor {
        id: RouteId::Dashboard,
        path: "/dashboard",
        name: "Dashboard",
        requires_auth: true,
    },
    RouteDescriptor {
        id: RouteId::Register,
        path: "/register",
        name: "Register",
        requires_auth: false,
    },
];

/// Result of matching a location against the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    /// Normalized path that was matched
    pub path: String,
    /// Matched records, outermost first. Empty when nothing matched.
    pub matched: Vec<&'a RouteDescriptor>,
}

impl RouteMatch<'_> {
    /// Whether any matched record requires authentication
    pub fn requires_auth(&self) -> bool {
        self.matched.iter().any(|route| route.requires_auth)
    }

    /// The innermost matched record
    pub fn route(&self) -> Option<&RouteDescriptor> {
        self.matched.last().copied()
    }
}

/// Immutable view over a route list
#[derive(Debug, Clone, Copy)]
pub struct RouteTable {
    routes: &'static [RouteDescriptor],
}

impl RouteTable {
    /// The application's route table
    pub const fn standard() -> Self {
        Self { routes: ROUTES }
    }

    /// Build a table over a custom list
    pub const fn new(routes: &'static [RouteDescriptor]) -> Self {
        Self { routes }
    }

    /// All routes in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &'static RouteDescriptor> {
        self.routes.iter()
    }

    /// Look up a route by id
    pub fn get(&self, id: RouteId) -> Option<&'static RouteDescriptor> {
        self.routes.iter().find(|route| route.id == id)
    }

    /// Path unauthenticated navigations are redirected to
    pub fn login_path(&self) -> &'static str {
        self.get(RouteId::Login).map_or("/", |route| route.path)
    }

    /// Match a location (path with optional query or fragment)
    pub fn resolve(&self, location: &str) -> RouteMatch<'static> {
        let path = normalize(location);
        let matched = self
            .routes
            .iter()
            .filter(|route| route.path == path)
            .take(1)
            .collect();
        RouteMatch { path, matched }
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Strip query, fragment and trailing slashes
fn normalize(location: &str) -> String {
    let path = location
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
