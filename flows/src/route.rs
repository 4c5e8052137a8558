//! Route table and role guard.
//!
//! DESIGN
//! ======
//! Resolution is a pure function of the requested [`Route`] and the signed-in
//! role. Front ends render on [`Resolution::Render`] and navigate on
//! [`Resolution::Redirect`]. A signed-in user who asks for another role's
//! dashboard is sent to their own landing route, never to an error page.

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;

use wire::types::Role;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Login,
    Register,
    Admin,
    Teacher,
    Dashboard,
    Devices,
    Lessons,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Render,
    Redirect(Route),
}

impl Route {
    pub const ALL: [Self; 8] = [
        Self::Root,
        Self::Login,
        Self::Register,
        Self::Admin,
        Self::Teacher,
        Self::Dashboard,
        Self::Devices,
        Self::Lessons,
    ];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Root => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Admin => "/admin",
            Self::Teacher => "/teacher",
            Self::Dashboard => "/dashboard",
            Self::Devices => "/devices",
            Self::Lessons => "/lessons",
        }
    }

    /// Match a location path, ignoring a trailing slash and any query.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL.into_iter().find(|route| route.path() == normalized)
    }

    /// Where a role lands after login or on `/`.
    #[must_use]
    pub fn landing(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::Teacher => Self::Teacher,
            Role::Student => Self::Dashboard,
        }
    }

    #[must_use]
    pub fn is_public(self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// Roles allowed to render this route. `None` means any signed-in user.
    #[must_use]
    pub fn allowed_role(self) -> Option<Role> {
        match self {
            Self::Admin => Some(Role::Admin),
            Self::Teacher => Some(Role::Teacher),
            Self::Root | Self::Login | Self::Register | Self::Dashboard | Self::Devices | Self::Lessons => None,
        }
    }

    #[must_use]
    pub fn resolve(self, role: Option<Role>) -> Resolution {
        match (self, role) {
            (route, None) if route.is_public() => Resolution::Render,
            (_, None) => Resolution::Redirect(Self::Login),
            (Self::Root | Self::Login | Self::Register, Some(role)) => Resolution::Redirect(Self::landing(role)),
            (route, Some(role)) => match route.allowed_role() {
                Some(required) if required != role => Resolution::Redirect(Self::landing(role)),
                _ => Resolution::Render,
            },
        }
    }
}
