//! Backend catalogue and base-URL resolution.
//!
//! SYSTEM CONTEXT
//! ==============
//! TouchGlyph talks to five independently deployed services. Front ends never
//! hard-code a host: the server publishes an [`Endpoints`] document, the CLI
//! builds one from flags/env, and everything else asks it for URLs.

#[cfg(test)]
#[path = "endpoints_test.rs"]
mod endpoints_test;

use serde::{Deserialize, Serialize};

/// One of the REST services the front ends talk to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Auth/core service: login, registration, personal data.
    Auth,
    /// Admin CRUD service: users, classes, devices.
    Admin,
    /// Teacher service: dashboard, classes, lessons.
    Teacher,
    /// Student service: lesson list and exercise sessions.
    Student,
    /// Braille device bridge.
    Device,
}

impl Backend {
    pub const ALL: [Self; 5] = [Self::Auth, Self::Admin, Self::Teacher, Self::Student, Self::Device];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auth => "auth",
            Self::Admin => "admin",
            Self::Teacher => "teacher",
            Self::Student => "student",
            Self::Device => "device",
        }
    }

    /// Environment variable that overrides this backend's base URL.
    #[must_use]
    pub fn env_var(self) -> &'static str {
        match self {
            Self::Auth => "TOUCHGLYPH_AUTH_URL",
            Self::Admin => "TOUCHGLYPH_ADMIN_URL",
            Self::Teacher => "TOUCHGLYPH_TEACHER_URL",
            Self::Student => "TOUCHGLYPH_STUDENT_URL",
            Self::Device => "TOUCHGLYPH_DEVICE_URL",
        }
    }
}

/// Base URL for every backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub auth: String,
    pub admin: String,
    pub teacher: String,
    pub student: String,
    pub device: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            auth: "http://127.0.0.1:8000/api".to_owned(),
            admin: "http://localhost:5000".to_owned(),
            teacher: "http://localhost:5002".to_owned(),
            student: "http://localhost:5003".to_owned(),
            device: "http://localhost:5004".to_owned(),
        }
    }
}

impl Endpoints {
    /// Build endpoints from a key lookup (normally the process environment),
    /// keeping the default for every backend whose variable is unset or blank.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut endpoints = Self::default();
        for backend in Backend::ALL {
            if let Some(value) = lookup(backend.env_var()) {
                let value = value.trim();
                if !value.is_empty() {
                    endpoints.set(backend, value.to_owned());
                }
            }
        }
        endpoints
    }

    #[must_use]
    pub fn base(&self, backend: Backend) -> &str {
        match backend {
            Backend::Auth => &self.auth,
            Backend::Admin => &self.admin,
            Backend::Teacher => &self.teacher,
            Backend::Student => &self.student,
            Backend::Device => &self.device,
        }
    }

    pub fn set(&mut self, backend: Backend, base: String) {
        let slot = match backend {
            Backend::Auth => &mut self.auth,
            Backend::Admin => &mut self.admin,
            Backend::Teacher => &mut self.teacher,
            Backend::Student => &mut self.student,
            Backend::Device => &mut self.device,
        };
        *slot = base;
    }

    /// Join `path` onto the backend's base URL with exactly one `/` between.
    #[must_use]
    pub fn url(&self, backend: Backend, path: &str) -> String {
        let base = self.base(backend).trim_end_matches('/');
        if path.is_empty() {
            return base.to_owned();
        }
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }
}
