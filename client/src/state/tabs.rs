//! Dashboard tab identifiers.
//!
//! Each dashboard is a tagged set of views; the active tab is remembered in
//! browser storage under the dashboard's key.

#[cfg(test)]
#[path = "tabs_test.rs"]
mod tabs_test;

use serde::{Deserialize, Serialize};

pub const ADMIN_TAB_KEY: &str = "touchglyph.admin.tab";
pub const TEACHER_TAB_KEY: &str = "touchglyph.teacher.tab";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminTab {
    #[default]
    Home,
    Teachers,
    Students,
    Classes,
    Devices,
    Reports,
    Settings,
}

impl AdminTab {
    pub const ALL: [Self; 7] = [
        Self::Home,
        Self::Teachers,
        Self::Students,
        Self::Classes,
        Self::Devices,
        Self::Reports,
        Self::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Teachers => "Teachers",
            Self::Students => "Students",
            Self::Classes => "Classes",
            Self::Devices => "Devices",
            Self::Reports => "Reports",
            Self::Settings => "Settings",
        }
    }

    /// Subtitle on the home screen card.
    pub fn description(self) -> &'static str {
        match self {
            Self::Home => "Overview",
            Self::Teachers => "Create and manage teacher accounts",
            Self::Students => "Enroll students and import rosters",
            Self::Classes => "Group students and assign teachers",
            Self::Devices => "Register Braille devices",
            Self::Reports => "Platform totals at a glance",
            Self::Settings => "Backend endpoints in use",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeacherTab {
    #[default]
    Lessons,
    Students,
    Progress,
    Profile,
}

impl TeacherTab {
    pub const ALL: [Self; 4] = [Self::Lessons, Self::Students, Self::Progress, Self::Profile];

    pub fn label(self) -> &'static str {
        match self {
            Self::Lessons => "Lessons",
            Self::Students => "Students",
            Self::Progress => "Progress",
            Self::Profile => "Profile",
        }
    }
}
