//! Aggregate figures for the admin reports tab.

#[cfg(test)]
#[path = "reports_test.rs"]
mod reports_test;

use wire::types::AdminSnapshot;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdminReport {
    pub students: usize,
    pub teachers: usize,
    pub classes: usize,
    pub devices: usize,
    pub active_users: usize,
    pub inactive_users: usize,
    /// Classes with no teacher assigned.
    pub unassigned_classes: usize,
    pub average_class_size: f64,
}

impl AdminReport {
    pub fn from_snapshot(snapshot: &AdminSnapshot) -> Self {
        let active_users = snapshot.users.iter().filter(|user| user.active).count();
        let enrolled: i64 = snapshot.classes.iter().map(|class| class.students_count).sum();
        #[allow(clippy::cast_precision_loss)]
        let average_class_size = if snapshot.classes.is_empty() {
            0.0
        } else {
            enrolled as f64 / snapshot.classes.len() as f64
        };
        Self {
            students: snapshot.students.len(),
            teachers: snapshot.teachers.len(),
            classes: snapshot.classes.len(),
            devices: snapshot.devices.len(),
            active_users,
            inactive_users: snapshot.users.len() - active_users,
            unassigned_classes: snapshot.classes.iter().filter(|class| class.teacher_id.is_none()).count(),
            average_class_size,
        }
    }

    /// Average class size with one decimal, e.g. `"12.5"`.
    pub fn average_class_size_label(&self) -> String {
        format!("{:.1}", self.average_class_size)
    }
}
