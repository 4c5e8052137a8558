//! Client-side search over already loaded collections.
//!
//! Matching is a case-insensitive substring test against the fields a list
//! shows. The term is used as typed, surrounding spaces included; an empty
//! term keeps everything in its loaded order.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use wire::types::{
    AdminUser, ClassStudent, ClassSummary, Device, EnrolledStudent, LessonSummary, StudentActivity, StudentLesson,
    TeacherClass,
};

/// Text fields a list row is searchable by.
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

#[must_use]
pub fn matches<T: Searchable + ?Sized>(item: &T, term: &str) -> bool {
    let needle = term.to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.search_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

#[must_use]
pub fn filter<'a, T: Searchable>(items: &'a [T], term: &str) -> Vec<&'a T> {
    items.iter().filter(|item| matches(*item, term)).collect()
}

impl Searchable for AdminUser {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.full_name.as_str(), self.username.as_str()];
        fields.extend(self.email.as_deref());
        fields
    }
}

impl Searchable for ClassSummary {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.teacher_name.as_deref());
        fields
    }
}

impl Searchable for Device {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.id.as_str()]
    }
}

impl Searchable for LessonSummary {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }
}

impl Searchable for StudentLesson {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.title.as_str(), self.description.as_str()]
    }
}

impl Searchable for StudentActivity {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.username.as_str()]
    }
}

impl Searchable for TeacherClass {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

impl Searchable for ClassStudent {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.full_name.as_str(), self.username.as_str()]
    }
}

impl Searchable for EnrolledStudent {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.full_name.as_str(), self.username.as_str()]
    }
}
