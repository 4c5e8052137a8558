//! Shared lifecycle of the list-and-modal management screens.
//!
//! SYSTEM CONTEXT
//! ==============
//! Users, classes, devices and lessons are all managed the same way: load the
//! collection, filter it locally, edit one record in a modal, confirm before
//! deleting. [`CrudView`] is the screen state and [`CrudService`] is the
//! backend seam.
//!
//! ERROR HANDLING
//! ==============
//! [`submit`] and [`remove`] return the freshly reloaded collection. Callers
//! apply it to the view only on `Ok`, so a failed save or delete leaves the
//! list, the open editor and the typed form exactly as they were.

#[cfg(test)]
#[path = "crud_test.rs"]
mod crud_test;

use std::fmt::Debug;

use async_trait::async_trait;
use wire::RequestError;
use wire::types::{AdminUser, ClassSummary, Device, LessonSummary};

use crate::search::{self, Searchable};
use crate::validate::ValidationError;

/// A row with a stable identity.
pub trait Record {
    type Key: Clone + PartialEq + Debug;

    fn key(&self) -> Self::Key;
}

/// Failure of a user-triggered action, reported as one blocking notice.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Request(#[from] RequestError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditMode<K> {
    Create,
    Edit(K),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Editor<K, F> {
    pub mode: EditMode<K>,
    pub form: F,
}

#[derive(Clone, Debug)]
pub struct CrudView<T: Record, F> {
    items: Vec<T>,
    loaded: bool,
    search: String,
    editor: Option<Editor<T::Key, F>>,
    pending_delete: Option<T::Key>,
}

impl<T: Record, F> Default for CrudView<T, F> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loaded: false,
            search: String::new(),
            editor: None,
            pending_delete: None,
        }
    }
}

impl<T: Record, F> CrudView<T, F> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn find(&self, key: &T::Key) -> Option<&T> {
        self.items.iter().find(|item| item.key() == *key)
    }

    /// Install a freshly loaded collection.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.loaded = true;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn open_create(&mut self, form: F) {
        self.editor = Some(Editor {
            mode: EditMode::Create,
            form,
        });
    }

    pub fn open_edit(&mut self, key: T::Key, form: F) {
        self.editor = Some(Editor {
            mode: EditMode::Edit(key),
            form,
        });
    }

    pub fn editor(&self) -> Option<&Editor<T::Key, F>> {
        self.editor.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut F> {
        self.editor.as_mut().map(|editor| &mut editor.form)
    }

    pub fn is_editing(&self) -> bool {
        self.editor.is_some()
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Apply the reload that followed a successful save.
    pub fn saved(&mut self, items: Vec<T>) {
        self.replace(items);
        self.editor = None;
    }

    /// First step of a delete: remember the row and wait for confirmation.
    pub fn request_delete(&mut self, key: T::Key) {
        self.pending_delete = Some(key);
    }

    pub fn pending_delete(&self) -> Option<&T::Key> {
        self.pending_delete.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Confirmation: hand out the key to delete, at most once.
    pub fn confirm_delete(&mut self) -> Option<T::Key> {
        self.pending_delete.take()
    }
}

impl<T: Record + Searchable, F> CrudView<T, F> {
    pub fn visible(&self) -> Vec<&T> {
        search::filter(&self.items, &self.search)
    }
}

type KeyOf<S> = <<S as CrudService>::Item as Record>::Key;

/// Backend operations behind one management screen.
#[async_trait(?Send)]
pub trait CrudService {
    type Item: Record;
    type Form;

    async fn list(&self) -> Result<Vec<Self::Item>, RequestError>;

    async fn create(&self, form: &Self::Form) -> Result<(), RequestError>;

    async fn update(&self, key: &KeyOf<Self>, form: &Self::Form) -> Result<(), RequestError>;

    async fn delete(&self, key: &KeyOf<Self>) -> Result<(), RequestError>;

    fn validate(&self, _mode: &EditMode<KeyOf<Self>>, _form: &Self::Form) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// # Errors
///
/// Propagates the list failure.
pub async fn reload<S: CrudService + ?Sized>(service: &S) -> Result<Vec<S::Item>, ActionError> {
    Ok(service.list().await?)
}

/// Validate, create or update depending on `mode`, then reload.
///
/// # Errors
///
/// Returns the validation failure without sending anything, or the first
/// request failure.
pub async fn submit<S: CrudService + ?Sized>(
    service: &S,
    mode: &EditMode<KeyOf<S>>,
    form: &S::Form,
) -> Result<Vec<S::Item>, ActionError> {
    service.validate(mode, form)?;
    match mode {
        EditMode::Create => service.create(form).await?,
        EditMode::Edit(key) => service.update(key, form).await?,
    }
    reload(service).await
}

/// Delete one record, then reload.
///
/// # Errors
///
/// Returns the first request failure.
pub async fn remove<S: CrudService + ?Sized>(service: &S, key: &KeyOf<S>) -> Result<Vec<S::Item>, ActionError> {
    service.delete(key).await?;
    reload(service).await
}

impl Record for AdminUser {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }
}

impl Record for ClassSummary {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }
}

impl Record for Device {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }
}

impl Record for LessonSummary {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }
}
