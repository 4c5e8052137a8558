//! Spawned CRUD actions shared by every management tab.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each tab keeps a [`CrudView`] in a signal and a [`CrudService`] for its
//! backend. These helpers run the shared lifecycle (reload, submit, delete)
//! on the local executor and write results back only if the tab is still
//! mounted.
//!
//! ERROR HANDLING
//! ==============
//! Failures become one blocking notice; the view keeps its last good items
//! and, for a failed save, the open editor with the user's input.

use flows::crud::{self, Record};
use flows::{CrudService, CrudView, ViewScope};
use leptos::prelude::*;

use crate::state::config::ConfigState;
use crate::state::notice::NoticeState;
use crate::util::scope::{spawn_browser, view_scope};

pub(crate) type ViewSignal<S> = RwSignal<CrudView<<S as CrudService>::Item, <S as CrudService>::Form>>;

/// The service plus where its results go.
pub(crate) struct ActionContext<S: CrudService> {
    pub service: S,
    pub view: ViewSignal<S>,
    pub notices: RwSignal<NoticeState>,
    pub scope: ViewScope,
}

impl<S: CrudService + Clone> Clone for ActionContext<S> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            view: self.view,
            notices: self.notices,
            scope: self.scope.clone(),
        }
    }
}

impl<S> ActionContext<S>
where
    S: CrudService + Clone + Send + Sync + 'static,
    S::Item: Clone + Send + Sync + 'static,
    S::Form: Clone + Send + Sync + 'static,
    <S::Item as Record>::Key: Send + Sync + 'static,
{
    /// Context for the calling component, with a fresh view that loads as
    /// soon as the endpoint catalogue is settled.
    pub(crate) fn mount(service: S, config: RwSignal<ConfigState>) -> StoredValue<Self> {
        let context = Self {
            service,
            view: RwSignal::new(CrudView::new()),
            notices: expect_context::<RwSignal<NoticeState>>(),
            scope: view_scope(),
        };
        let stored = StoredValue::new(context);
        Effect::new(move || {
            if config.get().loaded {
                stored.get_value().reload();
            }
        });
        stored
    }

    pub(crate) fn reload(&self) {
        let Self {
            service,
            view,
            notices,
            scope,
        } = self.clone();
        spawn_browser(async move {
            match scope.run(crud::reload(&service)).await {
                Some(Ok(items)) => view.update(|v| v.replace(items)),
                Some(Err(error)) => notices.update(|n| n.failed("Could not load", &error)),
                None => {}
            }
        });
    }

    /// Save the open editor, then reload.
    pub(crate) fn submit(&self, success: &'static str) {
        let Some(editor) = self.view.with_untracked(|v| v.editor().cloned()) else {
            return;
        };
        let Self {
            service,
            view,
            notices,
            scope,
        } = self.clone();
        spawn_browser(async move {
            match scope.run(crud::submit(&service, &editor.mode, &editor.form)).await {
                Some(Ok(items)) => {
                    view.update(|v| v.saved(items));
                    notices.update(|n| n.success(success));
                }
                Some(Err(error)) => notices.update(|n| n.failed("Could not save", &error)),
                None => {}
            }
        });
    }

    /// Delete the record awaiting confirmation, then reload.
    pub(crate) fn confirm_delete(&self, success: &'static str) {
        let Some(key) = self.view.try_update(CrudView::confirm_delete).flatten() else {
            return;
        };
        let Self {
            service,
            view,
            notices,
            scope,
        } = self.clone();
        spawn_browser(async move {
            match scope.run(crud::remove(&service, &key)).await {
                Some(Ok(items)) => {
                    view.update(|v| v.replace(items));
                    notices.update(|n| n.success(success));
                }
                Some(Err(error)) => notices.update(|n| n.failed("Could not delete", &error)),
                None => {}
            }
        });
    }
}
