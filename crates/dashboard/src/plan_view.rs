//! Plan editor and read-only plan view.
//!
//! One controller serves both participants: the mode is derived from
//! the session when the plan is loaded. Every network call replaces the
//! whole plan with the server's response; a failed call leaves state
//! untouched and records a single error notice.

use std::sync::Arc;

use mentorlink_client::service::{PlanService, ProfileService};
use mentorlink_core::error::CoreError;
use mentorlink_core::plan::Plan;
use mentorlink_core::plan_editor::{Composer, EditBuffer, EditorMode, PlanEditor};
use mentorlink_core::session::Session;

use crate::error::{AppError, AppResult};
use crate::notice::{Notice, Notices};

/// Build the viewer's session from the profile the token belongs to.
///
/// Plan screens need nothing else from the dashboard, so this does not
/// touch the relationship service.
pub async fn resolve_session(profiles: &dyn ProfileService, token: &str) -> AppResult<Session> {
    let profile = profiles.fetch_profile().await?;
    Ok(Session::from_profile(&profile, token)?)
}

pub struct PlanController {
    session: Session,
    service: Arc<dyn PlanService>,
    editor: PlanEditor,
    notices: Notices,
}

impl PlanController {
    /// Fetch a plan by id and open it for `session`.
    pub async fn load(
        session: Session,
        service: Arc<dyn PlanService>,
        plan_id: &str,
    ) -> AppResult<Self> {
        let plan = service.fetch_by_id(plan_id).await?;
        Ok(Self::from_plan(session, service, plan))
    }

    /// Open an already-fetched plan for `session`.
    pub fn from_plan(session: Session, service: Arc<dyn PlanService>, plan: Plan) -> Self {
        let mode = if session.can_edit_plan(&plan) {
            EditorMode::Editable
        } else {
            EditorMode::ReadOnly
        };
        tracing::debug!(plan_id = %plan.id, ?mode, "Opened plan");
        Self {
            session,
            service,
            editor: PlanEditor::new(plan, mode),
            notices: Notices::default(),
        }
    }

    pub fn editor(&self) -> &PlanEditor {
        &self.editor
    }

    pub fn plan(&self) -> &Plan {
        self.editor.plan()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_read_only(&self) -> bool {
        self.editor.mode() == EditorMode::ReadOnly
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.take()
    }

    // ---- local interactions (no network) ----

    /// Header click on display row `display` (0 = newest).
    pub fn toggle_row(&mut self, display: usize) -> AppResult<bool> {
        let result = self
            .editor
            .resolve_display(display)
            .and_then(|index| self.editor.toggle(index));
        self.record(result)
    }

    pub fn begin_edit(&mut self, display: usize) -> AppResult<()> {
        let result = self
            .editor
            .resolve_display(display)
            .and_then(|index| self.editor.begin_edit(index));
        self.record(result)
    }

    pub fn edit_buffer_mut(&mut self) -> Option<&mut EditBuffer> {
        self.editor.edit_buffer_mut()
    }

    pub fn cancel_edit(&mut self) {
        self.editor.cancel_edit();
    }

    /// Open the new-version form. Fill it in through
    /// [`composer_mut`](Self::composer_mut).
    pub fn open_composer(&mut self) -> AppResult<()> {
        let result = self.editor.open_composer().map(|_| ());
        self.record(result)
    }

    pub fn composer_mut(&mut self) -> Option<&mut Composer> {
        self.editor.composer_mut()
    }

    pub fn close_composer(&mut self) {
        self.editor.close_composer();
    }

    pub fn set_comment_draft(&mut self, text: impl Into<String>) {
        self.editor.set_comment_draft(text);
    }

    // ---- server round-trips ----

    /// Submit the edit buffer. On success the row returns to view mode.
    pub async fn save_edit(&mut self) -> AppResult<()> {
        let (index, draft) = match self.editor.pending_edit() {
            Ok(pending) => pending,
            Err(err) => return self.fail(err),
        };
        let plan_id = self.plan().id.clone();
        match self.service.edit_version(&plan_id, index, &draft).await {
            Ok(plan) => {
                self.editor.apply_saved(plan);
                self.notices.success("Version updated");
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    /// Submit the composer. On success the new version is expanded.
    pub async fn submit_new_version(&mut self) -> AppResult<()> {
        let body = match self.editor.pending_append() {
            Ok(body) => body,
            Err(err) => return self.fail(err),
        };
        let plan_id = self.plan().id.clone();
        match self.service.append_version(&plan_id, &body).await {
            Ok(plan) => {
                self.editor.apply_appended(plan);
                self.notices.success("New version added");
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    /// Delete display row `row`. On success every row collapses.
    pub async fn delete_row(&mut self, row: usize) -> AppResult<()> {
        let index = match self
            .editor
            .resolve_display(row)
            .and_then(|index| self.editor.pending_delete(index))
        {
            Ok(index) => index,
            Err(err) => return self.fail(err),
        };
        let plan_id = self.plan().id.clone();
        tracing::debug!(%plan_id, row, index, "Deleting plan version");
        match self.service.delete_version(&plan_id, index).await {
            Ok(plan) => {
                self.editor.apply_deleted(plan);
                self.notices.success("Version deleted");
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    /// Post the comment draft on the expanded row.
    pub async fn submit_comment(&mut self) -> AppResult<()> {
        let pending = self
            .session
            .require_plan_participant(self.editor.plan())
            .and_then(|()| self.editor.pending_comment());
        let (index, comment) = match pending {
            Ok(pending) => pending,
            Err(err) => return self.fail(err),
        };
        let plan_id = self.plan().id.clone();
        match self.service.add_comment(&plan_id, index, &comment).await {
            Ok(plan) => {
                self.editor.apply_commented(plan);
                self.notices.success("Comment added");
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    /// Re-fetch the plan, keeping row state where it still applies.
    pub async fn refresh(&mut self) -> AppResult<()> {
        let plan_id = self.plan().id.clone();
        match self.service.fetch_by_id(&plan_id).await {
            Ok(plan) => {
                self.editor.replace(plan);
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    // ---- private helpers ----

    fn fail<T>(&mut self, err: impl Into<AppError>) -> AppResult<T> {
        let err = err.into();
        self.notices.error(&err);
        Err(err)
    }

    fn record<T>(&mut self, result: Result<T, CoreError>) -> AppResult<T> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => self.fail(err),
        }
    }
}
