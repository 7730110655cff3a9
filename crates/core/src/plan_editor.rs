//! Client-side state machine behind the plan editor and read-only view.
//!
//! Versions are stored oldest-first but shown newest-first. All state in
//! this module is keyed by **storage index**; [`storage_index`] and
//! [`display_position`] translate at the boundary.
//!
//! Per-row states:
//!
//! ```text
//!  collapsed --toggle--> expanded-view --edit--> expanded-edit
//!      ^                   |    ^                  |     |
//!      +------toggle-------+    +--save / cancel---+     |
//!                               (toggle suppressed) <----+
//! ```
//!
//! At most one row is expanded. Every `apply_*` method replaces the whole
//! plan with the server's copy; nothing is merged locally.

use crate::error::CoreError;
use crate::plan::{AppendVersion, NewComment, Plan, Version, VersionDraft};

// ---------------------------------------------------------------------------
// Index mapping
// ---------------------------------------------------------------------------

/// Storage index for display position `display` in a list of `len`
/// versions shown newest-first. `None` when out of range.
pub fn storage_index(len: usize, display: usize) -> Option<usize> {
    (display < len).then(|| len - 1 - display)
}

/// Display position for storage index `index`. Inverse of
/// [`storage_index`].
pub fn display_position(len: usize, index: usize) -> Option<usize> {
    (index < len).then(|| len - 1 - index)
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Visual state of one version row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Collapsed,
    ExpandedView,
    ExpandedEdit,
}

/// Whether the viewer may mutate versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// The plan's mentor: compose, edit, delete and comment.
    Editable,
    /// The other participant: view and comment only.
    ReadOnly,
}

/// Unsaved edits to an existing version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub index: usize,
    pub title: String,
    pub content: String,
}

/// Unsaved new version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composer {
    pub title: String,
    pub content: String,
    pub is_major: bool,
}

/// One row as the view should render it.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    pub display: usize,
    pub index: usize,
    pub state: RowState,
    pub version: &'a Version,
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PlanEditor {
    plan: Plan,
    mode: EditorMode,
    expanded: Option<usize>,
    editing: Option<EditBuffer>,
    composer: Option<Composer>,
    comment_draft: String,
}

impl PlanEditor {
    pub fn new(plan: Plan, mode: EditorMode) -> Self {
        Self {
            plan,
            mode,
            expanded: None,
            editing: None,
            composer: None,
            comment_draft: String::new(),
        }
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.plan.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plan.versions.is_empty()
    }

    /// Storage index of the expanded row, if any.
    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    pub fn editing(&self) -> Option<&EditBuffer> {
        self.editing.as_ref()
    }

    pub fn composer(&self) -> Option<&Composer> {
        self.composer.as_ref()
    }

    pub fn comment_draft(&self) -> &str {
        &self.comment_draft
    }

    /// Translate a display position into a storage index, failing when
    /// the position is out of range.
    pub fn resolve_display(&self, display: usize) -> Result<usize, CoreError> {
        storage_index(self.len(), display).ok_or_else(|| {
            CoreError::Validation(format!(
                "Row {display} out of range (plan has {} versions)",
                self.len()
            ))
        })
    }

    pub fn row_state(&self, index: usize) -> RowState {
        match (&self.editing, self.expanded) {
            (Some(buf), _) if buf.index == index => RowState::ExpandedEdit,
            (_, Some(expanded)) if expanded == index => RowState::ExpandedView,
            _ => RowState::Collapsed,
        }
    }

    /// Rows in display order (newest first).
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        let len = self.len();
        self.plan
            .versions
            .iter()
            .enumerate()
            .rev()
            .map(move |(index, version)| Row {
                display: len - 1 - index,
                index,
                state: self.row_state(index),
                version,
            })
    }

    // ---- expand / collapse ----

    /// Header click on a row. Returns `false` when the click is
    /// suppressed because that row is being edited.
    ///
    /// Expanding a different row closes the current one, discarding any
    /// edit in progress on it.
    pub fn toggle(&mut self, index: usize) -> Result<bool, CoreError> {
        self.check_index(index)?;
        if self.row_state(index) == RowState::ExpandedEdit {
            return Ok(false);
        }
        if self.expanded == Some(index) {
            self.expanded = None;
        } else {
            self.expanded = Some(index);
            self.editing = None;
        }
        self.comment_draft.clear();
        tracing::debug!(index, expanded = ?self.expanded, "Toggled plan version row");
        Ok(true)
    }

    // ---- edit ----

    /// `expanded-view` → `expanded-edit`, seeding the buffer from the
    /// stored version.
    pub fn begin_edit(&mut self, index: usize) -> Result<(), CoreError> {
        self.require_editable()?;
        self.check_index(index)?;
        if self.row_state(index) != RowState::ExpandedView {
            return Err(CoreError::Conflict(format!(
                "Version {index} must be expanded before it can be edited"
            )));
        }
        let version = &self.plan.versions[index];
        self.editing = Some(EditBuffer {
            index,
            title: version.title.clone(),
            content: version.content.clone(),
        });
        Ok(())
    }

    pub fn edit_buffer_mut(&mut self) -> Option<&mut EditBuffer> {
        self.editing.as_mut()
    }

    /// Validated `(index, draft)` ready for submission.
    pub fn pending_edit(&self) -> Result<(usize, VersionDraft), CoreError> {
        self.require_editable()?;
        let buf = self
            .editing
            .as_ref()
            .ok_or_else(|| CoreError::Conflict("No version is being edited".to_string()))?;
        let draft = VersionDraft::new(buf.title.clone(), buf.content.clone());
        draft.check()?;
        Ok((buf.index, draft))
    }

    /// `expanded-edit` → `expanded-view`, discarding the buffer.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Server accepted an edit: adopt its plan and return to
    /// `expanded-view` on the same row.
    pub fn apply_saved(&mut self, plan: Plan) {
        self.editing = None;
        self.replace(plan);
    }

    // ---- delete ----

    /// Validated storage index for a deletion.
    pub fn pending_delete(&self, index: usize) -> Result<usize, CoreError> {
        self.require_editable()?;
        self.check_index(index)?;
        Ok(index)
    }

    /// Server accepted a deletion: adopt its plan and collapse everything.
    /// Indexes shift after a delete, so no row state survives.
    pub fn apply_deleted(&mut self, plan: Plan) {
        self.plan = plan;
        self.expanded = None;
        self.editing = None;
        self.comment_draft.clear();
    }

    // ---- compose ----

    pub fn open_composer(&mut self) -> Result<&mut Composer, CoreError> {
        self.require_editable()?;
        Ok(self.composer.get_or_insert_with(Composer::default))
    }

    pub fn composer_mut(&mut self) -> Option<&mut Composer> {
        self.composer.as_mut()
    }

    pub fn close_composer(&mut self) {
        self.composer = None;
    }

    /// Validated body for a new version.
    pub fn pending_append(&self) -> Result<AppendVersion, CoreError> {
        self.require_editable()?;
        let composer = self
            .composer
            .as_ref()
            .ok_or_else(|| CoreError::Conflict("No new version is being composed".to_string()))?;
        let draft = VersionDraft::new(composer.title.clone(), composer.content.clone());
        draft.check()?;
        Ok(AppendVersion::new(draft, composer.is_major))
    }

    /// Server accepted a new version: adopt its plan, close the composer
    /// and expand the newest version.
    pub fn apply_appended(&mut self, plan: Plan) {
        self.plan = plan;
        self.composer = None;
        self.editing = None;
        self.comment_draft.clear();
        self.expanded = self.plan.versions.len().checked_sub(1);
    }

    // ---- comments ----

    pub fn set_comment_draft(&mut self, text: impl Into<String>) {
        self.comment_draft = text.into();
    }

    /// Validated `(index, comment)` for the expanded row.
    pub fn pending_comment(&self) -> Result<(usize, NewComment), CoreError> {
        let index = self
            .expanded
            .ok_or_else(|| CoreError::Conflict("Expand a version to comment on it".to_string()))?;
        let comment = NewComment::new(self.comment_draft.clone());
        comment.check()?;
        Ok((index, comment))
    }

    /// Server accepted a comment: adopt its plan and clear the draft.
    pub fn apply_commented(&mut self, plan: Plan) {
        self.comment_draft.clear();
        self.replace(plan);
    }

    // ---- refresh ----

    /// Adopt a freshly fetched plan. Row state survives only if it still
    /// points inside the new version list.
    pub fn replace(&mut self, plan: Plan) {
        self.plan = plan;
        let len = self.plan.versions.len();
        if self.expanded.is_some_and(|i| i >= len) {
            self.expanded = None;
        }
        if self.editing.as_ref().is_some_and(|b| b.index >= len) {
            self.editing = None;
        }
    }

    // ---- private helpers ----

    fn require_editable(&self) -> Result<(), CoreError> {
        match self.mode {
            EditorMode::Editable => Ok(()),
            EditorMode::ReadOnly => Err(CoreError::Forbidden(
                "This plan is read-only for you".to_string(),
            )),
        }
    }

    fn check_index(&self, index: usize) -> Result<(), CoreError> {
        if index >= self.len() {
            return Err(CoreError::Validation(format!(
                "Version index {index} out of range (plan has {} versions)",
                self.len()
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
