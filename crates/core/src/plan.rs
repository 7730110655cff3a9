//! Collaboration plan documents and the request bodies that mutate them.
//!
//! A plan is owned by the server: the client never assigns ids or
//! version labels, it only renders the last document the server sent.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::profile::ParticipantRef;
use crate::types::{DocId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Title used when a plan is created from the dashboard's open-plan flow.
pub const DEFAULT_PLAN_TITLE: &str = "Mentorship Plan";

/// Content used when the mentor has no plan template of their own.
pub const DEFAULT_PLAN_CONTENT: &str = "## Goals\n\n- \n\n## Milestones\n\n- \n\n## Resources\n\n- \n";

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// A comment on one version of a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub author_name: String,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// One snapshot of a plan's content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Version {
    pub title: String,
    pub content: String,
    pub major: u32,
    pub minor: u32,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Version {
    /// Human-readable label, e.g. `v2.1`.
    pub fn label(&self) -> String {
        format!("v{}.{}", self.major, self.minor)
    }
}

/// A mentor-authored plan shared with one mentee.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(rename = "_id")]
    pub id: DocId,
    pub mentor: ParticipantRef,
    pub mentee: ParticipantRef,
    #[serde(default)]
    pub versions: Vec<Version>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Plan {
    /// The most recently appended version, if any.
    pub fn latest(&self) -> Option<&Version> {
        self.versions.last()
    }

    /// Returns `true` if `participant_id` is the plan's mentor.
    pub fn is_mentor(&self, participant_id: &str) -> bool {
        self.mentor.id() == participant_id
    }

    /// Returns `true` if `participant_id` is either side of the plan.
    pub fn is_participant(&self, participant_id: &str) -> bool {
        self.is_mentor(participant_id) || self.mentee.id() == participant_id
    }
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Title and content of a version being created or edited.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
pub struct VersionDraft {
    #[validate(custom(function = "not_blank", message = "Title must not be empty"))]
    pub title: String,
    #[validate(custom(function = "not_blank", message = "Content must not be empty"))]
    pub content: String,
}

impl VersionDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Run validation and convert failures into [`CoreError::Validation`].
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;
        Ok(())
    }
}

/// Body for `POST /plans`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlan {
    pub mentee_id: DocId,
    pub title: String,
    pub content: String,
}

impl CreatePlan {
    pub fn new(mentee_id: impl Into<DocId>, draft: VersionDraft) -> Self {
        Self {
            mentee_id: mentee_id.into(),
            title: draft.title,
            content: draft.content,
        }
    }
}

/// Body for `PUT /plans/{id}/version`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppendVersion {
    pub title: String,
    pub content: String,
    pub is_major: bool,
}

impl AppendVersion {
    pub fn new(draft: VersionDraft, is_major: bool) -> Self {
        Self {
            title: draft.title,
            content: draft.content,
            is_major,
        }
    }
}

/// Body for `POST /plans/{id}/version/{index}/comment`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
pub struct NewComment {
    #[validate(custom(function = "not_blank", message = "Comment must not be empty"))]
    pub text: String,
}

impl NewComment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;
        Ok(())
    }
}
