//! User profile, participant references and mentorship relationships.

use serde::{Deserialize, Serialize};

use crate::pitch::PitchQuestion;
use crate::types::{DocId, Timestamp};

// ---------------------------------------------------------------------------
// Participant references
// ---------------------------------------------------------------------------

/// A reference to a platform user as it appears inside other documents.
///
/// The API returns either a bare id or a populated `{ _id, name }` object
/// depending on the endpoint, so both shapes deserialize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ParticipantRef {
    Populated {
        #[serde(rename = "_id")]
        id: DocId,
        #[serde(default)]
        name: Option<String>,
    },
    Id(DocId),
}

impl ParticipantRef {
    /// The referenced user's id, whichever shape the server sent.
    pub fn id(&self) -> &str {
        match self {
            ParticipantRef::Populated { id, .. } => id,
            ParticipantRef::Id(id) => id,
        }
    }

    /// Display name, when the server populated it.
    pub fn name(&self) -> Option<&str> {
        match self {
            ParticipantRef::Populated { name, .. } => name.as_deref(),
            ParticipantRef::Id(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

/// The authenticated user's own profile (`GET /users/profile`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: DocId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: String,
    #[serde(default)]
    pub pitch_questions: Vec<PitchQuestion>,
    #[serde(default)]
    pub plan_template: Option<String>,
}

/// Body for `PUT /users/profile`. Only the populated field is sent.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch_questions: Option<Vec<PitchQuestion>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_template: Option<String>,
}

// ---------------------------------------------------------------------------
// Relationships
// ---------------------------------------------------------------------------

/// Lifecycle status of a mentorship relationship. Transitions are
/// decided server-side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipStatus {
    Active,
    Ended,
}

/// A mentor/mentee pairing as reported by the relationship service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    #[serde(rename = "_id")]
    pub id: DocId,
    pub mentor: ParticipantRef,
    pub mentee: ParticipantRef,
    pub status: RelationshipStatus,
    #[serde(default)]
    pub started_at: Option<Timestamp>,
    #[serde(default)]
    pub ended_at: Option<Timestamp>,
}

impl Relationship {
    pub fn is_active(&self) -> bool {
        self.status == RelationshipStatus::Active
    }

    /// The participant on the other side of the pairing from `viewer_id`.
    pub fn counterpart(&self, viewer_id: &str) -> &ParticipantRef {
        if self.mentor.id() == viewer_id {
            &self.mentee
        } else {
            &self.mentor
        }
    }
}

/// Split relationships into `(active, historical)`, preserving order.
pub fn partition_relationships(all: Vec<Relationship>) -> (Vec<Relationship>, Vec<Relationship>) {
    all.into_iter().partition(Relationship::is_active)
}
