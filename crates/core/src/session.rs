//! The authenticated participant, passed explicitly to every controller.

use std::fmt;

use crate::error::CoreError;
use crate::plan::Plan;
use crate::profile::Profile;
use crate::roles::{is_valid_role, ROLE_MENTOR};
use crate::types::DocId;

/// Who is acting, and the credential to act with.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub participant_id: DocId,
    pub name: String,
    pub role: String,
    token: String,
}

impl Session {
    pub fn new(
        participant_id: impl Into<DocId>,
        name: impl Into<String>,
        role: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let role = role.into();
        if !is_valid_role(&role) {
            return Err(CoreError::Validation(format!("Unknown role '{role}'")));
        }
        let token = token.into();
        if token.trim().is_empty() {
            return Err(CoreError::Unauthorized(
                "A bearer token is required".to_string(),
            ));
        }
        Ok(Self {
            participant_id: participant_id.into(),
            name: name.into(),
            role,
            token,
        })
    }

    /// Build a session from the profile the token resolved to.
    pub fn from_profile(profile: &Profile, token: impl Into<String>) -> Result<Self, CoreError> {
        Self::new(profile.id.clone(), profile.name.clone(), profile.role.clone(), token)
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_mentor(&self) -> bool {
        self.role == ROLE_MENTOR
    }

    /// Only the plan's mentor may create, edit or delete versions.
    pub fn can_edit_plan(&self, plan: &Plan) -> bool {
        plan.is_mentor(&self.participant_id)
    }

    /// Fails with [`CoreError::Forbidden`] unless this session may mutate
    /// the plan's versions.
    pub fn require_plan_editor(&self, plan: &Plan) -> Result<(), CoreError> {
        if self.can_edit_plan(plan) {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "Only the plan's mentor can change its versions".to_string(),
            ))
        }
    }

    /// Fails with [`CoreError::Forbidden`] unless this session is one of
    /// the plan's two participants.
    pub fn require_plan_participant(&self, plan: &Plan) -> Result<(), CoreError> {
        if plan.is_participant(&self.participant_id) {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "Only the plan's participants can comment".to_string(),
            ))
        }
    }
}

// The token never appears in logs.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("participant_id", &self.participant_id)
            .field("name", &self.name)
            .field("role", &self.role)
            .field("token", &"<redacted>")
            .finish()
    }
}
