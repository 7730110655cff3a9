//! Pitch-question and plan-template panels of the dashboard.
//!
//! Both panels edit a local working copy and persist it wholesale
//! through `PUT /users/profile`, then adopt what the server stored.

use std::sync::Arc;

use mentorlink_core::error::CoreError;
use mentorlink_core::pitch::PitchQuestionEditor;
use mentorlink_core::plan_template::PlanTemplateEditor;

use crate::dashboard::Dashboard;
use crate::error::AppResult;

impl Dashboard {
    pub fn pitch_editor(&self) -> &PitchQuestionEditor {
        &self.pitch_editor
    }

    pub fn pitch_editor_mut(&mut self) -> &mut PitchQuestionEditor {
        &mut self.pitch_editor
    }

    pub fn template_editor(&self) -> &PlanTemplateEditor {
        &self.template_editor
    }

    pub fn template_editor_mut(&mut self) -> &mut PlanTemplateEditor {
        &mut self.template_editor
    }

    /// Validate and save the pitch questions. Nothing is sent when
    /// validation fails.
    pub async fn save_pitch_questions(&mut self) -> AppResult<()> {
        if let Err(err) = self.require_mentor().and_then(|()| self.pitch_editor.validate()) {
            return self.fail(err);
        }
        let questions = self.pitch_editor.questions().to_vec();
        let profiles = Arc::clone(&self.services.profiles);
        match profiles.update_pitch_questions(&questions).await {
            Ok(profile) => {
                tracing::debug!(count = profile.pitch_questions.len(), "Pitch questions saved");
                self.pitch_editor.adopt(profile.pitch_questions.clone());
                self.profile = profile;
                self.notices.success("Pitch questions saved");
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    /// Validate and save the plan template.
    pub async fn save_plan_template(&mut self) -> AppResult<()> {
        let template = match self
            .require_mentor()
            .and_then(|()| self.template_editor.pending_save())
        {
            Ok(template) => template,
            Err(err) => return self.fail(err),
        };
        let profiles = Arc::clone(&self.services.profiles);
        match profiles.update_plan_template(&template).await {
            Ok(profile) => {
                self.template_editor.adopt(profile.plan_template.clone());
                self.profile = profile;
                self.notices.success("Plan template saved");
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    fn require_mentor(&self) -> Result<(), CoreError> {
        if self.session.is_mentor() {
            Ok(())
        } else {
            Err(CoreError::Forbidden(
                "Only mentors can edit their profile questions and templates".to_string(),
            ))
        }
    }
}
