//! The mentor's default content for newly created plans.

use crate::error::CoreError;
use crate::plan::{VersionDraft, DEFAULT_PLAN_CONTENT, DEFAULT_PLAN_TITLE};

/// Maximum template length in characters.
pub const MAX_TEMPLATE_LENGTH: usize = 20_000;

/// Validate a template before it is saved to the profile.
pub fn validate_template(template: &str) -> Result<(), CoreError> {
    if template.trim().is_empty() {
        return Err(CoreError::Validation(
            "Plan template must not be empty".to_string(),
        ));
    }
    let len = template.chars().count();
    if len > MAX_TEMPLATE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Plan template exceeds maximum length of {MAX_TEMPLATE_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

/// First-version draft for a plan created on behalf of a viewer whose
/// profile template is `template`. Falls back to the built-in content
/// when the template is unset or blank.
pub fn initial_draft(template: Option<&str>) -> VersionDraft {
    let content = template
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(DEFAULT_PLAN_CONTENT);
    VersionDraft::new(DEFAULT_PLAN_TITLE, content)
}

/// Working copy of the template tab.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanTemplateEditor {
    saved: Option<String>,
    buffer: String,
}

impl PlanTemplateEditor {
    pub fn new(saved: Option<String>) -> Self {
        let buffer = saved.clone().unwrap_or_default();
        Self { saved, buffer }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn saved(&self) -> Option<&str> {
        self.saved.as_deref()
    }

    pub fn set_buffer(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    pub fn is_dirty(&self) -> bool {
        self.saved.as_deref().unwrap_or_default() != self.buffer
    }

    /// Restore the last saved value.
    pub fn reset(&mut self) {
        self.buffer = self.saved.clone().unwrap_or_default();
    }

    /// Validated template ready for submission.
    pub fn pending_save(&self) -> Result<String, CoreError> {
        validate_template(&self.buffer)?;
        Ok(self.buffer.clone())
    }

    /// Adopt the value the server stored.
    pub fn adopt(&mut self, saved: Option<String>) {
        self.buffer = saved.clone().unwrap_or_default();
        self.saved = saved;
    }
}
