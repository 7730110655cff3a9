//! Pitch questions: model, validation and the local list editor.
//!
//! A mentor keeps a list of questions that prospective mentees must
//! answer when requesting mentorship. The list is edited locally and
//! persisted wholesale through a profile update; after a successful save
//! the editor adopts whatever array the server returned.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum number of options for a choice-type question.
pub const MIN_CHOICE_OPTIONS: usize = 2;

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// How a question is answered.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    /// Free-text answer.
    #[default]
    Text,
    /// Single choice from a list of options.
    Mcq,
    /// Multiple choices from a list of options.
    Checkbox,
}

impl QuestionType {
    /// Returns `true` for question types that carry an option list.
    pub fn is_choice(self) -> bool {
        matches!(self, QuestionType::Mcq | QuestionType::Checkbox)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::Text => "text",
            QuestionType::Mcq => "mcq",
            QuestionType::Checkbox => "checkbox",
        }
    }
}

/// A single pitch question.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PitchQuestion {
    #[serde(rename = "type", default)]
    pub question_type: QuestionType,
    pub question: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl PitchQuestion {
    pub fn text(question: impl Into<String>) -> Self {
        Self {
            question_type: QuestionType::Text,
            question: question.into(),
            options: Vec::new(),
        }
    }

    pub fn choice(question_type: QuestionType, question: impl Into<String>, options: &[&str]) -> Self {
        Self {
            question_type,
            question: question.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a single question. `position` is 1-based and only used in
/// error messages.
pub fn validate_question(question: &PitchQuestion, position: usize) -> Result<(), CoreError> {
    if question.question.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "Question {position} must have text"
        )));
    }
    if question.question_type.is_choice() {
        if question.options.len() < MIN_CHOICE_OPTIONS {
            return Err(CoreError::Validation(format!(
                "Question {position} ({}) needs at least {MIN_CHOICE_OPTIONS} options, got {}",
                question.question_type.as_str(),
                question.options.len()
            )));
        }
        if let Some(blank) = question.options.iter().position(|o| o.trim().is_empty()) {
            return Err(CoreError::Validation(format!(
                "Question {position} option {} must not be empty",
                blank + 1
            )));
        }
    }
    Ok(())
}

/// Validate the whole list before it is submitted. Stops at the first
/// invalid question.
pub fn validate_questions(questions: &[PitchQuestion]) -> Result<(), CoreError> {
    questions
        .iter()
        .enumerate()
        .try_for_each(|(i, q)| validate_question(q, i + 1))
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

/// Local, unsaved working copy of the question list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PitchQuestionEditor {
    questions: Vec<PitchQuestion>,
    dirty: bool,
}

impl PitchQuestionEditor {
    pub fn new(questions: Vec<PitchQuestion>) -> Self {
        Self {
            questions,
            dirty: false,
        }
    }

    pub fn questions(&self) -> &[PitchQuestion] {
        &self.questions
    }

    /// `true` when the working copy has changed since the last adopt.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Append an empty free-text question and return its index.
    pub fn add_question(&mut self) -> usize {
        self.questions.push(PitchQuestion::default());
        self.dirty = true;
        self.questions.len() - 1
    }

    pub fn remove_question(&mut self, index: usize) -> Result<PitchQuestion, CoreError> {
        self.check_question(index)?;
        self.dirty = true;
        Ok(self.questions.remove(index))
    }

    pub fn set_text(&mut self, index: usize, text: impl Into<String>) -> Result<(), CoreError> {
        self.question_mut(index)?.question = text.into();
        Ok(())
    }

    /// Change a question's type. Switching to a choice type pads the
    /// option list to the minimum with empty entries; switching to
    /// `text` drops the options.
    pub fn set_type(&mut self, index: usize, question_type: QuestionType) -> Result<(), CoreError> {
        let q = self.question_mut(index)?;
        q.question_type = question_type;
        if question_type.is_choice() {
            while q.options.len() < MIN_CHOICE_OPTIONS {
                q.options.push(String::new());
            }
        } else {
            q.options.clear();
        }
        Ok(())
    }

    /// Append an empty option to a choice question and return its index.
    pub fn add_option(&mut self, index: usize) -> Result<usize, CoreError> {
        let q = self.choice_question_mut(index)?;
        q.options.push(String::new());
        Ok(q.options.len() - 1)
    }

    pub fn remove_option(&mut self, index: usize, option: usize) -> Result<String, CoreError> {
        let q = self.choice_question_mut(index)?;
        if option >= q.options.len() {
            return Err(CoreError::Validation(format!(
                "Option index {option} out of range (question has {} options)",
                q.options.len()
            )));
        }
        Ok(q.options.remove(option))
    }

    pub fn set_option(
        &mut self,
        index: usize,
        option: usize,
        text: impl Into<String>,
    ) -> Result<(), CoreError> {
        let q = self.choice_question_mut(index)?;
        let slot = q.options.get_mut(option).ok_or_else(|| {
            CoreError::Validation(format!("Option index {option} out of range"))
        })?;
        *slot = text.into();
        Ok(())
    }

    /// Run the pre-save validation pass over the working copy.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_questions(&self.questions)
    }

    /// Replace the whole working copy with locally authored questions,
    /// e.g. an imported file. The result is unsaved.
    pub fn set_questions(&mut self, questions: Vec<PitchQuestion>) {
        self.questions = questions;
        self.dirty = true;
    }

    /// Replace the working copy with the server's saved array.
    pub fn adopt(&mut self, saved: Vec<PitchQuestion>) {
        self.questions = saved;
        self.dirty = false;
    }

    // ---- private helpers ----

    fn check_question(&self, index: usize) -> Result<(), CoreError> {
        if index >= self.questions.len() {
            return Err(CoreError::Validation(format!(
                "Question index {index} out of range (have {})",
                self.questions.len()
            )));
        }
        Ok(())
    }

    fn question_mut(&mut self, index: usize) -> Result<&mut PitchQuestion, CoreError> {
        self.check_question(index)?;
        self.dirty = true;
        Ok(&mut self.questions[index])
    }

    fn choice_question_mut(&mut self, index: usize) -> Result<&mut PitchQuestion, CoreError> {
        let q = self.question_mut(index)?;
        if !q.question_type.is_choice() {
            return Err(CoreError::Validation(format!(
                "Question {} is a text question and has no options",
                index + 1
            )));
        }
        Ok(q)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
