//! Dashboard aggregator: profile, relationships, tab panels and the
//! open-plan flow.
//!
//! Tab switches never discard fetched profile state or unsaved panel
//! edits; the panels live for as long as the dashboard does.

use std::sync::Arc;

use mentorlink_client::service::{PlanService, ProfileService, RelationshipService};
use mentorlink_core::error::CoreError;
use mentorlink_core::pitch::PitchQuestionEditor;
use mentorlink_core::plan_template::{initial_draft, PlanTemplateEditor};
use mentorlink_core::profile::{partition_relationships, Profile, Relationship};
use mentorlink_core::session::Session;
use mentorlink_core::types::DocId;

use crate::error::{AppError, AppResult};
use crate::notice::{Notice, Notices};

/// Dashboard panels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Relationships,
    PitchQuestions,
    PlanTemplate,
}

impl Tab {
    /// Tabs that only make sense on a mentor's dashboard.
    pub fn is_mentor_only(self) -> bool {
        matches!(self, Tab::PitchQuestions | Tab::PlanTemplate)
    }
}

/// Where the view should go after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Plan { plan_id: DocId },
}

/// The service handles a dashboard talks through.
#[derive(Clone)]
pub struct Services {
    pub plans: Arc<dyn PlanService>,
    pub profiles: Arc<dyn ProfileService>,
    pub relationships: Arc<dyn RelationshipService>,
}

pub struct Dashboard {
    pub(crate) session: Session,
    pub(crate) services: Services,
    pub(crate) profile: Profile,
    active: Vec<Relationship>,
    history: Vec<Relationship>,
    tab: Tab,
    pub(crate) pitch_editor: PitchQuestionEditor,
    pub(crate) template_editor: PlanTemplateEditor,
    pub(crate) notices: Notices,
}

impl Dashboard {
    /// Resolve the token to a profile, build the session, and fetch
    /// relationships.
    pub async fn load(token: &str, services: Services) -> AppResult<Self> {
        let profile = services.profiles.fetch_profile().await?;
        let session = Session::from_profile(&profile, token)?;
        let relationships = services.relationships.list_relationships().await?;
        let (active, history) = partition_relationships(relationships);
        tracing::info!(
            participant_id = %session.participant_id,
            active = active.len(),
            history = history.len(),
            "Dashboard loaded",
        );

        Ok(Self {
            pitch_editor: PitchQuestionEditor::new(profile.pitch_questions.clone()),
            template_editor: PlanTemplateEditor::new(profile.plan_template.clone()),
            session,
            services,
            profile,
            active,
            history,
            tab: Tab::default(),
            notices: Notices::default(),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn active_relationships(&self) -> &[Relationship] {
        &self.active
    }

    pub fn relationship_history(&self) -> &[Relationship] {
        &self.history
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.take()
    }

    /// Switch panels. Mentor-only panels are refused for mentees.
    pub fn switch_tab(&mut self, tab: Tab) -> AppResult<()> {
        if tab.is_mentor_only() && !self.session.is_mentor() {
            return self.fail(CoreError::Forbidden(
                "Only mentors can manage this section".to_string(),
            ));
        }
        tracing::debug!(from = ?self.tab, to = ?tab, "Switching dashboard tab");
        self.tab = tab;
        Ok(())
    }

    /// Open the plan shared with `participant_id`, creating it from the
    /// viewer's template when the pair has none yet.
    ///
    /// The fetch-then-create sequence is not atomic: if both participants
    /// open a missing plan at the same moment, each may create one. The
    /// server contract has no upsert, so this is left as-is.
    pub async fn open_plan(&mut self, participant_id: &str) -> AppResult<Navigation> {
        let plans = Arc::clone(&self.services.plans);
        match plans.fetch_by_participant_pair(participant_id).await {
            Ok(plan) => Ok(Navigation::Plan { plan_id: plan.id }),
            Err(err) if err.is_not_found() => {
                let draft = initial_draft(self.profile.plan_template.as_deref());
                tracing::info!(participant_id, "No plan for pair, creating one");
                match plans.create(participant_id, &draft).await {
                    Ok(plan) => {
                        self.notices.success("Plan created");
                        Ok(Navigation::Plan { plan_id: plan.id })
                    }
                    Err(err) => self.fail(err),
                }
            }
            Err(err) => self.fail(err),
        }
    }

    /// End an active relationship and move it into history.
    pub async fn end_relationship(&mut self, relationship_id: &str) -> AppResult<()> {
        let Some(position) = self.active.iter().position(|r| r.id == relationship_id) else {
            return self.fail(CoreError::NotFound {
                entity: "Relationship",
                id: relationship_id.to_string(),
            });
        };
        let service = Arc::clone(&self.services.relationships);
        match service.end_relationship(relationship_id).await {
            Ok(ended) => {
                self.active.remove(position);
                self.history.insert(0, ended);
                self.notices.success("Relationship ended");
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    pub(crate) fn fail<T>(&mut self, err: impl Into<AppError>) -> AppResult<T> {
        let err = err.into();
        self.notices.error(&err);
        Err(err)
    }
}
