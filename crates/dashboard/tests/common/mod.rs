//! In-memory service doubles for controller tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use mentorlink::dashboard::Services;
use mentorlink_client::service::{PlanService, ProfileService, RelationshipService};
use mentorlink_client::ApiError;
use mentorlink_core::pitch::PitchQuestion;
use mentorlink_core::plan::{AppendVersion, Comment, NewComment, Plan, Version, VersionDraft};
use mentorlink_core::profile::{ParticipantRef, Profile, Relationship, RelationshipStatus};
use mentorlink_core::session::Session;

pub const MENTOR_ID: &str = "m1";
pub const MENTEE_ID: &str = "e1";
pub const TOKEN: &str = "tok";

fn status(code: u16, message: &str) -> ApiError {
    ApiError::Api {
        status: code,
        body: format!(r#"{{"message":"{message}"}}"#),
    }
}

// ---------------------------------------------------------------------------
// Plans
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryPlans {
    pub plans: Mutex<HashMap<String, Plan>>,
    pub creates: AtomicUsize,
    pub created_drafts: Mutex<Vec<(String, VersionDraft)>>,
    pub mutations: Mutex<Vec<String>>,
    /// When set, the next call fails with this status.
    pub fail_next: Mutex<Option<u16>>,
}

impl InMemoryPlans {
    pub fn with_plan(plan: Plan) -> Arc<Self> {
        let this = Self::default();
        this.plans.lock().unwrap().insert(plan.id.clone(), plan);
        Arc::new(this)
    }

    pub fn fail_next_with(&self, code: u16) {
        *self.fail_next.lock().unwrap() = Some(code);
    }

    pub fn mutations(&self) -> Vec<String> {
        self.mutations.lock().unwrap().clone()
    }

    fn check_failure(&self) -> Result<(), ApiError> {
        match self.fail_next.lock().unwrap().take() {
            Some(code) => Err(status(code, "Injected failure")),
            None => Ok(()),
        }
    }

    fn with_plan_mut<F>(&self, plan_id: &str, f: F) -> Result<Plan, ApiError>
    where
        F: FnOnce(&mut Plan) -> Result<(), ApiError>,
    {
        self.check_failure()?;
        let mut plans = self.plans.lock().unwrap();
        let plan = plans
            .get_mut(plan_id)
            .ok_or_else(|| status(404, "Plan not found"))?;
        f(plan)?;
        Ok(plan.clone())
    }
}

pub fn version(title: &str, major: u32, minor: u32) -> Version {
    Version {
        title: title.to_string(),
        content: format!("{title} content"),
        major,
        minor,
        created_at: None,
        comments: Vec::new(),
    }
}

pub fn plan(id: &str, titles: &[&str]) -> Plan {
    Plan {
        id: id.to_string(),
        mentor: ParticipantRef::Id(MENTOR_ID.to_string()),
        mentee: ParticipantRef::Id(MENTEE_ID.to_string()),
        versions: titles
            .iter()
            .enumerate()
            .map(|(i, t)| version(t, 1, i as u32))
            .collect(),
        created_at: None,
        updated_at: None,
    }
}

#[async_trait]
impl PlanService for InMemoryPlans {
    async fn create(&self, participant_id: &str, draft: &VersionDraft) -> Result<Plan, ApiError> {
        self.check_failure()?;
        let n = self.creates.fetch_add(1, Ordering::SeqCst) + 1;
        self.created_drafts
            .lock()
            .unwrap()
            .push((participant_id.to_string(), draft.clone()));
        let mut created = plan(&format!("created-{n}"), &[]);
        created.mentee = ParticipantRef::Id(participant_id.to_string());
        created.versions.push(Version {
            title: draft.title.clone(),
            content: draft.content.clone(),
            ..version("", 1, 0)
        });
        self.plans
            .lock()
            .unwrap()
            .insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn fetch_by_id(&self, plan_id: &str) -> Result<Plan, ApiError> {
        self.with_plan_mut(plan_id, |_| Ok(()))
    }

    async fn fetch_by_participant_pair(&self, participant_id: &str) -> Result<Plan, ApiError> {
        self.check_failure()?;
        self.plans
            .lock()
            .unwrap()
            .values()
            .find(|p| p.mentee.id() == participant_id)
            .cloned()
            .ok_or_else(|| status(404, "Plan not found"))
    }

    async fn append_version(&self, plan_id: &str, body: &AppendVersion) -> Result<Plan, ApiError> {
        self.mutations.lock().unwrap().push("append".to_string());
        self.with_plan_mut(plan_id, |plan| {
            let (major, minor) = match plan.versions.last() {
                Some(last) if body.is_major => (last.major + 1, 0),
                Some(last) => (last.major, last.minor + 1),
                None => (1, 0),
            };
            let mut v = version(&body.title, major, minor);
            v.content = body.content.clone();
            plan.versions.push(v);
            Ok(())
        })
    }

    async fn edit_version(
        &self,
        plan_id: &str,
        index: usize,
        draft: &VersionDraft,
    ) -> Result<Plan, ApiError> {
        self.mutations.lock().unwrap().push(format!("edit {index}"));
        self.with_plan_mut(plan_id, |plan| {
            let v = plan
                .versions
                .get_mut(index)
                .ok_or_else(|| status(404, "Version not found"))?;
            v.title = draft.title.clone();
            v.content = draft.content.clone();
            Ok(())
        })
    }

    async fn delete_version(&self, plan_id: &str, index: usize) -> Result<Plan, ApiError> {
        self.mutations.lock().unwrap().push(format!("delete {index}"));
        self.with_plan_mut(plan_id, |plan| {
            if index >= plan.versions.len() {
                return Err(status(404, "Version not found"));
            }
            plan.versions.remove(index);
            Ok(())
        })
    }

    async fn add_comment(
        &self,
        plan_id: &str,
        index: usize,
        comment: &NewComment,
    ) -> Result<Plan, ApiError> {
        self.mutations.lock().unwrap().push(format!("comment {index}"));
        self.with_plan_mut(plan_id, |plan| {
            let v = plan
                .versions
                .get_mut(index)
                .ok_or_else(|| status(404, "Version not found"))?;
            v.comments.push(Comment {
                author_name: "Someone".to_string(),
                text: comment.text.clone(),
                created_at: None,
            });
            Ok(())
        })
    }
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

pub struct InMemoryProfiles {
    pub profile: Mutex<Profile>,
    pub updates: AtomicUsize,
    pub fail_updates: Mutex<Option<u16>>,
}

impl InMemoryProfiles {
    pub fn new(profile: Profile) -> Arc<Self> {
        Arc::new(Self {
            profile: Mutex::new(profile),
            updates: AtomicUsize::new(0),
            fail_updates: Mutex::new(None),
        })
    }

    fn check_failure(&self) -> Result<(), ApiError> {
        match *self.fail_updates.lock().unwrap() {
            Some(code) => Err(status(code, "Profile update failed")),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ProfileService for InMemoryProfiles {
    async fn fetch_profile(&self) -> Result<Profile, ApiError> {
        Ok(self.profile.lock().unwrap().clone())
    }

    async fn update_pitch_questions(
        &self,
        questions: &[PitchQuestion],
    ) -> Result<Profile, ApiError> {
        self.check_failure()?;
        self.updates.fetch_add(1, Ordering::SeqCst);
        let mut profile = self.profile.lock().unwrap();
        // Mimic server-side normalisation so adoption is observable.
        profile.pitch_questions = questions
            .iter()
            .cloned()
            .map(|mut q| {
                q.question = q.question.trim().to_string();
                q
            })
            .collect();
        Ok(profile.clone())
    }

    async fn update_plan_template(&self, template: &str) -> Result<Profile, ApiError> {
        self.check_failure()?;
        self.updates.fetch_add(1, Ordering::SeqCst);
        let mut profile = self.profile.lock().unwrap();
        profile.plan_template = Some(template.trim_end().to_string());
        Ok(profile.clone())
    }
}

// ---------------------------------------------------------------------------
// Relationships
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct InMemoryRelationships {
    pub all: Mutex<Vec<Relationship>>,
}

impl InMemoryRelationships {
    pub fn new(all: Vec<Relationship>) -> Arc<Self> {
        Arc::new(Self {
            all: Mutex::new(all),
        })
    }
}

#[async_trait]
impl RelationshipService for InMemoryRelationships {
    async fn list_relationships(&self) -> Result<Vec<Relationship>, ApiError> {
        Ok(self.all.lock().unwrap().clone())
    }

    async fn end_relationship(&self, relationship_id: &str) -> Result<Relationship, ApiError> {
        let mut all = self.all.lock().unwrap();
        let r = all
            .iter_mut()
            .find(|r| r.id == relationship_id)
            .ok_or_else(|| status(404, "Relationship not found"))?;
        r.status = RelationshipStatus::Ended;
        Ok(r.clone())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn mentor_profile(template: Option<&str>) -> Profile {
    Profile {
        id: MENTOR_ID.to_string(),
        name: "Grace".to_string(),
        email: None,
        role: "mentor".to_string(),
        pitch_questions: Vec::new(),
        plan_template: template.map(str::to_string),
    }
}

pub fn mentee_profile() -> Profile {
    Profile {
        id: MENTEE_ID.to_string(),
        name: "Ada".to_string(),
        email: None,
        role: "mentee".to_string(),
        pitch_questions: Vec::new(),
        plan_template: None,
    }
}

pub fn relationship(id: &str, status: RelationshipStatus) -> Relationship {
    Relationship {
        id: id.to_string(),
        mentor: ParticipantRef::Id(MENTOR_ID.to_string()),
        mentee: ParticipantRef::Id(MENTEE_ID.to_string()),
        status,
        started_at: None,
        ended_at: None,
    }
}

pub fn mentor_session() -> Session {
    Session::new(MENTOR_ID, "Grace", "mentor", TOKEN).unwrap()
}

pub fn mentee_session() -> Session {
    Session::new(MENTEE_ID, "Ada", "mentee", TOKEN).unwrap()
}

pub fn services(
    plans: Arc<InMemoryPlans>,
    profiles: Arc<InMemoryProfiles>,
    relationships: Arc<InMemoryRelationships>,
) -> Services {
    Services {
        plans,
        profiles,
        relationships,
    }
}
