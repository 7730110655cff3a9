//! Service traits consumed by the dashboard controllers.
//!
//! [`MentorlinkApi`] implements all three over HTTP. Controllers hold
//! them as trait objects so they can run against in-memory doubles.

use async_trait::async_trait;

use mentorlink_core::pitch::PitchQuestion;
use mentorlink_core::plan::{AppendVersion, NewComment, Plan, VersionDraft};
use mentorlink_core::profile::{Profile, Relationship};

use crate::api::MentorlinkApi;
use crate::error::ApiError;

/// Plan resource operations. Each returns the whole refreshed plan.
#[async_trait]
pub trait PlanService: Send + Sync {
    async fn create(&self, participant_id: &str, draft: &VersionDraft) -> Result<Plan, ApiError>;

    async fn fetch_by_id(&self, plan_id: &str) -> Result<Plan, ApiError>;

    /// Fails with a 404 [`ApiError`] when the pair has no plan yet.
    async fn fetch_by_participant_pair(&self, participant_id: &str) -> Result<Plan, ApiError>;

    async fn append_version(&self, plan_id: &str, body: &AppendVersion) -> Result<Plan, ApiError>;

    async fn edit_version(
        &self,
        plan_id: &str,
        index: usize,
        draft: &VersionDraft,
    ) -> Result<Plan, ApiError>;

    async fn delete_version(&self, plan_id: &str, index: usize) -> Result<Plan, ApiError>;

    async fn add_comment(
        &self,
        plan_id: &str,
        index: usize,
        comment: &NewComment,
    ) -> Result<Plan, ApiError>;
}

/// Profile operations.
#[async_trait]
pub trait ProfileService: Send + Sync {
    async fn fetch_profile(&self) -> Result<Profile, ApiError>;

    async fn update_pitch_questions(&self, questions: &[PitchQuestion])
        -> Result<Profile, ApiError>;

    async fn update_plan_template(&self, template: &str) -> Result<Profile, ApiError>;
}

/// Relationship service operations.
#[async_trait]
pub trait RelationshipService: Send + Sync {
    async fn list_relationships(&self) -> Result<Vec<Relationship>, ApiError>;

    async fn end_relationship(&self, relationship_id: &str) -> Result<Relationship, ApiError>;
}

#[async_trait]
impl PlanService for MentorlinkApi {
    async fn create(&self, participant_id: &str, draft: &VersionDraft) -> Result<Plan, ApiError> {
        MentorlinkApi::create_plan(self, participant_id, draft).await
    }

    async fn fetch_by_id(&self, plan_id: &str) -> Result<Plan, ApiError> {
        MentorlinkApi::fetch_plan(self, plan_id).await
    }

    async fn fetch_by_participant_pair(&self, participant_id: &str) -> Result<Plan, ApiError> {
        MentorlinkApi::fetch_plan_by_pair(self, participant_id).await
    }

    async fn append_version(&self, plan_id: &str, body: &AppendVersion) -> Result<Plan, ApiError> {
        MentorlinkApi::append_version(self, plan_id, body).await
    }

    async fn edit_version(
        &self,
        plan_id: &str,
        index: usize,
        draft: &VersionDraft,
    ) -> Result<Plan, ApiError> {
        MentorlinkApi::edit_version(self, plan_id, index, draft).await
    }

    async fn delete_version(&self, plan_id: &str, index: usize) -> Result<Plan, ApiError> {
        MentorlinkApi::delete_version(self, plan_id, index).await
    }

    async fn add_comment(
        &self,
        plan_id: &str,
        index: usize,
        comment: &NewComment,
    ) -> Result<Plan, ApiError> {
        MentorlinkApi::add_comment(self, plan_id, index, comment).await
    }
}

#[async_trait]
impl ProfileService for MentorlinkApi {
    async fn fetch_profile(&self) -> Result<Profile, ApiError> {
        MentorlinkApi::fetch_profile(self).await
    }

    async fn update_pitch_questions(
        &self,
        questions: &[PitchQuestion],
    ) -> Result<Profile, ApiError> {
        MentorlinkApi::update_pitch_questions(self, questions).await
    }

    async fn update_plan_template(&self, template: &str) -> Result<Profile, ApiError> {
        MentorlinkApi::update_plan_template(self, template).await
    }
}

#[async_trait]
impl RelationshipService for MentorlinkApi {
    async fn list_relationships(&self) -> Result<Vec<Relationship>, ApiError> {
        MentorlinkApi::list_relationships(self).await
    }

    async fn end_relationship(&self, relationship_id: &str) -> Result<Relationship, ApiError> {
        MentorlinkApi::end_relationship(self, relationship_id).await
    }
}
