//! Plan endpoints.
//!
//! Every mutating call returns the complete, refreshed plan. Version
//! indexes are **storage** indexes (oldest first).

use reqwest::Method;

use mentorlink_core::plan::{AppendVersion, CreatePlan, NewComment, Plan, VersionDraft};

use crate::api::MentorlinkApi;
use crate::error::ApiError;

impl MentorlinkApi {
    /// Create a plan with the viewer as mentor and `participant_id` as
    /// mentee. `POST /plans`.
    pub async fn create_plan(
        &self,
        participant_id: &str,
        draft: &VersionDraft,
    ) -> Result<Plan, ApiError> {
        let body = CreatePlan::new(participant_id, draft.clone());
        self.send_json(Method::POST, &["plans"], &body).await
    }

    /// `GET /plans/{plan_id}`.
    pub async fn fetch_plan(&self, plan_id: &str) -> Result<Plan, ApiError> {
        self.get_json(&["plans", plan_id]).await
    }

    /// Fetch the plan shared between the viewer and `participant_id`.
    /// `GET /plans/pair/{participant_id}`. A 404 means no plan exists
    /// yet (see [`ApiError::is_not_found`]).
    pub async fn fetch_plan_by_pair(&self, participant_id: &str) -> Result<Plan, ApiError> {
        self.get_json(&["plans", "pair", participant_id])
            .await
    }

    /// `PUT /plans/{plan_id}/version`.
    pub async fn append_version(
        &self,
        plan_id: &str,
        body: &AppendVersion,
    ) -> Result<Plan, ApiError> {
        self.send_json(Method::PUT, &["plans", plan_id, "version"], body)
            .await
    }

    /// `PUT /plans/{plan_id}/version/{index}`.
    pub async fn edit_version(
        &self,
        plan_id: &str,
        index: usize,
        draft: &VersionDraft,
    ) -> Result<Plan, ApiError> {
        let index = index.to_string();
        self.send_json(Method::PUT, &["plans", plan_id, "version", index.as_str()], draft)
            .await
    }

    /// `DELETE /plans/{plan_id}/version/{index}`.
    pub async fn delete_version(&self, plan_id: &str, index: usize) -> Result<Plan, ApiError> {
        let index = index.to_string();
        self.delete_json(&["plans", plan_id, "version", index.as_str()])
            .await
    }

    /// `POST /plans/{plan_id}/version/{index}/comment`.
    pub async fn add_comment(
        &self,
        plan_id: &str,
        index: usize,
        comment: &NewComment,
    ) -> Result<Plan, ApiError> {
        let index = index.to_string();
        self.send_json(
            Method::POST,
            &["plans", plan_id, "version", index.as_str(), "comment"],
            comment,
        )
        .await
    }
}
