//! Profile endpoints. Pitch questions and the plan template are both
//! persisted through `PUT /users/profile`.

use reqwest::Method;

use mentorlink_core::pitch::PitchQuestion;
use mentorlink_core::profile::{Profile, ProfileUpdate};

use crate::api::MentorlinkApi;
use crate::error::ApiError;

const PROFILE_PATH: &[&str] = &["users", "profile"];

impl MentorlinkApi {
    /// The profile the bearer token belongs to. `GET /users/profile`.
    pub async fn fetch_profile(&self) -> Result<Profile, ApiError> {
        self.get_json(PROFILE_PATH).await
    }

    /// Replace the whole pitch-question array.
    pub async fn update_pitch_questions(
        &self,
        questions: &[PitchQuestion],
    ) -> Result<Profile, ApiError> {
        let body = ProfileUpdate {
            pitch_questions: Some(questions.to_vec()),
            ..Default::default()
        };
        self.send_json(Method::PUT, PROFILE_PATH, &body).await
    }

    pub async fn update_plan_template(&self, template: &str) -> Result<Profile, ApiError> {
        let body = ProfileUpdate {
            plan_template: Some(template.to_string()),
            ..Default::default()
        };
        self.send_json(Method::PUT, PROFILE_PATH, &body).await
    }
}
