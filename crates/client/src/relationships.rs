//! Relationship service endpoints. Lifecycle rules live server-side;
//! the client only lists and ends.

use reqwest::Method;

use mentorlink_core::profile::Relationship;

use crate::api::MentorlinkApi;
use crate::error::ApiError;

impl MentorlinkApi {
    /// All relationships the viewer is part of. `GET /relationships`.
    pub async fn list_relationships(&self) -> Result<Vec<Relationship>, ApiError> {
        self.get_json(&["relationships"]).await
    }

    /// `PUT /relationships/{id}/end`. Returns the ended relationship.
    pub async fn end_relationship(&self, relationship_id: &str) -> Result<Relationship, ApiError> {
        self.send_json(
            Method::PUT,
            &["relationships", relationship_id, "end"],
            &serde_json::json!({}),
        )
        .await
    }
}
