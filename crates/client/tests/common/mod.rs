//! In-process fake of the platform API for client integration tests.
//!
//! Serves the plan, profile and relationship routes on an ephemeral
//! port, keeps documents in memory, assigns version labels the way the
//! real server does, and records every request it sees.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use mentorlink_client::{ClientConfig, MentorlinkApi};
use mentorlink_core::pitch::PitchQuestion;
use mentorlink_core::plan::{Comment, Plan, Version};
use mentorlink_core::profile::{ParticipantRef, Profile, Relationship, RelationshipStatus};

pub const TEST_TOKEN: &str = "test-token";
pub const MENTOR_ID: &str = "mentor-1";
pub const MENTEE_ID: &str = "mentee-1";

/// A request as seen by the fake server.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: String,
    pub path: String,
}

#[derive(Default)]
pub struct FakeApi {
    pub plans: Mutex<HashMap<String, Plan>>,
    pub profile: Mutex<Option<Profile>>,
    pub relationships: Mutex<Vec<Relationship>>,
    pub calls: Mutex<Vec<RecordedCall>>,
    pub last_body: Mutex<Option<Value>>,
    /// When set, authorized requests get a 200 with a non-JSON body.
    pub malformed_responses: Mutex<bool>,
}

impl FakeApi {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_body(&self) -> Option<Value> {
        self.last_body.lock().unwrap().clone()
    }

    pub fn plan_count(&self) -> usize {
        self.plans.lock().unwrap().len()
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<Value>)>;

fn not_found(what: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("{what} not found") })),
    )
}

fn bad_request(msg: &str) -> (StatusCode, Json<Value>) {
    (StatusCode::BAD_REQUEST, Json(json!({ "message": msg })))
}

// ---------------------------------------------------------------------------
// Middleware
// ---------------------------------------------------------------------------

async fn record_and_authorize(
    State(state): State<Arc<FakeApi>>,
    req: Request,
    next: Next,
) -> Response {
    state.calls.lock().unwrap().push(RecordedCall {
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
    });

    let expected = format!("Bearer {TEST_TOKEN}");
    let authorized = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(expected.as_str());
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Not authorized, token failed" })),
        )
            .into_response();
    }
    if *state.malformed_responses.lock().unwrap() {
        return (StatusCode::OK, "<html>maintenance</html>").into_response();
    }
    next.run(req).await
}

// ---------------------------------------------------------------------------
// Plan handlers
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBody {
    mentee_id: String,
    title: String,
    content: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct VersionBody {
    title: String,
    content: String,
    #[serde(default)]
    is_major: bool,
}

#[derive(Deserialize)]
struct CommentBody {
    text: String,
}

fn new_version(title: String, content: String, major: u32, minor: u32) -> Version {
    Version {
        title,
        content,
        major,
        minor,
        created_at: Some(chrono_now()),
        comments: Vec::new(),
    }
}

fn chrono_now() -> mentorlink_core::types::Timestamp {
    "2026-03-01T12:00:00Z".parse().unwrap()
}

async fn create_plan(
    State(state): State<Arc<FakeApi>>,
    Json(body): Json<Value>,
) -> ApiResult<Plan> {
    *state.last_body.lock().unwrap() = Some(body.clone());
    let body: CreateBody = serde_json::from_value(body).map_err(|e| bad_request(&e.to_string()))?;
    let plan = Plan {
        id: uuid::Uuid::new_v4().to_string(),
        mentor: ParticipantRef::Id(MENTOR_ID.to_string()),
        mentee: ParticipantRef::Id(body.mentee_id),
        versions: vec![new_version(body.title, body.content, 1, 0)],
        created_at: Some(chrono_now()),
        updated_at: None,
    };
    state
        .plans
        .lock()
        .unwrap()
        .insert(plan.id.clone(), plan.clone());
    Ok(Json(plan))
}

async fn fetch_plan(State(state): State<Arc<FakeApi>>, Path(id): Path<String>) -> ApiResult<Plan> {
    let plans = state.plans.lock().unwrap();
    plans.get(&id).cloned().map(Json).ok_or_else(|| not_found("Plan"))
}

async fn fetch_by_pair(
    State(state): State<Arc<FakeApi>>,
    Path(participant): Path<String>,
) -> ApiResult<Plan> {
    let plans = state.plans.lock().unwrap();
    plans
        .values()
        .find(|p| p.mentee.id() == participant || p.mentor.id() == participant)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Plan"))
}

async fn append_version(
    State(state): State<Arc<FakeApi>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Plan> {
    *state.last_body.lock().unwrap() = Some(body.clone());
    let body: VersionBody = serde_json::from_value(body).map_err(|e| bad_request(&e.to_string()))?;
    let mut plans = state.plans.lock().unwrap();
    let plan = plans.get_mut(&id).ok_or_else(|| not_found("Plan"))?;
    let (major, minor) = match plan.versions.last() {
        Some(last) if body.is_major => (last.major + 1, 0),
        Some(last) => (last.major, last.minor + 1),
        None => (1, 0),
    };
    plan.versions
        .push(new_version(body.title, body.content, major, minor));
    Ok(Json(plan.clone()))
}

async fn edit_version(
    State(state): State<Arc<FakeApi>>,
    Path((id, index)): Path<(String, usize)>,
    Json(body): Json<Value>,
) -> ApiResult<Plan> {
    *state.last_body.lock().unwrap() = Some(body.clone());
    let body: VersionBody = serde_json::from_value(body).map_err(|e| bad_request(&e.to_string()))?;
    let mut plans = state.plans.lock().unwrap();
    let plan = plans.get_mut(&id).ok_or_else(|| not_found("Plan"))?;
    let version = plan
        .versions
        .get_mut(index)
        .ok_or_else(|| not_found("Version"))?;
    version.title = body.title;
    version.content = body.content;
    Ok(Json(plan.clone()))
}

async fn delete_version(
    State(state): State<Arc<FakeApi>>,
    Path((id, index)): Path<(String, usize)>,
) -> ApiResult<Plan> {
    let mut plans = state.plans.lock().unwrap();
    let plan = plans.get_mut(&id).ok_or_else(|| not_found("Plan"))?;
    if index >= plan.versions.len() {
        return Err(not_found("Version"));
    }
    plan.versions.remove(index);
    Ok(Json(plan.clone()))
}

async fn add_comment(
    State(state): State<Arc<FakeApi>>,
    Path((id, index)): Path<(String, usize)>,
    Json(body): Json<Value>,
) -> ApiResult<Plan> {
    *state.last_body.lock().unwrap() = Some(body.clone());
    let body: CommentBody = serde_json::from_value(body).map_err(|e| bad_request(&e.to_string()))?;
    let author_name = state
        .profile
        .lock()
        .unwrap()
        .as_ref()
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "Anonymous".to_string());
    let mut plans = state.plans.lock().unwrap();
    let plan = plans.get_mut(&id).ok_or_else(|| not_found("Plan"))?;
    let version = plan
        .versions
        .get_mut(index)
        .ok_or_else(|| not_found("Version"))?;
    version.comments.push(Comment {
        author_name,
        text: body.text,
        created_at: Some(chrono_now()),
    });
    Ok(Json(plan.clone()))
}

// ---------------------------------------------------------------------------
// Profile / relationship handlers
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileBody {
    pitch_questions: Option<Vec<PitchQuestion>>,
    plan_template: Option<String>,
}

async fn fetch_profile(State(state): State<Arc<FakeApi>>) -> ApiResult<Profile> {
    state
        .profile
        .lock()
        .unwrap()
        .clone()
        .map(Json)
        .ok_or_else(|| not_found("User"))
}

async fn update_profile(
    State(state): State<Arc<FakeApi>>,
    Json(body): Json<Value>,
) -> ApiResult<Profile> {
    *state.last_body.lock().unwrap() = Some(body.clone());
    let body: ProfileBody = serde_json::from_value(body).map_err(|e| bad_request(&e.to_string()))?;
    let mut guard = state.profile.lock().unwrap();
    let profile = guard.as_mut().ok_or_else(|| not_found("User"))?;
    if let Some(questions) = body.pitch_questions {
        // The server trims question text before storing it.
        profile.pitch_questions = questions
            .into_iter()
            .map(|mut q| {
                q.question = q.question.trim().to_string();
                q
            })
            .collect();
    }
    if let Some(template) = body.plan_template {
        profile.plan_template = Some(template);
    }
    Ok(Json(profile.clone()))
}

async fn list_relationships(State(state): State<Arc<FakeApi>>) -> ApiResult<Vec<Relationship>> {
    Ok(Json(state.relationships.lock().unwrap().clone()))
}

async fn end_relationship(
    State(state): State<Arc<FakeApi>>,
    Path(id): Path<String>,
) -> ApiResult<Relationship> {
    let mut all = state.relationships.lock().unwrap();
    let rel = all
        .iter_mut()
        .find(|r| r.id == id)
        .ok_or_else(|| not_found("Relationship"))?;
    rel.status = RelationshipStatus::Ended;
    rel.ended_at = Some(chrono_now());
    Ok(Json(rel.clone()))
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

pub fn sample_profile() -> Profile {
    Profile {
        id: MENTOR_ID.to_string(),
        name: "Grace Mentor".to_string(),
        email: Some("grace@example.com".to_string()),
        role: "mentor".to_string(),
        pitch_questions: Vec::new(),
        plan_template: None,
    }
}

/// Start the fake API and return its state plus a client pointed at it.
pub async fn spawn_fake_api() -> (Arc<FakeApi>, MentorlinkApi) {
    let state = Arc::new(FakeApi::default());
    *state.profile.lock().unwrap() = Some(sample_profile());

    let routes = Router::new()
        .route("/plans", post(create_plan))
        .route("/plans/pair/{participant}", get(fetch_by_pair))
        .route("/plans/{id}", get(fetch_plan))
        .route("/plans/{id}/version", put(append_version))
        .route(
            "/plans/{id}/version/{index}",
            put(edit_version).delete(delete_version),
        )
        .route("/plans/{id}/version/{index}/comment", post(add_comment))
        .route("/users/profile", get(fetch_profile).put(update_profile))
        .route("/relationships", get(list_relationships))
        .route("/relationships/{id}/end", put(end_relationship));

    let app = Router::new()
        .nest("/api", routes)
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            record_and_authorize,
        ))
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake API");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake API server");
    });

    let config = ClientConfig::new(format!("http://{addr}/api/")).with_token(Some(TEST_TOKEN.into()));
    let api = MentorlinkApi::new(&config).expect("build client");
    (state, api)
}

/// A client for the same server that presents the wrong token.
pub fn unauthorized_client(api: &MentorlinkApi) -> MentorlinkApi {
    MentorlinkApi::with_client(
        reqwest_client(),
        api.api_url().to_string(),
        "wrong-token".to_string(),
    )
}

fn reqwest_client() -> reqwest::Client {
    reqwest::Client::new()
}
