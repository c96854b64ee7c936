//! In-process fake DocuDash backend for integration tests.
//!
//! Serves a small, stateful subset of the API on an ephemeral port and
//! records every request it sees so tests can assert on headers and
//! query strings.

#![allow(dead_code)]

use axum::extract::{Path, Query, Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use docudash_client::{ApiClient, ClientConfig, SessionContext};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

pub const ADMIN_EMAIL: &str = "admin@docudash.com";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const SEEDED_REQUEST_ID: &str = "req-1";
pub const SEEDED_PIPELINE_ID: &str = "pl-1";
/// Size of the fake user directory served by `GET /api/users`.
pub const USER_COUNT: usize = 250;

/// One request as seen by the fake backend.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Default)]
pub struct FakeState {
    pub tokens: HashSet<String>,
    pub groups: BTreeMap<String, Value>,
    pub requests: BTreeMap<String, Value>,
    pub sync_bodies: Vec<Value>,
    pub log: Vec<Recorded>,
}

pub type Shared = Arc<Mutex<FakeState>>;

pub struct FakeBackend {
    pub base_url: String,
    pub state: Shared,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(FakeState::default()));
        state.lock().unwrap().requests.insert(
            SEEDED_REQUEST_ID.to_string(),
            json!({
                "id": SEEDED_REQUEST_ID,
                "title": "Cubrir login",
                "description": "Escenarios de login con MFA",
                "status": "NEW",
                "applicationId": "app-1",
                "requesterId": "u-admin",
                "type": "FRONT",
                "createdAt": "2024-05-01T10:00:00"
            }),
        );

        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/me", get(me))
            .route("/api/users", get(list_users))
            .route("/api/groups", get(list_groups).post(create_group))
            .route("/api/groups/{id}", get(get_group).delete(delete_group))
            .route("/api/features", get(empty_list))
            .route("/api/test-cases", get(empty_list))
            .route("/api/test-requests/{id}", get(get_request))
            .route("/api/test-requests/{id}/status", patch(update_request_status))
            .route("/api/uploads/test-request-images", post(upload_image))
            .route("/api/pipelines/sync", post(sync_pipelines))
            .route("/api/pipelines/{id}", get(get_pipeline))
            .route("/api/pipelines/{id}/results", get(pipeline_results))
            .route("/api/dashboard/stats", get(dashboard_stats))
            .layer(middleware::from_fn_with_state(state.clone(), authenticate))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    /// A client with a fresh in-memory session.
    pub fn client(&self) -> ApiClient {
        self.client_with(SessionContext::in_memory())
    }

    pub fn client_with(&self, session: SessionContext) -> ApiClient {
        ApiClient::new(ClientConfig::new(&self.base_url), session).unwrap()
    }

    /// Invalidate every issued token, as if they had expired.
    pub fn revoke_tokens(&self) {
        self.state.lock().unwrap().tokens.clear();
    }

    pub fn log(&self) -> Vec<Recorded> {
        self.state.lock().unwrap().log.clone()
    }

    pub fn last_request(&self) -> Recorded {
        self.log().last().cloned().expect("no request recorded")
    }

    pub fn stored_request(&self, id: &str) -> Value {
        self.state.lock().unwrap().requests[id].clone()
    }

    pub fn sync_bodies(&self) -> Vec<Value> {
        self.state.lock().unwrap().sync_bodies.clone()
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"success": false, "message": message}))).into_response()
}

fn admin_user() -> Value {
    json!({
        "id": "u-admin",
        "email": ADMIN_EMAIL,
        "firstName": "Admin",
        "lastName": "DocuDash",
        "role": "ADMIN",
        "status": "ACTIVE",
        "createdAt": "2024-01-01T00:00:00",
        "subscriptions": []
    })
}

/// Record the request, then require a known bearer token everywhere but login.
async fn authenticate(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let recorded = {
        let header_str = |name: header::HeaderName| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Recorded {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            query: request.uri().query().map(str::to_string),
            authorization: header_str(header::AUTHORIZATION),
            content_type: header_str(header::CONTENT_TYPE),
        }
    };

    let authorized = {
        let mut state = state.lock().unwrap();
        let ok = recorded.path == "/api/auth/login"
            || recorded
                .authorization
                .as_deref()
                .and_then(|v| v.strip_prefix("Bearer "))
                .is_some_and(|token| state.tokens.contains(token));
        state.log.push(recorded);
        ok
    };

    if !authorized {
        return error(StatusCode::UNAUTHORIZED, "Token inválido o expirado");
    }
    next.run(request).await
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    if body["email"] != ADMIN_EMAIL || body["password"] != ADMIN_PASSWORD {
        return error(StatusCode::UNAUTHORIZED, "Credenciales inválidas");
    }

    let token = format!("tok-{}", uuid::Uuid::new_v4());
    state.lock().unwrap().tokens.insert(token.clone());

    let mut user = admin_user();
    if let Some(obj) = user.as_object_mut() {
        obj.remove("status");
        obj.remove("createdAt");
        obj.remove("subscriptions");
    }
    Json(json!({"success": true, "data": {"token": token, "user": user}})).into_response()
}

async fn me() -> Response {
    Json(json!({"success": true, "data": admin_user()})).into_response()
}

async fn list_groups(State(state): State<Shared>) -> Response {
    let groups: Vec<Value> = state.lock().unwrap().groups.values().cloned().collect();
    let total = groups.len();
    Json(json!({
        "success": true,
        "data": groups,
        "pagination": {"page": 1, "limit": 10, "total": total, "totalPages": 1}
    }))
    .into_response()
}

async fn create_group(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let id = uuid::Uuid::new_v4().to_string();
    let group = json!({
        "id": id,
        "name": body["name"],
        "description": body.get("description").cloned().unwrap_or(Value::Null),
        "createdAt": "2024-05-01T10:00:00",
        "_count": {"applications": 0, "subscriptions": 0}
    });
    state.lock().unwrap().groups.insert(id, group.clone());
    (
        StatusCode::CREATED,
        Json(json!({"success": true, "data": group})),
    )
        .into_response()
}

async fn get_group(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    match state.lock().unwrap().groups.get(&id) {
        Some(group) => Json(json!({"success": true, "data": group})).into_response(),
        None => error(StatusCode::NOT_FOUND, "Agrupador no encontrado"),
    }
}

async fn delete_group(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    match state.lock().unwrap().groups.remove(&id) {
        Some(_) => Json(json!({"success": true, "message": "Agrupador eliminado exitosamente"}))
            .into_response(),
        None => error(StatusCode::NOT_FOUND, "Agrupador no encontrado"),
    }
}

async fn empty_list() -> Response {
    Json(json!({
        "success": true,
        "data": [],
        "pagination": {"page": 1, "limit": 10, "total": 0, "totalPages": 0}
    }))
    .into_response()
}

async fn get_request(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    match state.lock().unwrap().requests.get(&id) {
        Some(request) => Json(json!({"success": true, "data": request})).into_response(),
        None => error(StatusCode::NOT_FOUND, "Solicitud no encontrada"),
    }
}

async fn update_request_status(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    let Some(request) = state.requests.get_mut(&id) else {
        return error(StatusCode::NOT_FOUND, "Solicitud no encontrada");
    };

    request["status"] = body["status"].clone();
    if let Some(assignee) = body.get("assigneeId") {
        request["assigneeId"] = assignee.clone();
    }
    if let Some(notes) = body.get("notes").and_then(Value::as_str) {
        request["additionalNotes"] = json!(format!("[2024-05-02 09:00] {}", notes));
    }
    Json(json!({"success": true, "data": request.clone()})).into_response()
}

async fn upload_image(headers: HeaderMap, body: axum::body::Bytes) -> Response {
    let is_multipart = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&body);

    if !is_multipart || !body.contains("name=\"file\"") || !body.contains("image/png") {
        return error(StatusCode::BAD_REQUEST, "Solo se permiten archivos de imagen.");
    }
    Json(json!({"url": "/static/test-request-images/abc123.png"})).into_response()
}

/// Pages through `USER_COUNT` generated users using `page` and `limit`.
async fn list_users(Query(query): Query<HashMap<String, String>>) -> Response {
    let page = query.get("page").and_then(|v| v.parse::<usize>().ok()).unwrap_or(1).max(1);
    let limit = query.get("limit").and_then(|v| v.parse::<usize>().ok()).unwrap_or(10).max(1);
    let total_pages = USER_COUNT.div_ceil(limit);

    let users: Vec<Value> = ((page - 1) * limit..(page * limit).min(USER_COUNT))
        .map(|n| {
            json!({
                "id": format!("user-{}", n),
                "email": format!("qa{}@docudash.com", n),
                "firstName": "QA",
                "lastName": n.to_string(),
                "role": "USER",
                "status": "ACTIVE"
            })
        })
        .collect();

    Json(json!({
        "success": true,
        "data": users,
        "pagination": {"page": page, "limit": limit, "total": USER_COUNT, "totalPages": total_pages}
    }))
    .into_response()
}

/// Reads the project from the query string, like the real server.
async fn sync_pipelines(
    State(state): State<Shared>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    state.lock().unwrap().sync_bodies.push(body);
    let Some(project_id) = query.get("project_id") else {
        return error(StatusCode::UNPROCESSABLE_ENTITY, "project_id es requerido");
    };
    Json(json!({"success": true, "data": {"projectId": project_id, "status": "sync_started"}}))
        .into_response()
}

fn seeded_pipeline() -> Value {
    json!({
        "id": SEEDED_PIPELINE_ID,
        "gitlabProjectId": "42",
        "gitlabPipelineId": "9001",
        "branch": "main",
        "status": "FAILED",
        "webUrl": "https://gitlab.example.com/qa/app/-/pipelines/9001",
        "_count": {"testCaseResults": 2}
    })
}

async fn get_pipeline(Path(id): Path<String>) -> Response {
    if id != SEEDED_PIPELINE_ID {
        return error(StatusCode::NOT_FOUND, "Pipeline no encontrado");
    }
    Json(json!({"success": true, "data": seeded_pipeline()})).into_response()
}

async fn pipeline_results(Path(id): Path<String>) -> Response {
    if id != SEEDED_PIPELINE_ID {
        return error(StatusCode::NOT_FOUND, "Pipeline no encontrado");
    }
    Json(json!({
        "success": true,
        "data": {
            "results": [
                {"id": "r1", "testCaseId": "tc-1", "pipelineId": SEEDED_PIPELINE_ID, "status": "PASSED", "duration": 12},
                {"id": "r2", "testCaseId": "tc-2", "pipelineId": SEEDED_PIPELINE_ID, "status": "FAILED",
                 "details": "Timeout esperando el botón"}
            ],
            "summary": {"total": 2, "passed": 1, "failed": 1, "skipped": 0, "notExecuted": 0}
        }
    }))
    .into_response()
}

async fn dashboard_stats() -> Response {
    Json(json!({
        "success": true,
        "data": {
            "overview": {
                "totalGroups": 1, "totalApplications": 2, "totalFeatures": 3,
                "totalTestCases": 4, "totalRequests": 1, "pendingRequests": 1,
                "recentPipelines": 0
            },
            "testCasesByStatus": [{"status": "PLANNED", "count": 4}],
            "requestsByStatus": [{"status": "NEW", "count": 1}]
        }
    }))
    .into_response()
}
