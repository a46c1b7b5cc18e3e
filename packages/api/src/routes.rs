//! # Public REST routes
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `POST /api/analyze` | Multipart VCF upload plus drug name(s); proxied or placeholder risk results |
//! | `POST /api/auth/register` | Create a confirmed account with role metadata |
//! | `POST /api/chat` | Forward a message and history to the generative-language API |
//! | `GET /api/patients` | Mock patient roster, optionally filtered by `search` |
//! | `POST /api/send-alert` | Acknowledge a critical-finding alert |
//!
//! Failures render through [`ApiError`] as `{"error": "..."}`.

use axum::extract::multipart::MultipartError;
use axum::extract::rejection::{JsonRejection, MultipartRejection};
use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::alerts::{self, AlertRequest};
use crate::analysis::{self, normalize_drugs, VcfUpload};
use crate::auth::{self, RegisterRequest};
use crate::chat::ChatTurn;
use crate::error::ApiError;
use crate::models::{search_patients, AlertAck, AnalysisReport, PatientRecord};
use crate::state::AppState;

/// Largest accepted VCF upload.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Unreadable form data is reported like any other analysis failure.
fn form_error(e: MultipartError) -> ApiError {
    ApiError::upstream(analysis::BACKEND_FAILED, e.body_text())
}

/// A body that does not decode is a client error.
fn body_error(e: JsonRejection) -> ApiError {
    ApiError::Invalid(format!("Invalid request body: {}", e.body_text()))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/analyze",
            post(analyze).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/api/auth/register", post(register))
        .route("/api/chat", post(chat))
        .route("/api/patients", get(patients))
        .route("/api/send-alert", post(send_alert))
        .with_state(state)
}

async fn analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let mut multipart =
        multipart.map_err(|e| ApiError::upstream(analysis::BACKEND_FAILED, e.body_text()))?;
    let mut upload = VcfUpload::default();
    let mut raw_drugs: Vec<String> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(form_error)?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                upload.file_name = field.file_name().unwrap_or("upload.vcf").to_string();
                upload.contents = field
                    .bytes()
                    .await
                    .map_err(form_error)?
                    .to_vec();
            }
            Some("drug") | Some("drugs") => {
                raw_drugs.push(
                    field
                        .text()
                        .await
                        .map_err(form_error)?,
                );
            }
            _ => {}
        }
    }

    let drugs = normalize_drugs(&raw_drugs);
    let report = state.analyzer.analyze(&upload, &drugs).await?;
    Ok(Json(report))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterResponse {
    success: bool,
    user_id: String,
}

async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, ApiError> {
    if !state.auth.can_administer() {
        return Err(ApiError::NotConfigured(auth::NOT_CONFIGURED.to_string()));
    }
    let Json(request) = body.map_err(body_error)?;
    let user_id = auth::register(&state.auth, request).await?;
    Ok(Json(RegisterResponse {
        success: true,
        user_id,
    }))
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    history: Option<Vec<ChatTurn>>,
}

async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    if !state.chat.is_configured() {
        return Err(ApiError::NotConfigured(
            "Gemini API key not configured.".to_string(),
        ));
    }
    let Json(request) = body.map_err(body_error)?;
    let message = request
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::missing("Message is required."))?;

    let history = request.history.unwrap_or_default();
    let reply = state.chat.reply(&message, &history).await?;
    Ok(Json(json!({ "reply": reply })))
}

#[derive(Debug, Deserialize)]
struct PatientQuery {
    search: Option<String>,
}

#[derive(Debug, Serialize)]
struct PatientList {
    success: bool,
    patients: Vec<PatientRecord>,
    total: usize,
}

async fn patients(Query(query): Query<PatientQuery>) -> Json<PatientList> {
    let patients = search_patients(query.search.as_deref());
    Json(PatientList {
        success: true,
        total: patients.len(),
        patients,
    })
}

#[derive(Debug, Serialize)]
struct AlertResponse {
    success: bool,
    alert: AlertAck,
}

async fn send_alert(
    State(state): State<AppState>,
    body: Result<Json<AlertRequest>, JsonRejection>,
) -> Result<Json<AlertResponse>, ApiError> {
    let Json(request) = body.map_err(|e| {
        tracing::warn!(error = %e, "malformed alert request");
        ApiError::Internal(alerts::SEND_FAILED.to_string())
    })?;
    let alert = alerts::dispatch(request, state.config.alert_delay).await?;
    Ok(Json(AlertResponse {
        success: true,
        alert,
    }))
}
