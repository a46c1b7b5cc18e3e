//! # API crate: shared fullstack server functions for PharmaGuard
//!
//! Everything the dashboards share with the server lives here: roles and access
//! gating, the keyword chat matcher, mock data models, form validation, and the
//! Dioxus server functions the UI calls. With the `server` feature the crate
//! also carries the REST router and the clients for the external services.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | - | Roles, dashboard access decisions, post-login redirect; server side the auth provider client and session data |
//! | [`chat`] | - | Offline keyword matcher for the chat widget; server side the generative-language client |
//! | [`models`] | - | Risk results, patient roster, alert acknowledgements, client-safe `UserInfo` |
//! | [`validation`] | - | Registration and password form checks |
//! | `config` | `server` | `AppConfig` read from the environment (`.env` via dotenvy) |
//! | `error` | `server` | `ApiError`, rendered as `{"error": ...}` JSON |
//! | `analysis` | `server` | Analysis backend proxy and placeholder results |
//! | `alerts` | `server` | Critical-finding alert acknowledgement |
//! | `routes` | `server` | The public `/api/*` axum router |
//! | `state` | `server` | Shared `AppState` singleton |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is a Dioxus server function, compiled
//! twice: with the server logic behind `#[cfg(feature = "server")]` and as a
//! client stub forwarding the call over HTTP.
//!
//! - **Session**: `get_current_user`, `login_password`, `logout`,
//!   `request_password_reset`, `update_password`, `register_account`
//! - **Dashboards**: `analyze_vcf`, `list_patients`, `send_alert`

use dioxus::prelude::*;

pub mod auth;
pub mod chat;
pub mod models;
pub mod validation;

#[cfg(feature = "server")]
pub mod alerts;
#[cfg(feature = "server")]
pub mod analysis;
#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod error;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod state;
#[cfg(all(test, feature = "server"))]
mod test_support;

pub use auth::Role;
pub use models::{AlertAck, AnalysisReport, PatientRecord, UserInfo};

#[cfg(feature = "server")]
fn server_error(e: impl std::fmt::Display) -> ServerFnError {
    ServerFnError::new(e.to_string())
}

/// The signed-in user, if any; fails when no user is signed in.
#[cfg(feature = "server")]
async fn require_user(session: &tower_sessions::Session) -> Result<auth::SessionUser, ServerFnError> {
    auth::current_user(session)
        .await
        .map_err(server_error)?
        .ok_or_else(|| ServerFnError::new("Not signed in"))
}

/// Get the current authenticated user from the session.
#[cfg(feature = "server")]
#[get("/api/session/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    let user = auth::current_user(&session).await.map_err(server_error)?;
    Ok(user.map(|u| u.user))
}

#[cfg(not(feature = "server"))]
#[get("/api/session/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Sign in with e-mail and password.
///
/// `role` is only a fallback: it is written to the account when the account
/// carries no role metadata yet.
#[cfg(feature = "server")]
#[post("/api/session/login", session: tower_sessions::Session)]
pub async fn login_password(
    email: String,
    password: String,
    role: Option<Role>,
) -> Result<UserInfo, ServerFnError> {
    let state = state::AppState::shared();
    let signed_in = auth::sign_in(&state.auth, &email, &password, role)
        .await
        .map_err(server_error)?;
    let user = signed_in.user.clone();
    auth::store_user(&session, signed_in)
        .await
        .map_err(server_error)?;

    tracing::info!(user_id = %user.id, role = ?user.role, "signed in");
    Ok(user)
}

#[cfg(not(feature = "server"))]
#[post("/api/session/login")]
pub async fn login_password(
    email: String,
    password: String,
    role: Option<Role>,
) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log out: revoke the provider token and clear the session.
#[cfg(feature = "server")]
#[post("/api/session/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    if let Ok(Some(user)) = auth::current_user(&session).await {
        let state = state::AppState::shared();
        if let Err(err) = state.auth.sign_out(&user.access_token).await {
            tracing::warn!(error = %err, "provider sign out failed");
        }
    }

    session.flush().await.map_err(server_error)?;
    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/session/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// Send a password recovery e-mail.
#[cfg(feature = "server")]
#[post("/api/session/forgot-password")]
pub async fn request_password_reset(email: String) -> Result<(), ServerFnError> {
    let state = state::AppState::shared();
    auth::send_recovery(&state.auth, &email, &state.config.password_reset_redirect)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/session/forgot-password")]
pub async fn request_password_reset(email: String) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Set a new password.
///
/// `recovery_token` is the access token from a recovery link. Without one the
/// signed-in session's token is used.
#[cfg(feature = "server")]
#[post("/api/session/reset-password", session: tower_sessions::Session)]
pub async fn update_password(
    password: String,
    recovery_token: Option<String>,
) -> Result<(), ServerFnError> {
    validation::validate_new_password(&password, &password).map_err(server_error)?;
    let token = match recovery_token.filter(|t| !t.is_empty()) {
        Some(token) => token,
        None => require_user(&session).await?.access_token,
    };

    let state = state::AppState::shared();
    auth::change_password(&state.auth, &token, &password)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/session/reset-password")]
pub async fn update_password(
    password: String,
    recovery_token: Option<String>,
) -> Result<(), ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Create an account; returns the new user id.
#[cfg(feature = "server")]
#[post("/api/session/register")]
pub async fn register_account(
    email: String,
    password: String,
    role: Role,
) -> Result<String, ServerFnError> {
    let state = state::AppState::shared();
    let request = auth::RegisterRequest {
        email: Some(email),
        password: Some(password),
        role: Some(role.as_str().to_string()),
    };
    auth::register(&state.auth, request).await.map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/session/register")]
pub async fn register_account(
    email: String,
    password: String,
    role: Role,
) -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Risk results for `drugs` against an uploaded VCF.
#[cfg(feature = "server")]
#[post("/api/dashboard/analyze", session: tower_sessions::Session)]
pub async fn analyze_vcf(
    file_name: String,
    contents: Vec<u8>,
    drugs: Vec<String>,
) -> Result<AnalysisReport, ServerFnError> {
    require_user(&session).await?;

    let upload = analysis::VcfUpload::new(file_name, contents);
    let drugs = analysis::normalize_drugs(&drugs);
    state::AppState::shared()
        .analyzer
        .analyze(&upload, &drugs)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/dashboard/analyze")]
pub async fn analyze_vcf(
    file_name: String,
    contents: Vec<u8>,
    drugs: Vec<String>,
) -> Result<AnalysisReport, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// The mock patient roster, optionally filtered.
#[cfg(feature = "server")]
#[post("/api/dashboard/patients", session: tower_sessions::Session)]
pub async fn list_patients(search: Option<String>) -> Result<Vec<PatientRecord>, ServerFnError> {
    require_user(&session).await?;
    Ok(models::search_patients(search.as_deref()))
}

#[cfg(not(feature = "server"))]
#[post("/api/dashboard/patients")]
pub async fn list_patients(search: Option<String>) -> Result<Vec<PatientRecord>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Acknowledge a critical-finding alert for a patient.
#[cfg(feature = "server")]
#[post("/api/dashboard/send-alert", session: tower_sessions::Session)]
pub async fn send_alert(
    patient_id: String,
    severity: Option<String>,
    message: Option<String>,
) -> Result<AlertAck, ServerFnError> {
    require_user(&session).await?;

    let request = alerts::AlertRequest {
        patient_id: Some(serde_json::Value::String(patient_id)),
        severity,
        message,
    };
    let state = state::AppState::shared();
    alerts::dispatch(request, state.config.alert_delay)
        .await
        .map_err(server_error)
}

#[cfg(not(feature = "server"))]
#[post("/api/dashboard/send-alert")]
pub async fn send_alert(
    patient_id: String,
    severity: Option<String>,
    message: Option<String>,
) -> Result<AlertAck, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
