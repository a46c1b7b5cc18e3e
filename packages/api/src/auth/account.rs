//! Sign in, password change and recovery against the provider.
//!
//! The session server functions are thin wrappers over these.

use super::{AuthClient, Role, SessionUser, UserUpdate};
use crate::error::ApiError;
use crate::validation;

fn unconfirmed_message(email: &str) -> String {
    format!(
        "Please confirm your email address first. Check your inbox at {email} for the confirmation link."
    )
}

/// Password sign in.
///
/// `role` is written to the account only when it carries no role metadata
/// yet. A failed write is logged and the chosen role is used for this session.
pub async fn sign_in(
    client: &AuthClient,
    email: &str,
    password: &str,
    role: Option<Role>,
) -> Result<SessionUser, ApiError> {
    let email = email.trim();
    let signed_in = match client.sign_in_with_password(email, password).await {
        Ok(signed_in) => signed_in,
        Err(err) if err.is_unconfirmed_email() => {
            return Err(ApiError::Unauthorized(unconfirmed_message(email)));
        }
        Err(err) => {
            tracing::info!(error = %err, "sign in rejected");
            return Err(err.into());
        }
    };

    let mut user = signed_in.user.to_info();
    if let (None, Some(role)) = (user.role, role) {
        match client
            .update_user(&signed_in.access_token, &UserUpdate::Role(role))
            .await
        {
            Ok(updated) => user = updated.to_info(),
            Err(err) => {
                tracing::warn!(user_id = %user.id, %role, error = %err, "role write-back failed");
            }
        }
        if user.role.is_none() {
            user.role = Some(role);
        }
    }

    Ok(SessionUser {
        access_token: signed_in.access_token,
        user,
    })
}

/// Set a new password for the account behind `access_token`.
pub async fn change_password(
    client: &AuthClient,
    access_token: &str,
    password: &str,
) -> Result<(), ApiError> {
    validation::validate_new_password(password, password)
        .map_err(|e| ApiError::Invalid(e.to_string()))?;
    client
        .update_user(access_token, &UserUpdate::Password(password.to_string()))
        .await?;
    Ok(())
}

/// Send a recovery e-mail whose link lands on `redirect_to`.
pub async fn send_recovery(client: &AuthClient, email: &str, redirect_to: &str) -> Result<(), ApiError> {
    let email = email.trim();
    validation::validate_email(email).map_err(|e| ApiError::Invalid(e.to_string()))?;
    client.recover(email, redirect_to).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::test_support::spawn_fake;
    use axum::extract::{Query, State};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{post, put};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// What the fake provider received: `(path, bearer token, query, body)`.
    type Calls = Arc<Mutex<Vec<(String, Option<String>, HashMap<String, String>, Value)>>>;

    fn bearer(headers: &HeaderMap) -> Option<String> {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::to_string)
    }

    async fn token(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let user = |id: &str, metadata: Value| {
            json!({ "id": id, "email": body["email"], "user_metadata": metadata })
        };
        match body["email"].as_str().unwrap_or_default() {
            "pending@example.org" => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error_code": "email_not_confirmed", "msg": "Email not confirmed" })),
            ),
            "wrong@example.org" => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "invalid_grant", "error_description": "Invalid login credentials" })),
            ),
            "doctor@example.org" => (
                StatusCode::OK,
                Json(json!({ "access_token": "tok-doctor", "user": user("u-doctor", json!({ "role": "doctor" })) })),
            ),
            "locked@example.org" => (
                StatusCode::OK,
                Json(json!({ "access_token": "tok-locked", "user": user("u-locked", json!({})) })),
            ),
            _ => (
                StatusCode::OK,
                Json(json!({ "access_token": "tok-new", "user": user("u-new", json!({})) })),
            ),
        }
    }

    async fn update(
        State(calls): State<Calls>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let token = bearer(&headers);
        calls
            .lock()
            .unwrap()
            .push(("user".into(), token.clone(), HashMap::new(), body.clone()));
        if token.as_deref() == Some("tok-locked") {
            return (StatusCode::FORBIDDEN, Json(json!({ "msg": "User not allowed" })));
        }
        let metadata = body.get("data").cloned().unwrap_or_else(|| json!({}));
        (
            StatusCode::OK,
            Json(json!({ "id": "u-new", "email": "new@example.org", "user_metadata": metadata })),
        )
    }

    async fn recover(
        State(calls): State<Calls>,
        headers: HeaderMap,
        Query(query): Query<HashMap<String, String>>,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let apikey = headers
            .get("apikey")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        calls
            .lock()
            .unwrap()
            .push(("recover".into(), apikey, query, body));
        Json(json!({}))
    }

    async fn fake_client() -> (AuthClient, Calls) {
        let calls = Calls::default();
        let fake = Router::new()
            .route("/auth/v1/token", post(token))
            .route("/auth/v1/user", put(update))
            .route("/auth/v1/recover", post(recover))
            .with_state(calls.clone());
        let base = spawn_fake(fake).await;
        let config = AppConfig {
            supabase_url: Some(base),
            supabase_anon_key: Some("anon".into()),
            ..AppConfig::default()
        };
        (AuthClient::new(reqwest::Client::new(), &config), calls)
    }

    #[tokio::test]
    async fn test_sign_in_unconfirmed_email() {
        let (client, _) = fake_client().await;
        let err = sign_in(&client, " pending@example.org ", "secret1", None)
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            err.to_string(),
            "Please confirm your email address first. Check your inbox at pending@example.org for the confirmation link."
        );
    }

    #[tokio::test]
    async fn test_sign_in_bad_credentials() {
        let (client, _) = fake_client().await;
        let err = sign_in(&client, "wrong@example.org", "nope", None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid login credentials");
    }

    #[tokio::test]
    async fn test_sign_in_keeps_stored_role() {
        let (client, calls) = fake_client().await;
        let session = sign_in(&client, "doctor@example.org", "secret1", Some(Role::Patient))
            .await
            .unwrap();
        assert_eq!(session.access_token, "tok-doctor");
        assert_eq!(session.user.role, Some(Role::Doctor));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sign_in_writes_missing_role() {
        let (client, calls) = fake_client().await;
        let session = sign_in(&client, "new@example.org", "secret1", Some(Role::Doctor))
            .await
            .unwrap();
        assert_eq!(session.user.role, Some(Role::Doctor));

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (path, token, _, body) = &calls[0];
        assert_eq!(path, "user");
        assert_eq!(token.as_deref(), Some("tok-new"));
        assert_eq!(body, &json!({ "data": { "role": "doctor" } }));
    }

    #[tokio::test]
    async fn test_sign_in_survives_failed_role_write() {
        let (client, calls) = fake_client().await;
        let session = sign_in(&client, "locked@example.org", "secret1", Some(Role::Admin))
            .await
            .unwrap();
        assert_eq!(session.access_token, "tok-locked");
        assert_eq!(session.user.id, "u-locked");
        assert_eq!(session.user.role, Some(Role::Admin));
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sign_in_without_any_role() {
        let (client, calls) = fake_client().await;
        let session = sign_in(&client, "new@example.org", "secret1", None)
            .await
            .unwrap();
        assert_eq!(session.user.role, None);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_change_password() {
        let (client, calls) = fake_client().await;
        change_password(&client, "tok-recovery", "brand-new-pass")
            .await
            .unwrap();

        let calls = calls.lock().unwrap();
        let (_, token, _, body) = &calls[0];
        assert_eq!(token.as_deref(), Some("tok-recovery"));
        assert_eq!(body, &json!({ "password": "brand-new-pass" }));
    }

    #[tokio::test]
    async fn test_change_password_too_short() {
        let (client, calls) = fake_client().await;
        let err = change_password(&client, "tok-recovery", "abc").await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_send_recovery() {
        let (client, calls) = fake_client().await;
        send_recovery(&client, " someone@example.org ", "http://localhost:8080/reset-password")
            .await
            .unwrap();

        let calls = calls.lock().unwrap();
        let (path, apikey, query, body) = &calls[0];
        assert_eq!(path, "recover");
        assert_eq!(apikey.as_deref(), Some("anon"));
        assert_eq!(
            query.get("redirect_to").map(String::as_str),
            Some("http://localhost:8080/reset-password")
        );
        assert_eq!(body, &json!({ "email": "someone@example.org" }));
    }

    #[tokio::test]
    async fn test_send_recovery_invalid_email() {
        let (client, calls) = fake_client().await;
        let err = send_recovery(&client, "not-an-email", "/reset-password")
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(calls.lock().unwrap().is_empty());
    }
}
