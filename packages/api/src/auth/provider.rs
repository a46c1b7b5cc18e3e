//! # Auth provider client (Supabase GoTrue REST API)
//!
//! The provider owns every account: credentials, confirmation state and the
//! `{role}` user metadata. This client covers the handful of calls the
//! dashboards need:
//!
//! - [`AuthClient::sign_in_with_password`]: password grant, returns an access token and user.
//! - [`AuthClient::admin_create_user`]: service-role account creation, pre-confirmed.
//! - [`AuthClient::update_user`]: set role metadata or a new password.
//! - [`AuthClient::recover`]: send a password recovery e-mail.
//! - [`AuthClient::sign_out`]: revoke an access token.
//!
//! Rejections are surfaced as [`AuthError::Rejected`] with the provider's own
//! message, whichever of `msg`, `error_description`, `message` or `error` it used.

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use super::Role;
use crate::config::AppConfig;
use crate::models::UserInfo;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    NotConfigured(&'static str),
    #[error("{message}")]
    Rejected {
        status: u16,
        code: Option<String>,
        message: String,
    },
    #[error("Auth provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl AuthError {
    fn matches(&self, codes: &[&str], phrases: &[&str]) -> bool {
        let AuthError::Rejected { code, message, .. } = self else {
            return false;
        };
        if code.as_deref().is_some_and(|c| codes.contains(&c)) {
            return true;
        }
        let message = message.to_lowercase();
        phrases.iter().any(|p| message.contains(p))
    }

    /// The e-mail address already belongs to an account.
    pub fn is_duplicate_email(&self) -> bool {
        self.matches(
            &["email_exists", "user_already_exists"],
            &["already been registered", "already registered", "user already exists"],
        )
    }

    pub fn is_unconfirmed_email(&self) -> bool {
        self.matches(&["email_not_confirmed"], &["email not confirmed"])
    }

    /// Build a rejection from a provider error body.
    pub fn from_body(status: u16, body: &Value) -> Self {
        let message = ["msg", "error_description", "message", "error"]
            .iter()
            .find_map(|key| body.get(key).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| format!("Auth provider returned status {status}"));
        let code = ["error_code", "code"]
            .iter()
            .find_map(|key| body.get(key).and_then(Value::as_str))
            .map(str::to_string);
        AuthError::Rejected {
            status,
            code,
            message,
        }
    }
}

/// Account as returned by the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Value,
}

impl ProviderUser {
    pub fn role(&self) -> Option<Role> {
        Role::from_metadata(&self.user_metadata)
    }

    pub fn to_info(&self) -> UserInfo {
        UserInfo {
            id: self.id.clone(),
            email: self.email.clone().unwrap_or_default(),
            role: self.role(),
        }
    }
}

/// Result of a password sign in.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: ProviderUser,
}

/// Changes applied to the signed-in account.
#[derive(Debug, Clone, PartialEq)]
pub enum UserUpdate {
    Role(Role),
    Password(String),
}

impl UserUpdate {
    fn body(&self) -> Value {
        match self {
            UserUpdate::Role(role) => json!({ "data": { "role": role } }),
            UserUpdate::Password(password) => json!({ "password": password }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthClient {
    http: Client,
    base_url: Option<String>,
    anon_key: Option<String>,
    service_role_key: Option<String>,
}

impl AuthClient {
    pub fn new(http: Client, config: &AppConfig) -> Self {
        Self {
            http,
            base_url: config.supabase_url.clone(),
            anon_key: config.supabase_anon_key.clone(),
            service_role_key: config.supabase_service_role_key.clone(),
        }
    }

    /// Whether accounts can be created (URL and service-role key present).
    pub fn can_administer(&self) -> bool {
        self.base_url.is_some() && self.service_role_key.is_some()
    }

    fn endpoint(&self, path: &str) -> Result<String, AuthError> {
        let base = self.base_url.as_deref().ok_or(AuthError::NotConfigured(
            "Auth provider URL is not configured",
        ))?;
        Ok(format!("{base}/auth/v1/{path}"))
    }

    fn public(&self, builder: RequestBuilder) -> Result<RequestBuilder, AuthError> {
        let key = self.anon_key.as_deref().ok_or(AuthError::NotConfigured(
            "Auth provider anon key is not configured",
        ))?;
        Ok(builder.header("apikey", key))
    }

    fn admin(&self, builder: RequestBuilder) -> Result<RequestBuilder, AuthError> {
        let key = self.service_role_key.as_deref().ok_or(AuthError::NotConfigured(
            "Auth provider service role key is not configured",
        ))?;
        Ok(builder.header("apikey", key).bearer_auth(key))
    }

    async fn check(response: Response) -> Result<Response, AuthError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body: Value = response.json().await.unwrap_or_default();
        let err = AuthError::from_body(status.as_u16(), &body);
        tracing::debug!(status = status.as_u16(), error = %err, "auth provider rejected request");
        Err(err)
    }

    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<ProviderSession, AuthError> {
        let url = self.endpoint("token")?;
        let request = self
            .public(self.http.post(url))?
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }));
        let response = Self::check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    /// Create a confirmed account carrying `{role}` metadata.
    pub async fn admin_create_user(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<ProviderUser, AuthError> {
        let url = self.endpoint("admin/users")?;
        let request = self.admin(self.http.post(url))?.json(&json!({
            "email": email,
            "password": password,
            "email_confirm": true,
            "user_metadata": { "role": role },
        }));
        let response = Self::check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    pub async fn update_user(
        &self,
        access_token: &str,
        update: &UserUpdate,
    ) -> Result<ProviderUser, AuthError> {
        let url = self.endpoint("user")?;
        let request = self
            .public(self.http.put(url))?
            .bearer_auth(access_token)
            .json(&update.body());
        let response = Self::check(request.send().await?).await?;
        Ok(response.json().await?)
    }

    pub async fn recover(&self, email: &str, redirect_to: &str) -> Result<(), AuthError> {
        let url = self.endpoint("recover")?;
        let request = self
            .public(self.http.post(url))?
            .query(&[("redirect_to", redirect_to)])
            .json(&json!({ "email": email }));
        Self::check(request.send().await?).await?;
        Ok(())
    }

    pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let url = self.endpoint("logout")?;
        let request = self.public(self.http.post(url))?.bearer_auth(access_token);
        Self::check(request.send().await?).await?;
        Ok(())
    }
}
