//! Account creation through the provider's admin API.

use serde::Deserialize;

use super::{AuthClient, Role};
use crate::error::ApiError;

pub const NOT_CONFIGURED: &str = "Server is not configured with a service role key. Please add SUPABASE_SERVICE_ROLE_KEY to the environment.";
pub const MISSING_FIELDS: &str = "Email, password, and role are required.";
pub const DUPLICATE_EMAIL: &str = "This email is already registered. Please sign in.";
pub const UNKNOWN_ROLE: &str = "Role must be one of patient, doctor, admin.";

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Create a confirmed account with role metadata and return its id.
pub async fn register(client: &AuthClient, request: RegisterRequest) -> Result<String, ApiError> {
    if !client.can_administer() {
        return Err(ApiError::NotConfigured(NOT_CONFIGURED.to_string()));
    }

    let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
    let (Some(email), Some(password), Some(role)) = (
        non_empty(request.email),
        non_empty(request.password),
        non_empty(request.role),
    ) else {
        return Err(ApiError::missing(MISSING_FIELDS));
    };
    let role = Role::parse(&role).ok_or_else(|| ApiError::Invalid(UNKNOWN_ROLE.to_string()))?;
    let email = email.trim();

    match client.admin_create_user(email, &password, role).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, %role, "account created");
            Ok(user.id)
        }
        Err(err) if err.is_duplicate_email() => Err(ApiError::Conflict(DUPLICATE_EMAIL.to_string())),
        Err(err) => Err(err.into()),
    }
}
