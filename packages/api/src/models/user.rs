//! # Signed-in user, as seen by the dashboards
//!
//! The account itself lives with the external auth provider; this is the
//! client-safe projection kept in the server session and handed to the UI.
//! It never carries the provider's access token.

use serde::{Deserialize, Serialize};

use crate::auth::Role;

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    /// `None` when the account was created without role metadata.
    pub role: Option<Role>,
}

impl UserInfo {
    pub fn display_name(&self) -> &str {
        self.email.split('@').next().unwrap_or(&self.email)
    }

    pub fn home_path(&self) -> &'static str {
        self.role.unwrap_or(Role::Patient).dashboard_path()
    }
}
