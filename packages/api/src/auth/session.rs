//! Session data types.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::models::UserInfo;

/// Key for storing the signed-in user in the session.
pub const SESSION_AUTH_KEY: &str = "auth";

/// What the server keeps about a signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub access_token: String,
    pub user: UserInfo,
}

pub async fn current_user(session: &Session) -> Result<Option<SessionUser>, tower_sessions::session::Error> {
    session.get(SESSION_AUTH_KEY).await
}

pub async fn store_user(session: &Session, user: SessionUser) -> Result<(), tower_sessions::session::Error> {
    session.insert(SESSION_AUTH_KEY, user).await
}
