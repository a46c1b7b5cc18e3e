//! Authentication: roles, dashboard gating, and (server side) the external
//! auth provider and session plumbing.

mod access;
mod role;

#[cfg(feature = "server")]
mod account;
#[cfg(feature = "server")]
mod provider;
#[cfg(feature = "server")]
mod register;
#[cfg(feature = "server")]
mod session;

pub use access::{login_target, resolve_access, Access};
pub use role::Role;

#[cfg(feature = "server")]
pub use account::{change_password, send_recovery, sign_in};
#[cfg(feature = "server")]
pub use provider::{AuthClient, AuthError, ProviderSession, ProviderUser, UserUpdate};
#[cfg(feature = "server")]
pub use register::{register, RegisterRequest, DUPLICATE_EMAIL, MISSING_FIELDS, NOT_CONFIGURED};
#[cfg(feature = "server")]
pub use session::{current_user, store_user, SessionUser, SESSION_AUTH_KEY};
