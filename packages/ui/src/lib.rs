//! This crate contains all shared UI for the workspace.

pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LogoutButton};

mod role_gate;
pub use role_gate::RoleGate;

mod markdown;
pub use markdown::render_markdown;

mod chat_widget;
pub use chat_widget::ChatWidget;

mod risk_card;
pub use risk_card::{RiskCard, RiskSummary};

mod navbar;
pub use navbar::Navbar;
